//! JSON fixture format: loads a `{code, tx?, block?, state?, expect}`
//! document, builds the `Transaction`/`BlockEnv`/`EvmStorage` it
//! describes, runs it through `evm_core::run`, and diffs the outcome
//! against `expect`.

use std::{collections::HashMap, fs, path::Path};

use alloy::primitives::{Address, Bytes, B256, U256};
use evm_core::ExecutionOutcome;
use primitives::evm_types::{BlockEnv, EvmAccount, EvmStorage, Transaction};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid hex value {value:?}: {source}")]
    Hex {
        value: String,
        #[source]
        source: hex::FromHexError,
    },
}

#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub code: CodeField,
    #[serde(default)]
    pub tx: Option<TxField>,
    #[serde(default)]
    pub block: Option<BlockField>,
    #[serde(default)]
    pub state: Option<HashMap<String, AccountField>>,
    pub expect: ExpectField,
}

#[derive(Debug, Deserialize)]
pub struct CodeField {
    pub bin: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct TxField {
    pub to: Option<String>,
    pub from: Option<String>,
    pub origin: Option<String>,
    pub gasprice: Option<String>,
    pub value: Option<String>,
    pub data: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct BlockField {
    pub coinbase: Option<String>,
    pub basefee: Option<String>,
    pub timestamp: Option<String>,
    pub number: Option<String>,
    pub difficulty: Option<String>,
    pub gaslimit: Option<String>,
    pub chainid: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AccountField {
    pub balance: Option<String>,
    pub nonce: Option<String>,
    pub code: Option<CodeField>,
    pub storage: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectField {
    pub success: bool,
    pub stack: Option<Vec<String>>,
    #[serde(rename = "return")]
    pub return_value: Option<String>,
    pub logs: Option<Vec<ExpectLog>>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectLog {
    pub address: String,
    pub data: String,
    pub topics: Vec<String>,
}

/// Outcome of comparing one fixture's actual result to its `expect` block.
#[derive(Debug)]
pub struct FixtureReport {
    pub path: String,
    pub passed: bool,
    pub mismatch: Option<String>,
}

fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

fn parse_bytes(value: &str) -> Result<Vec<u8>, FixtureError> {
    let stripped = strip_0x(value);
    let padded;
    let normalized = if stripped.len() % 2 == 1 {
        padded = format!("0{stripped}");
        padded.as_str()
    } else {
        stripped
    };
    hex::decode(normalized).map_err(|source| FixtureError::Hex {
        value: value.to_string(),
        source,
    })
}

fn parse_u256(value: &str) -> Result<U256, FixtureError> {
    let bytes = parse_bytes(value)?;
    let mut padded = [0u8; 32];
    let start = 32usize.saturating_sub(bytes.len());
    padded[start..].copy_from_slice(&bytes[bytes.len().saturating_sub(32)..]);
    Ok(U256::from_be_bytes(padded))
}

fn parse_address(value: &str) -> Result<Address, FixtureError> {
    let bytes = parse_bytes(value)?;
    let mut padded = [0u8; 20];
    let start = 20usize.saturating_sub(bytes.len());
    padded[start..].copy_from_slice(&bytes[bytes.len().saturating_sub(20)..]);
    Ok(Address::from(padded))
}

fn parse_b256(value: &str) -> Result<B256, FixtureError> {
    let bytes = parse_bytes(value)?;
    let mut padded = [0u8; 32];
    let start = 32usize.saturating_sub(bytes.len());
    padded[start..].copy_from_slice(&bytes[bytes.len().saturating_sub(32)..]);
    Ok(B256::from(padded))
}

fn u64_from_field(value: &Option<String>) -> Result<u64, FixtureError> {
    match value {
        None => Ok(0),
        Some(v) => Ok(parse_u256(v)?.to::<u64>()),
    }
}

fn build_transaction(tx: &Option<TxField>) -> Result<Transaction, FixtureError> {
    let Some(tx) = tx else {
        return Ok(Transaction::default());
    };
    Ok(Transaction {
        address: match &tx.to {
            Some(v) => parse_address(v)?,
            None => Address::ZERO,
        },
        caller: match &tx.from {
            Some(v) => parse_address(v)?,
            None => Address::ZERO,
        },
        origin: match &tx.origin {
            Some(v) => parse_address(v)?,
            None => Address::ZERO,
        },
        gas_price: match &tx.gasprice {
            Some(v) => parse_u256(v)?,
            None => U256::ZERO,
        },
        value: match &tx.value {
            Some(v) => parse_u256(v)?,
            None => U256::ZERO,
        },
        data: match &tx.data {
            Some(v) => Bytes::from(parse_bytes(v)?),
            None => Bytes::new(),
        },
    })
}

fn build_block(block: &Option<BlockField>) -> Result<BlockEnv, FixtureError> {
    let Some(block) = block else {
        return Ok(BlockEnv::default());
    };
    Ok(BlockEnv {
        coinbase: match &block.coinbase {
            Some(v) => parse_address(v)?,
            None => Address::ZERO,
        },
        base_fee: match &block.basefee {
            Some(v) => parse_u256(v)?,
            None => U256::ZERO,
        },
        timestamp: match &block.timestamp {
            Some(v) => parse_u256(v)?,
            None => U256::ZERO,
        },
        number: match &block.number {
            Some(v) => parse_u256(v)?,
            None => U256::ZERO,
        },
        difficulty: match &block.difficulty {
            Some(v) => parse_u256(v)?,
            None => U256::ZERO,
        },
        gas_limit: match &block.gaslimit {
            Some(v) => parse_u256(v)?,
            None => U256::ZERO,
        },
        chain_id: match &block.chainid {
            Some(v) => parse_u256(v)?,
            None => U256::ZERO,
        },
    })
}

fn build_state(
    state: &Option<HashMap<String, AccountField>>,
) -> Result<EvmStorage, FixtureError> {
    let mut world = EvmStorage::default();
    let Some(state) = state else {
        return Ok(world);
    };
    for (address, account) in state {
        let addr = parse_address(address)?;
        let mut storage = HashMap::new();
        if let Some(slots) = &account.storage {
            for (k, v) in slots {
                storage.insert(parse_u256(k)?, parse_u256(v)?);
            }
        }
        let entry = EvmAccount {
            balance: match &account.balance {
                Some(v) => parse_u256(v)?,
                None => U256::ZERO,
            },
            nonce: u64_from_field(&account.nonce)?,
            code: match &account.code {
                Some(c) => Bytes::from(parse_bytes(&c.bin)?),
                None => Bytes::new(),
            },
            storage,
        };
        *world.account_mut(addr) = entry;
    }
    Ok(world)
}

fn format_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn mismatch(message: String) -> FixtureReport {
    FixtureReport {
        path: String::new(),
        passed: false,
        mismatch: Some(message),
    }
}

fn check(fixture: &Fixture, outcome: &ExecutionOutcome) -> FixtureReport {
    let expect = &fixture.expect;
    if outcome.success != expect.success {
        return mismatch(format!(
            "success mismatch: expected {}, got {}",
            expect.success, outcome.success
        ));
    }
    if let Some(expected_stack) = &expect.stack {
        // `expect.stack` is top-first; `outcome.stack` is bottom-first
        // (index 0 is the deepest element), so compare in reverse.
        let actual: Vec<U256> = outcome.stack.iter().rev().copied().collect();
        let expected: Result<Vec<U256>, FixtureError> =
            expected_stack.iter().map(|s| parse_u256(s)).collect();
        let expected = match expected {
            Ok(e) => e,
            Err(e) => return mismatch(e.to_string()),
        };
        if actual != expected {
            let actual_hex: Vec<String> = actual
                .iter()
                .map(|w| format_hex(&w.to_be_bytes::<32>()))
                .collect();
            return mismatch(format!(
                "stack mismatch: expected {:?}, got {:?}",
                expected_stack, actual_hex
            ));
        }
    }
    if let Some(expected_return) = &expect.return_value {
        let want = match parse_bytes(expected_return) {
            Ok(w) => w,
            Err(e) => return mismatch(e.to_string()),
        };
        if outcome.return_data.as_ref() != want.as_slice() {
            return mismatch(format!(
                "return data mismatch: expected {}, got {}",
                expected_return,
                format_hex(&outcome.return_data)
            ));
        }
    }
    if let Some(expected_logs) = &expect.logs {
        if outcome.logs.len() != expected_logs.len() {
            return mismatch(format!(
                "log count mismatch: expected {}, got {}",
                expected_logs.len(),
                outcome.logs.len()
            ));
        }
        for (got, want) in outcome.logs.iter().zip(expected_logs.iter()) {
            let want_address = match parse_address(&want.address) {
                Ok(a) => a,
                Err(e) => return mismatch(e.to_string()),
            };
            if got.address != want_address {
                return mismatch("log address mismatch".to_string());
            }
            let want_data = match parse_bytes(&want.data) {
                Ok(d) => d,
                Err(e) => return mismatch(e.to_string()),
            };
            if got.data.as_ref() != want_data.as_slice() {
                return mismatch("log data mismatch".to_string());
            }
            if got.topics.len() != want.topics.len() {
                return mismatch("log topic count mismatch".to_string());
            }
            for (got_topic, want_topic) in got.topics.iter().zip(want.topics.iter()) {
                let want_topic = match parse_b256(want_topic) {
                    Ok(t) => t,
                    Err(e) => return mismatch(e.to_string()),
                };
                if *got_topic != want_topic {
                    return mismatch("log topic mismatch".to_string());
                }
            }
        }
    }
    FixtureReport {
        path: String::new(),
        passed: true,
        mismatch: None,
    }
}

pub fn run_fixture(path: &Path) -> Result<FixtureReport, FixtureError> {
    let raw = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let fixture: Fixture = serde_json::from_str(&raw).map_err(|source| FixtureError::Json {
        path: path.display().to_string(),
        source,
    })?;

    let code = Bytes::from(parse_bytes(&fixture.code.bin)?);
    let tx = build_transaction(&fixture.tx)?;
    let block = build_block(&fixture.block)?;
    let mut state = build_state(&fixture.state)?;

    let outcome = evm_core::run(code, tx, block, &mut state, true);
    let mut report = check(&fixture, &outcome);
    report.path = path.display().to_string();
    Ok(report)
}
