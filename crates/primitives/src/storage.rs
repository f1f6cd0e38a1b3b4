use alloy::primitives::{Address, U256};

use crate::evm_types::{EvmAccount, EvmStorage};

impl EvmStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch (creating an empty account if absent) the account at
    /// `address`.
    pub fn account_mut(&mut self, address: Address) -> &mut EvmAccount {
        self.data.entry(address).or_default()
    }

    pub fn account(&self, address: Address) -> Option<&EvmAccount> {
        self.data.get(&address)
    }

    /// Absent accounts have a balance of zero, matching the "missing
    /// keys read as 0" convention storage itself uses.
    pub fn balance_of(&self, address: Address) -> U256 {
        self.data.get(&address).map(|a| a.balance).unwrap_or_default()
    }

    pub fn code_of(&self, address: Address) -> alloy::primitives::Bytes {
        self.data
            .get(&address)
            .map(|a| a.code.clone())
            .unwrap_or_default()
    }

    /// `SLOAD`. Missing keys, and accounts that don't exist at all, read
    /// as zero.
    pub fn s_load(&self, address: Address, key: U256) -> U256 {
        self.data
            .get(&address)
            .and_then(|account| account.storage.get(&key).copied())
            .unwrap_or_default()
    }

    /// `SSTORE`.
    pub fn s_store(&mut self, address: Address, key: U256, value: U256) {
        self.account_mut(address).storage.insert(key, value);
    }

    /// Remove an account entirely, as `SELFDESTRUCT` requires.
    pub fn remove_account(&mut self, address: Address) -> Option<EvmAccount> {
        self.data.remove(&address)
    }

    /// Move `amount` of balance from `from` to `to`, creating `to` if it
    /// doesn't yet exist. Used by `SELFDESTRUCT` and by CALL/CREATE value
    /// transfer.
    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) {
        if amount.is_zero() {
            self.account_mut(to);
            return;
        }
        self.account_mut(from).balance -= amount;
        self.account_mut(to).balance += amount;
    }
}
