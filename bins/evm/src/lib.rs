//! Library surface for the `evm` fixture harness, split out from `main`
//! so integration tests (`tests/`) can drive `fixture::run_fixture`
//! directly instead of shelling out to the binary.

pub mod fixture;
