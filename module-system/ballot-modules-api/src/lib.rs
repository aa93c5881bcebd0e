#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod address;
/// The context used by the ledger and in tests.
pub mod default_context;
mod error;
mod module;
mod prefix;
#[cfg(test)]
mod tests;
/// Helpers for deriving addresses.
pub mod utils;

pub use address::{Address, AddressBech32, BasicAddress, Bech32ParseError, ADDRESS_LEN};
pub use ballot_state::codec::BorshCodec;
pub use ballot_state::storage::{StorageKey, StorageValue};
pub use ballot_state::{
    Event, MemoryStorage, Prefix, StateCheckpoint, StateMap, StateMapError, StateValue,
    StateValueError, StateVec, StateVecError, Storage, WorkingSet,
};
pub use error::ModuleError;
pub use module::{
    CallResponse, Context, Genesis, Module, ModuleCallJsonSchema, ModuleInfo, Spec,
};
pub use prefix::ModulePrefix;
