use ballot_state::MemoryStorage;
use serde::{Deserialize, Serialize};

use crate::{Address, Context, Spec};

/// The [`Context`] used by the ledger: in-memory storage and SHA-256.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultContext {
    /// The authenticated caller.
    pub sender: Address,
}

impl Spec for DefaultContext {
    type Address = Address;
    type Storage = MemoryStorage;
    type Hasher = sha2::Sha256;
}

impl Context for DefaultContext {
    fn sender(&self) -> &Self::Address {
        &self.sender
    }

    fn new(sender: Self::Address) -> Self {
        Self { sender }
    }
}
