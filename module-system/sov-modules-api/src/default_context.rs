//! The [`Context`] used by every native deployment of the module system.

use serde::{Deserialize, Serialize};
use sov_state::InMemoryStorage;

use crate::{Address, Context, Spec};

/// Context carrying the sender of the transaction being executed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultContext {
    /// Sender of the transaction.
    pub sender: Address,
}

impl Spec for DefaultContext {
    type Address = Address;
    type Storage = InMemoryStorage;
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
