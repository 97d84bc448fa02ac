use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// An event recorded while a call executes: a textual key and an opaque value.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Event {
    key: String,
    value: Vec<u8>,
}

impl Event {
    /// An event with a textual value.
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.as_bytes().to_vec(),
        }
    }

    /// An event whose value is the borsh encoding of `value`.
    pub fn encoded<T: BorshSerialize>(key: &str, value: &T) -> Self {
        Self {
            key: key.to_owned(),
            value: value.try_to_vec().expect("Failed to serialize event"),
        }
    }

    /// The key the event was recorded under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Decodes the value of an event built with [`Event::encoded`].
    pub fn decode_value<T: BorshDeserialize>(&self) -> std::io::Result<T> {
        T::try_from_slice(&self.value)
    }
}
