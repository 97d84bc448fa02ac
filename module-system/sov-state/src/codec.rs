//! How state containers turn keys and values into bytes.

/// Encodes keys of a state container.
pub trait StateKeyCodec<K> {
    /// Why a byte string is not a valid key.
    type KeyError: std::fmt::Debug;

    /// Encodes `key`. Every key must be encodable, so this does not fail.
    fn encode_key(&self, key: &K) -> Vec<u8>;

    /// Decodes a key previously produced by [`StateKeyCodec::encode_key`].
    fn try_decode_key(&self, bytes: &[u8]) -> Result<K, Self::KeyError>;
}

/// Encodes values of a state container.
pub trait StateValueCodec<V> {
    /// Why a byte string is not a valid value.
    type ValueError: std::fmt::Debug;

    /// Encodes `value`. Every value must be encodable, so this does not fail.
    fn encode_value(&self, value: &V) -> Vec<u8>;

    /// Decodes a value previously produced by [`StateValueCodec::encode_value`].
    fn try_decode_value(&self, bytes: &[u8]) -> Result<V, Self::ValueError>;

    /// Decodes a value read back from storage.
    ///
    /// # Panics
    /// If the bytes do not decode. Containers only read what they wrote with
    /// the same codec, so this only happens on corrupted storage.
    fn decode_value(&self, bytes: &[u8]) -> V {
        self.try_decode_value(bytes).unwrap_or_else(|err| {
            panic!(
                "Failed to decode value 0x{}, error: {:?}",
                hex::encode(bytes),
                err
            )
        })
    }
}

/// Shorthand for a codec of both keys and values.
pub trait StateCodec<K, V>: StateKeyCodec<K> + StateValueCodec<V> {}

impl<K, V, C> StateCodec<K, V> for C where C: StateKeyCodec<K> + StateValueCodec<V> {}

/// Encodes keys and values with [`borsh`]. The default codec of every container.
#[derive(Debug, Default, PartialEq, Eq, Clone, borsh::BorshDeserialize, borsh::BorshSerialize)]
pub struct BorshCodec;

impl<K> StateKeyCodec<K> for BorshCodec
where
    K: borsh::BorshSerialize + borsh::BorshDeserialize,
{
    type KeyError = std::io::Error;

    fn encode_key(&self, key: &K) -> Vec<u8> {
        key.try_to_vec().expect("Failed to serialize key")
    }

    fn try_decode_key(&self, bytes: &[u8]) -> Result<K, Self::KeyError> {
        K::try_from_slice(bytes)
    }
}

impl<V> StateValueCodec<V> for BorshCodec
where
    V: borsh::BorshSerialize + borsh::BorshDeserialize,
{
    type ValueError = std::io::Error;

    fn encode_value(&self, value: &V) -> Vec<u8> {
        value.try_to_vec().expect("Failed to serialize value")
    }

    fn try_decode_value(&self, bytes: &[u8]) -> Result<V, Self::ValueError> {
        V::try_from_slice(bytes)
    }
}
