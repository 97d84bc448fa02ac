//! Helpers shared by modules and their tests.

use sha2::Digest;

use crate::{Context, Spec};

/// Derives a deterministic address from `key` by hashing it with the context hasher.
pub fn generate_address<C: Context>(key: &str) -> <C as Spec>::Address {
    let hash: [u8; 32] = <C as Spec>::Hasher::digest(key.as_bytes()).into();
    C::Address::from(hash)
}
