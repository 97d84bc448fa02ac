use sha2::Digest;

use crate::Context;

const SEPARATOR: u8 = b'/';

/// Names a module, or one state variable of a module, as
/// `<module_path>/<module_name>/[<storage_name>/]`.
///
/// The module form hashes into the module address, the storage form is the
/// prefix of every key that state variable writes.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ModulePrefix {
    module_path: &'static str,
    module_name: &'static str,
    storage_name: Option<&'static str>,
}

impl ModulePrefix {
    /// Prefix of the state variable `storage_name`.
    pub fn new_storage(
        module_path: &'static str,
        module_name: &'static str,
        storage_name: &'static str,
    ) -> Self {
        Self {
            module_path,
            module_name,
            storage_name: Some(storage_name),
        }
    }

    /// Prefix of the module itself.
    pub fn new_module(module_path: &'static str, module_name: &'static str) -> Self {
        Self {
            module_path,
            module_name,
            storage_name: None,
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        let segments = [Some(self.module_path), Some(self.module_name), self.storage_name];

        let mut bytes = Vec::new();
        for segment in segments.into_iter().flatten() {
            bytes.extend_from_slice(segment.as_bytes());
            bytes.push(SEPARATOR);
        }
        bytes
    }

    /// Digest of the prefix under the hasher of `C`.
    pub fn hash<C: Context>(&self) -> [u8; 32] {
        C::Hasher::digest(self.to_bytes()).into()
    }
}

impl From<ModulePrefix> for sov_state::Prefix {
    fn from(prefix: ModulePrefix) -> Self {
        sov_state::Prefix::new(prefix.to_bytes())
    }
}
