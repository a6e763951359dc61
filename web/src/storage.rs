use gloo::storage::{LocalStorage, Storage};
use pairup_core::{KeyValueStore, StoreError};

/// Raw string access to `window.localStorage`, so legacy bare-integer scores stay readable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LocalStorageBackend;

impl KeyValueStore for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Could not read {} from local storage: {:?}", key, err);
                None
            }
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StoreError::WriteFailed {
                key: key.to_string(),
                reason: format!("{:?}", err),
            })
    }
}
