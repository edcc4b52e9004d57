//! Key/value string storage
//!
//! LocalStorage on wasm32. Native builds keep values in a process-local map so
//! a headless run (and the test suite) behaves like a fresh browser profile.

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Read a stored value (None if absent or storage unavailable)
#[cfg(target_arch = "wasm32")]
pub fn get_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

/// Write a value; failures are logged, never raised
#[cfg(target_arch = "wasm32")]
pub fn set_item(key: &str, value: &str) {
    match local_storage() {
        Some(storage) => {
            if storage.set_item(key, value).is_err() {
                log::warn!("LocalStorage write failed for `{}`", key);
            }
        }
        None => log::warn!("LocalStorage unavailable, `{}` not saved", key),
    }
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static NATIVE_STORE: std::cell::RefCell<std::collections::HashMap<String, String>> =
        std::cell::RefCell::new(std::collections::HashMap::new());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get_item(key: &str) -> Option<String> {
    NATIVE_STORE.with(|store| store.borrow().get(key).cloned())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_item(key: &str, value: &str) {
    NATIVE_STORE.with(|store| {
        store.borrow_mut().insert(key.to_string(), value.to_string());
    });
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_native_roundtrip() {
        assert_eq!(get_item("storage_test_key"), None);
        set_item("storage_test_key", "42");
        assert_eq!(get_item("storage_test_key").as_deref(), Some("42"));
        set_item("storage_test_key", "43");
        assert_eq!(get_item("storage_test_key").as_deref(), Some("43"));
    }
}
