//! Mapping engine failures onto JavaScript exceptions.

use std::fmt::Display;

use wasm_bindgen::JsValue;

/// Wrap `err` in a `js_sys::Error` carrying its display message.
pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Deserialize an optional JS options object, treating `undefined`/`null`
/// as the type's default.
pub(crate) fn from_js_or_default<T>(value: JsValue, what: &str) -> Result<T, JsValue>
where
    T: Default + serde::de::DeserializeOwned,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| to_js_error(format!("Invalid {what}: {e}")))
}
