use wasm_bindgen::JsValue;

/// Failures while wiring the frame into a page
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("no global `{0}`")]
    MissingGlobal(&'static str),

    #[error("no element with id `{0}`")]
    MissingElement(String),

    #[error("element `{0}` is not a {1}")]
    WrongElementType(String, &'static str),

    #[error("failed to register `{event}` listener: {reason}")]
    Listener { event: &'static str, reason: String },

    #[error("failed to open socket to {url}: {reason}")]
    Socket { url: String, reason: String },

    #[error("failed to start status timer: {0}")]
    Timer(String),
}

impl From<FrameError> for JsValue {
    fn from(err: FrameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Render a JS exception for inclusion in a `FrameError`
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
