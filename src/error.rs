// src/error.rs
//
// Failures of the browser binding. The core controller itself never fails:
// missing page structure just switches features off.

/// Error while attaching the gallery to a live document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,

    /// The window has no `document`.
    NoDocument,

    /// A DOM call threw.
    Js { context: &'static str, message: String },
}

impl std::fmt::Display for GalleryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GalleryError::NoWindow => write!(f, "No window available"),
            GalleryError::NoDocument => write!(f, "Window has no document"),
            GalleryError::Js { context, message } => {
                write!(f, "DOM error while {}: {}", context, message)
            }
        }
    }
}

impl std::error::Error for GalleryError {}

/// Result of a binding operation.
pub type GalleryResult<T> = Result<T, GalleryError>;

#[cfg(feature = "web")]
mod js {
    use wasm_bindgen::JsValue;

    use super::GalleryError;

    impl GalleryError {
        pub fn js(context: &'static str, value: JsValue) -> Self {
            let message = value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value));
            GalleryError::Js { context, message }
        }
    }

    impl From<GalleryError> for JsValue {
        fn from(err: GalleryError) -> Self {
            js_sys::Error::new(&err.to_string()).into()
        }
    }
}
