// Errors for the particle field. Configuration problems are reported to the
// caller, a missing canvas or context is logged and mounting is skipped.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The palette has no colours to draw particles from
    #[error("particle palette is empty")]
    EmptyPalette,

    #[error("invalid {name} range: {low} > {high}")]
    InvalidRange {
        name: &'static str,
        low: f64,
        high: f64,
    },

    #[error("invalid {name}: {value}")]
    InvalidValue { name: &'static str, value: f64 },

    #[error("invalid colour: {0}")]
    InvalidColor(String),

    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("canvas not found: {0}")]
    CanvasNotFound(String),

    /// The canvas refused to hand out a 2d context
    #[error("2d rendering context unavailable")]
    ContextUnavailable,

    #[error("render failed: {0}")]
    Render(String),

    #[error("javascript error: {0}")]
    Js(String),
}

impl FieldError {
    // Surface-unavailable errors are not reported to the page, the effect just doesn't run
    pub fn is_surface_unavailable(&self) -> bool {
        match self {
            FieldError::NoWindow
            | FieldError::NoDocument
            | FieldError::CanvasNotFound(_)
            | FieldError::ContextUnavailable => true,
            _ => false,
        }
    }
}

impl From<JsValue> for FieldError {
    fn from(value: JsValue) -> Self {
        FieldError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FieldError>;
