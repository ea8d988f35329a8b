use std::fmt;

#[derive(Debug)]
pub enum InferError {
    /// A tensor's shape or length disagrees with what the stage expects.
    InvalidInputShape { expected: String, got: String },
    /// Zero-area source or model dimensions; the letterbox scale would be `<= 0`.
    DegenerateGeometry(String),
    InvalidConfig(String),
    ModelLoad(String),
    BackendError(String),
    InvalidInput {
        name: String,
        expected_names: Vec<String>,
    },
    UnsupportedDtype(String),
    Image(stance_image::ImageError),
    Io(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::InvalidInputShape { expected, got } => {
                write!(f, "invalid input shape: expected {expected}, got {got}")
            }
            InferError::DegenerateGeometry(msg) => write!(f, "degenerate geometry: {msg}"),
            InferError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::BackendError(msg) => write!(f, "backend error: {msg}"),
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(
                f,
                "invalid input '{name}', expected one of: {}",
                expected_names.join(", ")
            ),
            InferError::UnsupportedDtype(msg) => write!(f, "unsupported dtype: {msg}"),
            InferError::Image(err) => write!(f, "image error: {err}"),
            InferError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InferError::Image(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}

impl From<stance_image::ImageError> for InferError {
    fn from(err: stance_image::ImageError) -> Self {
        InferError::Image(err)
    }
}

impl From<stance_base::TensorError> for InferError {
    fn from(err: stance_base::TensorError) -> Self {
        InferError::InvalidInputShape {
            expected: "consistent tensor shape".to_string(),
            got: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for InferError {
    fn from(err: serde_json::Error) -> Self {
        InferError::InvalidConfig(err.to_string())
    }
}
