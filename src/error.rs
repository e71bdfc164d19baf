/// Errors produced by jestpick during file processing.
#[derive(Debug, thiserror::Error)]
pub enum PickError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("unsupported extension: .{0}")]
    UnsupportedExtension(String),

    #[error("parse failed: {0}")]
    ParseFailed(String),
}
