use thiserror::Error;

/// Errors that can occur outside the resolver core.
///
/// Reference parsing and selection resolution never produce these: a
/// string or selection that does not match the reference shape is a
/// normal input, signaled by `None`/empty results. This type covers the
/// layers around the core: configuration, the reading plan, and the
/// annotation server.
#[derive(Error, Debug)]
pub enum LectioError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("reading plan error: {message} (path: {path})")]
    Plan { message: String, path: String },

    #[error("api error: {message}")]
    Api { message: String },

    #[error("invalid argument: {message}")]
    InvalidArg { message: String },

    #[error("http error: {0}")]
    Http(#[from] ureq::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results using `LectioError`.
pub type Result<T> = std::result::Result<T, LectioError>;
