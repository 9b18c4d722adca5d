use thiserror::Error;

/// Errors surfaced by import and format selection.
///
/// Markdown import and bulk parsing never fail; only JSON import and
/// extension-based format detection produce these.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not syntactically valid JSON.
    #[error("error parsing file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The input is valid JSON but its top level is not an object.
    #[error("error parsing file: expected a JSON object, found {0}")]
    NotADocument(&'static str),

    /// The file extension is neither `.json` nor `.md`.
    #[error("unsupported file type `{0}`; use JSON or MD")]
    UnsupportedFormat(String),
}

impl Error {
    /// True for the failures shown to the user as "error parsing file".
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_) | Error::NotADocument(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
