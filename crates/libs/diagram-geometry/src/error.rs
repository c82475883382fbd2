use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the public entry points. The integer codes are stable
/// and preserved for storage compatibility; success is code 0.
#[derive(Debug, Error)]
pub enum Error {
    /// A precondition failed before any mutation took place.
    #[error("bad parameter: {0}")]
    BadParameter(&'static str),

    /// An identifier lookup found no match.
    #[error("node `{0}` not found")]
    NotFound(String),

    /// A downstream geometry primitive failed unrecoverably. The pipeline
    /// absorbs degenerate-input failures, so this is reserved.
    #[error("geometry transform failed: {0}")]
    GeometryTransform(&'static str),
}

impl Error {
    pub fn code(&self) -> i32 {
        match self {
            Error::BadParameter(_) => 1,
            Error::NotFound(_) => 2,
            Error::GeometryTransform(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(Error::BadParameter("x").code(), 1);
        assert_eq!(Error::NotFound("n".into()).code(), 2);
        assert_eq!(Error::GeometryTransform("g").code(), 3);
    }
}
