use thiserror::Error;

/// Errors produced while decoding versioned state records.
///
/// Encoding into an in-memory buffer cannot fail, so every variant here
/// describes malformed, truncated, hostile, or incompatible input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("{what}: length {len} exceeds maximum {max}")]
    LengthExceeded {
        what: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{what}: negative length {len}")]
    NegativeLength { what: &'static str, len: i32 },

    #[error("unknown class id {0:#018x}")]
    UnknownClassId(u64),

    #[error("expected class id {expected:#018x}, found {found:#018x}")]
    ClassIdMismatch { expected: u64, found: u64 },

    #[error("class {class_id:#018x}: version {version} predates minimum supported version {minimum}")]
    VersionTooOld {
        class_id: u64,
        version: i32,
        minimum: u32,
    },

    #[error("class {class_id:#018x}: version {version} is newer than current version {current}")]
    VersionTooNew {
        class_id: u64,
        version: i32,
        current: u32,
    },

    #[error("invalid {what} discriminant: {value}")]
    InvalidDiscriminant { what: &'static str, value: i64 },

    #[error("{what}: invalid UTF-8")]
    InvalidUtf8 { what: &'static str },

    #[error("{0} trailing bytes after decode")]
    TrailingBytes(usize),

    #[error("rejected: {reason}")]
    Rejected { reason: String },
}

impl CodecError {
    /// Wrap a construction-time validation failure hit while decoding.
    pub fn rejected(reason: impl std::fmt::Display) -> Self {
        Self::Rejected {
            reason: reason.to_string(),
        }
    }

    /// Whether this error must abort reconstruction of the containing state.
    ///
    /// An unknown tag or a version older than every decode path in this build
    /// means the node cannot interpret its own state; retrying cannot help.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnknownClassId(_) | Self::VersionTooOld { .. })
    }
}
