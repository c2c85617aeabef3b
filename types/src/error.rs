use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IdError {
    /// A required external reference was absent.
    #[error("argument required: {0}")]
    ArgumentRequired(&'static str),

    #[error("malformed entity id: {0}")]
    Malformed(String),

    #[error("shard {0} does not fit an evm address")]
    ShardOutOfRange(i64),
}
