use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvmError {
    #[error("log has {0} topics, at most 4 allowed")]
    TooManyTopics(usize),

    #[error("topic of {0} bytes exceeds 32")]
    TopicTooLong(usize),

    #[error("bloom of {0} bytes exceeds 256")]
    BloomTooLong(usize),

    #[error("evm address must be 20 bytes, got {0}")]
    BadEvmAddress(usize),

    #[error("{what} has {len} entries, at most {max} allowed")]
    TooLong {
        what: &'static str,
        len: usize,
        max: usize,
    },
}
