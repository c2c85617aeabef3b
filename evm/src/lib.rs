//! EVM execution outcomes as versioned state records.

pub mod error;
pub mod fn_result;
pub mod log;

pub use error::EvmError;
pub use fn_result::EvmFnResult;
pub use log::{EvmLog, MAX_BLOOM_BYTES, MAX_TOPICS, MAX_TOPIC_BYTES};
