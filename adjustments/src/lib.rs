//! Balance and ownership adjustments carried by transaction records.
//!
//! Both lists are stored columnar. [`CurrencyAdjustments`] holds signed
//! native-currency deltas per account; [`NftAdjustments`] holds serial-number
//! moves between owners.

pub mod currency;
pub mod error;
pub mod legacy;
pub mod nft;

pub use currency::CurrencyAdjustments;
pub use error::AdjustmentError;
pub use nft::{NftAdjustments, NftAdjustmentsBuilder, DEFAULT_MAX_NFT_ADJUSTMENTS};
