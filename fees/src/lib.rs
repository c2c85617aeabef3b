//! Custom fee rules and the charges they produce.
//!
//! A [`FcCustomFee`] is a rule configured on a token: exactly one of a fixed,
//! fractional, or royalty computation plus the collecting account. An
//! [`FcAssessedCustomFee`] is the fact recorded when a rule is applied to a
//! transaction.

pub mod assessed;
pub mod custom_fee;
pub mod error;
pub mod fixed;
pub mod fractional;
pub mod legacy;
pub mod royalty;

pub use assessed::FcAssessedCustomFee;
pub use custom_fee::{FcCustomFee, FeeSpec, FeeType, FIXED_CODE, FRACTIONAL_CODE, ROYALTY_CODE};
pub use error::FeeError;
pub use fixed::FixedFeeSpec;
pub use fractional::{FractionalFeeSpec, UNBOUNDED_MAXIMUM};
pub use legacy::{LegacyCustomFee, LegacyFeeSpec};
pub use royalty::RoyaltyFeeSpec;
