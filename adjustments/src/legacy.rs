//! Pre-versioning transfer list layout, read only when importing old state.

use strand_codec::{CodecError, DataReader};
use strand_types::legacy::read_entity_id;
use tracing::debug;

use crate::CurrencyAdjustments;

/// Read a legacy transfer list: two uninterpreted `i64` header words, an
/// `i32` count, then `count` pairs of legacy entity id and `i64` amount.
pub fn read_currency_adjustments(
    input: &mut DataReader<'_>,
) -> Result<CurrencyAdjustments, CodecError> {
    let legacy_version = input.read_i64()?;
    let object_type = input.read_i64()?;
    let count = input.read_length("legacy transfers", input.limits().max_currency_adjustments)?;
    let mut accounts = Vec::with_capacity(count);
    let mut amounts = Vec::with_capacity(count);
    for _ in 0..count {
        accounts.push(read_entity_id(input)?);
        amounts.push(input.read_i64()?);
    }
    debug!(legacy_version, object_type, count, "imported legacy transfer list");
    CurrencyAdjustments::from_decoded(accounts, amounts).map_err(CodecError::rejected)
}
