//! Pre-versioning entity id layout, read only when importing old state.
//!
//! The legacy layout carries no class id or schema version: a legacy
//! version word and an object-type marker (both `i64`, not interpreted)
//! followed by shard, realm, and number. Nothing writes this layout.

use strand_codec::{CodecError, DataReader};
use tracing::debug;

use crate::EntityId;

/// Read one legacy positional entity id.
pub fn read_entity_id(input: &mut DataReader<'_>) -> Result<EntityId, CodecError> {
    let legacy_version = input.read_i64()?;
    let object_type = input.read_i64()?;
    let id = EntityId::new(input.read_i64()?, input.read_i64()?, input.read_i64()?);
    debug!(legacy_version, object_type, %id, "imported legacy entity id");
    Ok(id)
}
