//! Class-id table for every state record type.
//!
//! A stored or gossiped record begins with its class id. The registry maps
//! that tag to a decoder; a tag with no entry means the node cannot read its
//! own state and decoding must stop.

use std::collections::HashMap;
use std::sync::OnceLock;

use strand_adjustments::{CurrencyAdjustments, NftAdjustments};
use strand_codec::{
    check_version, CodecError, DataReader, DataWriter, DecodeLimits, SelfDeserializable,
    Versioned,
};
use strand_evm::{EvmFnResult, EvmLog};
use strand_fees::{FcAssessedCustomFee, FcCustomFee, LegacyCustomFee};
use strand_types::{EntityId, FcTokenAssociation, RichInstant, TxnId};
use tracing::{error, info};

use crate::{ExchangeRates, ExpirableTxnRecord, RecordHistory, RegistryError, TxnReceipt};

/// Declares [`RecordKind`] and [`StateRecord`] from one list of types, so the
/// two enums and every `match` over them stay exhaustive together.
macro_rules! state_records {
    (
        writable { $($kind:ident => $ty:ty),+ $(,)? }
        decode_only { $($legacy_kind:ident => $legacy_ty:ty),+ $(,)? }
    ) => {
        /// Every record type that may appear in persisted or gossiped state.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum RecordKind {
            $($kind,)+
            $($legacy_kind,)+
        }

        impl RecordKind {
            pub const ALL: &'static [RecordKind] = &[
                $(RecordKind::$kind,)+
                $(RecordKind::$legacy_kind,)+
            ];

            pub fn class_id(self) -> u64 {
                match self {
                    $(Self::$kind => <$ty as Versioned>::CLASS_ID,)+
                    $(Self::$legacy_kind => <$legacy_ty as Versioned>::CLASS_ID,)+
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$kind => stringify!($kind),)+
                    $(Self::$legacy_kind => stringify!($legacy_kind),)+
                }
            }

            /// Whether current code can still write this type.
            pub fn is_writable(self) -> bool {
                match self {
                    $(Self::$kind => true,)+
                    $(Self::$legacy_kind => false,)+
                }
            }

            fn decode(self, input: &mut DataReader<'_>, version: i32) -> Result<StateRecord, CodecError> {
                match self {
                    $(Self::$kind => {
                        let version = check_version::<$ty>(version)?;
                        <$ty as SelfDeserializable>::deserialize(input, version).map(StateRecord::$kind)
                    })+
                    $(Self::$legacy_kind => {
                        let version = check_version::<$legacy_ty>(version)?;
                        <$legacy_ty as SelfDeserializable>::deserialize(input, version)
                            .map(StateRecord::$legacy_kind)
                    })+
                }
            }
        }

        /// A decoded record of any registered type.
        #[allow(clippy::large_enum_variant)]
        #[derive(Clone, Debug, PartialEq)]
        pub enum StateRecord {
            $($kind($ty),)+
            $($legacy_kind($legacy_ty),)+
        }

        impl StateRecord {
            pub fn kind(&self) -> RecordKind {
                match self {
                    $(Self::$kind(_) => RecordKind::$kind,)+
                    $(Self::$legacy_kind(_) => RecordKind::$legacy_kind,)+
                }
            }

            /// Tagged bytes at the current version, or `None` for a decode-only type.
            pub fn encode(&self) -> Option<Vec<u8>> {
                let mut out = DataWriter::new();
                match self {
                    $(Self::$kind(value) => out.write_serializable(value),)+
                    $(Self::$legacy_kind(_) => return None,)+
                }
                Some(out.into_bytes())
            }
        }
    };
}

state_records! {
    writable {
        EntityId => EntityId,
        RichInstant => RichInstant,
        TxnId => TxnId,
        TokenAssociation => FcTokenAssociation,
        CustomFee => FcCustomFee,
        AssessedCustomFee => FcAssessedCustomFee,
        CurrencyAdjustments => CurrencyAdjustments,
        NftAdjustments => NftAdjustments,
        EvmLog => EvmLog,
        EvmFnResult => EvmFnResult,
        ExchangeRates => ExchangeRates,
        TxnReceipt => TxnReceipt,
        ExpirableTxnRecord => ExpirableTxnRecord,
        RecordHistory => RecordHistory,
    }
    decode_only {
        LegacyCustomFee => LegacyCustomFee,
    }
}

/// Tag-to-decoder lookup built once from [`RecordKind::ALL`].
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    by_class_id: HashMap<u64, RecordKind>,
}

static GLOBAL: OnceLock<Result<TypeRegistry, RegistryError>> = OnceLock::new();

impl TypeRegistry {
    /// Build the table, failing if two types claim the same class id.
    pub fn build() -> Result<Self, RegistryError> {
        let mut by_class_id = HashMap::with_capacity(RecordKind::ALL.len());
        for &kind in RecordKind::ALL {
            if let Some(first) = by_class_id.insert(kind.class_id(), kind) {
                return Err(RegistryError::DuplicateClassId {
                    class_id: kind.class_id(),
                    first: first.name(),
                    second: kind.name(),
                });
            }
        }
        info!(types = by_class_id.len(), "built state type registry");
        Ok(Self { by_class_id })
    }

    /// The process-wide registry, built on first use.
    pub fn global() -> Result<&'static TypeRegistry, RegistryError> {
        GLOBAL.get_or_init(Self::build).as_ref().map_err(Clone::clone)
    }

    pub fn kind_of(&self, class_id: u64) -> Option<RecordKind> {
        self.by_class_id.get(&class_id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_class_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_class_id.is_empty()
    }

    /// Read one tagged record of whatever registered type its tag names.
    pub fn decode(&self, input: &mut DataReader<'_>) -> Result<StateRecord, CodecError> {
        let class_id = input.read_u64()?;
        let Some(kind) = self.kind_of(class_id) else {
            error!(class_id, "unknown class id in state");
            return Err(CodecError::UnknownClassId(class_id));
        };
        let version = input.read_i32()?;
        kind.decode(input, version)
    }

    /// Decode a buffer holding exactly one tagged record.
    pub fn decode_bytes(&self, bytes: &[u8], limits: &DecodeLimits) -> Result<StateRecord, CodecError> {
        let mut input = DataReader::new(bytes, limits);
        let record = self.decode(&mut input)?;
        input.expect_end()?;
        Ok(record)
    }
}
