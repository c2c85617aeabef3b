//! Decode bounds: the only backpressure against oversized or hostile input.

use serde::{Deserialize, Serialize};

/// Maximum element and byte counts enforced while decoding.
///
/// Every collection and byte array read from untrusted bytes is checked
/// against one of these before any backing storage is allocated. The values
/// are protocol constants in practice; they are configurable so that a
/// network can raise a cap without a code change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeLimits {
    /// Entries in one `CurrencyAdjustments`.
    #[serde(default = "default_max_currency_adjustments")]
    pub max_currency_adjustments: usize,

    /// Entries in one `NftAdjustments`.
    #[serde(default = "default_max_nft_adjustments")]
    pub max_nft_adjustments: usize,

    /// Tokens touched by one transaction record.
    #[serde(default = "default_max_involved_tokens")]
    pub max_involved_tokens: usize,

    /// Assessed custom fees attached to one record.
    #[serde(default = "default_max_assessed_fees")]
    pub max_assessed_fees: usize,

    /// Automatic token associations attached to one record.
    #[serde(default = "default_max_token_associations")]
    pub max_token_associations: usize,

    /// Custom fee rules configured on one token.
    #[serde(default = "default_max_custom_fees")]
    pub max_custom_fees: usize,

    /// Effective payers listed on one assessed fee.
    #[serde(default = "default_max_effective_payers")]
    pub max_effective_payers: usize,

    #[serde(default = "default_max_memo_bytes")]
    pub max_memo_bytes: usize,

    #[serde(default = "default_max_txn_hash_bytes")]
    pub max_txn_hash_bytes: usize,

    /// Return data of one EVM call.
    #[serde(default = "default_max_evm_result_bytes")]
    pub max_evm_result_bytes: usize,

    #[serde(default = "default_max_evm_error_bytes")]
    pub max_evm_error_bytes: usize,

    #[serde(default = "default_max_call_data_bytes")]
    pub max_call_data_bytes: usize,

    #[serde(default = "default_max_log_data_bytes")]
    pub max_log_data_bytes: usize,

    #[serde(default = "default_max_logs")]
    pub max_logs: usize,

    #[serde(default = "default_max_created_contracts")]
    pub max_created_contracts: usize,

    /// Serial numbers listed on one receipt.
    #[serde(default = "default_max_serial_numbers")]
    pub max_serial_numbers: usize,

    /// Records held by one persisted record history.
    #[serde(default = "default_max_history_records")]
    pub max_history_records: usize,

    /// Contracts in a historical storage-change section.
    #[serde(default = "default_max_storage_change_contracts")]
    pub max_storage_change_contracts: usize,

    /// Slots per contract in a historical storage-change section.
    #[serde(default = "default_max_storage_change_slots")]
    pub max_storage_change_slots: usize,
}

// ── Protocol constants ─────────────────────────────────────────────────
//
// Constructors use these same values, so anything built in memory decodes
// under the default limits.

pub const DEFAULT_MAX_CURRENCY_ADJUSTMENTS: usize = 25;
pub const DEFAULT_MAX_NFT_ADJUSTMENTS: usize = 1024;
pub const DEFAULT_MAX_INVOLVED_TOKENS: usize = 10;
pub const DEFAULT_MAX_ASSESSED_FEES: usize = 20;
pub const DEFAULT_MAX_TOKEN_ASSOCIATIONS: usize = 1024;
pub const DEFAULT_MAX_CUSTOM_FEES: usize = 10;
pub const DEFAULT_MAX_EFFECTIVE_PAYERS: usize = 20;
pub const DEFAULT_MAX_MEMO_BYTES: usize = 32 * 1024;
pub const DEFAULT_MAX_TXN_HASH_BYTES: usize = 1024;
pub const DEFAULT_MAX_EVM_RESULT_BYTES: usize = 1024 * 1024;
pub const DEFAULT_MAX_EVM_ERROR_BYTES: usize = 8 * 1024;
pub const DEFAULT_MAX_CALL_DATA_BYTES: usize = 1024 * 1024;
pub const DEFAULT_MAX_LOG_DATA_BYTES: usize = 1024 * 1024;
pub const DEFAULT_MAX_LOGS: usize = 1024;
pub const DEFAULT_MAX_CREATED_CONTRACTS: usize = 1024;
pub const DEFAULT_MAX_SERIAL_NUMBERS: usize = 1024;
pub const DEFAULT_MAX_HISTORY_RECORDS: usize = 1 << 20;
pub const DEFAULT_MAX_STORAGE_CHANGE_CONTRACTS: usize = 1024;
pub const DEFAULT_MAX_STORAGE_CHANGE_SLOTS: usize = 1024;

// ── Serde default helpers ──────────────────────────────────────────────

fn default_max_currency_adjustments() -> usize {
    DEFAULT_MAX_CURRENCY_ADJUSTMENTS
}

fn default_max_nft_adjustments() -> usize {
    DEFAULT_MAX_NFT_ADJUSTMENTS
}

fn default_max_involved_tokens() -> usize {
    DEFAULT_MAX_INVOLVED_TOKENS
}

fn default_max_assessed_fees() -> usize {
    DEFAULT_MAX_ASSESSED_FEES
}

fn default_max_token_associations() -> usize {
    DEFAULT_MAX_TOKEN_ASSOCIATIONS
}

fn default_max_custom_fees() -> usize {
    DEFAULT_MAX_CUSTOM_FEES
}

fn default_max_effective_payers() -> usize {
    DEFAULT_MAX_EFFECTIVE_PAYERS
}

fn default_max_memo_bytes() -> usize {
    DEFAULT_MAX_MEMO_BYTES
}

fn default_max_txn_hash_bytes() -> usize {
    DEFAULT_MAX_TXN_HASH_BYTES
}

fn default_max_evm_result_bytes() -> usize {
    DEFAULT_MAX_EVM_RESULT_BYTES
}

fn default_max_evm_error_bytes() -> usize {
    DEFAULT_MAX_EVM_ERROR_BYTES
}

fn default_max_call_data_bytes() -> usize {
    DEFAULT_MAX_CALL_DATA_BYTES
}

fn default_max_log_data_bytes() -> usize {
    DEFAULT_MAX_LOG_DATA_BYTES
}

fn default_max_logs() -> usize {
    DEFAULT_MAX_LOGS
}

fn default_max_created_contracts() -> usize {
    DEFAULT_MAX_CREATED_CONTRACTS
}

fn default_max_serial_numbers() -> usize {
    DEFAULT_MAX_SERIAL_NUMBERS
}

fn default_max_history_records() -> usize {
    DEFAULT_MAX_HISTORY_RECORDS
}

fn default_max_storage_change_contracts() -> usize {
    DEFAULT_MAX_STORAGE_CHANGE_CONTRACTS
}

fn default_max_storage_change_slots() -> usize {
    DEFAULT_MAX_STORAGE_CHANGE_SLOTS
}

// ── Impl ───────────────────────────────────────────────────────────────

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_currency_adjustments: default_max_currency_adjustments(),
            max_nft_adjustments: default_max_nft_adjustments(),
            max_involved_tokens: default_max_involved_tokens(),
            max_assessed_fees: default_max_assessed_fees(),
            max_token_associations: default_max_token_associations(),
            max_custom_fees: default_max_custom_fees(),
            max_effective_payers: default_max_effective_payers(),
            max_memo_bytes: default_max_memo_bytes(),
            max_txn_hash_bytes: default_max_txn_hash_bytes(),
            max_evm_result_bytes: default_max_evm_result_bytes(),
            max_evm_error_bytes: default_max_evm_error_bytes(),
            max_call_data_bytes: default_max_call_data_bytes(),
            max_log_data_bytes: default_max_log_data_bytes(),
            max_logs: default_max_logs(),
            max_created_contracts: default_max_created_contracts(),
            max_serial_numbers: default_max_serial_numbers(),
            max_history_records: default_max_history_records(),
            max_storage_change_contracts: default_max_storage_change_contracts(),
            max_storage_change_slots: default_max_storage_change_slots(),
        }
    }
}
