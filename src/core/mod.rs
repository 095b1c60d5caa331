//! Canonical encodings shared with the node
//!
//! Addresses, amounts, transaction and block hashing, the transaction
//! Merkle root and the validation rules a node applies to transactions.
//! Everything here must stay bit-exact with the node.

pub mod address;
pub mod block;
pub mod governance;
pub mod merkle;
pub mod monetary;
pub mod transaction;

pub use address::{
    decode_address, decode_priv_key, encode_address, encode_priv_key, is_special_account,
    is_valid_name, ADDRESS_LENGTH, ADDRESS_VERSION, AERGO_ENTERPRISE, AERGO_NAME, AERGO_SYSTEM,
    NAME_LENGTH, PRIVKEY_VERSION,
};
pub use governance::{CallInfo, SystemOp};
pub use merkle::{calculate_merkle_root, calculate_merkle_tree, txs_merkle_root};
pub use monetary::{
    amount_from_bytes, amount_to_bytes, format_amount, parse_amount, Unit, MAX_AER,
    STAKING_MINIMUM,
};
