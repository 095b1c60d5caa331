//! Chain data: blocks, transactions, state, receipts and events

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Block {
    #[prost(bytes = "vec", tag = "1")]
    pub hash: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub header: Option<BlockHeader>,
    #[prost(message, optional, tag = "3")]
    pub body: Option<BlockBody>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockHeader {
    #[prost(bytes = "vec", tag = "1")]
    pub chain_id: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub prev_block_hash: Vec<u8>,
    #[prost(uint64, tag = "3")]
    pub block_no: u64,
    #[prost(int64, tag = "4")]
    pub timestamp: i64,
    #[prost(bytes = "vec", tag = "5")]
    pub blocks_root_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "6")]
    pub txs_root_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "7")]
    pub receipts_root_hash: Vec<u8>,
    #[prost(uint64, tag = "8")]
    pub confirms: u64,
    #[prost(bytes = "vec", tag = "9")]
    pub pub_key: Vec<u8>,
    #[prost(bytes = "vec", tag = "10")]
    pub coinbase_account: Vec<u8>,
    #[prost(bytes = "vec", tag = "11")]
    pub sign: Vec<u8>,
    #[prost(bytes = "vec", tag = "12")]
    pub consensus: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockBody {
    #[prost(message, repeated, tag = "1")]
    pub txs: Vec<Tx>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TxList {
    #[prost(message, repeated, tag = "1")]
    pub txs: Vec<Tx>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TxType {
    Normal = 0,
    Governance = 1,
    Redeploy = 2,
    Feedelegation = 3,
    Transfer = 4,
    Call = 5,
    Deploy = 6,
}

impl TxType {
    /// Name used on the wire and in JSON views
    pub fn as_str_name(&self) -> &'static str {
        match self {
            TxType::Normal => "NORMAL",
            TxType::Governance => "GOVERNANCE",
            TxType::Redeploy => "REDEPLOY",
            TxType::Feedelegation => "FEEDELEGATION",
            TxType::Transfer => "TRANSFER",
            TxType::Call => "CALL",
            TxType::Deploy => "DEPLOY",
        }
    }

    pub fn from_str_name(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "NORMAL" => Some(TxType::Normal),
            "GOVERNANCE" => Some(TxType::Governance),
            "REDEPLOY" => Some(TxType::Redeploy),
            "FEEDELEGATION" => Some(TxType::Feedelegation),
            "TRANSFER" => Some(TxType::Transfer),
            "CALL" => Some(TxType::Call),
            "DEPLOY" => Some(TxType::Deploy),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Tx {
    #[prost(bytes = "vec", tag = "1")]
    pub hash: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub body: Option<TxBody>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TxBody {
    #[prost(uint64, tag = "1")]
    pub nonce: u64,
    #[prost(bytes = "vec", tag = "2")]
    pub account: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub recipient: Vec<u8>,
    #[prost(bytes = "vec", tag = "4")]
    pub amount: Vec<u8>,
    #[prost(bytes = "vec", tag = "5")]
    pub payload: Vec<u8>,
    #[prost(uint64, tag = "6")]
    pub gas_limit: u64,
    #[prost(bytes = "vec", tag = "7")]
    pub gas_price: Vec<u8>,
    #[prost(enumeration = "TxType", tag = "8")]
    pub r#type: i32,
    #[prost(bytes = "vec", tag = "9")]
    pub chain_id_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "10")]
    pub sign: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TxIdx {
    #[prost(bytes = "vec", tag = "1")]
    pub block_hash: Vec<u8>,
    #[prost(int32, tag = "2")]
    pub idx: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TxInBlock {
    #[prost(message, optional, tag = "1")]
    pub tx_idx: Option<TxIdx>,
    #[prost(message, optional, tag = "2")]
    pub tx: Option<Tx>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct State {
    #[prost(uint64, tag = "1")]
    pub nonce: u64,
    #[prost(bytes = "vec", tag = "2")]
    pub balance: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub code_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "4")]
    pub storage_root: Vec<u8>,
    #[prost(uint64, tag = "5")]
    pub sql_recovery_point: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountProof {
    #[prost(message, optional, tag = "1")]
    pub state: Option<State>,
    #[prost(bool, tag = "2")]
    pub inclusion: bool,
    #[prost(bytes = "vec", tag = "3")]
    pub key: Vec<u8>,
    #[prost(bytes = "vec", tag = "4")]
    pub proof_key: Vec<u8>,
    #[prost(bytes = "vec", tag = "5")]
    pub proof_val: Vec<u8>,
    #[prost(bytes = "vec", tag = "6")]
    pub bitmap: Vec<u8>,
    #[prost(uint32, tag = "7")]
    pub height: u32,
    #[prost(bytes = "vec", repeated, tag = "8")]
    pub audit_path: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Receipt {
    #[prost(bytes = "vec", tag = "1")]
    pub contract_address: Vec<u8>,
    #[prost(string, tag = "2")]
    pub status: String,
    #[prost(string, tag = "3")]
    pub ret: String,
    #[prost(bytes = "vec", tag = "4")]
    pub tx_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "5")]
    pub fee_used: Vec<u8>,
    #[prost(bytes = "vec", tag = "6")]
    pub cumulative_fee_used: Vec<u8>,
    #[prost(bytes = "vec", tag = "7")]
    pub bloom: Vec<u8>,
    #[prost(message, repeated, tag = "8")]
    pub events: Vec<Event>,
    #[prost(uint64, tag = "9")]
    pub block_no: u64,
    #[prost(bytes = "vec", tag = "10")]
    pub block_hash: Vec<u8>,
    #[prost(int32, tag = "11")]
    pub tx_index: i32,
    #[prost(bytes = "vec", tag = "12")]
    pub from: Vec<u8>,
    #[prost(bytes = "vec", tag = "13")]
    pub to: Vec<u8>,
    #[prost(bool, tag = "14")]
    pub fee_delegation: bool,
    #[prost(uint64, tag = "15")]
    pub gas_used: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Event {
    #[prost(bytes = "vec", tag = "1")]
    pub contract_address: Vec<u8>,
    #[prost(string, tag = "2")]
    pub event_name: String,
    #[prost(string, tag = "3")]
    pub json_args: String,
    #[prost(int32, tag = "4")]
    pub event_idx: i32,
    #[prost(bytes = "vec", tag = "5")]
    pub tx_hash: Vec<u8>,
    #[prost(bytes = "vec", tag = "6")]
    pub block_hash: Vec<u8>,
    #[prost(uint64, tag = "7")]
    pub block_no: u64,
    #[prost(int32, tag = "8")]
    pub tx_index: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FilterInfo {
    #[prost(bytes = "vec", tag = "1")]
    pub contract_address: Vec<u8>,
    #[prost(string, tag = "2")]
    pub event_name: String,
    #[prost(uint64, tag = "3")]
    pub blockfrom: u64,
    #[prost(uint64, tag = "4")]
    pub blockto: u64,
    #[prost(bool, tag = "5")]
    pub desc: bool,
    #[prost(bytes = "vec", tag = "6")]
    pub arg_filter: Vec<u8>,
    #[prost(int32, tag = "7")]
    pub recent_block_cnt: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Query {
    #[prost(bytes = "vec", tag = "1")]
    pub contract_address: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub queryinfo: Vec<u8>,
}
