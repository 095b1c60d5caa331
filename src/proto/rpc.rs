//! Request and response messages of the node's RPC service

use std::collections::HashMap;

use super::{Account, Block, BlockHeader, Tx};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Empty {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SingleBytes {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SingleString {
    #[prost(string, tag = "1")]
    pub value: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountAddress {
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountAndRoot {
    #[prost(bytes = "vec", tag = "1")]
    pub account: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub root: Vec<u8>,
    #[prost(bool, tag = "3")]
    pub compressed: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockNumberParam {
    #[prost(uint64, tag = "1")]
    pub block_no: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListParams {
    #[prost(bytes = "vec", tag = "1")]
    pub hash: Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub height: u64,
    #[prost(uint32, tag = "3")]
    pub size: u32,
    #[prost(uint32, tag = "4")]
    pub offset: u32,
    #[prost(bool, tag = "5")]
    pub asc: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockHeaderList {
    #[prost(message, repeated, tag = "1")]
    pub blocks: Vec<Block>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockMetadata {
    #[prost(bytes = "vec", tag = "1")]
    pub hash: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub header: Option<BlockHeader>,
    #[prost(int32, tag = "3")]
    pub txcount: i32,
    #[prost(int64, tag = "4")]
    pub size: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockchainStatus {
    #[prost(bytes = "vec", tag = "1")]
    pub best_block_hash: Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub best_height: u64,
    #[prost(string, tag = "3")]
    pub consensus_info: String,
    #[prost(bytes = "vec", tag = "4")]
    pub best_chain_id_hash: Vec<u8>,
    #[prost(message, optional, tag = "5")]
    pub chain_info: Option<ChainInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChainId {
    #[prost(string, tag = "1")]
    pub magic: String,
    #[prost(bool, tag = "2")]
    pub public: bool,
    #[prost(bool, tag = "3")]
    pub mainnet: bool,
    #[prost(string, tag = "4")]
    pub consensus: String,
    #[prost(int32, tag = "5")]
    pub version: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChainInfo {
    #[prost(message, optional, tag = "1")]
    pub id: Option<ChainId>,
    #[prost(uint32, tag = "2")]
    pub bp_number: u32,
    #[prost(uint64, tag = "3")]
    pub maxblocksize: u64,
    #[prost(bytes = "vec", tag = "4")]
    pub maxtokens: Vec<u8>,
    #[prost(bytes = "vec", tag = "5")]
    pub stakingminimum: Vec<u8>,
    #[prost(bytes = "vec", tag = "6")]
    pub totalstaking: Vec<u8>,
    #[prost(bytes = "vec", tag = "7")]
    pub gasprice: Vec<u8>,
    #[prost(bytes = "vec", tag = "8")]
    pub nameprice: Vec<u8>,
    #[prost(bytes = "vec", tag = "9")]
    pub totalvotingpower: Vec<u8>,
    #[prost(bytes = "vec", tag = "10")]
    pub votingreward: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChainStats {
    #[prost(string, tag = "1")]
    pub report: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConsensusInfo {
    #[prost(string, tag = "1")]
    pub r#type: String,
    #[prost(string, tag = "2")]
    pub info: String,
    #[prost(string, repeated, tag = "3")]
    pub bps: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum CommitStatus {
    TxOk = 0,
    TxNonceTooLow = 1,
    TxAlreadyExists = 2,
    TxInvalidHash = 3,
    TxInvalidSign = 4,
    TxInvalidFormat = 5,
    TxInsufficientBalance = 6,
    TxHasSameNonce = 7,
    TxInternalError = 9,
}

impl CommitStatus {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            CommitStatus::TxOk => "TX_OK",
            CommitStatus::TxNonceTooLow => "TX_NONCE_TOO_LOW",
            CommitStatus::TxAlreadyExists => "TX_ALREADY_EXISTS",
            CommitStatus::TxInvalidHash => "TX_INVALID_HASH",
            CommitStatus::TxInvalidSign => "TX_INVALID_SIGN",
            CommitStatus::TxInvalidFormat => "TX_INVALID_FORMAT",
            CommitStatus::TxInsufficientBalance => "TX_INSUFFICIENT_BALANCE",
            CommitStatus::TxHasSameNonce => "TX_HAS_SAME_NONCE",
            CommitStatus::TxInternalError => "TX_INTERNAL_ERROR",
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommitResult {
    #[prost(bytes = "vec", tag = "1")]
    pub hash: Vec<u8>,
    #[prost(enumeration = "CommitStatus", tag = "2")]
    pub error: i32,
    #[prost(string, tag = "3")]
    pub detail: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommitResultList {
    #[prost(message, repeated, tag = "1")]
    pub results: Vec<CommitResult>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum VerifyStatus {
    VerifyStatusOk = 0,
    VerifyStatusSignNotMatch = 1,
    VerifyStatusInvalidHash = 2,
}

impl VerifyStatus {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            VerifyStatus::VerifyStatusOk => "VERIFY_STATUS_OK",
            VerifyStatus::VerifyStatusSignNotMatch => "VERIFY_STATUS_SIGN_NOT_MATCH",
            VerifyStatus::VerifyStatusInvalidHash => "VERIFY_STATUS_INVALID_HASH",
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VerifyResult {
    #[prost(message, optional, tag = "1")]
    pub tx: Option<Tx>,
    #[prost(enumeration = "VerifyStatus", tag = "2")]
    pub error: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Personal {
    #[prost(string, tag = "1")]
    pub passphrase: String,
    #[prost(message, optional, tag = "2")]
    pub account: Option<Account>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ImportFormat {
    #[prost(message, optional, tag = "1")]
    pub wif: Option<SingleBytes>,
    #[prost(string, tag = "2")]
    pub oldpass: String,
    #[prost(string, tag = "3")]
    pub newpass: String,
    #[prost(message, optional, tag = "4")]
    pub keystore: Option<SingleBytes>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Staking {
    #[prost(bytes = "vec", tag = "1")]
    pub amount: Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub when: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Vote {
    #[prost(bytes = "vec", tag = "1")]
    pub candidate: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub amount: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VoteParams {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(uint32, tag = "2")]
    pub count: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VoteList {
    #[prost(message, repeated, tag = "1")]
    pub votes: Vec<Vote>,
    #[prost(string, tag = "2")]
    pub id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VoteInfo {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, repeated, tag = "2")]
    pub candidates: Vec<String>,
    #[prost(string, tag = "3")]
    pub amount: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountVoteInfo {
    #[prost(message, repeated, tag = "1")]
    pub voting: Vec<VoteInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeReq {
    #[prost(bytes = "vec", tag = "1")]
    pub timeout: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub component: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Name {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(uint64, tag = "2")]
    pub block_no: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NameInfo {
    #[prost(message, optional, tag = "1")]
    pub name: Option<Name>,
    #[prost(bytes = "vec", tag = "2")]
    pub owner: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub destination: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EventList {
    #[prost(message, repeated, tag = "1")]
    pub events: Vec<super::Event>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeyParams {
    #[prost(string, repeated, tag = "1")]
    pub key: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConfigItem {
    #[prost(map = "string, string", tag = "2")]
    pub props: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServerInfo {
    #[prost(map = "string, string", tag = "1")]
    pub status: HashMap<String, String>,
    #[prost(map = "string, message", tag = "2")]
    pub config: HashMap<String, ConfigItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum MetricType {
    Nothing = 0,
    P2pNetwork = 1,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MetricsRequest {
    #[prost(enumeration = "MetricType", repeated, tag = "1")]
    pub types: Vec<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PeerMetric {
    #[prost(bytes = "vec", tag = "1")]
    pub peer_id: Vec<u8>,
    #[prost(int64, tag = "2")]
    pub sum_in: i64,
    #[prost(int64, tag = "3")]
    pub avr_in: i64,
    #[prost(int64, tag = "4")]
    pub sum_out: i64,
    #[prost(int64, tag = "5")]
    pub avr_out: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Metrics {
    #[prost(message, repeated, tag = "1")]
    pub peers: Vec<PeerMetric>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnterpriseConfigKey {
    #[prost(string, tag = "1")]
    pub key: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnterpriseConfig {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(bool, tag = "2")]
    pub on: bool,
    #[prost(string, repeated, tag = "3")]
    pub values: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum MembershipChangeType {
    AddMember = 0,
    RemoveMember = 1,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MemberAttr {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub address: String,
    #[prost(bytes = "vec", tag = "4")]
    pub peer_id: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MembershipChange {
    #[prost(enumeration = "MembershipChangeType", tag = "1")]
    pub r#type: i32,
    #[prost(uint64, tag = "2")]
    pub request_id: u64,
    #[prost(message, optional, tag = "3")]
    pub attr: Option<MemberAttr>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MembershipChangeReply {
    #[prost(message, optional, tag = "1")]
    pub attr: Option<MemberAttr>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ConfChangeState {
    ConfChangeStateProposed = 0,
    ConfChangeStateSaved = 1,
    ConfChangeStateApplied = 2,
}

impl ConfChangeState {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            ConfChangeState::ConfChangeStateProposed => "CONF_CHANGE_STATE_PROPOSED",
            ConfChangeState::ConfChangeStateSaved => "CONF_CHANGE_STATE_SAVED",
            ConfChangeState::ConfChangeStateApplied => "CONF_CHANGE_STATE_APPLIED",
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConfChangeProgress {
    #[prost(enumeration = "ConfChangeState", tag = "1")]
    pub state: i32,
    #[prost(string, tag = "2")]
    pub err: String,
    #[prost(message, repeated, tag = "3")]
    pub members: Vec<MemberAttr>,
}
