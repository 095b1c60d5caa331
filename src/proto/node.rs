//! Accounts and peer descriptions

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Account {
    #[prost(bytes = "vec", tag = "1")]
    pub address: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountList {
    #[prost(message, repeated, tag = "1")]
    pub accounts: Vec<Account>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum PeerRole {
    LegacyVersion = 0,
    Producer = 1,
    Watcher = 2,
    Agent = 3,
}

impl PeerRole {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            PeerRole::LegacyVersion => "LegacyVersion",
            PeerRole::Producer => "Producer",
            PeerRole::Watcher => "Watcher",
            PeerRole::Agent => "Agent",
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PeerAddress {
    #[prost(string, tag = "1")]
    pub address: String,
    #[prost(uint32, tag = "3")]
    pub port: u32,
    #[prost(bytes = "vec", tag = "4")]
    pub peer_id: Vec<u8>,
    #[prost(enumeration = "PeerRole", tag = "5")]
    pub role: i32,
    #[prost(string, tag = "6")]
    pub version: String,
    #[prost(string, repeated, tag = "7")]
    pub addresses: Vec<String>,
    #[prost(bytes = "vec", repeated, tag = "8")]
    pub producer_ids: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NewBlockNotice {
    #[prost(bytes = "vec", tag = "1")]
    pub block_hash: Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub block_no: u64,
}

/// Connection states a peer reports through `GetPeers`
pub fn peer_state_name(state: i32) -> &'static str {
    match state {
        0 => "STARTING",
        1 => "HANDSHAKING",
        2 => "RUNNING",
        3 => "DOWN",
        4 => "STOPPING",
        _ => "UNKNOWN",
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Peer {
    #[prost(message, optional, tag = "1")]
    pub address: Option<PeerAddress>,
    #[prost(message, optional, tag = "2")]
    pub bestblock: Option<NewBlockNotice>,
    #[prost(int32, tag = "3")]
    pub state: i32,
    #[prost(bool, tag = "4")]
    pub hidden: bool,
    #[prost(int64, tag = "5")]
    pub lash_check: i64,
    #[prost(bool, tag = "6")]
    pub selfpeer: bool,
    #[prost(string, tag = "7")]
    pub version: String,
    #[prost(enumeration = "PeerRole", tag = "9")]
    pub accepted_role: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PeerList {
    #[prost(message, repeated, tag = "1")]
    pub peers: Vec<Peer>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PeersParams {
    #[prost(bool, tag = "1")]
    pub no_hidden: bool,
    #[prost(bool, tag = "2")]
    pub show_self: bool,
}
