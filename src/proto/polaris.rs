//! Peer discovery service messages

use super::PeerAddress;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Paginations {
    #[prost(bytes = "vec", tag = "1")]
    pub r#ref: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub size: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PolarisPeer {
    #[prost(message, optional, tag = "1")]
    pub address: Option<PeerAddress>,
    #[prost(int64, tag = "2")]
    pub connected: i64,
    #[prost(int64, tag = "3")]
    pub last_check: i64,
    #[prost(string, tag = "4")]
    pub verion: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PolarisPeerList {
    #[prost(uint32, tag = "1")]
    pub total: u32,
    #[prost(bool, tag = "2")]
    pub has_next: bool,
    #[prost(message, repeated, tag = "3")]
    pub peers: Vec<PolarisPeer>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlConfEntries {
    #[prost(bool, tag = "1")]
    pub enabled: bool,
    #[prost(string, repeated, tag = "2")]
    pub entries: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddEntryParams {
    #[prost(string, tag = "1")]
    pub peer_id: String,
    #[prost(string, tag = "2")]
    pub address: String,
    #[prost(string, tag = "3")]
    pub cidr: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RmEntryParams {
    #[prost(uint32, tag = "1")]
    pub index: u32,
}
