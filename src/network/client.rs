//! Typed façade over the node's gRPC service
//!
//! Calls are issued through a generic [`RpcChannel`] with the prost codec on
//! fixed method paths, so no generated service stubs are needed.

use std::time::Duration;

use log::debug;
use tonic::client::Grpc;
use tonic::codec::{ProstCodec, Streaming};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};

use crate::error::{CliError, Result, RpcErrorKind};
use crate::proto::*;

const AERGO_SERVICE: &str = "types.AergoRPCService";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Largest response accepted from the node
pub const MAX_RECV_SIZE: usize = 256 * 1024 * 1024;

/// A dialed channel plus the generic call plumbing
#[derive(Clone)]
pub struct RpcChannel {
    grpc: Grpc<Channel>,
}

impl RpcChannel {
    pub fn new(channel: Channel, max_decoding_size: Option<usize>) -> Self {
        let mut grpc = Grpc::new(channel);
        if let Some(limit) = max_decoding_size {
            grpc = grpc.max_decoding_message_size(limit);
        }
        RpcChannel { grpc }
    }

    /// Dial `http://host:port` without transport security
    pub async fn connect_tcp(host: &str, port: u16) -> Result<Self> {
        let uri = format!("http://{host}:{port}");
        debug!("Connecting to {uri}");
        let endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|e| CliError::Input(format!("invalid server address {uri}: {e}")))?
            .connect_timeout(CONNECT_TIMEOUT);
        let channel = endpoint.connect().await.map_err(|e| {
            CliError::rpc(
                RpcErrorKind::Unavailable,
                format!("cannot connect to {uri}: {e}"),
            )
        })?;
        Ok(RpcChannel::new(channel, Some(MAX_RECV_SIZE)))
    }

    pub async fn unary<Req, Resp>(&self, path: &'static str, request: Req) -> Result<Resp>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = self.grpc.clone();
        grpc.ready().await?;
        let codec: ProstCodec<Req, Resp> = ProstCodec::default();
        let response = grpc
            .unary(
                tonic::Request::new(request),
                PathAndQuery::from_static(path),
                codec,
            )
            .await?;
        Ok(response.into_inner())
    }

    pub async fn server_streaming<Req, Resp>(
        &self,
        path: &'static str,
        request: Req,
    ) -> Result<Streaming<Resp>>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = self.grpc.clone();
        grpc.ready().await?;
        let codec: ProstCodec<Req, Resp> = ProstCodec::default();
        let response = grpc
            .server_streaming(
                tonic::Request::new(request),
                PathAndQuery::from_static(path),
                codec,
            )
            .await?;
        Ok(response.into_inner())
    }
}

macro_rules! aergo_path {
    ($method:literal) => {
        concat!("/types.AergoRPCService/", $method)
    };
}

/// Outcome of a transaction lookup by hash
#[derive(Debug, Clone, PartialEq)]
pub enum TxLookup {
    /// Known to the node but not in a block yet
    Pending(Tx),
    InBlock(TxInBlock),
}

#[derive(Clone)]
pub struct AergoClient {
    channel: RpcChannel,
}

impl AergoClient {
    pub fn new(channel: RpcChannel) -> Self {
        AergoClient { channel }
    }

    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        Ok(AergoClient::new(RpcChannel::connect_tcp(host, port).await?))
    }

    pub fn service_name() -> &'static str {
        AERGO_SERVICE
    }

    // chain

    pub async fn blockchain(&self) -> Result<BlockchainStatus> {
        self.channel.unary(aergo_path!("Blockchain"), Empty {}).await
    }

    pub async fn chain_info(&self) -> Result<ChainInfo> {
        self.channel.unary(aergo_path!("GetChainInfo"), Empty {}).await
    }

    pub async fn chain_stat(&self) -> Result<ChainStats> {
        self.channel.unary(aergo_path!("ChainStat"), Empty {}).await
    }

    pub async fn consensus_info(&self) -> Result<ConsensusInfo> {
        self.channel.unary(aergo_path!("GetConsensusInfo"), Empty {}).await
    }

    pub async fn server_info(&self, keys: Vec<String>) -> Result<ServerInfo> {
        self.channel
            .unary(aergo_path!("GetServerInfo"), KeyParams { key: keys })
            .await
    }

    pub async fn node_state(&self, request: NodeReq) -> Result<SingleBytes> {
        self.channel.unary(aergo_path!("NodeState"), request).await
    }

    pub async fn metric(&self, request: MetricsRequest) -> Result<Metrics> {
        self.channel.unary(aergo_path!("Metric"), request).await
    }

    // blocks and transactions

    pub async fn get_block(&self, hash_or_number: Vec<u8>) -> Result<Block> {
        self.channel
            .unary(aergo_path!("GetBlock"), SingleBytes { value: hash_or_number })
            .await
    }

    pub async fn list_block_headers(&self, params: ListParams) -> Result<BlockHeaderList> {
        self.channel.unary(aergo_path!("ListBlockHeaders"), params).await
    }

    pub async fn get_tx(&self, hash: Vec<u8>) -> Result<Tx> {
        self.channel
            .unary(aergo_path!("GetTX"), SingleBytes { value: hash })
            .await
    }

    pub async fn get_block_tx(&self, hash: Vec<u8>) -> Result<TxInBlock> {
        self.channel
            .unary(aergo_path!("GetBlockTX"), SingleBytes { value: hash })
            .await
    }

    /// `GetTX`, retried once as `GetBlockTX` when the node reports not found
    pub async fn lookup_tx(&self, hash: Vec<u8>) -> Result<TxLookup> {
        match self.get_tx(hash.clone()).await {
            Ok(tx) => Ok(TxLookup::Pending(tx)),
            Err(e) if e.is_not_found() => {
                debug!("tx not pending, looking it up in blocks");
                Ok(TxLookup::InBlock(self.get_block_tx(hash).await?))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn send_tx(&self, tx: Tx) -> Result<CommitResult> {
        self.channel.unary(aergo_path!("SendTX"), tx).await
    }

    pub async fn commit_tx(&self, txs: Vec<Tx>) -> Result<CommitResultList> {
        self.channel
            .unary(aergo_path!("CommitTX"), TxList { txs })
            .await
    }

    pub async fn sign_tx(&self, tx: Tx) -> Result<Tx> {
        self.channel.unary(aergo_path!("SignTX"), tx).await
    }

    pub async fn verify_tx(&self, tx: Tx) -> Result<VerifyResult> {
        self.channel.unary(aergo_path!("VerifyTX"), tx).await
    }

    pub async fn get_receipt(&self, hash: Vec<u8>) -> Result<Receipt> {
        self.channel
            .unary(aergo_path!("GetReceipt"), SingleBytes { value: hash })
            .await
    }

    pub async fn get_internal_operations(&self, block_no: u64) -> Result<SingleBytes> {
        self.channel
            .unary(
                aergo_path!("GetInternalOperations"),
                BlockNumberParam { block_no },
            )
            .await
    }

    pub async fn query_contract(&self, query: Query) -> Result<SingleBytes> {
        self.channel.unary(aergo_path!("QueryContract"), query).await
    }

    // accounts

    pub async fn create_account(&self, passphrase: String) -> Result<Account> {
        let personal = Personal {
            passphrase,
            account: None,
        };
        self.channel.unary(aergo_path!("CreateAccount"), personal).await
    }

    pub async fn get_accounts(&self) -> Result<AccountList> {
        self.channel.unary(aergo_path!("GetAccounts"), Empty {}).await
    }

    pub async fn lock_account(&self, personal: Personal) -> Result<Account> {
        self.channel.unary(aergo_path!("LockAccount"), personal).await
    }

    pub async fn unlock_account(&self, personal: Personal) -> Result<Account> {
        self.channel.unary(aergo_path!("UnlockAccount"), personal).await
    }

    pub async fn import_account(&self, format: ImportFormat) -> Result<Account> {
        self.channel.unary(aergo_path!("ImportAccount"), format).await
    }

    pub async fn export_account(&self, personal: Personal) -> Result<SingleBytes> {
        self.channel.unary(aergo_path!("ExportAccount"), personal).await
    }

    pub async fn get_state(&self, account: Vec<u8>) -> Result<State> {
        self.channel
            .unary(aergo_path!("GetState"), SingleBytes { value: account })
            .await
    }

    pub async fn get_state_and_proof(&self, request: AccountAndRoot) -> Result<AccountProof> {
        self.channel.unary(aergo_path!("GetStateAndProof"), request).await
    }

    pub async fn get_staking(&self, account: Vec<u8>) -> Result<Staking> {
        self.channel
            .unary(aergo_path!("GetStaking"), AccountAddress { value: account })
            .await
    }

    pub async fn get_name_info(&self, name: String, block_no: u64) -> Result<NameInfo> {
        self.channel
            .unary(aergo_path!("GetNameInfo"), Name { name, block_no })
            .await
    }

    pub async fn get_account_votes(&self, account: Vec<u8>) -> Result<AccountVoteInfo> {
        self.channel
            .unary(aergo_path!("GetAccountVotes"), AccountAddress { value: account })
            .await
    }

    // governance

    pub async fn get_votes(&self, params: VoteParams) -> Result<VoteList> {
        self.channel.unary(aergo_path!("GetVotes"), params).await
    }

    pub async fn change_membership(&self, change: MembershipChange) -> Result<MembershipChangeReply> {
        self.channel.unary(aergo_path!("ChangeMembership"), change).await
    }

    pub async fn get_conf_change_progress(&self, tx_hash: Vec<u8>) -> Result<ConfChangeProgress> {
        self.channel
            .unary(
                aergo_path!("GetConfChangeProgress"),
                SingleBytes { value: tx_hash },
            )
            .await
    }

    pub async fn get_enterprise_config(&self, key: String) -> Result<EnterpriseConfig> {
        self.channel
            .unary(
                aergo_path!("GetEnterpriseConfig"),
                EnterpriseConfigKey { key },
            )
            .await
    }

    // events

    pub async fn list_events(&self, filter: FilterInfo) -> Result<EventList> {
        self.channel.unary(aergo_path!("ListEvents"), filter).await
    }

    pub async fn list_event_stream(&self, filter: FilterInfo) -> Result<Streaming<Event>> {
        self.channel
            .server_streaming(aergo_path!("ListEventStream"), filter)
            .await
    }

    // peers

    pub async fn get_peers(&self, params: PeersParams) -> Result<PeerList> {
        self.channel.unary(aergo_path!("GetPeers"), params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_paths() {
        assert_eq!(aergo_path!("GetTX"), "/types.AergoRPCService/GetTX");
        assert!(aergo_path!("Blockchain").starts_with(&format!("/{}/", AergoClient::service_name())));
    }

    #[tokio::test]
    async fn test_bad_address_is_input_error() {
        let err = RpcChannel::connect_tcp("bad host", 1).await.err().unwrap();
        assert!(matches!(err, CliError::Input(_)));
    }
}
