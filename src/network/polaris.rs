//! Client of the polaris peer discovery service

use crate::error::Result;
use crate::network::client::RpcChannel;
use crate::proto::{
    AddEntryParams, BlConfEntries, Empty, Metrics, MetricsRequest, NodeReq, Paginations,
    PolarisPeerList, RmEntryParams, SingleBytes, SingleString,
};

macro_rules! polaris_path {
    ($method:literal) => {
        concat!("/types.PolarisRPCService/", $method)
    };
}

#[derive(Clone)]
pub struct PolarisClient {
    channel: RpcChannel,
}

impl PolarisClient {
    pub fn new(channel: RpcChannel) -> Self {
        PolarisClient { channel }
    }

    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        Ok(PolarisClient::new(RpcChannel::connect_tcp(host, port).await?))
    }

    pub async fn node_state(&self, request: NodeReq) -> Result<SingleBytes> {
        self.channel.unary(polaris_path!("NodeState"), request).await
    }

    pub async fn metric(&self, request: MetricsRequest) -> Result<Metrics> {
        self.channel.unary(polaris_path!("Metric"), request).await
    }

    /// One page of the peers polaris currently knows
    pub async fn current_list(&self, page: Paginations) -> Result<PolarisPeerList> {
        self.channel.unary(polaris_path!("CurrentList"), page).await
    }

    pub async fn white_list(&self, page: Paginations) -> Result<PolarisPeerList> {
        self.channel.unary(polaris_path!("WhiteList"), page).await
    }

    pub async fn black_list(&self, page: Paginations) -> Result<PolarisPeerList> {
        self.channel.unary(polaris_path!("BlackList"), page).await
    }

    pub async fn list_bl_entries(&self) -> Result<BlConfEntries> {
        self.channel.unary(polaris_path!("ListBLEntries"), Empty {}).await
    }

    pub async fn add_bl_entry(&self, entry: AddEntryParams) -> Result<SingleString> {
        self.channel.unary(polaris_path!("AddBLEntry"), entry).await
    }

    pub async fn remove_bl_entry(&self, index: u32) -> Result<SingleString> {
        self.channel
            .unary(polaris_path!("RemoveBLEntry"), RmEntryParams { index })
            .await
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_method_paths() {
        assert_eq!(
            polaris_path!("AddBLEntry"),
            "/types.PolarisRPCService/AddBLEntry"
        );
    }
}
