//! Admin service of the node, reached over a Unix-domain socket
//!
//! The mempool dumps it returns can be large, so responses up to 256 MiB
//! are accepted.

use log::debug;

use crate::error::{CliError, Result, RpcErrorKind};
use crate::network::client::RpcChannel;
use crate::proto::{Account, AccountList, Empty, SingleBytes};

pub const ADMIN_MAX_RECV_SIZE: usize = crate::network::client::MAX_RECV_SIZE;

/// Socket path from a `-s` value; the `unix:` dial prefix is optional
pub fn socket_path(dial: &str) -> &str {
    dial.strip_prefix("unix:").unwrap_or(dial)
}

#[cfg(unix)]
async fn dial_unix(path: &str) -> Result<tonic::transport::Channel> {
    use hyper_util::rt::TokioIo;
    use tokio::net::UnixStream;
    use tonic::transport::{Endpoint, Uri};
    use tower::service_fn;

    let path = path.to_string();
    // The authority is ignored; every connection goes to the socket.
    let endpoint = Endpoint::try_from("http://[::]:0")
        .map_err(|e| CliError::rpc(RpcErrorKind::Internal, e.to_string()))?;
    let channel = endpoint
        .connect_with_connector(service_fn(move |_: Uri| {
            let path = path.clone();
            async move { Ok::<_, std::io::Error>(TokioIo::new(UnixStream::connect(path).await?)) }
        }))
        .await?;
    Ok(channel)
}

#[cfg(not(unix))]
async fn dial_unix(path: &str) -> Result<tonic::transport::Channel> {
    Err(CliError::Input(format!(
        "unix socket {path} is not supported on this platform"
    )))
}

#[derive(Clone)]
pub struct AdminClient {
    channel: RpcChannel,
}

impl AdminClient {
    pub async fn connect(dial: &str) -> Result<Self> {
        let path = socket_path(dial);
        if path.is_empty() {
            return Err(CliError::Input("admin socket path is empty".to_string()));
        }
        debug!("Connecting to admin socket {path}");
        let channel = dial_unix(path).await.map_err(|e| match e {
            CliError::Rpc { kind, message } => CliError::rpc(
                kind,
                format!("cannot connect to admin socket {path}: {message}"),
            ),
            other => other,
        })?;
        Ok(AdminClient {
            channel: RpcChannel::new(channel, Some(ADMIN_MAX_RECV_SIZE)),
        })
    }

    /// Mempool statistics as the JSON text the node renders
    pub async fn mempool_tx_stat(&self) -> Result<SingleBytes> {
        self.channel
            .unary("/types.Admin/MempoolTxStat", Empty {})
            .await
    }

    /// Pending transactions of the given accounts, as JSON text
    pub async fn mempool_tx(&self, accounts: Vec<Vec<u8>>) -> Result<SingleBytes> {
        let list = AccountList {
            accounts: accounts
                .into_iter()
                .map(|address| Account { address })
                .collect(),
        };
        self.channel.unary("/types.Admin/MempoolTx", list).await
    }
}
