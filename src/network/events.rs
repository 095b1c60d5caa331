//! Consumption of the node's event stream
//!
//! The stream is read one message at a time until a limit is reached, the
//! server closes it, a transport error occurs or the caller's stop future
//! (signal or deadline) resolves.

use std::future::Future;
use std::time::Duration;

use futures::{Stream, StreamExt};
use log::{debug, warn};

use crate::error::{CliError, Result, RpcErrorKind};
use crate::proto::Event;

/// Why a stream consumption ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    LimitReached,
    Finished,
    Interrupted,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    pub received: usize,
    pub end: StreamEnd,
}

/// A message that arrived but could not be decoded; the stream goes on
fn is_decode_failure(err: &CliError) -> bool {
    matches!(err, CliError::Rpc { kind: RpcErrorKind::Internal, message } if message.contains("decode"))
}

/// Feed events to `on_event` until the stream ends or `stop` resolves.
///
/// A `limit` of zero means unlimited.
pub async fn consume_events<S, F, C>(
    mut stream: S,
    limit: usize,
    stop: C,
    mut on_event: F,
) -> Result<StreamSummary>
where
    S: Stream<Item = Result<Event>> + Unpin,
    F: FnMut(&Event),
    C: Future<Output = StreamEnd>,
{
    tokio::pin!(stop);
    let mut received = 0usize;
    loop {
        if limit > 0 && received >= limit {
            return Ok(StreamSummary {
                received,
                end: StreamEnd::LimitReached,
            });
        }
        tokio::select! {
            end = &mut stop => {
                debug!("event stream stopped after {received} events");
                return Ok(StreamSummary { received, end });
            }
            next = stream.next() => match next {
                Some(Ok(event)) => {
                    received += 1;
                    on_event(&event);
                }
                Some(Err(e)) if is_decode_failure(&e) => {
                    warn!("Skipping undecodable event: {e}");
                }
                Some(Err(e)) => return Err(e),
                None => {
                    return Ok(StreamSummary {
                        received,
                        end: StreamEnd::Finished,
                    })
                }
            }
        }
    }
}

/// Resolves on SIGINT or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Cannot listen for interrupt: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Cannot listen for termination: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Stop future for a stream: a signal, or the deadline when one is given
pub async fn stop_on_signal_or_timeout(timeout: Option<Duration>) -> StreamEnd {
    let deadline = async {
        match timeout {
            Some(after) => tokio::time::sleep(after).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::select! {
        _ = shutdown_signal() => StreamEnd::Interrupted,
        _ = deadline => StreamEnd::TimedOut,
    }
}

/// Map a server stream onto crate errors
pub fn into_event_stream(
    streaming: tonic::codec::Streaming<Event>,
) -> impl Stream<Item = Result<Event>> + Unpin {
    streaming.map(|item| item.map_err(CliError::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn event(idx: i32) -> Event {
        Event {
            event_name: "e".to_string(),
            event_idx: idx,
            ..Default::default()
        }
    }

    fn never() -> impl Future<Output = StreamEnd> {
        std::future::pending()
    }

    #[tokio::test]
    async fn test_limit_stops_early() {
        let items: Vec<Result<Event>> = (0..5).map(|i| Ok(event(i))).collect();
        let mut seen = Vec::new();
        let summary = consume_events(stream::iter(items), 3, never(), |e| seen.push(e.event_idx))
            .await
            .unwrap();
        assert_eq!(summary.end, StreamEnd::LimitReached);
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_end_of_stream() {
        let items: Vec<Result<Event>> = vec![Ok(event(0))];
        let summary = consume_events(stream::iter(items), 0, never(), |_| {})
            .await
            .unwrap();
        assert_eq!(
            summary,
            StreamSummary {
                received: 1,
                end: StreamEnd::Finished
            }
        );
    }

    #[tokio::test]
    async fn test_transport_error_terminates() {
        let items: Vec<Result<Event>> = vec![
            Ok(event(0)),
            Err(CliError::rpc(RpcErrorKind::Unavailable, "gone")),
            Ok(event(1)),
        ];
        let mut count = 0;
        let err = consume_events(stream::iter(items), 0, never(), |_| count += 1)
            .await
            .unwrap_err();
        assert_eq!(count, 1);
        assert!(matches!(err, CliError::Rpc { .. }));
    }

    #[tokio::test]
    async fn test_decode_failure_skipped() {
        let items: Vec<Result<Event>> = vec![
            Err(CliError::rpc(RpcErrorKind::Internal, "failed to decode Protobuf message")),
            Ok(event(7)),
        ];
        let mut seen = Vec::new();
        let summary = consume_events(stream::iter(items), 0, never(), |e| seen.push(e.event_idx))
            .await
            .unwrap();
        assert_eq!(seen, vec![7]);
        assert_eq!(summary.end, StreamEnd::Finished);
    }

    #[tokio::test]
    async fn test_stop_future_wins_on_idle_stream() {
        let idle = stream::pending::<Result<Event>>();
        let summary = consume_events(idle, 0, async { StreamEnd::Interrupted }, |_| {})
            .await
            .unwrap();
        assert_eq!(summary.end, StreamEnd::Interrupted);
        assert_eq!(summary.received, 0);
    }

    #[tokio::test]
    async fn test_deadline() {
        let idle = stream::pending::<Result<Event>>();
        let stop = stop_on_signal_or_timeout(Some(Duration::from_millis(10)));
        let summary = consume_events(idle, 0, stop, |_| {}).await.unwrap();
        assert_eq!(summary.end, StreamEnd::TimedOut);
    }
}
