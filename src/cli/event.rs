//! `event list` and `event stream`

use std::time::Duration;

use log::{debug, info};

use crate::cli::commands::EventCommand;
use crate::cli::context::NodeContext;
use crate::cli::output::print_json;
use crate::core::address::decode_address;
use crate::error::Result;
use crate::json::conv_event;
use crate::network::events::{into_event_stream, stop_on_signal_or_timeout};
use crate::network::{consume_events, StreamEnd};
use crate::proto::FilterInfo;

pub struct ListFilter<'a> {
    pub address: &'a str,
    pub event: &'a str,
    pub start: u64,
    pub end: u64,
    pub desc: bool,
    pub argfilter: &'a str,
    pub recent: i32,
}

impl ListFilter<'_> {
    pub fn to_filter(&self) -> Result<FilterInfo> {
        Ok(FilterInfo {
            contract_address: decode_address(self.address)?,
            event_name: self.event.to_string(),
            blockfrom: self.start,
            blockto: self.end,
            desc: self.desc,
            arg_filter: self.argfilter.as_bytes().to_vec(),
            recent_block_cnt: self.recent,
        })
    }
}

/// Filter for a live stream: no block range, no ordering
pub fn stream_filter(address: &str, event: &str, argfilter: &str) -> Result<FilterInfo> {
    Ok(FilterInfo {
        contract_address: decode_address(address)?,
        event_name: event.to_string(),
        arg_filter: argfilter.as_bytes().to_vec(),
        ..Default::default()
    })
}

pub async fn run(ctx: &NodeContext, cmd: EventCommand) -> Result<()> {
    match cmd {
        EventCommand::List {
            start,
            end,
            event,
            address,
            desc,
            argfilter,
            recent,
        } => {
            let filter = ListFilter {
                address: &address,
                event: &event,
                start,
                end,
                desc,
                argfilter: &argfilter,
                recent,
            }
            .to_filter()?;
            let events = ctx.client()?.list_events(filter).await?;
            for event in &events.events {
                print_json(&conv_event(event))?;
            }
            Ok(())
        }
        EventCommand::Stream {
            address,
            event,
            argfilter,
            limit,
            timeout,
        } => {
            let filter = stream_filter(&address, &event, &argfilter)?;
            let streaming = ctx.client()?.list_event_stream(filter).await?;
            let deadline = (timeout > 0).then(|| Duration::from_secs(timeout));

            let mut printed = Ok(());
            let summary = consume_events(
                into_event_stream(streaming),
                limit,
                stop_on_signal_or_timeout(deadline),
                |event| {
                    if printed.is_ok() {
                        printed = print_json(&conv_event(event));
                    }
                },
            )
            .await?;
            printed?;

            debug!("Event stream ended after {} events", summary.received);
            match summary.end {
                StreamEnd::TimedOut => println!("Timeout reached after {timeout} seconds"),
                StreamEnd::Interrupted => info!("Interrupted, closing event stream"),
                StreamEnd::LimitReached | StreamEnd::Finished => {}
            }
            Ok(())
        }
    }
}
