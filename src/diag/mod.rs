//! Offline decoding of mempool dumps
//!
//! A dump is a CSV file whose first column holds one base64 encoded
//! protobuf transaction per row. Rows that fail to decode are logged and
//! counted, and decoding carries on with the next row.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use data_encoding::BASE64;
use log::{info, warn};
use prost::Message;

use crate::error::{CliError, Result};
use crate::json::{conv_tx, to_json_string, PayloadEncoding};
use crate::proto::Tx;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpSummary {
    pub rows: usize,
    pub decoded: usize,
    pub failed: usize,
}

/// Decode the transaction in the first column of a row
pub fn decode_row(row: &str) -> Result<Tx> {
    let column = row.split(',').next().unwrap_or("").trim();
    let raw = BASE64
        .decode(column.as_bytes())
        .map_err(|e| CliError::Serialization(format!("invalid base64: {e}")))?;
    Ok(Tx::decode(raw.as_slice())?)
}

/// Print every decodable row of `input` to `out` as transaction json
pub fn decode_dump<R: BufRead, W: Write>(input: R, out: &mut W) -> Result<DumpSummary> {
    let mut summary = DumpSummary::default();
    // Rows are split on raw bytes; a row that is not UTF-8 fails on its own
    for (index, line) in input.split(b'\n').enumerate() {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        if line.trim().is_empty() {
            continue;
        }
        summary.rows += 1;
        match decode_row(&line) {
            Ok(tx) => {
                writeln!(out, "{}", to_json_string(&conv_tx(&tx, PayloadEncoding::Base58))?)?;
                summary.decoded += 1;
            }
            Err(e) => {
                warn!("Skipping row {}: {e}", index + 1);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

pub fn decode_dump_file(path: &Path, out: &mut impl Write) -> Result<DumpSummary> {
    let file = File::open(path)
        .map_err(|e| CliError::Io(format!("cannot open {}: {e}", path.display())))?;
    let summary = decode_dump(BufReader::new(file), out)?;
    info!(
        "Decoded {} of {} rows from {} ({} failed)",
        summary.decoded,
        summary.rows,
        path.display(),
        summary.failed
    );
    Ok(summary)
}
