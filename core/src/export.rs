//! Line-oriented encoders for the final record set.
//!
//! Both formats emit one record per line with a fixed field order:
//! `ip, mac, hostname, reachable, seen_via, timestamp`.

use std::io::Write;
use std::str::FromStr;

use anyhow::Context;
use chrono::SecondsFormat;
use hostscan_common::export::RecordSink;
use hostscan_common::network::host::HostRecord;
use serde::Serialize;

pub const CSV_HEADER: [&str; 6] = ["ip", "mac", "hostname", "reachable", "seen_via", "timestamp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    JsonLines,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "jsonl" | "ndjson" | "json" => Ok(Self::JsonLines),
            other => Err(format!("unknown output format: {other} (expected csv or jsonl)")),
        }
    }
}

/// Boxes the sink matching `format` around `out`.
pub fn sink_for<W: Write + 'static>(format: ExportFormat, out: W) -> Box<dyn RecordSink> {
    match format {
        ExportFormat::Csv => Box::new(CsvSink::new(out)),
        ExportFormat::JsonLines => Box::new(JsonLinesSink::new(out)),
    }
}

/// Flat view of a record with absent values as `None`.
#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    ip: String,
    mac: Option<String>,
    hostname: Option<&'a str>,
    reachable: Option<bool>,
    seen_via: &'static str,
    timestamp: String,
}

impl<'a> From<&'a HostRecord> for RecordRow<'a> {
    fn from(record: &'a HostRecord) -> Self {
        Self {
            ip: record.address.to_string(),
            mac: record.hardware_addr.map(|mac| mac.to_string()),
            hostname: record.hostname.as_deref(),
            reachable: record.reachable,
            seen_via: record.source.as_str(),
            timestamp: record.observed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// CSV with a header row. Absent values are empty cells, reachability is `1`/`0`.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
        }
    }

    pub fn into_inner(self) -> anyhow::Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("flushing csv output: {}", e.error()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_records(&mut self, records: &[HostRecord]) -> anyhow::Result<()> {
        self.writer.write_record(CSV_HEADER)?;

        for record in records {
            let row = RecordRow::from(record);
            let reachable: &str = match row.reachable {
                Some(true) => "1",
                Some(false) => "0",
                None => "",
            };
            self.writer.write_record([
                row.ip.as_str(),
                row.mac.as_deref().unwrap_or(""),
                row.hostname.unwrap_or(""),
                reachable,
                row.seen_via,
                row.timestamp.as_str(),
            ])?;
        }

        self.writer.flush().context("flushing csv output")?;
        Ok(())
    }
}

/// One JSON object per line, `null` for absent values.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write_records(&mut self, records: &[HostRecord]) -> anyhow::Result<()> {
        for record in records {
            serde_json::to_writer(&mut self.out, &RecordRow::from(record))?;
            self.out.write_all(b"\n")?;
        }
        self.out.flush().context("flushing jsonl output")?;
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
