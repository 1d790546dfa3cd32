use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tracing::{Instrument, info_span};

use crate::commands::Output;
use crate::terminal::{print, spinner};
use hostscan_common::{config::Config, success};
use hostscan_core::discovery::{Discovery, DiscoveryService};
use hostscan_core::{export, network, resolver::ReverseDns, system::SystemNeighborTable};

/// Runs one discovery and writes the records.
///
/// Nothing is written, and the output file is not even created, unless the run succeeds.
pub async fn discover(cfg: &Config, output: &Output) -> anyhow::Result<()> {
    let observed_at = Utc::now();

    let mut service = DiscoveryService::new(
        Box::new(SystemNeighborTable),
        network::probe_for(cfg),
        Arc::new(ReverseDns::new(cfg.dns_timeout)),
    );
    if cfg.active {
        service = service.with_progress(Box::new(spinner::report_probe_progress));
    }

    let result = service
        .perform_discovery(cfg, observed_at)
        .instrument(info_span!("discovery"))
        .await;
    spinner::finish();

    let discovery: Discovery = result?;

    write_records(&discovery, output)?;
    print::summary(&discovery.report);

    let destination: String = match &output.path {
        Some(path) => path.display().to_string(),
        None => "stdout".to_string(),
    };
    success!("Wrote {} record(s) to {destination}", discovery.records.len());
    Ok(())
}

fn write_records(discovery: &Discovery, output: &Output) -> anyhow::Result<()> {
    let out: Box<dyn Write> = match &output.path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    export::sink_for(output.format, out).write_records(&discovery.records)
}
