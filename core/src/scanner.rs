//! Bounded fan-out of per-address work.
//!
//! Every address gets its own task, but at most `max_concurrency` of them
//! hold a permit at once. Tasks only return their own outcome, the map is
//! assembled by the caller once every task has been joined, so nothing is
//! shared between probes.

use std::collections::HashMap;
use std::future::Future;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use hostscan_common::config::Config;
use hostscan_common::network::range::Ipv4Range;
use hostscan_common::scanning::{ProgressFn, ReachabilityProbe};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Slack on top of the requested probe timeout before a probe is abandoned.
///
/// The system `ping` only takes whole seconds, so a 750ms request may wait a full second.
const PROBE_GRACE: Duration = Duration::from_secs(1);

/// Runs `task` for every address and returns the outcomes keyed by address.
///
/// Returns only after every spawned task has finished. `on_complete` is called
/// with the number of finished tasks each time one completes.
pub async fn fan_out<T, F, Fut>(
    addrs: impl IntoIterator<Item = Ipv4Addr>,
    max_concurrency: usize,
    task: F,
    mut on_complete: impl FnMut(usize),
) -> HashMap<Ipv4Addr, T>
where
    F: Fn(Ipv4Addr) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut tasks: JoinSet<(Ipv4Addr, T)> = JoinSet::new();

    for addr in addrs {
        let permits = Arc::clone(&semaphore);
        let work = task(addr);
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await.ok();
            (addr, work.await)
        });
    }

    let mut outcomes: HashMap<Ipv4Addr, T> = HashMap::new();
    let mut completed: usize = 0;

    while let Some(joined) = tasks.join_next().await {
        completed += 1;
        match joined {
            Ok((addr, outcome)) => {
                outcomes.insert(addr, outcome);
            }
            Err(e) => warn!("Worker task failed: {e}"),
        }
        on_complete(completed);
    }

    outcomes
}

/// Probes every address of `range` and records whether it answered.
///
/// A probe that overruns its timeout is dropped and counted as unreachable.
pub async fn probe_range(
    range: &Ipv4Range,
    probe: Arc<dyn ReachabilityProbe>,
    cfg: &Config,
    progress: Option<&ProgressFn>,
) -> HashMap<Ipv4Addr, bool> {
    let total: usize = range.len();
    let timeout: Duration = cfg.probe_timeout;
    let deadline: Duration = timeout + PROBE_GRACE;

    debug!(
        "Probing {total} addresses, {} at a time, {}ms timeout",
        cfg.max_concurrency,
        timeout.as_millis()
    );

    fan_out(
        range.iter(),
        cfg.max_concurrency,
        move |addr| {
            let probe = Arc::clone(&probe);
            async move {
                tokio::time::timeout(deadline, probe.probe(addr, timeout))
                    .await
                    .unwrap_or(false)
            }
        },
        |done| {
            if let Some(report) = progress {
                report(done, total);
            }
        },
    )
    .await
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
