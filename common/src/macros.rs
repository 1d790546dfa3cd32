/// Target used by [`success!`] so formatters can render positive milestones apart from plain info.
pub const SUCCESS_TARGET: &str = "hostscan::success";

/// Emits an info-level event marking a completed milestone.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        tracing::info!(target: $crate::macros::SUCCESS_TARGET, $($arg)*)
    };
}
