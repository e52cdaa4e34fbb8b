//! Progress reporting through the tracing subscriber.

use iotex_history::source::ProgressSink;

use crate::estimate::SECONDS_PER_TX;

/// [`ProgressSink`] that writes estimates and milestones to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn set_estimate(&mut self, num_txs: usize) {
        let eta_secs = SECONDS_PER_TX * num_txs as f64;
        tracing::info!(num_txs, eta_secs, "estimated transactions");
    }

    fn report_message(&mut self, message: &str) {
        tracing::info!("{message}");
    }
}
