//! Upfront item-count estimation across both sources.

use iotex_history::HistoryError;
use iotex_history::source::{ActionSource, StakeSource};

/// Rough per-transaction wall-clock cost, used to predict run duration.
pub const SECONDS_PER_TX: f64 = 0.1;

/// Item counts reported by the two sources before any payload is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimate {
    /// Actions known to the primary source.
    pub num_actions: usize,
    /// Stake actions known to the secondary source.
    pub num_stake_actions: usize,
    /// Sum of both, used to size progress tracking.
    pub num_txs: usize,
}

impl Estimate {
    /// Predicted run duration in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        SECONDS_PER_TX * self.num_txs as f64
    }
}

/// Query both sources for their item counts.
///
/// Sizing only: the pipeline terminates each pass on short pages and never
/// reconciles against these counts, so concurrent chain growth during a run
/// may make what is actually fetched drift from the estimate.
///
/// # Errors
///
/// Fails with [`HistoryError::RemoteUnavailable`] if either count query
/// fails; neither query is retried here.
pub async fn estimate<A, S>(actions: &A, stakes: &S, wallet: &str) -> Result<Estimate, HistoryError>
where
    A: ActionSource + ?Sized,
    S: StakeSource + ?Sized,
{
    let num_actions = actions.num_actions(wallet).await?;
    let num_stake_actions = stakes.num_stake_actions(wallet).await?;
    Ok(Estimate {
        num_actions,
        num_stake_actions,
        num_txs: num_actions + num_stake_actions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_scales_with_total() {
        let est = Estimate {
            num_actions: 150,
            num_stake_actions: 50,
            num_txs: 200,
        };
        assert!(
            (est.duration_secs() - SECONDS_PER_TX * 200.0).abs() < f64::EPSILON,
            "duration is per-tx cost times the total"
        );
    }
}
