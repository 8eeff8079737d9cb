//! Planner configuration (C11, ambient): the knobs gathered in one place
//! instead of scattered literals, the role the teacher's `handle_go` time
//! allocation and search-tuning constants play for a chess engine.

use std::time::Duration;

use crate::search::Strategy;

/// Safety margin subtracted from the wall-clock budget so the planner has
/// time to return its best program before a hard external deadline.
pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::from_millis(500);

/// Default wall-clock budget when `PAIV_TIMEOUT` is unset.
pub const DEFAULT_TIME_BUDGET_SECS: f64 = 150.0;

/// Node-pool and memo caps, in element counts. These are not derived from
/// `size_of` the pooled struct the way the teacher sizes its
/// transposition table: a `SearchNode`/UCT node's dominant cost is the
/// heap-allocated board it (indirectly) holds, not its own stack size, so
/// the caps below are tuned element counts rather than a memory-size
/// division.
pub const DEFAULT_NODE_POOL_CAP: usize = 2_000_000;
pub const DEFAULT_MEMO_CAP: usize = 500_000;

/// Wall-clock budget, resource caps, and strategy selection for one
/// planning run. Built once in each binary's `main` and passed by value
/// into the driver.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub time_budget: Duration,
    pub node_pool_cap: usize,
    pub memo_cap: usize,
    pub strategy: Strategy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            time_budget: Duration::from_secs_f64(DEFAULT_TIME_BUDGET_SECS) - DEFAULT_SAFETY_MARGIN,
            node_pool_cap: DEFAULT_NODE_POOL_CAP,
            memo_cap: DEFAULT_MEMO_CAP,
            strategy: Strategy::GoalDive,
        }
    }
}

impl PlannerConfig {
    /// Reads `PAIV_TIMEOUT` (seconds, decimal) and `PAIV_STRATEGY`
    /// (`bfs`/`uct`/`dive`) from the environment, falling back to the
    /// built-in defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = PlannerConfig::default();

        if let Ok(raw) = std::env::var("PAIV_TIMEOUT") {
            if let Ok(secs) = raw.trim().parse::<f64>() {
                let total = Duration::from_secs_f64(secs.max(0.0));
                config.time_budget = total.saturating_sub(DEFAULT_SAFETY_MARGIN);
            }
        }

        if let Ok(raw) = std::env::var("PAIV_STRATEGY") {
            config.strategy = match raw.trim().to_ascii_lowercase().as_str() {
                "bfs" => Strategy::Bfs,
                "uct" => Strategy::Uct,
                "dive" => Strategy::GoalDive,
                _ => config.strategy,
            };
        }

        config
    }
}
