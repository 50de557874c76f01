use crate::search::SearchConfig;
use memory_stats::memory_stats;
use std::time::{Duration, Instant};
use tracing::info;

/// Resource budget of a single search: expansions, wall-clock time and
/// resident memory. Memory is only sampled when progress is logged.
#[derive(Debug)]
pub struct TerminationCondition {
    max_expansions: Option<u64>,
    time_limit: Option<Duration>,
    memory_limit_mb: Option<usize>,
    start_time: Instant,
    peak_memory_usage_mb: Option<usize>,
    last_log_time: Instant,
}

impl TerminationCondition {
    pub fn new(config: &SearchConfig) -> Self {
        info!(
            max_expansions = config.max_expansions,
            time_limit = config.time_limit.map(|d| d.as_secs_f64()),
            memory_limit_mb = config.memory_limit_mb,
        );
        Self {
            max_expansions: config.max_expansions,
            time_limit: config.time_limit,
            memory_limit_mb: config.memory_limit_mb,
            start_time: Instant::now(),
            peak_memory_usage_mb: None,
            last_log_time: Instant::now(),
        }
    }

    pub fn log_if_needed(&mut self) {
        if self.last_log_time.elapsed() > Duration::from_secs(10) {
            self.last_log_time = Instant::now();
            self.log();
        }
    }

    pub fn log(&mut self) {
        let memory_usage = memory_stats().map(|usage| usage.physical_mem / 1024 / 1024);
        self.peak_memory_usage_mb = self.peak_memory_usage_mb.max(memory_usage);
        info!(
            memory_usage_mb = memory_usage,
            time_elapsed = self.start_time.elapsed().as_secs_f64(),
        );
    }

    pub fn finalise(&mut self) {
        self.log();
        info!(
            peak_recorded_memory_usage_mb = self.peak_memory_usage_mb,
            total_time_used = self.start_time.elapsed().as_secs_f64(),
        );
    }

    /// Whether the search has to stop before expanding another node, given
    /// how many it has expanded so far.
    pub fn should_terminate(&mut self, expanded_nodes: u64) -> bool {
        self.log_if_needed();
        if self.max_expansions.is_some_and(|limit| expanded_nodes >= limit) {
            info!("expansion limit reached");
            return true;
        }
        if self
            .time_limit
            .is_some_and(|limit| self.start_time.elapsed() > limit)
        {
            info!("time limit exceeded");
            return true;
        }
        if let (Some(limit), Some(peak)) = (self.memory_limit_mb, self.peak_memory_usage_mb) {
            if peak > limit {
                info!("memory limit exceeded");
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_never_terminates() {
        let mut condition = TerminationCondition::new(&SearchConfig::default());
        assert!(!condition.should_terminate(u64::MAX));
    }

    #[test]
    fn expansion_limit_is_inclusive() {
        let config = SearchConfig {
            max_expansions: Some(3),
            ..SearchConfig::default()
        };
        let mut condition = TerminationCondition::new(&config);
        assert!(!condition.should_terminate(2));
        assert!(condition.should_terminate(3));
    }

    #[test]
    fn zero_time_limit_terminates() {
        let config = SearchConfig {
            time_limit: Some(Duration::ZERO),
            ..SearchConfig::default()
        };
        let mut condition = TerminationCondition::new(&config);
        std::thread::sleep(Duration::from_millis(2));
        assert!(condition.should_terminate(0));
    }
}
