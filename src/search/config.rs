//! Search configuration.

/// Configuration for the assignment search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Enumerate every assignment (true) or stop at the first accepted
    /// solution (false).
    pub find_all: bool,
    /// Hard ceiling on solver models examined in one run.
    pub max_attempts: usize,
    /// Seed for shuffling the solver's decision order. `None` keeps
    /// variable-index order, which makes runs fully deterministic.
    pub seed: Option<u64>,
    /// Attempts between progress reports during enumeration (0 disables).
    pub milestone_interval: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            find_all: true,
            max_attempts: 2_000_000,
            seed: None,
            milestone_interval: 10_000,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_find_all(mut self, find_all: bool) -> Self {
        self.find_all = find_all;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_milestone_interval(mut self, interval: usize) -> Self {
        self.milestone_interval = interval;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }
        Ok(())
    }
}
