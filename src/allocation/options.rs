/// Parameters of the scrutiny (minimum vote share) step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrutinyRules {
    /// Threshold, in percent, tried first.
    pub initial_threshold_pct: i32,
    /// Lowest threshold tried before giving up.
    pub threshold_floor_pct: i32,
    /// Number of parties that must clear the threshold in a single round.
    pub min_qualified_parties: usize,
}

impl ScrutinyRules {
    /// Upper bound on the number of threshold rounds these rules can take.
    pub fn max_rounds(&self) -> usize {
        (self.initial_threshold_pct - self.threshold_floor_pct + 1).max(0) as usize
    }
}

impl Default for ScrutinyRules {
    fn default() -> Self {
        Self {
            initial_threshold_pct: 5,
            threshold_floor_pct: 0,
            min_qualified_parties: 2,
        }
    }
}
