//! Search limits.

use std::time::{Duration, Instant};

/// Expansions allowed per grid cell when no explicit cap is configured.
const DEFAULT_EXPANSIONS_PER_CELL: usize = 4;

/// Floor for the derived cap, so tiny grids are never starved.
const MIN_DEFAULT_EXPANSIONS: usize = 64;

/// Tunables for a route search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Maximum number of cells expanded before giving up. `None` derives a
    /// cap from the grid size that a well-formed search never reaches.
    pub max_expansions: Option<usize>,

    /// Wall-clock budget per search in milliseconds. `None` means no deadline.
    pub time_budget_ms: Option<u64>,
}

impl SearchConfig {
    /// Cap the number of expansions (builder).
    pub fn with_max_expansions(mut self, n: usize) -> Self {
        self.max_expansions = Some(n);
        self
    }

    /// Set a wall-clock budget (builder).
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(budget.as_millis().min(u128::from(u64::MAX)) as u64);
        self
    }

    /// Resolve the limits for a search over `cells` grid cells, starting now.
    pub fn budget(&self, cells: usize) -> SearchBudget {
        let max_expansions = self.max_expansions.unwrap_or_else(|| {
            cells
                .saturating_mul(DEFAULT_EXPANSIONS_PER_CELL)
                .max(MIN_DEFAULT_EXPANSIONS)
        });
        let deadline = self
            .time_budget_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));
        SearchBudget {
            max_expansions,
            deadline,
        }
    }
}

/// Concrete limits of one running search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    pub max_expansions: usize,
    pub deadline: Option<Instant>,
}

impl SearchBudget {
    /// No limits at all.
    pub fn unlimited() -> Self {
        Self {
            max_expansions: usize::MAX,
            deadline: None,
        }
    }

    #[inline]
    pub(crate) fn past_deadline(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
