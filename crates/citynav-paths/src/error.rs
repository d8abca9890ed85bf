//! Error types for route requests.

use std::fmt;

use citynav_core::Cell;
use thiserror::Error;

use crate::traversability::Blocked;

/// Which end of a request an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::Goal => f.write_str("goal"),
        }
    }
}

/// A route request that could not be answered.
///
/// An unreachable goal is not an error; see
/// [`PathOutcome::Unreachable`](crate::PathOutcome::Unreachable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("{endpoint} {cell} is outside the {width}x{height} map")]
    OutOfBounds {
        endpoint: Endpoint,
        cell: Cell,
        width: i32,
        height: i32,
    },

    #[error("{endpoint} {cell} is not passable: {reason}")]
    BlockedEndpoint {
        endpoint: Endpoint,
        cell: Cell,
        reason: Blocked,
    },

    #[error("search gave up after {expanded} expansions")]
    SearchLimitExceeded { expanded: usize },

    #[error("search ran out of time after {expanded} expansions")]
    DeadlineExceeded { expanded: usize },
}

impl PathError {
    /// Whether the request itself was malformed, as opposed to the search
    /// hitting a guard.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            PathError::OutOfBounds { .. } | PathError::BlockedEndpoint { .. }
        )
    }
}
