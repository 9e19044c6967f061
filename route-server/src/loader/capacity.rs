//! Buffer sizing for the loader.
//!
//! The output buffer is reserved up front from the declared route count and
//! the per-route stop ceiling, so a source that stays within its limits is
//! parsed without reallocating. Once parsing is done the buffer is trimmed
//! only when the used length is below half of the absolute worst case: small
//! datasets do not keep an oversized allocation, and datasets already close
//! to the worst case skip the copy.

use super::config::LoaderConfig;
use crate::dataset::SEGMENT_HEADER_LEN;

/// Sizing decisions derived from a [`LoaderConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityPolicy {
    max_routes: usize,
    max_stops_per_route: usize,
}

impl CapacityPolicy {
    /// Create a policy for the given ceilings.
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            max_routes: config.max_routes,
            max_stops_per_route: config.max_stops_per_route,
        }
    }

    /// Slots needed by the largest possible segment.
    fn max_segment_len(&self) -> usize {
        self.max_stops_per_route.saturating_add(SEGMENT_HEADER_LEN)
    }

    /// Slots to reserve for a source of `source_len` bytes declaring
    /// `declared_routes` routes.
    ///
    /// The declared count is clamped to the route ceiling. A source of `n`
    /// bytes never encodes more than `n + 1` slots, so the reservation is
    /// also clamped to that.
    pub fn preallocation(&self, declared_routes: usize, source_len: usize) -> usize {
        declared_routes
            .min(self.max_routes)
            .saturating_mul(self.max_segment_len())
            .saturating_add(1)
            .min(source_len.saturating_add(1))
    }

    /// Dataset length when every route allowed by the ceilings is present
    /// with the maximum number of stops.
    pub fn worst_case(&self) -> usize {
        self.max_routes
            .saturating_mul(self.max_segment_len())
            .saturating_add(1)
    }

    /// Used lengths below this value get their buffer trimmed.
    pub fn shrink_threshold(&self) -> usize {
        self.worst_case() / 2
    }

    /// Whether a buffer holding `used` slots should be trimmed.
    pub fn should_shrink(&self, used: usize) -> bool {
        used < self.shrink_threshold()
    }
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self::new(&LoaderConfig::default())
    }
}
