//! Lookup over an in-memory [`RouteDataset`].

use std::sync::Arc;

use crate::dataset::{RouteDataset, StopId};

use super::RouteManager;

/// Check if a direct route between two stops exists in `dataset`.
///
/// Each route's stops are sorted, so the arrival stop is binary-searched
/// first. When it is found, the departure stop can only be in the part of
/// the segment on its side of the arrival: below it when it is smaller, from
/// the arrival onwards otherwise. Only that part is searched.
///
/// When `departure == arrival` this reports whether any route visits the stop.
///
/// # Examples
///
/// ```
/// use route_server::dataset::RouteDataset;
/// use route_server::lookup::direct_route_exists;
///
/// let dataset = RouteDataset::from_flat(vec![1, 7, 3, 2, 4, 9]).unwrap();
/// assert!(direct_route_exists(&dataset, 9, 2));
/// assert!(!direct_route_exists(&dataset, 9, 3));
/// ```
pub fn direct_route_exists(dataset: &RouteDataset, departure: StopId, arrival: StopId) -> bool {
    if dataset.is_empty() {
        return false;
    }

    dataset.routes().any(|route| {
        let Ok(arrival_index) = route.stops.binary_search(&arrival) else {
            return false;
        };
        let candidates = if arrival > departure {
            &route.stops[..arrival_index]
        } else {
            &route.stops[arrival_index..]
        };
        candidates.binary_search(&departure).is_ok()
    })
}

/// Route manager backed by a loaded [`RouteDataset`].
#[derive(Debug, Clone)]
pub struct MemoryRouteManager {
    dataset: Arc<RouteDataset>,
}

impl MemoryRouteManager {
    /// Create a manager over the given dataset.
    pub fn new(dataset: impl Into<Arc<RouteDataset>>) -> Self {
        Self {
            dataset: dataset.into(),
        }
    }

    /// The dataset queries are answered from.
    pub fn dataset(&self) -> &RouteDataset {
        &self.dataset
    }
}

impl RouteManager for MemoryRouteManager {
    fn is_direct_route_available(&self, departure: StopId, arrival: StopId) -> bool {
        direct_route_exists(&self.dataset, departure, arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_data() -> RouteDataset {
        RouteDataset::from_flat(vec![
            // number of routes
            2,
            // route id followed by the number of stops and sorted stop ids
            1, 13, 2, 3, 5, 9, 13, 34, 43, 45, 65, 71, 73, 76, 88, //
            2, 7, 5, 6, 12, 34, 55, 76, 78,
        ])
        .unwrap()
    }

    #[test]
    fn identifies_direct_routes() {
        let manager = MemoryRouteManager::new(route_data());

        assert!(manager.is_direct_route_available(2, 43));
        assert!(manager.is_direct_route_available(13, 3));
        assert!(manager.is_direct_route_available(5, 55));
        assert!(manager.is_direct_route_available(78, 76));
        assert!(manager.is_direct_route_available(88, 76));
        assert!(!manager.is_direct_route_available(2, 12));
        assert!(!manager.is_direct_route_available(3, 55));
    }

    #[test]
    fn empty_dataset_has_no_routes() {
        let manager = MemoryRouteManager::new(RouteDataset::empty());

        assert!(!manager.is_direct_route_available(100, 200));
        assert!(!manager.is_direct_route_available(0, 0));
    }

    #[test]
    fn unknown_stops() {
        let dataset = route_data();

        assert!(!direct_route_exists(&dataset, 1000, 2));
        assert!(!direct_route_exists(&dataset, 2, 1000));
        assert!(!direct_route_exists(&dataset, 0, 1));
    }

    #[test]
    fn arrival_at_first_position_is_found() {
        let dataset = route_data();

        // 2 is the first stop of route 1, 5 the first of route 2
        assert!(direct_route_exists(&dataset, 88, 2));
        assert!(direct_route_exists(&dataset, 78, 5));
        assert!(direct_route_exists(&dataset, 2, 2));
    }

    #[test]
    fn departure_at_first_position_is_found() {
        let dataset = route_data();

        assert!(direct_route_exists(&dataset, 2, 88));
        assert!(direct_route_exists(&dataset, 5, 6));
        // first slot of the upper half starting at the arrival
        assert!(direct_route_exists(&dataset, 76, 76));
    }

    #[test]
    fn same_stop_means_stop_is_served() {
        let dataset = route_data();

        assert!(direct_route_exists(&dataset, 34, 34));
        assert!(direct_route_exists(&dataset, 78, 78));
        assert!(!direct_route_exists(&dataset, 4, 4));
    }

    #[test]
    fn match_in_later_route() {
        let dataset = RouteDataset::from_flat(vec![
            3, //
            10, 2, 1, 2, //
            11, 2, 3, 4, //
            12, 3, 5, 6, 7,
        ])
        .unwrap();

        assert!(direct_route_exists(&dataset, 7, 5));
        assert!(!direct_route_exists(&dataset, 2, 3));
    }

    #[test]
    fn shared_across_threads() {
        let manager = Arc::new(MemoryRouteManager::new(route_data()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let manager = Arc::clone(&manager);
                std::thread::spawn(move || manager.is_direct_route_available(2, 43))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
