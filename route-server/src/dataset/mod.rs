//! Compact route index.
//!
//! A [`RouteDataset`] stores every route in one flat sequence of `u32`:
//!
//! ```text
//! [route_count, (route_id, stop_count, stop_1 .. stop_k) x route_count]
//! ```
//!
//! Stop ids inside each route segment are sorted ascending, which lets the
//! lookup engine binary-search a segment instead of scanning it. A dataset is
//! only ever produced whole (by the loader or by [`RouteDataset::from_flat`])
//! and has no mutation path afterwards.

mod builder;

pub(crate) use builder::DatasetBuilder;

/// Identifier of a stop.
pub type StopId = u32;

/// Identifier of a route.
pub type RouteId = u32;

/// Number of header slots that precede the stops of every route segment
/// (route id and stop count).
pub(crate) const SEGMENT_HEADER_LEN: usize = 2;

/// Minimum number of stops a route must have.
pub const MIN_STOPS_PER_ROUTE: usize = 2;

/// Error returned when a flat sequence does not describe a valid dataset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidLayout {
    /// A segment header points past the end of the sequence
    #[error("route #{index} is truncated")]
    Truncated { index: usize },

    /// A route has fewer than two stops
    #[error("route {route_id} has {stop_count} stops, at least 2 are required")]
    TooFewStops { route_id: RouteId, stop_count: usize },

    /// A route's stop ids are not in ascending order
    #[error("stops of route {route_id} are not sorted")]
    Unsorted { route_id: RouteId },

    /// Values remain after the declared number of routes
    #[error("{extra} values follow the last declared route")]
    TrailingData { extra: usize },
}

/// Immutable index of routes and their sorted stops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteDataset {
    data: Vec<u32>,
}

/// A view of one route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route<'a> {
    /// Route identifier.
    pub id: RouteId,

    /// Stop ids visited by the route, sorted ascending.
    pub stops: &'a [StopId],
}

impl RouteDataset {
    /// The dataset with no routes.
    ///
    /// This is what a failed load degrades to: every query against it
    /// answers `false`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a dataset from its flat encoding, checking every invariant.
    ///
    /// An empty sequence yields the empty dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_server::dataset::RouteDataset;
    ///
    /// let dataset = RouteDataset::from_flat(vec![1, 7, 3, 2, 4, 9]).unwrap();
    /// let route = dataset.routes().next().unwrap();
    /// assert_eq!(route.id, 7);
    /// assert_eq!(route.stops, &[2, 4, 9]);
    ///
    /// // Stops must be sorted
    /// assert!(RouteDataset::from_flat(vec![1, 7, 2, 9, 4]).is_err());
    /// ```
    pub fn from_flat(data: Vec<u32>) -> Result<Self, InvalidLayout> {
        let Some((&route_count, _)) = data.split_first() else {
            return Ok(Self::empty());
        };

        let mut offset = 1;
        for index in 0..route_count as usize {
            let header_end = offset + SEGMENT_HEADER_LEN;
            if header_end > data.len() {
                return Err(InvalidLayout::Truncated { index });
            }
            let route_id = data[offset];
            let stop_count = data[offset + 1] as usize;
            let end = header_end + stop_count;
            if end > data.len() {
                return Err(InvalidLayout::Truncated { index });
            }
            if stop_count < MIN_STOPS_PER_ROUTE {
                return Err(InvalidLayout::TooFewStops {
                    route_id,
                    stop_count,
                });
            }
            if !data[header_end..end].is_sorted() {
                return Err(InvalidLayout::Unsorted { route_id });
            }
            offset = end;
        }

        if offset != data.len() {
            return Err(InvalidLayout::TrailingData {
                extra: data.len() - offset,
            });
        }

        Ok(Self { data })
    }

    /// Returns true if the dataset holds no routes.
    pub fn is_empty(&self) -> bool {
        self.route_count() == 0
    }

    /// Number of routes, as declared by the dataset header.
    pub fn route_count(&self) -> usize {
        self.data.first().copied().unwrap_or(0) as usize
    }

    /// Length of the flat encoding.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Number of `u32` slots reserved by the backing buffer.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// The flat encoding.
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// Iterate over route segments in storage order.
    pub fn routes(&self) -> Routes<'_> {
        Routes {
            data: self.data.get(1..).unwrap_or(&[]),
            remaining: self.route_count(),
        }
    }
}

/// Iterator over the routes of a [`RouteDataset`].
#[derive(Debug, Clone)]
pub struct Routes<'a> {
    data: &'a [u32],
    remaining: usize,
}

impl<'a> Iterator for Routes<'a> {
    type Item = Route<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (header, rest) = self.data.split_at_checked(SEGMENT_HEADER_LEN)?;
        let (stops, rest) = rest.split_at_checked(header[1] as usize)?;
        self.data = rest;
        self.remaining -= 1;
        Some(Route {
            id: header[0],
            stops,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<u32> {
        vec![
            2, //
            1, 13, 2, 3, 5, 9, 13, 34, 43, 45, 65, 71, 73, 76, 88, //
            2, 7, 5, 6, 12, 34, 55, 76, 78,
        ]
    }

    #[test]
    fn empty_dataset() {
        let dataset = RouteDataset::empty();

        assert!(dataset.is_empty());
        assert_eq!(dataset.route_count(), 0);
        assert_eq!(dataset.len(), 0);
        assert_eq!(dataset.routes().count(), 0);
    }

    #[test]
    fn from_flat_accepts_empty_sequence() {
        let dataset = RouteDataset::from_flat(vec![]).unwrap();
        assert_eq!(dataset, RouteDataset::empty());
    }

    #[test]
    fn routes_in_storage_order() {
        let dataset = RouteDataset::from_flat(sample()).unwrap();

        let routes: Vec<_> = dataset.routes().collect();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].id, 1);
        assert_eq!(routes[0].stops.len(), 13);
        assert_eq!(routes[1].id, 2);
        assert_eq!(routes[1].stops, &[5, 6, 12, 34, 55, 76, 78]);
    }

    #[test]
    fn length_matches_segment_sizes() {
        let dataset = RouteDataset::from_flat(sample()).unwrap();

        let expected = 1 + dataset.routes().map(|r| r.stops.len() + 2).sum::<usize>();
        assert_eq!(dataset.len(), expected);
        assert_eq!(dataset.as_slice(), sample().as_slice());
    }

    #[test]
    fn reject_truncated_segment() {
        let err = RouteDataset::from_flat(vec![2, 1, 2, 3, 4]).unwrap_err();
        assert_eq!(err, InvalidLayout::Truncated { index: 1 });

        let err = RouteDataset::from_flat(vec![1, 1, 5, 3, 4]).unwrap_err();
        assert_eq!(err, InvalidLayout::Truncated { index: 0 });
    }

    #[test]
    fn reject_single_stop_route() {
        let err = RouteDataset::from_flat(vec![1, 9, 1, 3]).unwrap_err();
        assert_eq!(
            err,
            InvalidLayout::TooFewStops {
                route_id: 9,
                stop_count: 1
            }
        );
    }

    #[test]
    fn reject_unsorted_stops() {
        let err = RouteDataset::from_flat(vec![1, 4, 3, 1, 3, 2]).unwrap_err();
        assert_eq!(err, InvalidLayout::Unsorted { route_id: 4 });
    }

    #[test]
    fn reject_trailing_data() {
        let err = RouteDataset::from_flat(vec![1, 4, 2, 1, 3, 8, 8]).unwrap_err();
        assert_eq!(err, InvalidLayout::TrailingData { extra: 2 });
    }

    #[test]
    fn error_display() {
        let err = InvalidLayout::TooFewStops {
            route_id: 3,
            stop_count: 1,
        };
        assert_eq!(err.to_string(), "route 3 has 1 stops, at least 2 are required");

        let err = InvalidLayout::Unsorted { route_id: 3 };
        assert_eq!(err.to_string(), "stops of route 3 are not sorted");
    }
}
