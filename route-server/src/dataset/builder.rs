//! Incremental construction of a [`RouteDataset`].

use super::{RouteDataset, RouteId, SEGMENT_HEADER_LEN, StopId};

/// Appends route segments to a flat buffer.
///
/// Segments are written in place: `begin_route` reserves the segment header,
/// stops are pushed behind it, and `finish_route` sorts them and fills in the
/// stop count. The buffer only becomes a [`RouteDataset`] through `finish`,
/// so a partially built dataset is never visible outside the loader.
#[derive(Debug)]
pub(crate) struct DatasetBuilder {
    data: Vec<u32>,
    route_start: usize,
}

impl DatasetBuilder {
    /// Start a dataset declaring `route_count` routes, reserving `capacity` slots.
    pub(crate) fn with_capacity(route_count: u32, capacity: usize) -> Self {
        let mut data = Vec::with_capacity(capacity.max(1));
        data.push(route_count);
        Self {
            data,
            route_start: 1,
        }
    }

    /// Open a new route segment.
    pub(crate) fn begin_route(&mut self, id: RouteId) {
        self.route_start = self.data.len();
        self.data.push(id);
        self.data.push(0);
    }

    /// Append a stop to the open segment.
    pub(crate) fn push_stop(&mut self, stop: StopId) {
        self.data.push(stop);
    }

    /// Number of stops pushed to the open segment so far.
    pub(crate) fn open_stop_count(&self) -> usize {
        self.data.len() - self.route_start - SEGMENT_HEADER_LEN
    }

    /// Close the open segment: sort its stops and record their count.
    ///
    /// Returns the number of stops in the segment.
    pub(crate) fn finish_route(&mut self) -> usize {
        let stops = &mut self.data[self.route_start + SEGMENT_HEADER_LEN..];
        stops.sort_unstable();
        let stop_count = stops.len();
        // The scanner never lets a segment exceed u32::MAX stops.
        self.data[self.route_start + 1] = stop_count as u32;
        stop_count
    }

    /// Number of slots used so far.
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    /// Produce the dataset, trimming the buffer to its used length if `shrink` is set.
    pub(crate) fn finish(mut self, shrink: bool) -> RouteDataset {
        if shrink {
            self.data.shrink_to_fit();
        }
        RouteDataset { data: self.data }
    }
}
