//! Single forward pass over route data bytes.
//!
//! Digits accumulate into the current number by decimal place value, a space
//! closes the current number and a line feed closes the current record.
//! Carriage returns are ignored wherever they appear. Any other byte is a
//! format violation that aborts the whole load.

use super::error::{FormatError, FormatViolation};
use crate::dataset::{DatasetBuilder, MIN_STOPS_PER_ROUTE};

/// Stop counts are stored as `u32`, whatever the configured ceiling.
const MAX_SEGMENT_STOPS: usize = u32::MAX as usize;

/// Effective per-route stop ceiling.
fn stop_limit(max_stops: usize) -> usize {
    max_stops.min(MAX_SEGMENT_STOPS)
}

/// Cursor over the raw bytes of a route data source.
pub(crate) struct RouteScanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> RouteScanner<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            line: 1,
        }
    }

    /// Current 1-based line number.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Attach the current line to a violation.
    pub(crate) fn error(&self, violation: FormatViolation) -> FormatError {
        FormatError {
            line: self.line,
            violation,
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn end_line(&mut self) {
        self.line += 1;
    }

    /// Read the header line holding the declared route count.
    ///
    /// An empty header (or an empty source) reads as zero.
    pub(crate) fn read_header(&mut self) -> Result<u32, FormatError> {
        let mut count = 0u32;
        while let Some(byte) = self.next_byte() {
            match byte {
                b'0'..=b'9' => count = self.accumulate(count, byte)?,
                b'\n' => {
                    self.end_line();
                    break;
                }
                b'\r' => {}
                _ => return Err(self.error(FormatViolation::UnexpectedByte { byte })),
            }
        }
        Ok(count)
    }

    /// Read one route line into `builder`, sorting its stops.
    ///
    /// Returns the number of stops read.
    pub(crate) fn read_route(
        &mut self,
        builder: &mut DatasetBuilder,
        max_stops: usize,
    ) -> Result<usize, FormatError> {
        if self.pos >= self.bytes.len() {
            return Err(self.error(FormatViolation::MissingRoute));
        }

        let max_stops = stop_limit(max_stops);
        let route_id = self.read_route_id()?;
        builder.begin_route(route_id);

        let mut stop = 0u32;
        let mut in_number = false;
        while let Some(byte) = self.next_byte() {
            match byte {
                b'0'..=b'9' => {
                    stop = self.accumulate(stop, byte)?;
                    in_number = true;
                }
                b' ' if in_number => {
                    self.close_stop(builder, route_id, stop, max_stops)?;
                    stop = 0;
                    in_number = false;
                }
                b'\n' => break,
                b'\r' => {}
                _ => return Err(self.error(FormatViolation::UnexpectedByte { byte })),
            }
        }
        if in_number {
            self.close_stop(builder, route_id, stop, max_stops)?;
        }

        let found = builder.open_stop_count();
        if found < MIN_STOPS_PER_ROUTE {
            return Err(self.error(FormatViolation::TooFewStops { route_id, found }));
        }
        let stop_count = builder.finish_route();
        self.end_line();
        Ok(stop_count)
    }

    /// Read the route id, which must be followed by a single space.
    fn read_route_id(&mut self) -> Result<u32, FormatError> {
        let mut route_id = 0u32;
        let mut in_number = false;
        loop {
            match self.next_byte() {
                Some(byte @ b'0'..=b'9') => {
                    route_id = self.accumulate(route_id, byte)?;
                    in_number = true;
                }
                Some(b' ') if in_number => return Ok(route_id),
                Some(b'\r') => {}
                // A route line without stops.
                None | Some(b'\n') if in_number => {
                    return Err(self.error(FormatViolation::TooFewStops { route_id, found: 0 }));
                }
                None => return Err(self.error(FormatViolation::MissingRoute)),
                Some(byte) => return Err(self.error(FormatViolation::UnexpectedByte { byte })),
            }
        }
    }

    fn close_stop(
        &self,
        builder: &mut DatasetBuilder,
        route_id: u32,
        stop: u32,
        max_stops: usize,
    ) -> Result<(), FormatError> {
        if builder.open_stop_count() >= max_stops {
            return Err(self.error(FormatViolation::TooManyStops {
                route_id,
                limit: max_stops,
            }));
        }
        builder.push_stop(stop);
        Ok(())
    }

    fn accumulate(&self, value: u32, digit: u8) -> Result<u32, FormatError> {
        value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(digit - b'0')))
            .ok_or_else(|| self.error(FormatViolation::IdOverflow))
    }
}
