//! The query object handed to the engine.
//!
//! Parsing and planning live outside this crate; the engine only sees the
//! resolved form: which series, which fields, the time bounds, and an
//! optional post-filter over assembled points.

use crate::types::{Point, Timestamp};

/// Predicate applied to each assembled point before the result is yielded.
pub type PointFilter = dyn Fn(&Point) -> bool + Send + Sync;

/// A range query against one series.
///
/// The start bound is exclusive and the end bound inclusive: a point is
/// selected when `start_time < ts <= end_time`.
pub struct Query {
    pub series: String,
    pub fields: Vec<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub filter: Option<Box<PointFilter>>,
}

impl Query {
    pub fn new(series: impl Into<String>, fields: Vec<String>) -> Self {
        Query {
            series: series.into(),
            fields,
            start_time: i64::MIN,
            end_time: i64::MAX,
            filter: None,
        }
    }

    /// Restricts the query to `start_time < ts <= end_time`.
    pub fn between(mut self, start_time: Timestamp, end_time: Timestamp) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    /// Installs a post-filter over assembled points. The filter runs on the
    /// complete result set; it is not pushed down into the scan.
    pub fn with_filter(mut self, filter: impl Fn(&Point) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Applies the post-filter, if any, to an assembled result.
    pub(crate) fn apply_filter(&self, points: &mut Vec<Point>) {
        if let Some(filter) = &self.filter {
            points.retain(|p| filter(p));
        }
    }
}

impl std::fmt::Debug for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Query")
            .field("series", &self.series)
            .field("fields", &self.fields)
            .field("start_time", &self.start_time)
            .field("end_time", &self.end_time)
            .field("filter", &self.filter.as_ref().map(|_| "<predicate>"))
            .finish()
    }
}
