//! Search over the employee collection.
//!
//! A record matches a query when its name contains the query ignoring
//! case, or its short number contains the query exactly. The empty query
//! matches every record.

use std::slice;

use shortdial_types::EmployeeRecord;

/// A prepared search query.
///
/// Lowercases the query once up front so that filtering a collection only
/// lowercases each candidate name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    raw: String,
    folded: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            folded: raw.to_lowercase(),
        }
    }

    /// The query text as given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `true` if this query matches every record.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Test a single record.
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        if self.is_empty() {
            return true;
        }
        record.name.to_lowercase().contains(&self.folded) || record.short.contains(&self.raw)
    }
}

/// Lazily filtered view over a collection, in insertion order.
///
/// Cloning a `Matches` forks it at its current position. Call
/// [`EmployeeStore::search`](crate::EmployeeStore::search) again to start over.
#[derive(Clone, Debug)]
pub struct Matches<'a> {
    query: Query,
    records: slice::Iter<'a, EmployeeRecord>,
}

impl<'a> Matches<'a> {
    pub(crate) fn new(query: Query, records: &'a [EmployeeRecord]) -> Self {
        Self {
            query,
            records: records.iter(),
        }
    }

    /// The query driving this view.
    pub fn query(&self) -> &Query {
        &self.query
    }
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a EmployeeRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let query = &self.query;
        self.records.by_ref().find(|record| query.matches(record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.records.size_hint().1)
    }
}

impl DoubleEndedIterator for Matches<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let query = &self.query;
        self.records.rfind(|record| query.matches(record))
    }
}
