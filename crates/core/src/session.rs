use std::sync::Arc;

use serde::Serialize;

use crate::plant::{PlantSummary, SearchResponse};

/// Monotonic number assigned to each issued search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestSeq(pub u64);

impl RequestSeq {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable record of an accepted search: which request produced it, the
/// response, and the cursor into its items.
///
/// Navigation returns a new record rather than mutating in place. The cursor
/// is always `< len` whenever the response has items.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    seq: RequestSeq,
    query: String,
    response: Arc<SearchResponse>,
    cursor: usize,
}

impl SearchSession {
    /// Starts a session at cursor 0.
    #[must_use]
    pub fn new(seq: RequestSeq, query: impl Into<String>, response: SearchResponse) -> Self {
        Self { seq, query: query.into(), response: Arc::new(response), cursor: 0 }
    }

    #[must_use]
    pub const fn seq(&self) -> RequestSeq {
        self.seq
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn response(&self) -> &SearchResponse {
        &self.response
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.response.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.response.is_empty()
    }

    /// Item under the cursor, `None` for an empty response.
    #[must_use]
    pub fn current(&self) -> Option<&PlantSummary> {
        self.response.items().get(self.cursor)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.cursor.saturating_add(1) < self.len()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    /// Session advanced by one item, or `None` at the last item.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.has_next().then(|| self.with_cursor(self.cursor + 1))
    }

    /// Session moved back by one item, or `None` at the first item.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        self.has_previous().then(|| self.with_cursor(self.cursor - 1))
    }

    fn with_cursor(&self, cursor: usize) -> Self {
        Self {
            seq: self.seq,
            query: self.query.clone(),
            response: Arc::clone(&self.response),
            cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plant::PlantId;

    fn response_of(n: u64) -> SearchResponse {
        SearchResponse {
            data: Some(
                (1..=n)
                    .map(|id| PlantSummary { id: PlantId(id), ..Default::default() })
                    .collect(),
            ),
            meta: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_new_session_starts_at_zero() {
        let session = SearchSession::new(RequestSeq(1), "rose", response_of(3));
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.current().map(|p| p.id), Some(PlantId(1)));
        assert!(session.has_next());
        assert!(!session.has_previous());
    }

    #[test]
    fn test_next_and_previous_walk_the_list() {
        let first = SearchSession::new(RequestSeq(1), "fir", response_of(3));
        let second = first.next().unwrap();
        let third = second.next().unwrap();
        assert_eq!(third.cursor(), 2);
        assert_eq!(third.current().map(|p| p.id), Some(PlantId(3)));

        let back = third.previous().unwrap();
        assert_eq!(back.cursor(), 1);
        // the starting record is untouched
        assert_eq!(first.cursor(), 0);
    }

    #[test]
    fn test_next_at_end_is_none() {
        let last = SearchSession::new(RequestSeq(1), "fir", response_of(2)).next().unwrap();
        assert!(!last.has_next());
        assert!(last.next().is_none());
        assert_eq!(last.cursor(), 1);
    }

    #[test]
    fn test_previous_at_start_is_none() {
        let session = SearchSession::new(RequestSeq(1), "fir", response_of(2));
        assert!(session.previous().is_none());
    }

    #[test]
    fn test_empty_session_never_moves() {
        let session = SearchSession::new(RequestSeq(4), "", SearchResponse::default());
        assert!(session.is_empty());
        assert!(session.current().is_none());
        assert!(session.next().is_none());
        assert!(session.previous().is_none());
    }

    #[test]
    fn test_navigation_shares_the_response() {
        let session = SearchSession::new(RequestSeq(1), "fir", response_of(2));
        let moved = session.next().unwrap();
        assert!(Arc::ptr_eq(&session.response, &moved.response));
        assert_eq!(moved.seq(), RequestSeq(1));
    }

    #[test]
    fn test_request_seq_ordering() {
        let a = RequestSeq::default().next();
        let b = a.next();
        assert!(b > a);
        assert_eq!(b.to_string(), "#2");
    }
}
