use super::lookup::StatusLookup;
use super::records::StatusRecord;
use crate::event::{Event, EventSender};
use crate::vim::InputBuffer;
use crate::wizard::validation::{is_valid_tracking_id, TRACKING_ID_LEN};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

// Process-wide so a response from a discarded checker never matches a new one
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Result of a finished lookup, tagged with the request that produced it
#[derive(Debug, Clone)]
pub struct LookupResponse {
    pub generation: u64,
    pub identifier: String,
    pub record: Option<StatusRecord>,
}

/// What the status view displays
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Pending { identifier: String },
    Found(StatusRecord),
    NotFound { identifier: String },
}

/// One status-check session: identifier input plus at most one lookup in flight.
///
/// Every submission gets a fresh generation and aborts the previous task.
/// Responses carrying any other generation are dropped, so the displayed
/// result always belongs to the most recent request.
pub struct StatusChecker {
    identifier: InputBuffer,
    state: LookupState,
    generation: Option<u64>,
    in_flight: Option<JoinHandle<()>>,
    celebrate: bool,
}

impl Default for StatusChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusChecker {
    pub fn new() -> Self {
        Self {
            identifier: InputBuffer::digits(TRACKING_ID_LEN),
            state: LookupState::Idle,
            generation: None,
            in_flight: None,
            celebrate: false,
        }
    }

    pub fn identifier(&self) -> &InputBuffer {
        &self.identifier
    }

    pub fn identifier_mut(&mut self) -> &mut InputBuffer {
        &mut self.identifier
    }

    pub fn set_identifier(&mut self, value: &str) {
        self.identifier.set(value);
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, LookupState::Pending { .. })
    }

    pub fn can_submit(&self) -> bool {
        is_valid_tracking_id(self.identifier.content())
    }

    /// Generation of the request whose answer will be displayed
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    /// Start a lookup for the current identifier.
    ///
    /// Returns the new generation, or `None` when the identifier is not a
    /// well-formed 16-digit string. Must be called inside a tokio runtime.
    pub fn submit(&mut self, lookup: Arc<dyn StatusLookup>, tx: EventSender) -> Option<u64> {
        if !self.can_submit() {
            return None;
        }
        self.cancel();

        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        let identifier = self.identifier.content().to_string();
        info!(%identifier, generation, "Checking enrollment status");

        self.generation = Some(generation);
        self.state = LookupState::Pending {
            identifier: identifier.clone(),
        };
        self.celebrate = false;

        self.in_flight = Some(tokio::spawn(async move {
            let record = lookup.lookup(&identifier).await;
            let _ = tx.send(Event::Lookup(LookupResponse {
                generation,
                identifier,
                record,
            }));
        }));

        Some(generation)
    }

    /// Apply a finished lookup. Returns false when the response is stale.
    pub fn resolve(&mut self, response: LookupResponse) -> bool {
        if self.generation != Some(response.generation) {
            debug!(
                stale = response.generation,
                current = ?self.generation,
                "dropping stale lookup response"
            );
            return false;
        }

        self.in_flight = None;
        self.state = match response.record {
            Some(record) => {
                self.celebrate = record.is_accepted();
                LookupState::Found(record)
            }
            None => LookupState::NotFound {
                identifier: response.identifier,
            },
        };
        true
    }

    /// One-shot signal that an accepted record was just displayed
    pub fn take_celebration(&mut self) -> bool {
        std::mem::take(&mut self.celebrate)
    }

    /// Abort the in-flight lookup, if any. The displayed state is kept.
    pub fn cancel(&mut self) {
        if let Some(task) = self.in_flight.take() {
            debug!(generation = ?self.generation, "aborting in-flight lookup");
            task.abort();
        }
    }
}

impl Drop for StatusChecker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::lookup::MockStatusTable;
    use crate::status::records::StatusDetail;
    use futures::future::BoxFuture;
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn mock() -> Arc<dyn StatusLookup> {
        Arc::new(MockStatusTable::new(Duration::ZERO))
    }

    async fn next_response(rx: &mut mpsc::UnboundedReceiver<Event>) -> LookupResponse {
        match rx.recv().await {
            Some(Event::Lookup(response)) => response,
            other => panic!("expected lookup response, got {other:?}"),
        }
    }

    /// Mock with a per-identifier delay
    struct Staggered {
        delays: HashMap<String, Duration>,
        inner: MockStatusTable,
    }

    impl StatusLookup for Staggered {
        fn lookup(&self, identifier: &str) -> BoxFuture<'static, Option<StatusRecord>> {
            let delay = self.delays.get(identifier).copied().unwrap_or_default();
            let inner = self.inner.lookup(identifier);
            Box::pin(async move {
                tokio::time::sleep(delay).await;
                inner.await
            })
        }
    }

    #[tokio::test]
    async fn refuses_malformed_identifiers() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut checker = StatusChecker::new();
        checker.set_identifier("12345");
        assert_eq!(checker.submit(mock(), tx), None);
        assert_eq!(checker.state(), &LookupState::Idle);
    }

    #[tokio::test]
    async fn found_record_is_displayed() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut checker = StatusChecker::new();
        checker.set_identifier("5555 6666 7777 8888");
        let generation = checker.submit(mock(), tx).expect("submitted");
        assert!(checker.is_pending());

        let response = next_response(&mut rx).await;
        assert_eq!(response.generation, generation);
        assert!(checker.resolve(response));
        match checker.state() {
            LookupState::Found(record) => {
                assert!(matches!(record.detail, StatusDetail::Rejected { .. }));
            }
            other => panic!("unexpected state {other:?}"),
        }
        assert!(!checker.take_celebration());
    }

    #[tokio::test]
    async fn unknown_identifier_is_not_found_not_an_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut checker = StatusChecker::new();
        checker.set_identifier("1111222233334444");
        checker.submit(mock(), tx);
        assert!(checker.resolve(next_response(&mut rx).await));
        assert_eq!(
            checker.state(),
            &LookupState::NotFound {
                identifier: "1111222233334444".to_string()
            }
        );
    }

    #[tokio::test]
    async fn accepted_record_raises_celebration_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut checker = StatusChecker::new();
        checker.set_identifier("9876543210987654");
        checker.submit(mock(), tx);
        checker.resolve(next_response(&mut rx).await);
        assert!(checker.take_celebration());
        assert!(!checker.take_celebration());
    }

    #[tokio::test]
    async fn last_requested_lookup_wins() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let lookup: Arc<dyn StatusLookup> = Arc::new(Staggered {
            delays: HashMap::from([
                ("1234567890123456".to_string(), Duration::from_millis(5)),
                ("9876543210987654".to_string(), Duration::from_millis(80)),
            ]),
            inner: MockStatusTable::new(Duration::ZERO),
        });
        let mut checker = StatusChecker::new();

        checker.set_identifier("9876543210987654");
        let first = checker.submit(lookup.clone(), tx.clone()).expect("first");
        checker.set_identifier("1234567890123456");
        let second = checker.submit(lookup, tx).expect("second");
        assert_ne!(first, second);

        // The slow first request was aborted, so only the second answers
        let response = next_response(&mut rx).await;
        assert_eq!(response.generation, second);
        assert!(checker.resolve(response));

        // A late answer for the first request is ignored
        let stale = LookupResponse {
            generation: first,
            identifier: "9876543210987654".to_string(),
            record: None,
        };
        assert!(!checker.resolve(stale));
        match checker.state() {
            LookupState::Found(record) => {
                assert!(matches!(record.detail, StatusDetail::Pending { .. }));
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test]
    async fn responses_from_another_checker_are_ignored() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut old = StatusChecker::new();
        old.set_identifier("9876543210987654");
        old.submit(mock(), tx.clone());
        let response = next_response(&mut rx).await;
        drop(old);

        let mut fresh = StatusChecker::new();
        fresh.set_identifier("9876543210987654");
        fresh.submit(Arc::new(MockStatusTable::new(Duration::from_secs(60))), tx);
        assert!(!fresh.resolve(response));
        assert!(fresh.is_pending());
    }

    #[tokio::test]
    async fn dropping_the_checker_aborts_the_lookup() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut checker = StatusChecker::new();
        checker.set_identifier("9876543210987654");
        checker.submit(Arc::new(MockStatusTable::new(Duration::from_secs(60))), tx);
        drop(checker);

        let closed = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(matches!(closed, Ok(None)));
    }
}
