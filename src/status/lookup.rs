use super::records::{StatusRecord, SEEDED};
use futures::future::BoxFuture;
use std::time::Duration;
use tracing::debug;

/// Default artificial latency of the mock table
pub const DEFAULT_LOOKUP_DELAY: Duration = Duration::from_millis(2000);

/// Resolves an enrollment identifier to its status.
///
/// `None` means the identifier is unknown. That is a normal answer, not an
/// error. Implementations must be cheap to call concurrently; the caller owns
/// cancellation by dropping or aborting the future.
pub trait StatusLookup: Send + Sync {
    fn lookup(&self, identifier: &str) -> BoxFuture<'static, Option<StatusRecord>>;
}

/// Exact-match lookup against the seeded records, after a fixed delay
#[derive(Debug, Clone)]
pub struct MockStatusTable {
    delay: Duration,
}

impl MockStatusTable {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for MockStatusTable {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKUP_DELAY)
    }
}

impl StatusLookup for MockStatusTable {
    fn lookup(&self, identifier: &str) -> BoxFuture<'static, Option<StatusRecord>> {
        let identifier = identifier.to_string();
        let delay = self.delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            let record = SEEDED.get(identifier.as_str()).cloned();
            debug!(%identifier, found = record.is_some(), "mock status lookup");
            record
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::records::StatusDetail;

    fn table() -> MockStatusTable {
        MockStatusTable::new(Duration::ZERO)
    }

    #[tokio::test]
    async fn pending_record_has_five_ordered_checkpoints() {
        let record = table().lookup("1234567890123456").await.expect("seeded");
        match record.detail {
            StatusDetail::Pending { checkpoints, .. } => {
                assert_eq!(checkpoints.len(), 5);
                assert_eq!(checkpoints.iter().filter(|c| c.completed).count(), 2);
                assert!(checkpoints[0].completed && checkpoints[1].completed);
                assert_eq!(checkpoints[4].name, "Aadhaar Generation");
            }
            other => panic!("expected Pending, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn accepted_record_carries_the_issued_id() {
        let record = table().lookup("9876543210987654").await.expect("seeded");
        assert_eq!(
            record.detail,
            StatusDetail::Accepted {
                issued_id: "1234 5678 9012".to_string()
            }
        );
        assert!(record.is_accepted());
    }

    #[tokio::test]
    async fn rejected_record_lists_three_remediation_steps() {
        let record = table().lookup("5555666677778888").await.expect("seeded");
        match record.detail {
            StatusDetail::Rejected { reason, remediation } => {
                assert_eq!(reason, "Biometric quality insufficient");
                assert_eq!(remediation.len(), 3);
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_well_formed_ids_are_not_found() {
        assert!(table().lookup("0000000000000000").await.is_none());
        assert!(table().lookup("1234567890123457").await.is_none());
    }

    #[tokio::test]
    async fn matching_is_exact() {
        assert!(table().lookup(" 1234567890123456").await.is_none());
        assert!(table().lookup("123456789012345").await.is_none());
    }

    #[tokio::test]
    async fn waits_for_the_configured_delay() {
        let table = MockStatusTable::new(Duration::from_millis(30));
        let started = tokio::time::Instant::now();
        table.lookup("9876543210987654").await;
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
