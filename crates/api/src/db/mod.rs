//! Store access for the API.
//!
//! # Layers
//!
//! - [`store`] - the [`DocumentStore`] gateway trait and its vocabulary
//! - [`mongo`] / [`memory`] - gateway backends
//! - [`resources`] / [`inventory`] - repositories that bound every gateway
//!   call by a deadline and turn outcomes into [`RepositoryError`]s
//!
//! # Collections
//!
//! One database holds `users`, `products`, `orders` and `inventory`. No
//! indexes or validators are created; the codec is the only schema.

pub mod inventory;
pub mod memory;
pub mod mongo;
pub mod resources;
pub mod store;

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::codec::CodecError;

pub use inventory::InventoryRepository;
pub use memory::InMemoryStore;
pub use mongo::MongoStore;
pub use resources::ResourceRepository;
pub use store::{DocumentStore, Filter, StoreError, UpdateOutcome};

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The gateway reported a failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A stored document could not be decoded.
    #[error("unreadable document: {0}")]
    Codec(#[from] CodecError),

    /// The operation did not finish before its deadline and was cancelled.
    #[error("{operation} on {collection} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        collection: String,
        after: Duration,
    },

    /// Requested document was not found.
    #[error("not found")]
    NotFound,
}

/// Run one gateway operation under `deadline`.
///
/// The operation future is owned by the timeout: when the deadline passes it
/// is dropped, which cancels the operation and releases whatever it held.
///
/// # Errors
///
/// Returns `RepositoryError::Timeout` on expiry, or the operation's own
/// failure as `RepositoryError::Store`.
pub async fn bounded<T>(
    operation: &'static str,
    collection: &str,
    deadline: Duration,
    future: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, RepositoryError> {
    tracing::debug!(operation, collection, "store operation");

    match tokio::time::timeout(deadline, future).await {
        Ok(Ok(value)) => Ok(value),
        // Kept below error level; the HTTP boundary reports to Sentry.
        Ok(Err(e)) => {
            tracing::warn!(operation, collection, error = %e, "store operation failed");
            Err(RepositoryError::Store(e))
        }
        Err(_) => {
            tracing::warn!(operation, collection, ?deadline, "store operation timed out");
            Err(RepositoryError::Timeout {
                operation,
                collection: collection.to_owned(),
                after: deadline,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tracing::{Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::*;

    /// Records the level of every event.
    #[derive(Clone, Default)]
    struct Levels(Arc<Mutex<Vec<Level>>>);

    impl<S: Subscriber> Layer<S> for Levels {
        fn on_event(&self, event: &tracing::Event<'_>, _: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    #[tokio::test]
    async fn test_bounded_passes_results_through() {
        let value = bounded("ping", "-", Duration::from_secs(1), async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);

        let err = bounded::<()>("ping", "-", Duration::from_secs(1), async {
            Err(StoreError::Unavailable("down".to_owned()))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, RepositoryError::Store(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_bounded_cancels_after_deadline() {
        let err = bounded::<()>(
            "find_one",
            "users",
            Duration::from_millis(20),
            std::future::pending(),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            RepositoryError::Timeout { operation: "find_one", .. }
        ));
        assert_eq!(err.to_string(), "find_one on users timed out after 20ms");
    }

    #[tokio::test]
    async fn test_bounded_never_logs_at_error_level() {
        let levels = Levels::default();
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::registry().with(levels.clone()),
        );

        let _ = bounded::<()>("insert_one", "users", Duration::from_secs(1), async {
            Err(StoreError::Unavailable("down".to_owned()))
        })
        .await;
        let _ = bounded::<()>(
            "find_one",
            "users",
            Duration::from_millis(5),
            std::future::pending(),
        )
        .await;

        let levels = levels.0.lock().unwrap();
        assert!(levels.contains(&Level::WARN));
        assert!(!levels.contains(&Level::ERROR));
    }
}
