//! Caller-supplied deadlines for lookups

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::errors::{IpInfoError, Result};

/// Point in time after which an operation gives up with [`IpInfoError::Timeout`].
///
/// `Deadline::none()` leaves timing to the underlying clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn after(duration: Duration) -> Self {
        Self(Some(Instant::now() + duration))
    }

    pub fn is_expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }

    /// Drive `fut` to completion unless the deadline passes first.
    pub async fn run<T, F>(&self, operation: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.0 {
            None => fut.await,
            Some(at) => tokio::time::timeout_at(at, fut).await.map_err(|_| {
                IpInfoError::timeout(format!(
                    "{} did not complete before the deadline",
                    operation
                ))
            })?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_none_never_times_out() {
        let value = Deadline::none()
            .run("noop", async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
        assert!(!Deadline::none().is_expired());
    }

    #[tokio::test]
    async fn test_error_passes_through() {
        let err = Deadline::after(Duration::from_secs(5))
            .run::<(), _>("failing", async { Err(IpInfoError::cache("down")) })
            .await
            .unwrap_err();
        assert_eq!(err, IpInfoError::cache("down"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_deadline_times_out() {
        let deadline = Deadline::after(Duration::from_millis(10));
        let err = deadline
            .run("slow", async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok(())
            })
            .await
            .unwrap_err();

        assert!(matches!(err, IpInfoError::Timeout(_)));
        assert!(err.message().contains("slow"));
        assert!(deadline.is_expired());
    }
}
