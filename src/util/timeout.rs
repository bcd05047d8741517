//! Deadline and cancellation wrapper for provider round-trips.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::GenerationError;

/// Wrap a future with a timeout.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, GenerationError>>,
) -> Result<T, GenerationError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(GenerationError::ProviderTimeout {
            after_ms: duration.as_millis() as u64,
        }),
    }
}

/// Run `future` under an optional deadline and an optional cancellation
/// token. Whichever fires first wins; the losing future is dropped.
pub async fn with_deadline<T>(
    deadline: Option<Duration>,
    cancellation: Option<&CancellationToken>,
    future: impl Future<Output = Result<T, GenerationError>>,
) -> Result<T, GenerationError> {
    let bounded = async {
        match deadline {
            Some(duration) => with_timeout(duration, future).await,
            None => future.await,
        }
    };

    match cancellation {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(GenerationError::Cancelled),
            result = bounded => result,
        },
        None => bounded.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn times_out_stalled_future() {
        let stalled = async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok::<_, GenerationError>(())
        };

        let err = with_deadline(Some(Duration::from_millis(250)), None, stalled)
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::ProviderTimeout { after_ms: 250 }));
    }

    #[tokio::test]
    async fn passes_through_result_without_deadline() {
        let value = with_deadline(None, None, async { Ok::<_, GenerationError>(7) })
            .await
            .unwrap();

        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn cancelled_token_wins() {
        let token = CancellationToken::new();
        token.cancel();
        let pending = std::future::pending::<Result<(), GenerationError>>();

        let err = with_deadline(Some(Duration::from_secs(60)), Some(&token), pending)
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::Cancelled));
    }
}
