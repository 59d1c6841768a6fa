//! Single-shot call dispatch
//!
//! Exactly one remote call per invocation: no implicit retries, no
//! pagination. Cancellation is cooperative: when the token fires the
//! in-flight future is dropped and `Cancelled` is surfaced. The remote
//! side is not guaranteed to abort.

use crate::descriptor::CallFuture;
use catalogctl_common::{AdapterError, ClientError, Response, Result};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Await one client call, racing it against the cancellation token.
///
/// The select is biased toward cancellation so a token cancelled before
/// the call completes always yields `Cancelled`, never a late success.
/// Connectivity failures are wrapped with an enriched diagnostic; every
/// other client error passes through unchanged.
pub async fn dispatch(
    operation: &str,
    call: CallFuture<'_>,
    cancel: &CancellationToken,
) -> Result<Response> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!(operation, "in-flight call abandoned after cancellation");
            Err(AdapterError::Cancelled {
                operation: operation.to_string(),
            })
        }
        result = call => match result {
            Ok(response) => Ok(response),
            Err(source @ ClientError::Connectivity { .. }) => {
                Err(AdapterError::ConnectivityFailure {
                    operation: operation.to_string(),
                    source,
                })
            }
            Err(source) => Err(AdapterError::RemoteOperationFailure {
                operation: operation.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_successful_call_returns_response() {
        let call: CallFuture<'static> =
            Box::pin(async { Ok(Response::new(json!({"RecordDetail": {}}))) });

        let response = dispatch("describe-record", call, &CancellationToken::new())
            .await
            .unwrap();
        assert!(response.field("RecordDetail").is_some());
    }

    #[tokio::test]
    async fn test_cancellation_beats_pending_call() {
        let call: CallFuture<'static> = Box::pin(std::future::pending());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = dispatch("describe-record", call, &cancel).await.unwrap_err();
        assert!(matches!(err, AdapterError::Cancelled { .. }));
    }

    #[tokio::test]
    async fn test_cancellation_beats_ready_call() {
        // Biased select: a pre-cancelled token wins even when the call
        // would complete immediately.
        let call: CallFuture<'static> = Box::pin(async { Ok(Response::empty()) });
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = dispatch("describe-product", call, &cancel).await.unwrap_err();
        assert!(matches!(err, AdapterError::Cancelled { .. }));
    }

    #[tokio::test]
    async fn test_connectivity_error_is_wrapped() {
        let call: CallFuture<'static> = Box::pin(async {
            Err(ClientError::Connectivity {
                message: "dns error: no such host".to_string(),
            })
        });

        let err = dispatch("describe-record", call, &CancellationToken::new())
            .await
            .unwrap_err();
        match err {
            AdapterError::ConnectivityFailure { source, .. } => {
                assert!(source.to_string().contains("no such host"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_service_error_passes_through_unchanged() {
        let call: CallFuture<'static> = Box::pin(async {
            Err(ClientError::Service {
                code: "ResourceNotFoundException".to_string(),
                message: "Portfolio not found".to_string(),
            })
        });

        let err = dispatch("delete-portfolio", call, &CancellationToken::new())
            .await
            .unwrap_err();
        match err {
            AdapterError::RemoteOperationFailure { source, .. } => {
                assert_eq!(
                    source.to_string(),
                    "ResourceNotFoundException: Portfolio not found"
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
