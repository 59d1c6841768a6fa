//! Error taxonomy for adapter invocations
//!
//! [`AdapterError`] covers every condition an invocation can surface to
//! its caller; none are retried and none are swallowed. [`ClientError`]
//! is what a client implementation returns from a remote call; the
//! dispatcher decides how each variant is presented.

use thiserror::Error;

/// Errors surfaced by an adapter invocation.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// A mandatory parameter was not supplied. Detected locally; the
    /// client is never invoked.
    #[error("missing required parameter '{parameter}' for operation '{operation}'")]
    MissingRequiredParameter {
        operation: String,
        parameter: String,
    },

    /// The output selection directive does not resolve against the
    /// operation's declared outputs or parameters. Detected before the
    /// remote call.
    #[error("selector '{selector}' does not resolve for operation '{operation}': {reason}")]
    InvalidSelectorConfiguration {
        operation: String,
        selector: String,
        reason: String,
    },

    /// Two descriptors with the same key were registered.
    #[error("duplicate operation '{0}' in registry")]
    DuplicateOperation(String),

    /// The service endpoint could not be reached. Wraps the transport
    /// failure with a clearer diagnostic; the original error is the cause.
    #[error(
        "unable to reach the service endpoint while calling '{operation}'; \
         check the endpoint address and network connectivity"
    )]
    ConnectivityFailure {
        operation: String,
        #[source]
        source: ClientError,
    },

    /// The remote call failed for any non-transport reason. The client
    /// error passes through unchanged to preserve diagnostic fidelity.
    #[error("operation '{operation}' failed")]
    RemoteOperationFailure {
        operation: String,
        #[source]
        source: ClientError,
    },

    /// The invocation was aborted by a host-level cancellation signal
    /// before the call completed.
    #[error("operation '{operation}' was cancelled")]
    Cancelled { operation: String },
}

/// Errors returned by a client implementation.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Name resolution or connection-level failure; no response was
    /// received from the service.
    #[error("connection failed: {message}")]
    Connectivity { message: String },

    /// The service answered with an error. `code` is the service's own
    /// error identifier (e.g. `ResourceNotFoundException`).
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    /// The service answered with a body that could not be decoded.
    #[error("malformed service response: {0}")]
    MalformedResponse(String),
}

/// Result type for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_names_both_operation_and_parameter() {
        let err = AdapterError::MissingRequiredParameter {
            operation: "provision-product".to_string(),
            parameter: "ProvisionedProductName".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ProvisionedProductName"));
        assert!(msg.contains("provision-product"));
    }

    #[test]
    fn test_connectivity_failure_retains_cause() {
        use std::error::Error as _;

        let err = AdapterError::ConnectivityFailure {
            operation: "describe-record".to_string(),
            source: ClientError::Connectivity {
                message: "dns error: no such host".to_string(),
            },
        };
        let cause = err.source().expect("cause retained");
        assert!(cause.to_string().contains("no such host"));
    }
}
