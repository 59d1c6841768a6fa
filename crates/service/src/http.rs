//! HTTP client for the JSON 1.1 wire shape
//!
//! Posts each request to a single endpoint with the `X-Amz-Target`
//! header naming the operation. Intended for unauthenticated or
//! emulated endpoints; request signing and credentials are external
//! concerns.

use crate::client::{ClientResult, ServiceCatalogClient};
use async_trait::async_trait;
use catalogctl_common::{ClientError, Request, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Target-header service prefix for AWS Service Catalog.
const TARGET_PREFIX: &str = "AWS242ServiceCatalogService";

const JSON_1_1: &str = "application/x-amz-json-1.1";

/// `ServiceCatalogClient` over plain HTTP.
pub struct HttpCatalogClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpCatalogClient {
    /// Create a client against `endpoint` (e.g. `http://localhost:4566`).
    pub fn new(endpoint: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    async fn send(&self, api_name: &str, request: Request) -> ClientResult<Response> {
        debug!(operation = api_name, endpoint = %self.endpoint, "sending request");

        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{api_name}"))
            .header(CONTENT_TYPE, JSON_1_1)
            .json(&request.to_value())
            .send()
            .await
            .map_err(|err| ClientError::Connectivity {
                message: err.to_string(),
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ClientError::Connectivity {
                message: err.to_string(),
            })?;

        if !status.is_success() {
            return Err(service_error(status, &text));
        }

        decode_body(&text).map(Response::new)
    }
}

/// Decode a success body; operations without output answer with an
/// empty body, which decodes to an empty document.
fn decode_body(text: &str) -> ClientResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(text).map_err(|err| ClientError::MalformedResponse(err.to_string()))
}

/// Build a service error from an error-status body.
///
/// The wire carries `__type` as `namespace#ErrorName`; only the error
/// name is kept as the code.
fn service_error(status: StatusCode, text: &str) -> ClientError {
    let body: Value = serde_json::from_str(text).unwrap_or(Value::Null);
    let code = body
        .get("__type")
        .and_then(Value::as_str)
        .map(|raw| raw.rsplit('#').next().unwrap_or(raw).to_string())
        .unwrap_or_else(|| format!("HTTP{}", status.as_u16()));
    let message = body
        .get("message")
        .or_else(|| body.get("Message"))
        .and_then(Value::as_str)
        .unwrap_or("no error message in response")
        .to_string();
    ClientError::Service { code, message }
}

#[async_trait]
impl ServiceCatalogClient for HttpCatalogClient {
    async fn accept_portfolio_share(&self, request: Request) -> ClientResult<Response> {
        self.send("AcceptPortfolioShare", request).await
    }

    async fn reject_portfolio_share(&self, request: Request) -> ClientResult<Response> {
        self.send("RejectPortfolioShare", request).await
    }

    async fn create_portfolio(&self, request: Request) -> ClientResult<Response> {
        self.send("CreatePortfolio", request).await
    }

    async fn delete_portfolio(&self, request: Request) -> ClientResult<Response> {
        self.send("DeletePortfolio", request).await
    }

    async fn associate_principal_with_portfolio(
        &self,
        request: Request,
    ) -> ClientResult<Response> {
        self.send("AssociatePrincipalWithPortfolio", request).await
    }

    async fn disassociate_principal_from_portfolio(
        &self,
        request: Request,
    ) -> ClientResult<Response> {
        self.send("DisassociatePrincipalFromPortfolio", request).await
    }

    async fn describe_product(&self, request: Request) -> ClientResult<Response> {
        self.send("DescribeProduct", request).await
    }

    async fn copy_product(&self, request: Request) -> ClientResult<Response> {
        self.send("CopyProduct", request).await
    }

    async fn provision_product(&self, request: Request) -> ClientResult<Response> {
        self.send("ProvisionProduct", request).await
    }

    async fn update_provisioned_product(&self, request: Request) -> ClientResult<Response> {
        self.send("UpdateProvisionedProduct", request).await
    }

    async fn terminate_provisioned_product(&self, request: Request) -> ClientResult<Response> {
        self.send("TerminateProvisionedProduct", request).await
    }

    async fn describe_record(&self, request: Request) -> ClientResult<Response> {
        self.send("DescribeRecord", request).await
    }

    async fn describe_provisioned_product(&self, request: Request) -> ClientResult<Response> {
        self.send("DescribeProvisionedProduct", request).await
    }

    async fn execute_provisioned_product_plan(
        &self,
        request: Request,
    ) -> ClientResult<Response> {
        self.send("ExecuteProvisionedProductPlan", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_decodes_to_empty_document() {
        assert_eq!(decode_body("").unwrap(), json!({}));
        assert_eq!(decode_body("  \n").unwrap(), json!({}));
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let err = decode_body("<html>gateway timeout</html>").unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse(_)));
    }

    #[test]
    fn test_service_error_strips_type_namespace() {
        let body = json!({
            "__type": "com.amazonaws.servicecatalog#ResourceNotFoundException",
            "message": "Portfolio port-123 not found"
        })
        .to_string();

        let err = service_error(StatusCode::BAD_REQUEST, &body);
        match err {
            ClientError::Service { code, message } => {
                assert_eq!(code, "ResourceNotFoundException");
                assert_eq!(message, "Portfolio port-123 not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_service_error_without_body_uses_status() {
        let err = service_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        match err {
            ClientError::Service { code, .. } => assert_eq!(code, "HTTP500"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
