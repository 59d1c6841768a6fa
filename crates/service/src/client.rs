//! The Service Catalog client interface
//!
//! One async method per remote operation, each taking a built request
//! and returning the decoded response. Implementations own transport,
//! endpoint selection, and credentials; the adapter owns everything
//! else.

use async_trait::async_trait;
use catalogctl_common::{ClientError, Request, Response};

/// Result type for client calls.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Pluggable client for AWS Service Catalog operations.
#[async_trait]
pub trait ServiceCatalogClient: Send + Sync {
    async fn accept_portfolio_share(&self, request: Request) -> ClientResult<Response>;
    async fn reject_portfolio_share(&self, request: Request) -> ClientResult<Response>;
    async fn create_portfolio(&self, request: Request) -> ClientResult<Response>;
    async fn delete_portfolio(&self, request: Request) -> ClientResult<Response>;
    async fn associate_principal_with_portfolio(&self, request: Request)
        -> ClientResult<Response>;
    async fn disassociate_principal_from_portfolio(
        &self,
        request: Request,
    ) -> ClientResult<Response>;
    async fn describe_product(&self, request: Request) -> ClientResult<Response>;
    async fn copy_product(&self, request: Request) -> ClientResult<Response>;
    async fn provision_product(&self, request: Request) -> ClientResult<Response>;
    async fn update_provisioned_product(&self, request: Request) -> ClientResult<Response>;
    async fn terminate_provisioned_product(&self, request: Request) -> ClientResult<Response>;
    async fn describe_record(&self, request: Request) -> ClientResult<Response>;
    async fn describe_provisioned_product(&self, request: Request) -> ClientResult<Response>;
    async fn execute_provisioned_product_plan(
        &self,
        request: Request,
    ) -> ClientResult<Response>;
}
