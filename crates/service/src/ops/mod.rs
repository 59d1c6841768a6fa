//! Operation descriptors, grouped by resource family
//!
//! Each function here instantiates one descriptor: parameter specs with
//! their request field mappings, output accessors, the default
//! projection, and the client-method shim the dispatcher calls. Adding
//! an operation means adding one descriptor and one trait method.

pub mod portfolio;
pub mod product;
pub mod provisioning;

use crate::client::ServiceCatalogClient;
use catalogctl_adapter::OperationDescriptor;
use catalogctl_common::Response;
use serde_json::Value;

/// Descriptor type bound to the Service Catalog client interface.
pub type CatalogDescriptor = OperationDescriptor<dyn ServiceCatalogClient>;

pub(crate) fn record_detail(response: &Response) -> Option<Value> {
    response.field("RecordDetail").cloned()
}
