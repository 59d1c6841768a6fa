//! AWS Service Catalog operation surface
//!
//! This crate binds the generic adapter to AWS Service Catalog: the
//! [`ServiceCatalogClient`] interface (one async method per remote
//! operation), an HTTP implementation speaking the JSON 1.1 wire shape,
//! and the built-in registry of operation descriptors.
//!
//! Client construction and request authentication are external
//! concerns; [`HttpCatalogClient`] targets unauthenticated or emulated
//! endpoints and performs no signing.

mod client;
mod http;
mod ops;
mod registry;

pub use client::{ClientResult, ServiceCatalogClient};
pub use http::HttpCatalogClient;
pub use registry::builtin_registry;

/// Registry type specialized to the Service Catalog client interface.
pub type CatalogRegistry = catalogctl_adapter::OperationRegistry<dyn ServiceCatalogClient>;
