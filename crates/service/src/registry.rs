//! Built-in operation registry

use crate::ops::{portfolio, product, provisioning};
use crate::CatalogRegistry;
use catalogctl_adapter::OperationRegistry;
use catalogctl_common::Result;

/// Assemble the registry of all supported operations.
///
/// Construction validates every descriptor (duplicate keys, default
/// selectors, resource parameters), so an `Err` here means a programming
/// error in an operation definition, surfaced at startup.
pub fn builtin_registry() -> Result<CatalogRegistry> {
    Ok(OperationRegistry::builder()
        .register(portfolio::accept_portfolio_share())?
        .register(portfolio::reject_portfolio_share())?
        .register(portfolio::create_portfolio())?
        .register(portfolio::delete_portfolio())?
        .register(portfolio::associate_principal_with_portfolio())?
        .register(portfolio::disassociate_principal_from_portfolio())?
        .register(product::describe_product())?
        .register(product::copy_product())?
        .register(provisioning::provision_product())?
        .register(provisioning::update_provisioned_product())?
        .register(provisioning::terminate_provisioned_product())?
        .register(provisioning::describe_record())?
        .register(provisioning::describe_provisioned_product())?
        .register(provisioning::execute_provisioned_product_plan())?
        .build())
}
