//! Product operations

use super::CatalogDescriptor;
use crate::client::ServiceCatalogClient;
use catalogctl_adapter::{CallFuture, OutputSpec, ParameterSpec, SelectorRule};
use catalogctl_common::{ParamKind, Request, Response};
use serde_json::Value;

fn call_describe_product(client: &dyn ServiceCatalogClient, request: Request) -> CallFuture<'_> {
    client.describe_product(request)
}

fn call_copy_product(client: &dyn ServiceCatalogClient, request: Request) -> CallFuture<'_> {
    client.copy_product(request)
}

fn product_view_summary(response: &Response) -> Option<Value> {
    response.field("ProductViewSummary").cloned()
}

fn provisioning_artifacts(response: &Response) -> Option<Value> {
    response.field("ProvisioningArtifacts").cloned()
}

fn budgets(response: &Response) -> Option<Value> {
    response.field("Budgets").cloned()
}

fn launch_paths(response: &Response) -> Option<Value> {
    response.field("LaunchPaths").cloned()
}

fn copy_product_token(response: &Response) -> Option<Value> {
    response.field("CopyProductToken").cloned()
}

/// DescribeProduct accepts either `Id` or `Name`; neither alone is
/// mandatory, so the operation carries no required set.
pub fn describe_product() -> CatalogDescriptor {
    CatalogDescriptor {
        key: "describe-product",
        api_name: "DescribeProduct",
        parameters: vec![
            ParameterSpec::optional("Id", ParamKind::String),
            ParameterSpec::optional("Name", ParamKind::String),
            ParameterSpec::optional("AcceptLanguage", ParamKind::String),
        ],
        outputs: vec![
            OutputSpec::new("ProductViewSummary", product_view_summary),
            OutputSpec::new("ProvisioningArtifacts", provisioning_artifacts),
            OutputSpec::new("Budgets", budgets),
            OutputSpec::new("LaunchPaths", launch_paths),
        ],
        default_selector: SelectorRule::EntireResponse,
        mutating: false,
        resource_param: Some("Id"),
        invoke: call_describe_product,
    }
}

pub fn copy_product() -> CatalogDescriptor {
    CatalogDescriptor {
        key: "copy-product",
        api_name: "CopyProduct",
        parameters: vec![
            ParameterSpec::required("SourceProductArn", ParamKind::String),
            ParameterSpec::optional("TargetProductId", ParamKind::String),
            ParameterSpec::optional("TargetProductName", ParamKind::String),
            ParameterSpec::optional("CopyOption", ParamKind::StringList)
                .with_target("CopyOptions"),
            ParameterSpec::optional("IdempotencyToken", ParamKind::String),
            ParameterSpec::optional("AcceptLanguage", ParamKind::String),
        ],
        outputs: vec![OutputSpec::new("CopyProductToken", copy_product_token)],
        default_selector: SelectorRule::Output("CopyProductToken"),
        mutating: true,
        resource_param: Some("SourceProductArn"),
        invoke: call_copy_product,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_product_has_no_required_parameters() {
        assert_eq!(describe_product().required_parameters().count(), 0);
    }

    #[test]
    fn test_copy_product_defaults_to_token_output() {
        let descriptor = copy_product();
        assert_eq!(
            descriptor.default_selector,
            SelectorRule::Output("CopyProductToken")
        );
        assert!(descriptor.output("CopyProductToken").is_some());
    }
}
