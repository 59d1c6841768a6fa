//! Provisioned-product lifecycle operations

use super::{record_detail, CatalogDescriptor};
use crate::client::ServiceCatalogClient;
use catalogctl_adapter::{CallFuture, OutputSpec, ParameterSpec, SelectorRule};
use catalogctl_common::{ParamKind, Request, Response};
use serde_json::Value;

fn call_provision_product(client: &dyn ServiceCatalogClient, request: Request) -> CallFuture<'_> {
    client.provision_product(request)
}

fn call_update_provisioned_product(
    client: &dyn ServiceCatalogClient,
    request: Request,
) -> CallFuture<'_> {
    client.update_provisioned_product(request)
}

fn call_terminate_provisioned_product(
    client: &dyn ServiceCatalogClient,
    request: Request,
) -> CallFuture<'_> {
    client.terminate_provisioned_product(request)
}

fn call_describe_record(client: &dyn ServiceCatalogClient, request: Request) -> CallFuture<'_> {
    client.describe_record(request)
}

fn call_describe_provisioned_product(
    client: &dyn ServiceCatalogClient,
    request: Request,
) -> CallFuture<'_> {
    client.describe_provisioned_product(request)
}

fn call_execute_plan(client: &dyn ServiceCatalogClient, request: Request) -> CallFuture<'_> {
    client.execute_provisioned_product_plan(request)
}

fn record_outputs(response: &Response) -> Option<Value> {
    response.field("RecordOutputs").cloned()
}

fn provisioned_product_detail(response: &Response) -> Option<Value> {
    response.field("ProvisionedProductDetail").cloned()
}

fn cloud_watch_dashboards(response: &Response) -> Option<Value> {
    response.field("CloudWatchDashboards").cloned()
}

/// Stack-set preference parameters are flat on the command line and
/// grouped into one `ProvisioningPreferences` sub-object on the wire.
fn stack_set_parameters() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::optional("StackSetAccount", ParamKind::StringList)
            .with_target("ProvisioningPreferences.StackSetAccounts"),
        ParameterSpec::optional("StackSetRegion", ParamKind::StringList)
            .with_target("ProvisioningPreferences.StackSetRegions"),
        ParameterSpec::optional("StackSetFailureToleranceCount", ParamKind::Integer)
            .with_target("ProvisioningPreferences.StackSetFailureToleranceCount"),
        ParameterSpec::optional("StackSetMaxConcurrencyCount", ParamKind::Integer)
            .with_target("ProvisioningPreferences.StackSetMaxConcurrencyCount"),
    ]
}

pub fn provision_product() -> CatalogDescriptor {
    let mut parameters = vec![
        ParameterSpec::required("ProvisionedProductName", ParamKind::String),
        ParameterSpec::optional("ProductId", ParamKind::String),
        ParameterSpec::optional("ProductName", ParamKind::String),
        ParameterSpec::optional("ProvisioningArtifactId", ParamKind::String),
        ParameterSpec::optional("ProvisioningArtifactName", ParamKind::String),
        ParameterSpec::optional("PathId", ParamKind::String),
        ParameterSpec::optional("PathName", ParamKind::String),
        ParameterSpec::optional("ProvisioningParameter", ParamKind::KeyValueList)
            .with_target("ProvisioningParameters"),
        ParameterSpec::optional("NotificationArns", ParamKind::StringList),
        ParameterSpec::optional("Tag", ParamKind::KeyValueList).with_target("Tags"),
        ParameterSpec::optional("ProvisionToken", ParamKind::String),
        ParameterSpec::optional("AcceptLanguage", ParamKind::String),
    ];
    parameters.extend(stack_set_parameters());

    CatalogDescriptor {
        key: "provision-product",
        api_name: "ProvisionProduct",
        parameters,
        outputs: vec![OutputSpec::new("RecordDetail", record_detail)],
        default_selector: SelectorRule::Output("RecordDetail"),
        mutating: true,
        resource_param: Some("ProvisionedProductName"),
        invoke: call_provision_product,
    }
}

/// UpdateProvisionedProduct addresses the product by `Id` or `Name`,
/// so neither is individually mandatory.
pub fn update_provisioned_product() -> CatalogDescriptor {
    let mut parameters = vec![
        ParameterSpec::optional("ProvisionedProductId", ParamKind::String),
        ParameterSpec::optional("ProvisionedProductName", ParamKind::String),
        ParameterSpec::optional("ProductId", ParamKind::String),
        ParameterSpec::optional("ProvisioningArtifactId", ParamKind::String),
        ParameterSpec::optional("PathId", ParamKind::String),
        ParameterSpec::optional("ProvisioningParameter", ParamKind::KeyValueList)
            .with_target("ProvisioningParameters"),
        ParameterSpec::optional("Tag", ParamKind::KeyValueList).with_target("Tags"),
        ParameterSpec::optional("UpdateToken", ParamKind::String),
        ParameterSpec::optional("AcceptLanguage", ParamKind::String),
    ];
    parameters.extend(stack_set_parameters());

    CatalogDescriptor {
        key: "update-provisioned-product",
        api_name: "UpdateProvisionedProduct",
        parameters,
        outputs: vec![OutputSpec::new("RecordDetail", record_detail)],
        default_selector: SelectorRule::Output("RecordDetail"),
        mutating: true,
        resource_param: Some("ProvisionedProductId"),
        invoke: call_update_provisioned_product,
    }
}

pub fn terminate_provisioned_product() -> CatalogDescriptor {
    CatalogDescriptor {
        key: "terminate-provisioned-product",
        api_name: "TerminateProvisionedProduct",
        parameters: vec![
            ParameterSpec::optional("ProvisionedProductId", ParamKind::String),
            ParameterSpec::optional("ProvisionedProductName", ParamKind::String),
            ParameterSpec::optional("RetainPhysicalResource", ParamKind::Boolean)
                .with_target("RetainPhysicalResources"),
            ParameterSpec::optional("IgnoreErrors", ParamKind::Boolean),
            ParameterSpec::optional("TerminateToken", ParamKind::String),
            ParameterSpec::optional("AcceptLanguage", ParamKind::String),
        ],
        outputs: vec![OutputSpec::new("RecordDetail", record_detail)],
        default_selector: SelectorRule::Output("RecordDetail"),
        mutating: true,
        resource_param: Some("ProvisionedProductId"),
        invoke: call_terminate_provisioned_product,
    }
}

pub fn describe_record() -> CatalogDescriptor {
    CatalogDescriptor {
        key: "describe-record",
        api_name: "DescribeRecord",
        parameters: vec![
            ParameterSpec::required("Id", ParamKind::String),
            ParameterSpec::optional("AcceptLanguage", ParamKind::String),
        ],
        outputs: vec![
            OutputSpec::new("RecordDetail", record_detail),
            OutputSpec::new("RecordOutputs", record_outputs),
        ],
        default_selector: SelectorRule::Output("RecordDetail"),
        mutating: false,
        resource_param: Some("Id"),
        invoke: call_describe_record,
    }
}

pub fn describe_provisioned_product() -> CatalogDescriptor {
    CatalogDescriptor {
        key: "describe-provisioned-product",
        api_name: "DescribeProvisionedProduct",
        parameters: vec![
            ParameterSpec::optional("Id", ParamKind::String),
            ParameterSpec::optional("Name", ParamKind::String),
            ParameterSpec::optional("AcceptLanguage", ParamKind::String),
        ],
        outputs: vec![
            OutputSpec::new("ProvisionedProductDetail", provisioned_product_detail),
            OutputSpec::new("CloudWatchDashboards", cloud_watch_dashboards),
        ],
        default_selector: SelectorRule::Output("ProvisionedProductDetail"),
        mutating: false,
        resource_param: Some("Id"),
        invoke: call_describe_provisioned_product,
    }
}

pub fn execute_provisioned_product_plan() -> CatalogDescriptor {
    CatalogDescriptor {
        key: "execute-provisioned-product-plan",
        api_name: "ExecuteProvisionedProductPlan",
        parameters: vec![
            ParameterSpec::required("PlanId", ParamKind::String),
            ParameterSpec::optional("IdempotencyToken", ParamKind::String),
            ParameterSpec::optional("AcceptLanguage", ParamKind::String),
        ],
        outputs: vec![OutputSpec::new("RecordDetail", record_detail)],
        default_selector: SelectorRule::Output("RecordDetail"),
        mutating: true,
        resource_param: Some("PlanId"),
        invoke: call_execute_plan,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminate_renames_retain_flag() {
        let descriptor = terminate_provisioned_product();
        let spec = descriptor.parameter("RetainPhysicalResource").unwrap();
        assert_eq!(spec.target, "RetainPhysicalResources");
        assert_eq!(spec.kind, ParamKind::Boolean);
        assert!(!spec.required);
    }

    #[test]
    fn test_stack_set_parameters_share_one_composite() {
        for descriptor in [provision_product(), update_provisioned_product()] {
            for name in ["StackSetAccount", "StackSetRegion"] {
                let spec = descriptor.parameter(name).unwrap();
                assert!(
                    spec.target.starts_with("ProvisioningPreferences."),
                    "{name} must map into ProvisioningPreferences"
                );
            }
        }
    }

    #[test]
    fn test_provision_product_requires_only_the_name() {
        let required: Vec<&str> = provision_product()
            .required_parameters()
            .map(|spec| spec.name)
            .collect();
        assert_eq!(required, vec!["ProvisionedProductName"]);
    }

    #[test]
    fn test_record_operations_default_to_record_detail() {
        for descriptor in [
            provision_product(),
            update_provisioned_product(),
            terminate_provisioned_product(),
            describe_record(),
            execute_provisioned_product_plan(),
        ] {
            assert_eq!(
                descriptor.default_selector,
                SelectorRule::Output("RecordDetail"),
                "{} should project RecordDetail by default",
                descriptor.key
            );
        }
    }
}
