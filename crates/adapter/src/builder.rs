//! Request construction from a parameter context

use crate::descriptor::OperationDescriptor;
use catalogctl_common::{AdapterError, ParameterContext, Request, Result};
use tracing::warn;

/// Build the request for one invocation.
///
/// Each declared parameter that was supplied is copied to its target
/// field, applying the declared rename/nesting rule. Parameters left
/// unset never appear on the request, so composite sub-objects exist
/// only when at least one constituent was supplied. A missing required
/// parameter fails here, before any call is attempted.
pub fn build_request<C: ?Sized>(
    descriptor: &OperationDescriptor<C>,
    context: &ParameterContext,
) -> Result<Request> {
    let mut request = Request::new();

    for spec in &descriptor.parameters {
        match context.get(spec.name) {
            Some(value) => {
                if spec.required && value.is_empty() {
                    warn!(
                        operation = descriptor.key,
                        parameter = spec.name,
                        "empty value supplied for a required parameter"
                    );
                }
                request.set(spec.target, value.to_json());
            }
            None if spec.required => {
                return Err(AdapterError::MissingRequiredParameter {
                    operation: descriptor.key.to_string(),
                    parameter: spec.name.to_string(),
                });
            }
            None => {}
        }
    }

    for (name, _) in context.iter() {
        if descriptor.parameter(name).is_none() {
            warn!(
                operation = descriptor.key,
                parameter = name,
                "ignoring undeclared parameter"
            );
        }
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{CallFuture, ParameterSpec, SelectorRule};
    use catalogctl_common::{ParamKind, ParamValue, Response};
    use serde_json::json;

    struct NullClient;

    fn noop_call(_client: &NullClient, _request: Request) -> CallFuture<'_> {
        Box::pin(async { Ok(Response::empty()) })
    }

    fn provisioning_descriptor() -> OperationDescriptor<NullClient> {
        OperationDescriptor {
            key: "provision-product",
            api_name: "ProvisionProduct",
            parameters: vec![
                ParameterSpec::required("ProvisionedProductName", ParamKind::String),
                ParameterSpec::optional("ProductId", ParamKind::String),
                ParameterSpec::optional("Tag", ParamKind::KeyValueList).with_target("Tags"),
                ParameterSpec::optional("StackSetAccount", ParamKind::StringList)
                    .with_target("ProvisioningPreferences.StackSetAccounts"),
                ParameterSpec::optional("StackSetRegion", ParamKind::StringList)
                    .with_target("ProvisioningPreferences.StackSetRegions"),
            ],
            outputs: vec![],
            default_selector: SelectorRule::EntireResponse,
            mutating: true,
            resource_param: Some("ProvisionedProductName"),
            invoke: noop_call,
        }
    }

    #[test]
    fn test_unset_parameters_never_appear() {
        let mut context = ParameterContext::new();
        context.insert("ProvisionedProductName", ParamValue::Str("web".into()));

        let request = build_request(&provisioning_descriptor(), &context).unwrap();
        assert_eq!(request.len(), 1);
        assert!(!request.contains("ProductId"));
        assert!(!request.contains("Tags"));
        assert!(!request.contains("ProvisioningPreferences"));
    }

    #[test]
    fn test_missing_required_parameter_fails_before_call() {
        let context = ParameterContext::new();

        let err = build_request(&provisioning_descriptor(), &context).unwrap_err();
        match err {
            AdapterError::MissingRequiredParameter { parameter, .. } => {
                assert_eq!(parameter, "ProvisionedProductName");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_composite_omitted_when_no_constituent_supplied() {
        let mut context = ParameterContext::new();
        context.insert("ProvisionedProductName", ParamValue::Str("web".into()));
        context.insert("ProductId", ParamValue::Str("prod-1".into()));

        let request = build_request(&provisioning_descriptor(), &context).unwrap();
        assert!(!request.contains("ProvisioningPreferences"));
    }

    #[test]
    fn test_composite_holds_only_supplied_constituents() {
        let mut context = ParameterContext::new();
        context.insert("ProvisionedProductName", ParamValue::Str("web".into()));
        context.insert(
            "StackSetRegion",
            ParamValue::StrList(vec!["eu-west-1".into(), "us-east-1".into()]),
        );

        let request = build_request(&provisioning_descriptor(), &context).unwrap();
        assert_eq!(
            request.field("ProvisioningPreferences"),
            Some(&json!({"StackSetRegions": ["eu-west-1", "us-east-1"]}))
        );
    }

    #[test]
    fn test_rename_rule_applies() {
        let mut context = ParameterContext::new();
        context.insert("ProvisionedProductName", ParamValue::Str("web".into()));
        context.insert(
            "Tag",
            ParamValue::KeyValues(vec![("Env".into(), "prod".into())]),
        );

        let request = build_request(&provisioning_descriptor(), &context).unwrap();
        assert!(!request.contains("Tag"));
        assert_eq!(
            request.field("Tags"),
            Some(&json!([{"Key": "Env", "Value": "prod"}]))
        );
    }

    #[test]
    fn test_undeclared_parameter_is_not_bound() {
        let mut context = ParameterContext::new();
        context.insert("ProvisionedProductName", ParamValue::Str("web".into()));
        context.insert("Typo", ParamValue::Str("x".into()));

        let request = build_request(&provisioning_descriptor(), &context).unwrap();
        assert!(!request.contains("Typo"));
        assert_eq!(request.len(), 1);
    }
}
