//! Output selection
//!
//! A selector decides what one invocation emits: the entire response,
//! one declared output, an echo of one input parameter, or nothing.
//! Directives resolve against the descriptor *before* the remote call,
//! so a directive that names an unknown output or parameter is rejected
//! as configuration error without a network round-trip.

use crate::descriptor::{OperationDescriptor, OutputAccessor, SelectorRule};
use catalogctl_common::{AdapterError, ParameterContext, Response, Result};
use serde_json::Value;

/// A caller-supplied output-selection directive, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectorDirective {
    /// Use the operation's default selector.
    #[default]
    Default,
    /// Emit the entire response document.
    EntireResponse,
    /// Emit one declared output by name.
    Output(String),
    /// Emit the supplied value of one input parameter.
    EchoParameter(String),
    /// Emit nothing.
    Nothing,
}

impl SelectorDirective {
    /// Parse the textual directive syntax: `*` selects the entire
    /// response, `^Name` echoes an input parameter, `none` suppresses
    /// output, anything else names a declared output.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "*" => SelectorDirective::EntireResponse,
            "none" => SelectorDirective::Nothing,
            echo if echo.starts_with('^') => {
                SelectorDirective::EchoParameter(echo[1..].to_string())
            }
            output => SelectorDirective::Output(output.to_string()),
        }
    }
}

/// A selector resolved against one descriptor and one parameter context.
///
/// Echo selectors capture the bound input value at resolution time, so
/// the projection works even when the response omits the identifier.
#[derive(Debug)]
pub enum ResolvedSelector {
    EntireResponse,
    Output(OutputAccessor),
    Echo(Option<Value>),
    Nothing,
}

impl ResolvedSelector {
    /// Resolve a directive, failing fast on anything that cannot
    /// project against the declared response shape.
    pub fn resolve<C: ?Sized>(
        descriptor: &OperationDescriptor<C>,
        directive: &SelectorDirective,
        context: &ParameterContext,
    ) -> Result<Self> {
        match directive {
            SelectorDirective::Default => match descriptor.default_selector {
                SelectorRule::EntireResponse => Ok(ResolvedSelector::EntireResponse),
                SelectorRule::Nothing => Ok(ResolvedSelector::Nothing),
                SelectorRule::Output(name) => {
                    let spec = descriptor.output(name).ok_or_else(|| {
                        AdapterError::InvalidSelectorConfiguration {
                            operation: descriptor.key.to_string(),
                            selector: name.to_string(),
                            reason: "default selector names an undeclared output".to_string(),
                        }
                    })?;
                    Ok(ResolvedSelector::Output(spec.extract))
                }
            },
            SelectorDirective::EntireResponse => Ok(ResolvedSelector::EntireResponse),
            SelectorDirective::Nothing => Ok(ResolvedSelector::Nothing),
            SelectorDirective::Output(name) => {
                let spec = descriptor.output(name).ok_or_else(|| {
                    AdapterError::InvalidSelectorConfiguration {
                        operation: descriptor.key.to_string(),
                        selector: name.clone(),
                        reason: format!(
                            "not a declared output; expected one of [{}], '*', '^Parameter', or 'none'",
                            descriptor
                                .outputs
                                .iter()
                                .map(|o| o.name)
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                    }
                })?;
                Ok(ResolvedSelector::Output(spec.extract))
            }
            SelectorDirective::EchoParameter(name) => {
                if descriptor.parameter(name).is_none() {
                    return Err(AdapterError::InvalidSelectorConfiguration {
                        operation: descriptor.key.to_string(),
                        selector: format!("^{name}"),
                        reason: "not a declared parameter".to_string(),
                    });
                }
                Ok(ResolvedSelector::Echo(
                    context.get(name).map(|value| value.to_json()),
                ))
            }
        }
    }

    /// Project the response into the invocation's output value.
    pub fn project(&self, response: &Response) -> Option<Value> {
        match self {
            ResolvedSelector::EntireResponse => Some(response.body().clone()),
            ResolvedSelector::Output(extract) => extract(response),
            ResolvedSelector::Echo(value) => value.clone(),
            ResolvedSelector::Nothing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{CallFuture, OutputSpec, ParameterSpec};
    use catalogctl_common::{ParamKind, ParamValue, Request};
    use serde_json::json;

    struct NullClient;

    fn noop_call(_client: &NullClient, _request: Request) -> CallFuture<'_> {
        Box::pin(async { Ok(Response::empty()) })
    }

    fn record_detail(response: &Response) -> Option<Value> {
        response.field("RecordDetail").cloned()
    }

    fn descriptor() -> OperationDescriptor<NullClient> {
        OperationDescriptor {
            key: "terminate-provisioned-product",
            api_name: "TerminateProvisionedProduct",
            parameters: vec![
                ParameterSpec::optional("ProvisionedProductId", ParamKind::String),
                ParameterSpec::optional("IgnoreErrors", ParamKind::Boolean),
            ],
            outputs: vec![OutputSpec::new("RecordDetail", record_detail)],
            default_selector: SelectorRule::Output("RecordDetail"),
            mutating: true,
            resource_param: Some("ProvisionedProductId"),
            invoke: noop_call,
        }
    }

    #[test]
    fn test_parse_directive_syntax() {
        assert_eq!(SelectorDirective::parse("*"), SelectorDirective::EntireResponse);
        assert_eq!(SelectorDirective::parse("none"), SelectorDirective::Nothing);
        assert_eq!(
            SelectorDirective::parse("^ProvisionedProductId"),
            SelectorDirective::EchoParameter("ProvisionedProductId".to_string())
        );
        assert_eq!(
            SelectorDirective::parse("RecordDetail"),
            SelectorDirective::Output("RecordDetail".to_string())
        );
    }

    #[test]
    fn test_entire_response_projects_whole_body() {
        let selector = ResolvedSelector::resolve(
            &descriptor(),
            &SelectorDirective::EntireResponse,
            &ParameterContext::new(),
        )
        .unwrap();

        let body = json!({"RecordDetail": {"Status": "CREATED"}, "Extra": 1});
        assert_eq!(selector.project(&Response::new(body.clone())), Some(body));
    }

    #[test]
    fn test_default_selector_projects_declared_output() {
        let selector = ResolvedSelector::resolve(
            &descriptor(),
            &SelectorDirective::Default,
            &ParameterContext::new(),
        )
        .unwrap();

        let response = Response::new(json!({"RecordDetail": {"Status": "IN_PROGRESS"}}));
        assert_eq!(
            selector.project(&response),
            Some(json!({"Status": "IN_PROGRESS"}))
        );
    }

    #[test]
    fn test_echo_returns_input_even_when_response_omits_it() {
        let mut context = ParameterContext::new();
        context.insert("ProvisionedProductId", ParamValue::Str("pp-123".into()));

        let selector = ResolvedSelector::resolve(
            &descriptor(),
            &SelectorDirective::EchoParameter("ProvisionedProductId".to_string()),
            &context,
        )
        .unwrap();

        let response = Response::new(json!({"RecordDetail": {"Status": "IN_PROGRESS"}}));
        assert_eq!(selector.project(&response), Some(json!("pp-123")));
    }

    #[test]
    fn test_unknown_output_is_a_configuration_error() {
        let err = ResolvedSelector::resolve(
            &descriptor(),
            &SelectorDirective::Output("NoSuchField".to_string()),
            &ParameterContext::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            AdapterError::InvalidSelectorConfiguration { .. }
        ));
    }

    #[test]
    fn test_echo_of_undeclared_parameter_is_rejected() {
        let err = ResolvedSelector::resolve(
            &descriptor(),
            &SelectorDirective::EchoParameter("NoSuchParam".to_string()),
            &ParameterContext::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            AdapterError::InvalidSelectorConfiguration { .. }
        ));
    }

    #[test]
    fn test_nothing_projects_no_value() {
        let selector = ResolvedSelector::resolve(
            &descriptor(),
            &SelectorDirective::Nothing,
            &ParameterContext::new(),
        )
        .unwrap();

        let response = Response::new(json!({"RecordDetail": {}}));
        assert_eq!(selector.project(&response), None);
    }
}
