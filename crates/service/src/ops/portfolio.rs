//! Portfolio lifecycle and sharing operations

use super::CatalogDescriptor;
use crate::client::ServiceCatalogClient;
use catalogctl_adapter::{CallFuture, OutputSpec, ParameterSpec, SelectorRule};
use catalogctl_common::{ParamKind, Request, Response};
use serde_json::Value;

fn call_accept_portfolio_share(
    client: &dyn ServiceCatalogClient,
    request: Request,
) -> CallFuture<'_> {
    client.accept_portfolio_share(request)
}

fn call_reject_portfolio_share(
    client: &dyn ServiceCatalogClient,
    request: Request,
) -> CallFuture<'_> {
    client.reject_portfolio_share(request)
}

fn call_create_portfolio(client: &dyn ServiceCatalogClient, request: Request) -> CallFuture<'_> {
    client.create_portfolio(request)
}

fn call_delete_portfolio(client: &dyn ServiceCatalogClient, request: Request) -> CallFuture<'_> {
    client.delete_portfolio(request)
}

fn call_associate_principal(
    client: &dyn ServiceCatalogClient,
    request: Request,
) -> CallFuture<'_> {
    client.associate_principal_with_portfolio(request)
}

fn call_disassociate_principal(
    client: &dyn ServiceCatalogClient,
    request: Request,
) -> CallFuture<'_> {
    client.disassociate_principal_from_portfolio(request)
}

fn portfolio_detail(response: &Response) -> Option<Value> {
    response.field("PortfolioDetail").cloned()
}

fn portfolio_tags(response: &Response) -> Option<Value> {
    response.field("Tags").cloned()
}

pub fn accept_portfolio_share() -> CatalogDescriptor {
    CatalogDescriptor {
        key: "accept-portfolio-share",
        api_name: "AcceptPortfolioShare",
        parameters: vec![
            ParameterSpec::required("PortfolioId", ParamKind::String),
            ParameterSpec::optional("PortfolioShareType", ParamKind::String),
            ParameterSpec::optional("AcceptLanguage", ParamKind::String),
        ],
        outputs: vec![],
        default_selector: SelectorRule::Nothing,
        mutating: true,
        resource_param: Some("PortfolioId"),
        invoke: call_accept_portfolio_share,
    }
}

pub fn reject_portfolio_share() -> CatalogDescriptor {
    CatalogDescriptor {
        key: "reject-portfolio-share",
        api_name: "RejectPortfolioShare",
        parameters: vec![
            ParameterSpec::required("PortfolioId", ParamKind::String),
            ParameterSpec::optional("PortfolioShareType", ParamKind::String),
            ParameterSpec::optional("AcceptLanguage", ParamKind::String),
        ],
        outputs: vec![],
        default_selector: SelectorRule::Nothing,
        mutating: true,
        resource_param: Some("PortfolioId"),
        invoke: call_reject_portfolio_share,
    }
}

pub fn create_portfolio() -> CatalogDescriptor {
    CatalogDescriptor {
        key: "create-portfolio",
        api_name: "CreatePortfolio",
        parameters: vec![
            ParameterSpec::required("DisplayName", ParamKind::String),
            ParameterSpec::required("ProviderName", ParamKind::String),
            ParameterSpec::optional("Description", ParamKind::String),
            ParameterSpec::optional("IdempotencyToken", ParamKind::String),
            // The caller supplies tags as key=value pairs; the wire wants
            // a list of {Key, Value} objects.
            ParameterSpec::optional("Tag", ParamKind::KeyValueList).with_target("Tags"),
            ParameterSpec::optional("AcceptLanguage", ParamKind::String),
        ],
        outputs: vec![
            OutputSpec::new("PortfolioDetail", portfolio_detail),
            OutputSpec::new("Tags", portfolio_tags),
        ],
        default_selector: SelectorRule::Output("PortfolioDetail"),
        mutating: true,
        resource_param: Some("DisplayName"),
        invoke: call_create_portfolio,
    }
}

pub fn delete_portfolio() -> CatalogDescriptor {
    CatalogDescriptor {
        key: "delete-portfolio",
        api_name: "DeletePortfolio",
        parameters: vec![
            ParameterSpec::required("Id", ParamKind::String),
            ParameterSpec::optional("AcceptLanguage", ParamKind::String),
        ],
        outputs: vec![],
        default_selector: SelectorRule::Nothing,
        mutating: true,
        resource_param: Some("Id"),
        invoke: call_delete_portfolio,
    }
}

pub fn associate_principal_with_portfolio() -> CatalogDescriptor {
    CatalogDescriptor {
        key: "associate-principal-with-portfolio",
        api_name: "AssociatePrincipalWithPortfolio",
        parameters: vec![
            ParameterSpec::required("PortfolioId", ParamKind::String),
            ParameterSpec::required("PrincipalARN", ParamKind::String),
            ParameterSpec::optional("PrincipalType", ParamKind::String),
            ParameterSpec::optional("AcceptLanguage", ParamKind::String),
        ],
        outputs: vec![],
        default_selector: SelectorRule::Nothing,
        mutating: true,
        resource_param: Some("PortfolioId"),
        invoke: call_associate_principal,
    }
}

pub fn disassociate_principal_from_portfolio() -> CatalogDescriptor {
    CatalogDescriptor {
        key: "disassociate-principal-from-portfolio",
        api_name: "DisassociatePrincipalFromPortfolio",
        parameters: vec![
            ParameterSpec::required("PortfolioId", ParamKind::String),
            ParameterSpec::required("PrincipalARN", ParamKind::String),
            ParameterSpec::optional("AcceptLanguage", ParamKind::String),
        ],
        outputs: vec![],
        default_selector: SelectorRule::Nothing,
        mutating: true,
        resource_param: Some("PortfolioId"),
        invoke: call_disassociate_principal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_portfolio_renames_tag_parameter() {
        let descriptor = create_portfolio();
        let spec = descriptor.parameter("Tag").unwrap();
        assert_eq!(spec.target, "Tags");
        assert_eq!(spec.kind, ParamKind::KeyValueList);
    }

    #[test]
    fn test_share_operations_emit_nothing_by_default() {
        assert_eq!(accept_portfolio_share().default_selector, SelectorRule::Nothing);
        assert_eq!(reject_portfolio_share().default_selector, SelectorRule::Nothing);
    }

    #[test]
    fn test_principal_operations_require_both_identifiers() {
        for descriptor in [
            associate_principal_with_portfolio(),
            disassociate_principal_from_portfolio(),
        ] {
            let required: Vec<&str> = descriptor
                .required_parameters()
                .map(|spec| spec.name)
                .collect();
            assert_eq!(required, vec!["PortfolioId", "PrincipalARN"]);
        }
    }
}
