//! Operation descriptors
//!
//! A descriptor is the complete static description of one remote
//! operation: which parameters it binds, where each lands on the
//! request, which outputs the response exposes, what the default
//! projection is, and which client method performs the call. Descriptors
//! are plain data: adding an operation means registering one more
//! descriptor, not writing one more adapter.

use catalogctl_common::{ClientError, ParamKind, Request, Response};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Future returned by a client-method reference.
pub type CallFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Response, ClientError>> + Send + 'a>>;

/// Reference to one client method, bound at registration time.
pub type InvokeFn<C> = for<'a> fn(&'a C, Request) -> CallFuture<'a>;

/// Typed accessor for one declared response output.
pub type OutputAccessor = fn(&Response) -> Option<Value>;

/// One declared parameter of an operation.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    /// Parameter name as supplied by the caller.
    pub name: &'static str,
    /// Value kind, used for input coercion.
    pub kind: ParamKind,
    /// Whether an invocation without this parameter fails before the call.
    pub required: bool,
    /// Request field path. Dotted segments nest, grouping flat
    /// parameters into one sub-object.
    pub target: &'static str,
}

impl ParameterSpec {
    /// A required parameter whose request field carries the same name.
    pub fn required(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            target: name,
        }
    }

    /// An optional parameter whose request field carries the same name.
    pub fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            target: name,
        }
    }

    /// Override the request field path (rename or composite grouping).
    pub fn with_target(mut self, target: &'static str) -> Self {
        self.target = target;
        self
    }
}

/// One declared response output with its typed accessor.
pub struct OutputSpec {
    pub name: &'static str,
    pub extract: OutputAccessor,
}

impl OutputSpec {
    pub fn new(name: &'static str, extract: OutputAccessor) -> Self {
        Self { name, extract }
    }
}

impl std::fmt::Debug for OutputSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputSpec").field("name", &self.name).finish()
    }
}

/// An operation's default output projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorRule {
    /// Emit the whole response document.
    EntireResponse,
    /// Emit one declared output.
    Output(&'static str),
    /// Emit nothing (operations with no meaningful return value).
    Nothing,
}

/// Static metadata for one remote operation.
///
/// `C` is the client interface the operation dispatches against; it is
/// usually a `dyn` trait. Descriptors are immutable once registered and
/// safe for unsynchronized concurrent reads.
pub struct OperationDescriptor<C: ?Sized> {
    /// Registry key, kebab-case (e.g. `terminate-provisioned-product`).
    pub key: &'static str,
    /// Remote API operation name (e.g. `TerminateProvisionedProduct`).
    pub api_name: &'static str,
    /// Declared parameters in binding order.
    pub parameters: Vec<ParameterSpec>,
    /// Declared response outputs.
    pub outputs: Vec<OutputSpec>,
    /// Projection applied when the caller gives no directive.
    pub default_selector: SelectorRule,
    /// Whether the operation changes remote state and must pass the
    /// confirmation gate.
    pub mutating: bool,
    /// Parameter naming the affected resource, used in confirmation
    /// prompts and diagnostics.
    pub resource_param: Option<&'static str>,
    /// The client method performing the call.
    pub invoke: InvokeFn<C>,
}

impl<C: ?Sized> OperationDescriptor<C> {
    /// Look up a declared parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|spec| spec.name == name)
    }

    /// Look up a declared output by name.
    pub fn output(&self, name: &str) -> Option<&OutputSpec> {
        self.outputs.iter().find(|spec| spec.name == name)
    }

    /// Iterate over required parameters.
    pub fn required_parameters(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.parameters.iter().filter(|spec| spec.required)
    }
}

impl<C: ?Sized> std::fmt::Debug for OperationDescriptor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("key", &self.key)
            .field("api_name", &self.api_name)
            .field("parameters", &self.parameters)
            .field("outputs", &self.outputs)
            .field("default_selector", &self.default_selector)
            .field("mutating", &self.mutating)
            .finish()
    }
}
