//! Generic request/response adapter
//!
//! One adapter implementation serves every remote operation. An
//! operation is described entirely by data (an [`OperationDescriptor`]
//! carrying parameter specs, output accessors, a default selector, and a
//! client-method reference), and an [`Invocation`] drives that data
//! through a fixed pipeline:
//!
//! parameters → context → request → remote call → response → selected output
//!
//! The descriptor table lives in an immutable [`OperationRegistry`]
//! constructed once at startup. Selector directives are resolved before
//! the call executes, so a malformed directive is a configuration error
//! rather than a post-call surprise. The dispatcher issues exactly one
//! remote call per invocation, with cooperative cancellation and no
//! implicit retries.

mod builder;
mod descriptor;
mod dispatch;
mod gate;
mod invocation;
mod registry;
mod selector;

pub use builder::build_request;
pub use descriptor::{
    CallFuture, InvokeFn, OperationDescriptor, OutputAccessor, OutputSpec, ParameterSpec,
    SelectorRule,
};
pub use dispatch::dispatch;
pub use gate::{ConfirmationGate, NoConfirmation};
pub use invocation::{Invocation, InvocationState};
pub use registry::{OperationRegistry, RegistryBuilder};
pub use selector::{ResolvedSelector, SelectorDirective};
