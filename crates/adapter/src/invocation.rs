//! Invocation lifecycle
//!
//! One [`Invocation`] owns one trip through the adapter pipeline. Its
//! state advances monotonically:
//!
//! `Idle → ParametersBound → RequestBuilt → CallInFlight →
//! {Completed | Failed | Cancelled} → OutputEmitted`
//!
//! Terminal states never loop back to `CallInFlight`; there is no retry
//! inside the adapter.

use crate::builder::build_request;
use crate::descriptor::OperationDescriptor;
use crate::dispatch::dispatch;
use crate::gate::ConfirmationGate;
use crate::selector::{ResolvedSelector, SelectorDirective};
use catalogctl_common::{AdapterError, ParamValue, ParameterContext, Request, Result};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Lifecycle states of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    Idle,
    ParametersBound,
    RequestBuilt,
    CallInFlight,
    Completed,
    Failed,
    Cancelled,
    OutputEmitted,
}

impl InvocationState {
    /// Whether `self → next` is a legal transition.
    pub fn can_transition(self, next: InvocationState) -> bool {
        use InvocationState::*;
        matches!(
            (self, next),
            (Idle, ParametersBound)
                | (ParametersBound, RequestBuilt)
                | (ParametersBound, Failed)
                | (RequestBuilt, CallInFlight)
                | (RequestBuilt, Completed)
                | (RequestBuilt, Failed)
                | (CallInFlight, Completed)
                | (CallInFlight, Failed)
                | (CallInFlight, Cancelled)
                | (Completed, OutputEmitted)
                | (Failed, OutputEmitted)
                | (Cancelled, OutputEmitted)
        )
    }
}

/// One adapter invocation against one operation descriptor.
///
/// Single-shot: after `execute` the invocation has emitted its output
/// (or error) and cannot be reused.
pub struct Invocation<'d, C: ?Sized> {
    descriptor: &'d OperationDescriptor<C>,
    state: InvocationState,
    context: ParameterContext,
    selector: Option<ResolvedSelector>,
    request: Option<Request>,
}

impl<'d, C: ?Sized> Invocation<'d, C> {
    pub fn new(descriptor: &'d OperationDescriptor<C>) -> Self {
        Self {
            descriptor,
            state: InvocationState::Idle,
            context: ParameterContext::new(),
            selector: None,
            request: None,
        }
    }

    pub fn state(&self) -> InvocationState {
        self.state
    }

    pub fn descriptor(&self) -> &OperationDescriptor<C> {
        self.descriptor
    }

    fn transition(&mut self, next: InvocationState) {
        debug_assert!(
            self.state.can_transition(next),
            "illegal state transition {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }

    /// Bind the caller-supplied parameter context.
    pub fn bind(&mut self, context: ParameterContext) {
        self.context = context;
        self.transition(InvocationState::ParametersBound);
    }

    /// Resolve the output-selection directive against the descriptor.
    ///
    /// Must run before the call; a directive that does not resolve fails
    /// the invocation without any network round-trip. When never called,
    /// `execute` resolves the descriptor's default selector.
    pub fn select_output(&mut self, directive: &SelectorDirective) -> Result<()> {
        match ResolvedSelector::resolve(self.descriptor, directive, &self.context) {
            Ok(selector) => {
                self.selector = Some(selector);
                Ok(())
            }
            Err(err) => {
                self.transition(InvocationState::Failed);
                self.transition(InvocationState::OutputEmitted);
                Err(err)
            }
        }
    }

    /// Build the request from the bound context.
    ///
    /// A missing mandatory parameter fails here; the client is never
    /// reached.
    pub fn build(&mut self) -> Result<()> {
        match build_request(self.descriptor, &self.context) {
            Ok(request) => {
                self.request = Some(request);
                self.transition(InvocationState::RequestBuilt);
                Ok(())
            }
            Err(err) => {
                self.transition(InvocationState::Failed);
                self.transition(InvocationState::OutputEmitted);
                Err(err)
            }
        }
    }

    /// Consult the gate, dispatch the call, and project the output.
    ///
    /// Returns the selected output value, or `None` when the selector
    /// projects nothing or the gate declined the mutation.
    pub async fn execute(
        &mut self,
        client: &C,
        gate: &dyn ConfirmationGate,
        force: bool,
        cancel: &CancellationToken,
    ) -> Result<Option<Value>> {
        debug_assert_eq!(self.state, InvocationState::RequestBuilt);

        if self.selector.is_none() {
            match ResolvedSelector::resolve(
                self.descriptor,
                &SelectorDirective::Default,
                &self.context,
            ) {
                Ok(selector) => self.selector = Some(selector),
                Err(err) => {
                    self.transition(InvocationState::Failed);
                    self.transition(InvocationState::OutputEmitted);
                    return Err(err);
                }
            }
        }

        if self.descriptor.mutating && !force && !gate.confirm(self.descriptor.api_name, &self.target_label()) {
            debug!(
                operation = self.descriptor.key,
                "mutation declined by confirmation gate"
            );
            self.transition(InvocationState::Completed);
            self.transition(InvocationState::OutputEmitted);
            return Ok(None);
        }

        let request = self.request.take().expect("request built");
        self.transition(InvocationState::CallInFlight);

        let call = (self.descriptor.invoke)(client, request);
        match dispatch(self.descriptor.key, call, cancel).await {
            Ok(response) => {
                self.transition(InvocationState::Completed);
                let output = self
                    .selector
                    .as_ref()
                    .expect("selector resolved before call")
                    .project(&response);
                self.transition(InvocationState::OutputEmitted);
                Ok(output)
            }
            Err(err) => {
                let terminal = match err {
                    AdapterError::Cancelled { .. } => InvocationState::Cancelled,
                    _ => InvocationState::Failed,
                };
                self.transition(terminal);
                self.transition(InvocationState::OutputEmitted);
                Err(err)
            }
        }
    }

    /// Human-readable identifier of the affected resource, for
    /// confirmation prompts.
    fn target_label(&self) -> String {
        let value = self
            .descriptor
            .resource_param
            .and_then(|name| self.context.get(name));
        match value {
            Some(ParamValue::Str(s)) => s.clone(),
            Some(other) => other.to_json().to_string(),
            None => self.descriptor.api_name.to_string(),
        }
    }
}
