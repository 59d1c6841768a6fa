//! Immutable operation registry
//!
//! The registry is the process-wide descriptor table: built once at
//! startup, validated during construction, read-only afterwards. It is
//! passed by reference wherever descriptors are needed. There is no
//! ambient global state.

use crate::descriptor::{OperationDescriptor, SelectorRule};
use catalogctl_common::{AdapterError, Result};
use std::collections::BTreeMap;

/// Read-only table of operation descriptors keyed by operation key.
pub struct OperationRegistry<C: ?Sized> {
    operations: BTreeMap<&'static str, OperationDescriptor<C>>,
}

impl<C: ?Sized> OperationRegistry<C> {
    pub fn builder() -> RegistryBuilder<C> {
        RegistryBuilder {
            operations: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&OperationDescriptor<C>> {
        self.operations.get(key)
    }

    /// Iterate descriptors in key order.
    pub fn iter(&self) -> impl Iterator<Item = &OperationDescriptor<C>> {
        self.operations.values()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Builder validating each descriptor as it is registered.
pub struct RegistryBuilder<C: ?Sized> {
    operations: BTreeMap<&'static str, OperationDescriptor<C>>,
}

impl<C: ?Sized> std::fmt::Debug for RegistryBuilder<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("operations", &self.operations.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<C: ?Sized> RegistryBuilder<C> {
    /// Register one descriptor.
    ///
    /// Rejects duplicate keys and descriptors whose default selector or
    /// resource parameter does not resolve against their own
    /// declarations, so misconfiguration surfaces at startup rather
    /// than at invocation time.
    pub fn register(mut self, descriptor: OperationDescriptor<C>) -> Result<Self> {
        if self.operations.contains_key(descriptor.key) {
            return Err(AdapterError::DuplicateOperation(descriptor.key.to_string()));
        }

        if let SelectorRule::Output(name) = descriptor.default_selector {
            if descriptor.output(name).is_none() {
                return Err(AdapterError::InvalidSelectorConfiguration {
                    operation: descriptor.key.to_string(),
                    selector: name.to_string(),
                    reason: "default selector names an undeclared output".to_string(),
                });
            }
        }

        if let Some(name) = descriptor.resource_param {
            if descriptor.parameter(name).is_none() {
                return Err(AdapterError::InvalidSelectorConfiguration {
                    operation: descriptor.key.to_string(),
                    selector: name.to_string(),
                    reason: "resource parameter is not declared".to_string(),
                });
            }
        }

        self.operations.insert(descriptor.key, descriptor);
        Ok(self)
    }

    pub fn build(self) -> OperationRegistry<C> {
        OperationRegistry {
            operations: self.operations,
        }
    }
}
