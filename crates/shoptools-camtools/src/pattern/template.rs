//! Pattern templates and shared variables

use super::operation::PatternOperation;
use crate::error::{PatternError, PatternResult};
use serde::{Deserialize, Serialize};
use shoptools_core::data::{OperationActionProperty, PropertyName};
use tracing::debug;

/// A value written into the same property of several operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedVariable {
    pub name: String,
    pub property: PropertyName,
    pub value: String,
    /// Indices into the owning template's operation list
    #[serde(default)]
    pub operations: Vec<usize>,
}

impl SharedVariable {
    pub fn new(name: &str, property: PropertyName, value: &str) -> Self {
        Self {
            name: name.to_string(),
            property,
            value: value.to_string(),
            operations: Vec::new(),
        }
    }

    pub fn linked_to(mut self, operations: &[usize]) -> Self {
        self.operations = operations.to_vec();
        self
    }
}

/// A reusable, parametrized cut definition
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternTemplate {
    pub name: String,
    /// Length along the cut, measurement text; blank means start to end
    #[serde(default)]
    pub pattern_length: String,
    #[serde(default)]
    pub pattern_width: String,
    /// Keep the literal operation order even when it costs tool changes
    #[serde(default)]
    pub tool_sequence_strict: bool,
    #[serde(default)]
    pub operations: Vec<PatternOperation>,
    #[serde(default)]
    pub shared_variables: Vec<SharedVariable>,
}

impl PatternTemplate {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_operation(mut self, operation: PatternOperation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn with_shared_variable(mut self, variable: SharedVariable) -> Self {
        self.shared_variables.push(variable);
        self
    }

    /// Write every shared variable's value into its linked operations
    ///
    /// Stops at the first variable that links a missing operation or whose
    /// property does not apply to a linked operation.
    pub fn apply_shared_variables(
        &mut self,
        catalog: &[OperationActionProperty],
    ) -> PatternResult<()> {
        for variable in &self.shared_variables {
            for &index in &variable.operations {
                let operation =
                    self.operations
                        .get_mut(index)
                        .ok_or_else(|| PatternError::MissingOperation {
                            variable: variable.name.clone(),
                            index,
                        })?;
                operation.set_property(catalog, variable.property, &variable.value)?;
            }
            debug!(
                "Applied shared variable '{}' = '{}' to {} operation(s)",
                variable.name,
                variable.value,
                variable.operations.len()
            );
        }
        Ok(())
    }
}
