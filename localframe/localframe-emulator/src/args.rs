//! Extra arguments passed to aggregate implementations.

use localframe_core::Value;

use crate::error::EmulationError;

/// Implementation-specific arguments, given positionally, by name, or both.
///
/// Implementations read them with [`FuncArgs::get`], which accepts either
/// calling convention for the same parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuncArgs {
    positional: Vec<Value>,
    named: Vec<(String, Value)>,
}

impl FuncArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positional<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            named: Vec::new(),
        }
    }

    pub fn with_positional(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a named argument; a later value for the same name replaces the earlier one.
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.named.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.named.push((name, value)),
        }
        self
    }

    /// Parameter `name` at `position`: the named value wins over the positional one.
    pub fn get(&self, position: usize, name: &str) -> Option<&Value> {
        self.named(name).or_else(|| self.positional.get(position))
    }

    pub fn named(&self, name: &str) -> Option<&Value> {
        self.named.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Fail unless every argument maps onto one of `params`, by position or by name.
    pub fn expect_only(&self, function: &str, params: &[&str]) -> Result<(), EmulationError> {
        if self.positional.len() > params.len() {
            return Err(EmulationError::invalid_argument(
                function,
                format!(
                    "takes at most {} extra argument(s), got {}",
                    params.len(),
                    self.positional.len()
                ),
            ));
        }
        for (name, _) in &self.named {
            match params.iter().position(|p| p == name) {
                None => {
                    return Err(EmulationError::invalid_argument(
                        function,
                        format!("unexpected argument '{name}'"),
                    ));
                }
                Some(i) if i < self.positional.len() => {
                    return Err(EmulationError::invalid_argument(
                        function,
                        format!("argument '{name}' given both by position and by name"),
                    ));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
