//! Capability groups and function declarations of a zome.
//!
//! A capability only references functions by name. Nothing ties those names
//! to the zome's `fn_declarations`, so a dangling reference is legal and
//! simply resolves to nothing at query time.

use serde::{Deserialize, Serialize};

/// A named group of function names exposed by a zome (a.k.a. trait).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    /// Function names in declared order.
    #[serde(default)]
    pub functions: Vec<String>,
}

impl Capability {
    pub fn new<I, S>(functions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            functions: functions.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the capability lists `function_name`.
    pub fn exposes(&self, function_name: &str) -> bool {
        self.functions.iter().any(|f| f == function_name)
    }
}

/// One typed input or output of a function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FnParameter {
    #[serde(default)]
    pub name: String,
    /// Type tag, kept as written.
    #[serde(rename = "type", default)]
    pub parameter_type: String,
}

impl FnParameter {
    pub fn new(name: impl Into<String>, parameter_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_type: parameter_type.into(),
        }
    }
}

/// Represents a zome "fn_declarations" entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FnDeclaration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<FnParameter>,
    #[serde(default)]
    pub outputs: Vec<FnParameter>,
}

impl FnDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, parameter_type: impl Into<String>) -> Self {
        self.inputs.push(FnParameter::new(name, parameter_type));
        self
    }

    pub fn with_output(
        mut self,
        name: impl Into<String>,
        parameter_type: impl Into<String>,
    ) -> Self {
        self.outputs.push(FnParameter::new(name, parameter_type));
        self
    }
}
