// nmlio/src/namelist.rs

//! Ordered namelist document structures and text output.
//!
//! Both the document and its groups preserve insertion order, which the
//! writer and the reopen-merge semantics depend on. Names are lowercased
//! on insert and lookup; Fortran namelists are case-insensitive.

use crate::error::Result;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;

/// A complete namelist document containing multiple groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Namelist {
    /// Groups keyed by group name
    groups: HashMap<String, NamelistGroup>,
    /// Insertion order of group names
    group_order: Vec<String>,
}

impl Namelist {
    /// Create a new empty namelist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a group if absent and return a mutable reference to it.
    /// Re-inserting an existing name re-enters the existing group.
    pub fn insert_group(&mut self, name: &str) -> &mut NamelistGroup {
        let name = name.to_lowercase();
        if !self.groups.contains_key(&name) {
            self.group_order.push(name.clone());
            self.groups.insert(name.clone(), NamelistGroup::new());
        }
        self.groups.get_mut(&name).expect("group was just inserted")
    }

    /// Get a group by name.
    pub fn get_group(&self, name: &str) -> Option<&NamelistGroup> {
        self.groups.get(&name.to_lowercase())
    }

    /// Get a mutable reference to a group by name.
    pub fn get_group_mut(&mut self, name: &str) -> Option<&mut NamelistGroup> {
        self.groups.get_mut(&name.to_lowercase())
    }

    /// Check if a group exists.
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(&name.to_lowercase())
    }

    /// Get all group names in insertion order.
    pub fn group_names(&self) -> &[String] {
        &self.group_order
    }

    /// Iterate over all groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&String, &NamelistGroup)> {
        self.group_order
            .iter()
            .filter_map(move |name| self.groups.get(name).map(|group| (name, group)))
    }

    /// Check if the namelist has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Render the document as normalized namelist text: per group an
    /// `&name` line, one `name = literal` line per variable, and a `/`
    /// line, all joined with newlines. The document is not mutated.
    pub fn to_nml_string(&self) -> String {
        let mut lines = Vec::new();
        for (group_name, group) in self.groups() {
            lines.push(format!("&{}", group_name));
            for (var_name, value) in group.variables() {
                lines.push(format!("{} = {}", var_name, value.to_literal()));
            }
            lines.push("/".to_string());
        }
        lines.join("\n")
    }

    /// Write the rendered text to a writer and return the text, so a
    /// round-trip check does not need to re-read the target.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<String> {
        let text = self.to_nml_string();
        writer.write_all(text.as_bytes())?;
        Ok(text)
    }
}

impl fmt::Display for Namelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_nml_string())
    }
}

/// A single namelist group mapping variable names to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamelistGroup {
    /// Variables in the group
    variables: HashMap<String, Value>,
    /// Insertion order of variable names
    variable_order: Vec<String>,
}

impl NamelistGroup {
    /// Create a new empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable with automatic conversion. Assigning an existing
    /// name replaces the value but keeps its original order position.
    pub fn insert<T: Into<Value>>(&mut self, name: &str, value: T) -> &mut Self {
        let name = name.to_lowercase();
        if !self.variables.contains_key(&name) {
            self.variable_order.push(name.clone());
        }
        self.variables.insert(name, value.into());
        self
    }

    /// Get a variable by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(&name.to_lowercase())
    }

    /// Check if a variable exists.
    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(&name.to_lowercase())
    }

    /// Get all variable names in insertion order.
    pub fn variable_names(&self) -> &[String] {
        &self.variable_order
    }

    /// Iterate over all variables in insertion order.
    pub fn variables(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.variable_order
            .iter()
            .filter_map(move |name| self.variables.get(name).map(|value| (name, value)))
    }

    /// Merge another group's variables into this one, in their order.
    /// Existing names are overwritten in place, new names appended.
    pub fn merge(&mut self, other: NamelistGroup) {
        for name in other.variable_order {
            if let Some(value) = other.variables.get(&name) {
                self.insert(&name, value.clone());
            }
        }
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name)?.as_int()
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name)?.as_real()
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name)?.as_logical()
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_str()
    }

    /// Check if the group is empty.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }
}
