//! Rendering expression ASTs into the store's expression strings.
//!
//! Every attribute name goes through a `#nN` placeholder and every value
//! through a `:vN` placeholder, so reserved words such as `year` are safe.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use super::{
    AttributePath, Condition, KeyCondition, Operand, PathElement, Projection, SetValue,
    UpdateExpression,
};

/// A value placeholder with the label used in error messages.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderValue {
    pub label: String,
    pub value: Option<Value>,
}

/// Placeholder maps collected while rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placeholders {
    /// `#nN` -> attribute name
    pub names: BTreeMap<String, String>,
    /// `:vN` -> value
    pub values: BTreeMap<String, PlaceholderValue>,
}

/// Renders expressions while accumulating shared placeholders.
///
/// One renderer is used per request so that all expressions of that request
/// share the same name and value maps.
#[derive(Debug, Default)]
pub struct ExpressionRenderer {
    names: BTreeMap<String, String>,
    name_placeholders: HashMap<String, String>,
    values: BTreeMap<String, PlaceholderValue>,
}

impl ExpressionRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&mut self, path: &AttributePath) -> String {
        let mut rendered = String::new();
        for element in path.elements() {
            match element {
                PathElement::Attribute(name) => {
                    if !rendered.is_empty() {
                        rendered.push('.');
                    }
                    let placeholder = self.name(name);
                    rendered.push_str(&placeholder);
                }
                PathElement::Index(index) => {
                    rendered.push_str(&format!("[{index}]"));
                }
            }
        }
        rendered
    }

    pub fn operand(&mut self, operand: &Operand) -> String {
        match operand {
            Operand::Path(path) => self.path(path),
            Operand::Value { label, value } => {
                let placeholder = format!(":v{}", self.values.len());
                self.values.insert(
                    placeholder.clone(),
                    PlaceholderValue {
                        label: label.clone(),
                        value: value.clone(),
                    },
                );
                placeholder
            }
            Operand::Size(path) => format!("size({})", self.path(path)),
        }
    }

    pub fn condition(&mut self, condition: &Condition) -> String {
        match condition {
            Condition::Compare { left, op, right } => {
                let left = self.operand(left);
                let right = self.operand(right);
                format!("{left} {} {right}", op.symbol())
            }
            Condition::Between { operand, low, high } => {
                let operand = self.operand(operand);
                let low = self.operand(low);
                let high = self.operand(high);
                format!("{operand} BETWEEN {low} AND {high}")
            }
            Condition::And(left, right) => {
                let left = self.nested(left);
                let right = self.nested(right);
                format!("{left} AND {right}")
            }
        }
    }

    pub fn key_condition(&mut self, key_condition: &KeyCondition) -> String {
        self.condition(&key_condition.to_condition())
    }

    pub fn update(&mut self, update: &UpdateExpression) -> String {
        let mut clauses = Vec::new();

        if !update.set.is_empty() {
            let actions: Vec<String> = update
                .set
                .iter()
                .map(|action| {
                    let path = self.path(&action.path);
                    let value = match &action.value {
                        SetValue::Operand(operand) => self.operand(operand),
                        SetValue::Plus(left, right) => {
                            format!("{} + {}", self.operand(left), self.operand(right))
                        }
                    };
                    format!("{path} = {value}")
                })
                .collect();
            clauses.push(format!("SET {}", actions.join(", ")));
        }

        if !update.remove.is_empty() {
            let paths: Vec<String> = update.remove.iter().map(|p| self.path(p)).collect();
            clauses.push(format!("REMOVE {}", paths.join(", ")));
        }

        clauses.join(" ")
    }

    pub fn projection(&mut self, projection: &Projection) -> String {
        projection
            .paths()
            .iter()
            .map(|p| self.path(p))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn finish(self) -> Placeholders {
        Placeholders {
            names: self.names,
            values: self.values,
        }
    }

    fn name(&mut self, name: &str) -> String {
        if let Some(placeholder) = self.name_placeholders.get(name) {
            return placeholder.clone();
        }
        let placeholder = format!("#n{}", self.names.len());
        self.names.insert(placeholder.clone(), name.to_string());
        self.name_placeholders
            .insert(name.to_string(), placeholder.clone());
        placeholder
    }

    fn nested(&mut self, condition: &Condition) -> String {
        match condition {
            Condition::And(..) => format!("({})", self.condition(condition)),
            _ => self.condition(condition),
        }
    }
}
