use std::cmp::Ordering;

use serde_json::Value;

use super::AttributePath;

/// Comparison operators usable in conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    /// Whether an ordering between left and right satisfies this operator.
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }
}

/// A value position in an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// An attribute of the item.
    Path(AttributePath),
    /// A caller-supplied value. `label` names it in error messages;
    /// `None` marks a value the caller never supplied.
    Value { label: String, value: Option<Value> },
    /// `size(path)`.
    Size(AttributePath),
}

impl Operand {
    pub fn path(path: AttributePath) -> Self {
        Operand::Path(path)
    }

    pub fn value(label: impl Into<String>, value: Option<Value>) -> Self {
        Operand::Value {
            label: label.into(),
            value,
        }
    }

    pub fn size(path: AttributePath) -> Self {
        Operand::Size(path)
    }
}

/// A boolean predicate over an item.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare {
        left: Operand,
        op: CompareOp,
        right: Operand,
    },
    /// Inclusive on both bounds.
    Between {
        operand: Operand,
        low: Operand,
        high: Operand,
    },
    And(Box<Condition>, Box<Condition>),
}

impl Condition {
    pub fn compare(left: Operand, op: CompareOp, right: Operand) -> Self {
        Condition::Compare { left, op, right }
    }

    pub fn between(operand: Operand, low: Operand, high: Operand) -> Self {
        Condition::Between { operand, low, high }
    }

    pub fn and(self, other: Condition) -> Self {
        Condition::And(Box::new(self), Box::new(other))
    }
}

/// Sort-key range of a query, inclusive on both bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKeyCondition {
    pub key: String,
    pub low: Option<Value>,
    pub high: Option<Value>,
}

/// Key condition of a query: partition equality plus an optional sort-key
/// range.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCondition {
    pub partition_key: String,
    pub partition_value: Option<Value>,
    pub sort: Option<SortKeyCondition>,
}

impl KeyCondition {
    pub fn partition(key: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            partition_key: key.into(),
            partition_value: value,
            sort: None,
        }
    }

    pub fn with_sort_between(
        mut self,
        key: impl Into<String>,
        low: Option<Value>,
        high: Option<Value>,
    ) -> Self {
        self.sort = Some(SortKeyCondition {
            key: key.into(),
            low,
            high,
        });
        self
    }

    /// The equivalent general condition.
    pub fn to_condition(&self) -> Condition {
        let partition = Condition::compare(
            Operand::path(AttributePath::attr(&self.partition_key)),
            CompareOp::Eq,
            Operand::value(&self.partition_key, self.partition_value.clone()),
        );

        let Some(sort) = &self.sort else {
            return partition;
        };

        partition.and(Condition::between(
            Operand::path(AttributePath::attr(&sort.key)),
            Operand::value(format!("{} lower bound", sort.key), sort.low.clone()),
            Operand::value(format!("{} upper bound", sort.key), sort.high.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compare_op_accepts() {
        assert!(CompareOp::Le.accepts(Ordering::Equal));
        assert!(CompareOp::Le.accepts(Ordering::Less));
        assert!(!CompareOp::Le.accepts(Ordering::Greater));
        assert!(CompareOp::Ne.accepts(Ordering::Less));
        assert!(!CompareOp::Gt.accepts(Ordering::Equal));
    }

    #[test]
    fn test_partition_only_key_condition() {
        let condition = KeyCondition::partition("year", Some(json!(2013))).to_condition();
        assert!(matches!(
            condition,
            Condition::Compare {
                op: CompareOp::Eq,
                ..
            }
        ));
    }

    #[test]
    fn test_key_condition_with_between() {
        let condition = KeyCondition::partition("year", Some(json!(1992)))
            .with_sort_between("title", Some(json!("A")), Some(json!("L")))
            .to_condition();

        let Condition::And(_, sort) = condition else {
            panic!("expected a conjunction");
        };
        assert!(matches!(*sort, Condition::Between { .. }));
    }
}
