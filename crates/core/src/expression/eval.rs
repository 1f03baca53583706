//! Evaluation of expression ASTs against wire items.
//!
//! Backends that hold items themselves (the in-memory store) use this to get
//! the store's condition, update and projection semantics.

use std::cmp::Ordering;

use crate::document::{AttributeValue, DocumentTranslator, WireItem};

use super::{
    AttributePath, CompareOp, Condition, EvalError, Operand, PathElement, Projection, SetValue,
    UpdateExpression,
};

type Result<T> = std::result::Result<T, EvalError>;

/// Look up a path in an item.
pub fn resolve<'a>(item: &'a WireItem, path: &AttributePath) -> Option<&'a AttributeValue> {
    let mut elements = path.elements().iter();
    let first = match elements.next()? {
        PathElement::Attribute(name) => item.get(name)?,
        PathElement::Index(_) => return None,
    };
    elements.try_fold(first, |current, element| match (element, current) {
        (PathElement::Attribute(name), AttributeValue::M(map)) => map.get(name),
        (PathElement::Index(index), AttributeValue::L(list)) => list.get(*index),
        _ => None,
    })
}

/// Keep only the projected paths of an item, preserving nesting.
pub fn project(item: &WireItem, projection: &Projection) -> WireItem {
    project_paths(item, projection.paths())
}

pub fn project_paths(item: &WireItem, paths: &[AttributePath]) -> WireItem {
    let mut projected = AttributeValue::M(WireItem::new());
    for path in paths {
        if let Some(value) = resolve(item, path) {
            insert_projected(&mut projected, path.elements(), value.clone());
        }
    }
    match projected {
        AttributeValue::M(map) => map,
        _ => WireItem::new(),
    }
}

fn insert_projected(target: &mut AttributeValue, elements: &[PathElement], value: AttributeValue) {
    let Some((first, rest)) = elements.split_first() else {
        return;
    };
    match (first, target) {
        (PathElement::Attribute(name), AttributeValue::M(map)) => {
            if rest.is_empty() {
                map.insert(name.clone(), value);
            } else {
                let child = map
                    .entry(name.clone())
                    .or_insert_with(|| empty_container(&rest[0]));
                insert_projected(child, rest, value);
            }
        }
        (PathElement::Index(_), AttributeValue::L(list)) => {
            if rest.is_empty() {
                list.push(value);
            } else {
                list.push(empty_container(&rest[0]));
                if let Some(child) = list.last_mut() {
                    insert_projected(child, rest, value);
                }
            }
        }
        _ => {}
    }
}

fn empty_container(next: &PathElement) -> AttributeValue {
    match next {
        PathElement::Attribute(_) => AttributeValue::M(WireItem::new()),
        PathElement::Index(_) => AttributeValue::L(Vec::new()),
    }
}

/// Evaluates conditions and applies updates.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    translator: &'a DocumentTranslator,
}

impl<'a> Evaluator<'a> {
    pub fn new(translator: &'a DocumentTranslator) -> Self {
        Self { translator }
    }

    /// Evaluate a condition. A missing item is an empty item.
    pub fn condition(&self, item: &WireItem, condition: &Condition) -> Result<bool> {
        Ok(match condition {
            Condition::Compare { left, op, right } => {
                let left = self.operand(item, left)?;
                let right = self.operand(item, right)?;
                match (left, right) {
                    (Some(left), Some(right)) => match op {
                        CompareOp::Eq => values_equal(&left, &right),
                        CompareOp::Ne => !values_equal(&left, &right),
                        _ => order_values(&left, &right)
                            .map(|ordering| op.accepts(ordering))
                            .unwrap_or(false),
                    },
                    _ => false,
                }
            }
            Condition::Between { operand, low, high } => {
                let value = self.operand(item, operand)?;
                let low = self.operand(item, low)?;
                let high = self.operand(item, high)?;
                match (value, low, high) {
                    (Some(value), Some(low), Some(high)) => {
                        let above = order_values(&value, &low)
                            .map(|o| o != Ordering::Less)
                            .unwrap_or(false);
                        let below = order_values(&value, &high)
                            .map(|o| o != Ordering::Greater)
                            .unwrap_or(false);
                        above && below
                    }
                    _ => false,
                }
            }
            Condition::And(left, right) => {
                self.condition(item, left)? && self.condition(item, right)?
            }
        })
    }

    /// Reject `BETWEEN` ranges whose supplied bounds are out of order.
    ///
    /// Runs before any item is read, so an inverted range fails even when
    /// nothing would match.
    pub fn check_ranges(&self, condition: &Condition) -> Result<()> {
        match condition {
            Condition::Between {
                low: low @ Operand::Value { .. },
                high: high @ Operand::Value { .. },
                ..
            } => {
                let empty = WireItem::new();
                if let (Some(lower), Some(upper)) =
                    (self.operand(&empty, low)?, self.operand(&empty, high)?)
                {
                    if order_values(&lower, &upper) == Some(Ordering::Greater) {
                        return Err(EvalError::InvertedRange {
                            low: describe_bound(&lower),
                            high: describe_bound(&upper),
                        });
                    }
                }
                Ok(())
            }
            Condition::And(left, right) => {
                self.check_ranges(left)?;
                self.check_ranges(right)
            }
            _ => Ok(()),
        }
    }

    /// Apply an update to an item in place.
    ///
    /// All right-hand sides are evaluated against the item as it was before
    /// the update, then `SET` actions run, then `REMOVE` actions.
    pub fn apply_update(&self, item: &mut WireItem, update: &UpdateExpression) -> Result<()> {
        let mut assignments = Vec::with_capacity(update.set.len());
        for action in &update.set {
            let value = match &action.value {
                SetValue::Operand(operand) => self.required(item, operand)?,
                SetValue::Plus(left, right) => {
                    let left = self.required(item, left)?;
                    let right = self.required(item, right)?;
                    add(&left, &right)?
                }
            };
            assignments.push((&action.path, value));
        }

        for (path, value) in assignments {
            with_root(item, |root| assign_in(root, path.elements(), value))
                .map_err(|_| EvalError::InvalidPath(path.to_string()))?;
        }

        let mut removals: Vec<&AttributePath> = update.remove.iter().collect();
        // later list elements first so earlier indices stay valid
        removals.sort_by(|a, b| b.cmp(a));
        for path in removals {
            with_root(item, |root| remove_in(root, path.elements()))
                .map_err(|_| EvalError::InvalidPath(path.to_string()))?;
        }

        Ok(())
    }

    fn operand(&self, item: &WireItem, operand: &Operand) -> Result<Option<AttributeValue>> {
        match operand {
            Operand::Path(path) => Ok(resolve(item, path).cloned()),
            Operand::Value { label, value } => Ok(self
                .translator
                .marshall_field(label, value.as_ref())?),
            Operand::Size(path) => match resolve(item, path) {
                None => Ok(None),
                Some(value) => size_of(value)
                    .map(|size| Some(AttributeValue::N(size.to_string())))
                    .ok_or_else(|| EvalError::InvalidOperand {
                        function: "size",
                        operand_type: value.type_descriptor(),
                    }),
            },
        }
    }

    fn required(&self, item: &WireItem, operand: &Operand) -> Result<AttributeValue> {
        match self.operand(item, operand)? {
            Some(value) => Ok(value),
            None => match operand {
                Operand::Path(path) | Operand::Size(path) => {
                    Err(EvalError::MissingAttribute(path.to_string()))
                }
                Operand::Value { label, .. } => Err(EvalError::MissingAttribute(label.clone())),
            },
        }
    }
}

fn size_of(value: &AttributeValue) -> Option<usize> {
    match value {
        AttributeValue::S(s) => Some(s.len()),
        AttributeValue::B(b) => Some(b.len()),
        AttributeValue::M(m) => Some(m.len()),
        AttributeValue::L(l) => Some(l.len()),
        AttributeValue::Ss(s) => Some(s.len()),
        AttributeValue::Ns(n) => Some(n.len()),
        AttributeValue::Bs(b) => Some(b.len()),
        AttributeValue::N(_) | AttributeValue::Bool(_) | AttributeValue::Null(_) => None,
    }
}

/// Ordering for `<`, `<=`, `>`, `>=` and `BETWEEN`: numbers, strings and
/// binaries only.
fn order_values(left: &AttributeValue, right: &AttributeValue) -> Option<Ordering> {
    match (left, right) {
        (AttributeValue::N(a), AttributeValue::N(b)) => compare_numbers(a, b),
        (AttributeValue::S(a), AttributeValue::S(b)) => Some(a.as_bytes().cmp(b.as_bytes())),
        (AttributeValue::B(a), AttributeValue::B(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Render a range bound the way the store does in its messages, e.g. `{S:M}`.
fn describe_bound(value: &AttributeValue) -> String {
    match value {
        AttributeValue::S(s) | AttributeValue::N(s) => {
            format!("{{{}:{}}}", value.type_descriptor(), s)
        }
        other => format!("{{{}}}", other.type_descriptor()),
    }
}

/// Equality used by `=` and `<>`. Numbers compare by value, everything else
/// structurally.
fn values_equal(left: &AttributeValue, right: &AttributeValue) -> bool {
    match (left, right) {
        (AttributeValue::N(a), AttributeValue::N(b)) => {
            compare_numbers(a, b) == Some(Ordering::Equal)
        }
        _ => left == right,
    }
}

/// Compare two decimal strings numerically.
pub fn compare_numbers(a: &str, b: &str) -> Option<Ordering> {
    if let (Ok(a), Ok(b)) = (a.parse::<i128>(), b.parse::<i128>()) {
        return Some(a.cmp(&b));
    }
    let a = a.parse::<f64>().ok()?;
    let b = b.parse::<f64>().ok()?;
    a.partial_cmp(&b)
}

fn add(left: &AttributeValue, right: &AttributeValue) -> Result<AttributeValue> {
    let (AttributeValue::N(a), AttributeValue::N(b)) = (left, right) else {
        return Err(EvalError::IncorrectOperandType);
    };

    if let (Ok(a), Ok(b)) = (a.parse::<i128>(), b.parse::<i128>()) {
        return Ok(AttributeValue::N((a + b).to_string()));
    }

    let (Ok(a), Ok(b)) = (a.parse::<f64>(), b.parse::<f64>()) else {
        return Err(EvalError::IncorrectOperandType);
    };
    Ok(AttributeValue::N(format!("{}", a + b)))
}

/// Run a mutation with the item viewed as a top-level map value.
fn with_root<T>(
    item: &mut WireItem,
    f: impl FnOnce(&mut AttributeValue) -> std::result::Result<T, ()>,
) -> std::result::Result<T, ()> {
    let mut root = AttributeValue::M(std::mem::take(item));
    let result = f(&mut root);
    if let AttributeValue::M(map) = root {
        *item = map;
    }
    result
}

fn assign_in(
    target: &mut AttributeValue,
    elements: &[PathElement],
    value: AttributeValue,
) -> std::result::Result<(), ()> {
    let Some((first, rest)) = elements.split_first() else {
        return Err(());
    };
    match (first, target) {
        (PathElement::Attribute(name), AttributeValue::M(map)) => {
            if rest.is_empty() {
                map.insert(name.clone(), value);
                Ok(())
            } else {
                let next = map.get_mut(name).ok_or(())?;
                assign_in(next, rest, value)
            }
        }
        (PathElement::Index(index), AttributeValue::L(list)) => {
            if rest.is_empty() {
                // writing past the end appends
                match list.get_mut(*index) {
                    Some(slot) => *slot = value,
                    None => list.push(value),
                }
                Ok(())
            } else {
                let next = list.get_mut(*index).ok_or(())?;
                assign_in(next, rest, value)
            }
        }
        _ => Err(()),
    }
}

fn remove_in(target: &mut AttributeValue, elements: &[PathElement]) -> std::result::Result<(), ()> {
    let Some((first, rest)) = elements.split_first() else {
        return Err(());
    };
    match (first, target) {
        (PathElement::Attribute(name), AttributeValue::M(map)) => {
            if rest.is_empty() {
                map.remove(name);
                Ok(())
            } else {
                let next = map.get_mut(name).ok_or(())?;
                remove_in(next, rest)
            }
        }
        (PathElement::Index(index), AttributeValue::L(list)) => {
            if rest.is_empty() {
                if *index < list.len() {
                    list.remove(*index);
                }
                Ok(())
            } else {
                let next = list.get_mut(*index).ok_or(())?;
                remove_in(next, rest)
            }
        }
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movie() -> WireItem {
        let translator = DocumentTranslator::default();
        let value = json!({
            "year": 2013,
            "title": "Rush",
            "info": {"rating": 8.3, "actors": ["Daniel Bruhl", "Chris Hemsworth", "Olivia Wilde"]}
        });
        match translator.marshall_value(&value) {
            AttributeValue::M(map) => map,
            _ => unreachable!(),
        }
    }

    fn info(path: &str) -> AttributePath {
        AttributePath::attr("info").field(path)
    }

    #[test]
    fn test_resolve_nested_list_element() {
        let item = movie();
        let actor = resolve(&item, &info("actors").index(1));
        assert_eq!(actor, Some(&AttributeValue::S("Chris Hemsworth".into())));
        assert!(resolve(&item, &info("actors").index(7)).is_none());
        assert!(resolve(&item, &info("missing").field("deeper")).is_none());
    }

    #[test]
    fn test_numeric_comparison() {
        let translator = DocumentTranslator::default();
        let evaluator = Evaluator::new(&translator);
        let item = movie();

        let at_most_eight = Condition::compare(
            Operand::path(info("rating")),
            CompareOp::Le,
            Operand::value("rating", Some(json!(8.0))),
        );
        let at_most_nine = Condition::compare(
            Operand::path(info("rating")),
            CompareOp::Le,
            Operand::value("rating", Some(json!(9))),
        );

        assert!(!evaluator.condition(&item, &at_most_eight).unwrap());
        assert!(evaluator.condition(&item, &at_most_nine).unwrap());
    }

    #[test]
    fn test_missing_attribute_fails_comparison() {
        let translator = DocumentTranslator::default();
        let evaluator = Evaluator::new(&translator);

        let condition = Condition::compare(
            Operand::size(info("actors")),
            CompareOp::Ge,
            Operand::value("minimum", Some(json!(3))),
        );

        assert!(evaluator.condition(&movie(), &condition).unwrap());
        assert!(!evaluator.condition(&WireItem::new(), &condition).unwrap());
    }

    #[test]
    fn test_between_on_strings_is_inclusive() {
        let translator = DocumentTranslator::default();
        let evaluator = Evaluator::new(&translator);
        let between = |low: &str, high: &str| {
            Condition::between(
                Operand::path(AttributePath::attr("title")),
                Operand::value("low", Some(json!(low))),
                Operand::value("high", Some(json!(high))),
            )
        };

        assert!(evaluator.condition(&movie(), &between("Rush", "Z")).unwrap());
        assert!(evaluator.condition(&movie(), &between("A", "Rush")).unwrap());
        assert!(!evaluator.condition(&movie(), &between("S", "Z")).unwrap());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let translator = DocumentTranslator::default();
        let evaluator = Evaluator::new(&translator);
        let partition = Condition::compare(
            Operand::path(AttributePath::attr("year")),
            CompareOp::Eq,
            Operand::value("year", Some(json!(1982))),
        );
        let titles = Condition::between(
            Operand::path(AttributePath::attr("title")),
            Operand::value("title lower bound", Some(json!("M"))),
            Operand::value("title upper bound", Some(json!("B"))),
        );

        let err = evaluator.check_ranges(&partition.and(titles)).unwrap_err();
        assert_eq!(
            err,
            EvalError::InvertedRange {
                low: "{S:M}".to_string(),
                high: "{S:B}".to_string(),
            }
        );
        assert!(err
            .to_string()
            .contains("requires upper bound to be greater than or equal to lower bound"));
    }

    #[test]
    fn test_ordered_and_equal_ranges_pass_the_check() {
        let translator = DocumentTranslator::default();
        let evaluator = Evaluator::new(&translator);
        let years = |low: i64, high: i64| {
            Condition::between(
                Operand::path(AttributePath::attr("year")),
                Operand::value("start_yr", Some(json!(low))),
                Operand::value("end_yr", Some(json!(high))),
            )
        };

        assert!(evaluator.check_ranges(&years(1950, 1959)).is_ok());
        assert!(evaluator.check_ranges(&years(1982, 1982)).is_ok());
        assert!(matches!(
            evaluator.check_ranges(&years(1990, 1950)),
            Err(EvalError::InvertedRange { .. })
        ));
        // numeric, not lexical, ordering
        assert!(evaluator.check_ranges(&years(9, 10)).is_ok());
    }

    #[test]
    fn test_size_of_number_is_an_error() {
        let translator = DocumentTranslator::default();
        let evaluator = Evaluator::new(&translator);
        let condition = Condition::compare(
            Operand::size(info("rating")),
            CompareOp::Ge,
            Operand::value("minimum", Some(json!(1))),
        );

        let err = evaluator.condition(&movie(), &condition).unwrap_err();
        assert!(matches!(err, EvalError::InvalidOperand { function: "size", .. }));
    }

    #[test]
    fn test_undefined_value_is_rejected() {
        let translator = DocumentTranslator::default();
        let evaluator = Evaluator::new(&translator);
        let condition = Condition::compare(
            Operand::path(AttributePath::attr("title")),
            CompareOp::Eq,
            Operand::value("title", None),
        );

        assert!(matches!(
            evaluator.condition(&movie(), &condition),
            Err(EvalError::Translate(_))
        ));
    }

    #[test]
    fn test_increment_integer_and_decimal() {
        let translator = DocumentTranslator::default();
        let evaluator = Evaluator::new(&translator);
        let increment = UpdateExpression::new().set_sum(
            info("rating"),
            Operand::path(info("rating")),
            Operand::value("increment", Some(json!(1))),
        );

        let mut item = movie();
        evaluator.apply_update(&mut item, &increment).unwrap();
        assert_eq!(
            resolve(&item, &info("rating")),
            Some(&AttributeValue::N("9.3".into()))
        );

        let mut whole = WireItem::new();
        whole.insert(
            "info".into(),
            AttributeValue::M(WireItem::from([(
                "rating".to_string(),
                AttributeValue::N("5".into()),
            )])),
        );
        evaluator.apply_update(&mut whole, &increment).unwrap();
        evaluator.apply_update(&mut whole, &increment).unwrap();
        assert_eq!(
            resolve(&whole, &info("rating")),
            Some(&AttributeValue::N("7".into()))
        );
    }

    #[test]
    fn test_increment_missing_attribute_is_an_error() {
        let translator = DocumentTranslator::default();
        let evaluator = Evaluator::new(&translator);
        let increment = UpdateExpression::new().set_sum(
            info("rating"),
            Operand::path(info("rating")),
            Operand::value("increment", Some(json!(1))),
        );

        let mut item = WireItem::new();
        let err = evaluator.apply_update(&mut item, &increment).unwrap_err();
        assert_eq!(err, EvalError::MissingAttribute("info.rating".into()));
    }

    #[test]
    fn test_set_requires_existing_parent() {
        let translator = DocumentTranslator::default();
        let evaluator = Evaluator::new(&translator);
        let update = UpdateExpression::new().set(info("plot"), Operand::value("plot", Some(json!("x"))));

        let mut item = WireItem::new();
        let err = evaluator.apply_update(&mut item, &update).unwrap_err();
        assert_eq!(err, EvalError::InvalidPath("info.plot".into()));
    }

    #[test]
    fn test_remove_first_list_element_shifts() {
        let translator = DocumentTranslator::default();
        let evaluator = Evaluator::new(&translator);
        let update = UpdateExpression::new().remove(info("actors").index(0));

        let mut item = movie();
        evaluator.apply_update(&mut item, &update).unwrap();

        let actors = resolve(&item, &info("actors")).and_then(AttributeValue::as_l).unwrap();
        assert_eq!(actors.len(), 2);
        assert_eq!(actors[0], AttributeValue::S("Chris Hemsworth".into()));
    }

    #[test]
    fn test_projection_keeps_nesting() {
        let item = movie();
        let projected = project(
            &item,
            &Projection::new(vec![
                AttributePath::attr("year"),
                info("rating"),
                AttributePath::attr("missing"),
            ]),
        );

        assert_eq!(projected.len(), 2);
        let info = projected["info"].as_m().unwrap();
        assert_eq!(info.len(), 1);
        assert!(info.contains_key("rating"));
    }
}
