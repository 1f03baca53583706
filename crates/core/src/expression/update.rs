use super::{AttributePath, Operand};

/// Right-hand side of a `SET` action.
#[derive(Debug, Clone, PartialEq)]
pub enum SetValue {
    Operand(Operand),
    Plus(Operand, Operand),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetAction {
    pub path: AttributePath,
    pub value: SetValue,
}

/// An update expression made of `SET` and `REMOVE` clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateExpression {
    pub set: Vec<SetAction>,
    pub remove: Vec<AttributePath>,
}

impl UpdateExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// `SET path = operand`
    pub fn set(mut self, path: AttributePath, operand: Operand) -> Self {
        self.set.push(SetAction {
            path,
            value: SetValue::Operand(operand),
        });
        self
    }

    /// `SET path = left + right`
    pub fn set_sum(mut self, path: AttributePath, left: Operand, right: Operand) -> Self {
        self.set.push(SetAction {
            path,
            value: SetValue::Plus(left, right),
        });
        self
    }

    /// `REMOVE path`
    pub fn remove(mut self, path: AttributePath) -> Self {
        self.remove.push(path);
        self
    }

    /// Paths reported by `UPDATED_NEW`.
    ///
    /// A removed list element is reported through its enclosing list.
    pub fn updated_paths(&self) -> Vec<AttributePath> {
        let mut paths: Vec<AttributePath> = self.set.iter().map(|a| a.path.clone()).collect();
        for path in &self.remove {
            let reported = if path.ends_with_index() {
                path.parent().unwrap_or_else(|| path.clone())
            } else {
                path.clone()
            };
            if !paths.contains(&reported) {
                paths.push(reported);
            }
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_updated_paths_reports_list_for_removed_element() {
        let update = UpdateExpression::new()
            .set(
                AttributePath::attr("info").field("rating"),
                Operand::value("rating", Some(json!(5))),
            )
            .remove(AttributePath::attr("info").field("actors").index(0));

        let paths: Vec<String> = update
            .updated_paths()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(paths, vec!["info.rating", "info.actors"]);
    }
}
