//! Typed condition, update and projection expressions.
//!
//! Expressions are built as small ASTs. The DynamoDB backend renders them to
//! expression strings with placeholders; the in-memory backend evaluates them
//! directly.

mod condition;
mod error;
mod eval;
mod path;
mod projection;
mod render;
mod update;

pub use condition::{
    CompareOp, Condition, KeyCondition, Operand, SortKeyCondition,
};
pub use error::EvalError;
pub use eval::{compare_numbers, project, project_paths, resolve, Evaluator};
pub use path::{AttributePath, PathElement};
pub use projection::Projection;
pub use render::{ExpressionRenderer, PlaceholderValue, Placeholders};
pub use update::{SetAction, SetValue, UpdateExpression};
