use thiserror::Error;

use crate::document::TranslateError;

/// Errors raised while evaluating an expression against an item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("The document path provided in the update expression is invalid for update: {0}")]
    InvalidPath(String),

    #[error("Invalid operand type for {function}: operand type is {operand_type}")]
    InvalidOperand {
        function: &'static str,
        operand_type: &'static str,
    },

    #[error("An operand in the update expression has an incorrect data type")]
    IncorrectOperandType,

    #[error("The provided expression refers to an attribute that does not exist in the item: {0}")]
    MissingAttribute(String),

    #[error(
        "Invalid range: the BETWEEN operator requires upper bound to be greater than or equal to lower bound; lower bound: {low}, upper bound: {high}"
    )]
    InvertedRange { low: String, high: String },
}
