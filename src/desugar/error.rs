use std::fmt;

use lachs::Span;

use crate::ast::Expr;
use crate::types::TypeError;

#[derive(Debug, Clone, PartialEq)]
pub enum DesugarErrorKind {
    /// The line was empty.
    Empty,

    /// A block literal is left over with nothing to attach it to.
    StandaloneBlock { block: Expr },

    /// More than one expression remains after all passes.
    Unfoldable { remaining: Vec<Expr> },

    /// A type error that is not a matter of trying another rewrite.
    Type(TypeError),
}

/// A line that could not be reduced to a single expression.
#[derive(Debug, Clone)]
pub struct DesugarError {
    pub kind: DesugarErrorKind,
    pub position: Span,
}

impl DesugarError {
    pub fn new(kind: DesugarErrorKind, position: Span) -> Self {
        DesugarError { kind, position }
    }

    pub fn is_standalone_block(&self) -> bool {
        matches!(self.kind, DesugarErrorKind::StandaloneBlock { .. })
    }
}

impl fmt::Display for DesugarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match &self.kind {
            DesugarErrorKind::Empty => "nothing to desugar".to_string(),
            DesugarErrorKind::StandaloneBlock { block } => {
                format!("block {block} is not an argument of any call")
            }
            DesugarErrorKind::Unfoldable { remaining } => format!(
                "unable to fold line, {} expressions remain: {}",
                remaining.len(),
                remaining
                    .iter()
                    .map(|expr| expr.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
            DesugarErrorKind::Type(err) => err.to_string(),
        };

        if self.position.source.is_empty() {
            write!(f, "Desugar error: {msg}")
        } else {
            write!(f, "{}", self.position.to_string(&msg))
        }
    }
}

impl std::error::Error for DesugarError {}

impl From<TypeError> for DesugarErrorKind {
    fn from(err: TypeError) -> Self {
        DesugarErrorKind::Type(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_without_source_uses_category() {
        let err = DesugarError::new(DesugarErrorKind::Empty, Span::default());
        assert!(err.position.source.is_empty());
        assert_eq!(err.to_string(), "Desugar error: nothing to desugar");
    }

    #[test]
    fn test_type_errors_keep_their_message() {
        let err = DesugarError::new(TypeError::inferno("boom").into(), Span::default());
        assert_eq!(err.to_string(), "Desugar error: Type error: boom");
    }
}
