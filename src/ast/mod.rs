//! Expression and list nodes produced by the parser and rewritten by the
//! desugaring engine.

pub mod expression;
pub mod list;

use lachs::Span;

use crate::scope::ScopeId;

pub use expression::{Block, Call, Expr, Getter, Num, Str};
pub use list::{ArgList, GenList, GenProp, RawList, RawProp, StructList, StructProp};

/// One source line: the flat expression sequence the parser hands over,
/// the scope it was parsed in and its position for error reporting.
#[derive(Debug, Clone)]
pub struct Line {
    pub scope: ScopeId,
    pub exprs: Vec<Expr>,
    pub position: Span,
}

impl Line {
    pub fn new(scope: ScopeId, exprs: Vec<Expr>) -> Self {
        Line {
            scope,
            exprs,
            position: Span::default(),
        }
    }

    pub fn at(mut self, position: Span) -> Self {
        self.position = position;
        self
    }
}
