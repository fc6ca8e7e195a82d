use crate::scope::ScopeId;
use crate::types::{GenTable, Sym, Type};

use super::list::{ArgList, RawList, RawProp, StructList};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Sym(Sym),
    Num(Num),
    Str(Str),
    List(RawList),
    Args(ArgList),
    Struct(StructList),
    Block(Block),
    Call(Call),
    Getter(Getter),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Num {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Str {
    pub value: String,
}

/// A block literal. `args` are its declared parameters, `ret` an explicit
/// return type. Without `ret` the block returns its last expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub scope: ScopeId,
    pub args: Option<StructList>,
    pub ret: Option<Type>,
    pub body: Vec<Expr>,
}

impl Block {
    pub fn new(scope: ScopeId, body: Vec<Expr>) -> Self {
        Block {
            scope,
            args: None,
            ret: None,
            body,
        }
    }

    pub fn has_params(&self) -> bool {
        self.args.as_ref().is_some_and(|args| !args.is_empty())
    }
}

/// A member access chain, `origin.a.b`. No symbols means the origin itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Getter {
    pub scope: ScopeId,
    pub origin: Box<Expr>,
    pub syms: Vec<Sym>,
}

impl Getter {
    pub fn primitive(scope: ScopeId, origin: Expr) -> Self {
        Getter {
            scope,
            origin: Box::new(origin),
            syms: vec![],
        }
    }

    pub fn member(scope: ScopeId, origin: Expr, sym: Sym) -> Self {
        Getter {
            scope,
            origin: Box::new(origin),
            syms: vec![sym],
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.syms.is_empty()
    }
}

/// An invocation. `ty` and `gen_table` are filled in by validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub scope: ScopeId,
    pub op: Getter,
    pub args: ArgList,
    pub ty: Option<Type>,
    pub gen_table: Option<GenTable>,
}

impl Call {
    pub fn new(scope: ScopeId, op: Getter, args: ArgList) -> Self {
        Call {
            scope,
            op,
            args,
            ty: None,
            gen_table: None,
        }
    }

    pub fn is_validated(&self) -> bool {
        self.ty.is_some()
    }
}

impl Expr {
    pub fn sym(value: &str) -> Expr {
        Expr::Sym(Sym::new(value))
    }

    pub fn int(value: i64) -> Expr {
        Expr::Num(Num::Int(value))
    }

    pub fn float(value: f64) -> Expr {
        Expr::Num(Num::Float(value))
    }

    pub fn str(value: &str) -> Expr {
        Expr::Str(Str {
            value: value.to_string(),
        })
    }

    pub fn list(scope: ScopeId, exprs: Vec<Expr>) -> Expr {
        Expr::List(RawList::new(
            scope,
            exprs.into_iter().map(RawProp::unnamed).collect(),
        ))
    }

    pub fn args(scope: ScopeId, exprs: Vec<Expr>) -> Expr {
        Expr::Args(ArgList::new(scope, exprs))
    }

    pub fn block(scope: ScopeId, body: Vec<Expr>) -> Expr {
        Expr::Block(Block::new(scope, body))
    }

    pub fn as_sym(&self) -> Option<&Sym> {
        match self {
            Expr::Sym(sym) => Some(sym),
            _ => None,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Expr::Block(_))
    }

    /// Short name of the variant, used in desugaring log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Sym(_) => "sym",
            Expr::Num(_) => "num",
            Expr::Str(_) => "str",
            Expr::List(_) => "list",
            Expr::Args(_) => "args",
            Expr::Struct(_) => "struct",
            Expr::Block(_) => "block",
            Expr::Call(_) => "call",
            Expr::Getter(_) => "getter",
        }
    }
}
