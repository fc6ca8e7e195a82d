use std::fmt::{self, Display};

use crate::ast::{ArgList, Block, Call, Expr, Getter, Num, RawList, RawProp, Str};

/// Comma-separated rendering of any displayable items.
pub(crate) fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Num::Int(value) => write!(f, "{value}"),
            Num::Float(value) => write!(f, "{value}"),
        }
    }
}

impl Display for Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.value)
    }
}

impl Display for RawProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sym {
            Some(sym) => write!(f, "{sym} {}", self.expr),
            None => write!(f, "{}", self.expr),
        }
    }
}

impl Display for RawList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", join(&self.props))
    }
}

impl Display for ArgList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", join(&self.props))
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        if let Some(args) = self.args.as_ref().filter(|args| !args.is_empty()) {
            write!(f, "[{}] ", join(&args.props))?;
        }
        let body = self
            .body
            .iter()
            .map(|expr| expr.to_string())
            .collect::<Vec<_>>();
        write!(f, "{}}}", body.join("; "))
    }
}

impl Display for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)?;
        for sym in &self.syms {
            write!(f, ".{sym}")?;
        }
        Ok(())
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.args)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Sym(sym) => write!(f, "{sym}"),
            Expr::Num(num) => write!(f, "{num}"),
            Expr::Str(s) => write!(f, "{s}"),
            Expr::List(list) => write!(f, "{list}"),
            Expr::Args(args) => write!(f, "{args}"),
            Expr::Struct(list) => write!(f, "{list}"),
            Expr::Block(block) => write!(f, "{block}"),
            Expr::Call(call) => write!(f, "{call}"),
            Expr::Getter(getter) => write!(f, "{getter}"),
        }
    }
}
