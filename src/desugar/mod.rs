//! Desugaring - Fold a line of juxtaposed expressions into one call tree
//!
//! The parser hands over each line as a flat sequence of expressions with
//! no operators between them, e.g. `x = 5` arrives as `[x, =, 5]`. This
//! module rewrites such a sequence into a single expression by trying to
//! fold neighbours into calls and keeping a fold only if the resulting call
//! validates:
//!
//! - trailing blocks become the last argument of the call before them
//!   (`if (c) {1}` -> `if(c, {1})`),
//! - `sym list` becomes `list.sym()` for zero-argument members,
//! - `a sym b` becomes `a.sym(b)` for single-argument members.
//!
//! Each pass runs to a fixpoint before the next one starts, and the three
//! passes repeat until the line stops shrinking. Failed candidates are
//! discarded silently; only a malformed vararg type aborts a line.

pub mod error;
pub mod passes;

use log::debug;

use crate::ast::{Expr, Line};
use crate::scope::ScopeId;
use crate::types::{Resolver, TypeError};

pub use error::{DesugarError, DesugarErrorKind};

/// A successful fold: the new expression and how many already emitted
/// expressions it swallowed in addition to its window.
#[derive(Debug, Clone, PartialEq)]
pub struct Fold {
    pub expr: Expr,
    pub absorbed: usize,
}

impl Fold {
    pub fn new(expr: Expr) -> Self {
        Fold { expr, absorbed: 0 }
    }

    pub fn absorbing(expr: Expr, absorbed: usize) -> Self {
        Fold { expr, absorbed }
    }
}

/// Reduce one line to a single expression.
pub fn desugar_line(resolver: &Resolver<'_>, line: Line) -> Result<Expr, DesugarError> {
    let Line {
        scope,
        exprs,
        position,
    } = line;

    if exprs.is_empty() {
        return Err(DesugarError::new(DesugarErrorKind::Empty, position));
    }

    let mut remaining = match hustle(resolver, scope, exprs) {
        Ok(remaining) => remaining,
        Err(err) => return Err(DesugarError::new(err.into(), position)),
    };

    if remaining.len() == 1 {
        if let Some(expr) = remaining.pop() {
            return Ok(expr);
        }
    }

    let kind = match remaining.iter().find(|expr| expr.is_block()) {
        Some(block) => DesugarErrorKind::StandaloneBlock {
            block: block.clone(),
        },
        None => DesugarErrorKind::Unfoldable { remaining },
    };
    Err(DesugarError::new(kind, position))
}

/// Run all passes over `exprs` until the sequence stops shrinking.
pub fn hustle(
    resolver: &Resolver<'_>,
    scope: ScopeId,
    exprs: Vec<Expr>,
) -> Result<Vec<Expr>, TypeError> {
    let mut exprs = exprs;

    loop {
        let before = exprs.len();
        if before <= 1 {
            return Ok(exprs);
        }

        exprs = fixpoint(exprs, |exprs| passes::last_block_param(resolver, scope, exprs))?;
        exprs = fixpoint(exprs, |exprs| passes::unary(resolver, scope, exprs))?;
        exprs = fixpoint(exprs, |exprs| passes::binary(resolver, scope, exprs))?;

        debug!("desugar round: {before} -> {} expression(s)", exprs.len());
        if exprs.len() == before {
            return Ok(exprs);
        }
    }
}

fn fixpoint<F>(mut exprs: Vec<Expr>, mut pass: F) -> Result<Vec<Expr>, TypeError>
where
    F: FnMut(Vec<Expr>) -> Result<Vec<Expr>, TypeError>,
{
    loop {
        let before = exprs.len();
        if before <= 1 {
            return Ok(exprs);
        }
        exprs = pass(exprs)?;
        if exprs.len() == before {
            return Ok(exprs);
        }
    }
}

/// The rewrite skeleton shared by all passes.
///
/// Scans left to right offering `fold` every window of `width` expressions
/// together with what has been emitted so far. On a fold the window is
/// skipped, otherwise its first expression is emitted unchanged.
pub fn sweep<F>(exprs: Vec<Expr>, width: usize, mut fold: F) -> Result<Vec<Expr>, TypeError>
where
    F: FnMut(&[Expr], &[Expr]) -> Result<Option<Fold>, TypeError>,
{
    let mut out: Vec<Expr> = Vec::with_capacity(exprs.len());
    let mut i = 0;

    while i < exprs.len() {
        if i + width <= exprs.len() {
            if let Some(Fold { expr, absorbed }) = fold(&out, &exprs[i..i + width])? {
                debug!(
                    "folded {} expression(s) into {} {expr}",
                    width + absorbed,
                    expr.kind()
                );
                let keep = out.len().saturating_sub(absorbed);
                out.truncate(keep);
                out.push(expr);
                i += width;
                continue;
            }
        }
        out.push(exprs[i].clone());
        i += 1;
    }

    Ok(out)
}

/// Turn a failed speculative step into "does not apply". Fatal errors still
/// propagate.
pub fn attempt<T>(result: Result<T, TypeError>, what: &str) -> Result<Option<T>, TypeError> {
    match result {
        Ok(value) => {
            debug!("{what} accepted");
            Ok(Some(value))
        }
        Err(err) if err.is_fatal() => {
            debug!("{what} aborts the line: {err}");
            Err(err)
        }
        Err(err) => {
            debug!("{what} rejected: {err}");
            Ok(None)
        }
    }
}
