//! The three folds run by [`super::hustle`].
//!
//! Each fold builds a candidate [`Call`] and keeps it only if
//! [`Resolver::validate`] accepts it. Candidates are tried in a fixed order,
//! which decides how ambiguous lines are read.

use log::debug;

use crate::ast::{ArgList, Call, Expr, Getter};
use crate::scope::ScopeId;
use crate::types::{GenTable, Resolver, Sym, Type, TypeError};

use super::{Fold, attempt, sweep};

/// Attach a free-standing block to the call-like expression before it.
///
/// For a window `(e1, block)` with `e0` emitted before it, tries:
///
/// 1. `e1(block)`
/// 2. `e0(e1, block)`, or `e0(args.., block)` when `e1` is an argument list
/// 3. `e0.e1(block)` when `e1` is a symbol
/// 4. `e_1.e0(e1, block)` when `e0` is a symbol, `e_1` emitted before it
pub fn last_block_param(
    resolver: &Resolver<'_>,
    scope: ScopeId,
    exprs: Vec<Expr>,
) -> Result<Vec<Expr>, TypeError> {
    sweep(exprs, 2, |out, window| {
        let (e1, block) = (&window[0], &window[1]);
        if !block.is_block() {
            return Ok(None);
        }

        let direct = Call::new(
            scope,
            Getter::primitive(scope, e1.clone()),
            ArgList::new(scope, vec![block.clone()]),
        );
        if let Some(call) = attempt(resolver.validate(direct), "block as direct argument")? {
            return Ok(Some(Fold::new(Expr::Call(call))));
        }

        let Some(e0) = out.last() else {
            return Ok(None);
        };
        let combined = combine(scope, e1, block);

        let prior = Call::new(
            scope,
            Getter::primitive(scope, e0.clone()),
            combined.clone(),
        );
        if let Some(call) = attempt(resolver.validate(prior), "block with prior callable")? {
            return Ok(Some(Fold::absorbing(Expr::Call(call), 1)));
        }

        if let Expr::Sym(member) = e1 {
            let combo = Call::new(
                scope,
                Getter::member(scope, e0.clone(), member.clone()),
                ArgList::new(scope, vec![block.clone()]),
            );
            if let Some(call) = attempt(resolver.validate(combo), "three-piece block combo")? {
                return Ok(Some(Fold::absorbing(Expr::Call(call), 1)));
            }
        }

        if let (Expr::Sym(member), Some(receiver)) = (e0, out.len().checked_sub(2).map(|i| &out[i])) {
            let combo = Call::new(
                scope,
                Getter::member(scope, receiver.clone(), member.clone()),
                combined,
            );
            if let Some(call) = attempt(resolver.validate(combo), "four-piece block combo")? {
                return Ok(Some(Fold::absorbing(Expr::Call(call), 2)));
            }
        }

        debug!("block {block} stays unattached for now");
        Ok(None)
    })
}

/// `sym list` becomes `list.sym()` when `sym` names a zero-argument member.
pub fn unary(
    resolver: &Resolver<'_>,
    scope: ScopeId,
    exprs: Vec<Expr>,
) -> Result<Vec<Expr>, TypeError> {
    sweep(exprs, 2, |_, window| {
        let (e1, e2) = (&window[0], &window[1]);
        let Some(sym) = reduce_to_sym(e1) else {
            return Ok(None);
        };
        let Some(member) = attempt(member_of(resolver, scope, e2, &sym), "unary member")? else {
            return Ok(None);
        };
        if arity(resolver, scope, &member) != Some(0) {
            return Ok(None);
        }

        let call = Call::new(
            scope,
            Getter::member(scope, e2.clone(), sym),
            ArgList::empty(scope),
        );
        Ok(attempt(resolver.validate(call), "unary call")?.map(|call| Fold::new(Expr::Call(call))))
    })
}

/// `a sym b` becomes `a.sym(b)` when `sym` names a single-argument member of
/// `a`, or a method in scope whose receiver accepts `a`.
pub fn binary(
    resolver: &Resolver<'_>,
    scope: ScopeId,
    exprs: Vec<Expr>,
) -> Result<Vec<Expr>, TypeError> {
    sweep(exprs, 3, |_, window| {
        let (e1, e2, e3) = (&window[0], &window[1], &window[2]);
        let Some(sym) = reduce_to_sym(e2) else {
            return Ok(None);
        };
        let Some(member) = attempt(member_of(resolver, scope, e1, &sym), "binary member")? else {
            return Ok(None);
        };
        if arity(resolver, scope, &member) != Some(1) {
            return Ok(None);
        }

        let call = Call::new(
            scope,
            Getter::member(scope, e1.clone(), sym),
            ArgList::new(scope, vec![e3.clone()]),
        );
        Ok(attempt(resolver.validate(call), "binary call")?.map(|call| Fold::new(Expr::Call(call))))
    })
}

/// The symbol an expression stands for: itself, or the symbol a getter
/// chain starts from.
pub fn reduce_to_sym(expr: &Expr) -> Option<Sym> {
    match expr {
        Expr::Sym(sym) => Some(sym.clone()),
        Expr::Getter(getter) => match getter.origin.as_ref() {
            Expr::Sym(sym) if getter.is_primitive() => Some(sym.clone()),
            _ => None,
        },
        _ => None,
    }
}

fn member_of(
    resolver: &Resolver<'_>,
    scope: ScopeId,
    owner: &Expr,
    sym: &Sym,
) -> Result<Type, TypeError> {
    let owner = resolver.infer(scope, owner)?;
    resolver.member(scope, &owner, sym, &mut GenTable::new())
}

fn arity(resolver: &Resolver<'_>, scope: ScopeId, member: &Type) -> Option<usize> {
    match resolver.unwrap_alias(scope, member) {
        Type::Blockdef(blockdef) => Some(blockdef.arity()),
        _ => None,
    }
}

fn combine(scope: ScopeId, e1: &Expr, block: &Expr) -> ArgList {
    match e1 {
        Expr::Args(args) => {
            let mut args = args.clone();
            args.push(block.clone());
            args
        }
        other => ArgList::new(scope, vec![other.clone(), block.clone()]),
    }
}
