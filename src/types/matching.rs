//! # Structural Matching
//!
//! Two types match when they have the same shape, not when they are the
//! same object:
//!
//! - equal values match,
//! - lists match element-wise; lists of different length are compared in
//!   reduced vararg form when both are positional or either has a vararg,
//!   other named lists never match then,
//! - `Vararg` and `Optional` match when their embedded types do,
//! - block types match on receiver, parameters and return type.
//!
//! When the structural comparison fails, both sides are unwrapped once
//! through alias chains and primitive block types (a block taking nothing
//! stands for what it returns), and compared again.
//!
//! Unwrapping is applied to both sides, so `matches(a, b) == matches(b, a)`.

use log::trace;

use crate::ast::StructList;
use crate::scope::ScopeId;

use super::error::{TypeError, ValidationError};
use super::gen_table::GenTable;
use super::infer::Resolver;
use super::ty::{Blockdef, Type};

/// Lists of different length are compared in reduced form when both are
/// positional or either declares a vararg. Named records without a vararg
/// never match a list of another length.
fn reducible(x: &StructList, y: &StructList) -> bool {
    let has_vararg = |list: &StructList| list.props.iter().any(|prop| prop.ty.is_vararg());
    (x.is_positional() && y.is_positional()) || has_vararg(x) || has_vararg(y)
}

impl Resolver<'_> {
    pub fn matches(&self, scope: ScopeId, a: &Type, b: &Type) -> Result<bool, TypeError> {
        if self.matches_structurally(scope, a, b)? {
            return Ok(true);
        }

        let unwrapped_a = self.unwrap_named(scope, a);
        let unwrapped_b = self.unwrap_named(scope, b);
        if &unwrapped_a == a && &unwrapped_b == b {
            return Ok(false);
        }

        trace!("retrying match {unwrapped_a} ~ {unwrapped_b}");
        self.matches_structurally(scope, &unwrapped_a, &unwrapped_b)
    }

    pub fn doesnt_match(&self, scope: ScopeId, a: &Type, b: &Type) -> Result<bool, TypeError> {
        self.matches(scope, a, b).map(|matched| !matched)
    }

    fn matches_structurally(&self, scope: ScopeId, a: &Type, b: &Type) -> Result<bool, TypeError> {
        match (a, b) {
            (Type::Sym(x), Type::Sym(y)) if x == y => {
                if x.gens.len() != y.gens.len() || !x.is_parameterized() {
                    return Ok(x.gens.is_empty() || y.gens.is_empty());
                }
                self.all_match(scope, &x.gens, &y.gens)
            }
            _ if a == b => Ok(true),
            (Type::Struct(x), Type::Struct(y)) => {
                if x.len() == y.len() {
                    return self.elements_match(scope, &x.types(), &y.types());
                }
                if !reducible(x, y) {
                    return Ok(false);
                }
                let (Some(xs), Some(ys)) = (self.reduce_list(scope, x)?, self.reduce_list(scope, y)?)
                else {
                    return Ok(false);
                };
                Ok(xs.len() == ys.len() && self.elements_match(scope, &xs, &ys)?)
            }
            (Type::Vararg(x), Type::Vararg(y)) | (Type::Optional(x), Type::Optional(y)) => {
                self.matches(scope, x, y)
            }
            (Type::Blockdef(x), Type::Blockdef(y)) => self.blockdefs_match(scope, x, y),
            _ => Ok(false),
        }
    }

    fn all_match(&self, scope: ScopeId, xs: &[Type], ys: &[Type]) -> Result<bool, TypeError> {
        for (x, y) in xs.iter().zip(ys) {
            if !self.matches(scope, x, y)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn blockdefs_match(&self, scope: ScopeId, x: &Blockdef, y: &Blockdef) -> Result<bool, TypeError> {
        let receivers = match (&x.rec, &y.rec) {
            (None, None) => true,
            (Some(x), Some(y)) => self.matches(scope, x, y)?,
            _ => false,
        };
        if !receivers {
            return Ok(false);
        }

        let xs: Vec<Type> = x.params().iter().map(|p| p.ty.clone()).collect();
        let ys: Vec<Type> = y.params().iter().map(|p| p.ty.clone()).collect();
        Ok(self.lists_match(scope, &xs, &ys)? && self.matches(scope, &x.ret, &y.ret)?)
    }

    /// Element-wise comparison of two type lists. Lists of different length
    /// are compared in their reduced vararg form.
    pub fn lists_match(&self, scope: ScopeId, xs: &[Type], ys: &[Type]) -> Result<bool, TypeError> {
        if xs.len() == ys.len() {
            return self.elements_match(scope, xs, ys);
        }

        let xs = self.reduce_to_vararg(scope, xs)?;
        let ys = self.reduce_to_vararg(scope, ys)?;
        if xs.len() != ys.len() {
            return Ok(false);
        }
        self.elements_match(scope, &xs, &ys)
    }

    fn elements_match(&self, scope: ScopeId, xs: &[Type], ys: &[Type]) -> Result<bool, TypeError> {
        for (x, y) in xs.iter().zip(ys) {
            let matched = match (x, y) {
                (Type::Vararg(_), Type::Vararg(_)) => self.matches(scope, x, y)?,
                (Type::Vararg(inner), other) | (other, Type::Vararg(inner)) => {
                    self.matches(scope, inner, other)?
                }
                _ => self.matches(scope, x, y)?,
            };
            if !matched {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Collapse every run of two or more matching adjacent types into one
    /// `Vararg`. A vararg anywhere but the last position is an error.
    pub fn reduce_to_vararg(&self, scope: ScopeId, types: &[Type]) -> Result<Vec<Type>, TypeError> {
        let mut reduced = Vec::with_capacity(types.len());
        let mut start = 0;

        while start < types.len() {
            let head = &types[start];
            let mut end = start + 1;
            while end < types.len() && self.matches(scope, &types[end], head)? {
                end += 1;
            }

            if end - start > 1 {
                reduced.push(Type::vararg(head.clone()));
            } else {
                reduced.push(head.clone());
            }
            start = end;
        }

        if let Some(position) = reduced.iter().position(Type::is_vararg) {
            if position != reduced.len() - 1 {
                return Err(ValidationError::VarargNotLast {
                    position,
                    len: reduced.len(),
                }
                .into());
            }
        }

        Ok(reduced)
    }

    /// The reduced form of a list. A named record whose members do not
    /// reduce cleanly has no reduced form; positional lists report the
    /// malformed reduction.
    fn reduce_list(&self, scope: ScopeId, list: &StructList) -> Result<Option<Vec<Type>>, TypeError> {
        match self.reduce_to_vararg(scope, &list.types()) {
            Ok(reduced) => Ok(Some(reduced)),
            Err(err) if err.is_fatal() && !list.is_positional() => {
                trace!("record {list} has no reduced form: {err}");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Resolve a type through alias chains only.
    pub fn unwrap_alias(&self, scope: ScopeId, ty: &Type) -> Type {
        match ty {
            Type::Sym(sym) if !sym.is_parameterized() => {
                self.scopes.resolve_alias(scope, sym).unwrap_or_else(|_| ty.clone())
            }
            _ => ty.clone(),
        }
    }

    /// Resolve through alias chains, parameterized symbols and primitive
    /// block types until reaching something else.
    fn unwrap_named(&self, scope: ScopeId, ty: &Type) -> Type {
        self.unwrap_with(scope, ty, Blockdef::is_primitive)
    }

    /// The terminal type behind `ty`: aliases are chased and every block
    /// type is replaced by what it returns.
    pub fn bottom_most_type(&self, scope: ScopeId, ty: &Type) -> Type {
        self.unwrap_with(scope, ty, |_| true)
    }

    fn unwrap_with<F>(&self, scope: ScopeId, ty: &Type, unwrap_block: F) -> Type
    where
        F: Fn(&Blockdef) -> bool,
    {
        let mut seen = vec![];
        let mut current = ty.clone();

        loop {
            let next = match &current {
                Type::Sym(sym) if seen.contains(sym) => None,
                Type::Sym(sym) if sym.is_parameterized() => {
                    seen.push(sym.clone());
                    self.expand(scope, sym, &mut GenTable::new())
                        .ok()
                        .map(Type::Struct)
                }
                Type::Sym(sym) => {
                    seen.push(sym.clone());
                    self.scopes
                        .resolve_alias(scope, sym)
                        .ok()
                        .filter(|resolved| resolved != &current)
                }
                Type::Blockdef(blockdef) if unwrap_block(blockdef) => Some((*blockdef.ret).clone()),
                _ => None,
            };

            match next {
                Some(next) => current = next,
                None => return current,
            }
        }
    }
}
