//! # Generic Reification
//!
//! A generic block (`[T]..{[T item] List..[T]}`) is made concrete per call.
//! Each declared parameter type is walked alongside the type actually
//! supplied for it; generic symbols met on the way are bound in the call's
//! [`GenTable`], or checked against an earlier binding.
//!
//! ```text
//! declared:  {[T item] List..[T]}      supplied: (Num)
//!            T  <- Num
//! reified:   {[Num item] List..[Num]}
//! ```
//!
//! A generic with an upper bound (`[Num N]`) only accepts types matching
//! that bound.

use log::debug;

use crate::ast::{Call, GenList, StructList, StructProp};
use crate::scope::ScopeId;

use super::error::{TypeError, ValidationError};
use super::gen_table::GenTable;
use super::infer::Resolver;
use super::ty::{Blockdef, Sym, Type};

impl Resolver<'_> {
    /// Reify `blockdef` for `call`. `receiver` is the type the block was
    /// taken from, if it was reached through a getter.
    pub fn infer_gens(
        &self,
        call: &Call,
        blockdef: &Blockdef,
        receiver: Option<&Type>,
        table: &mut GenTable,
    ) -> Result<Blockdef, TypeError> {
        let scope = call.scope;
        let gens = blockdef.gens.as_ref();
        if let Some(gens) = gens {
            for prop in &gens.props {
                table.declare(prop.sym.clone());
            }
        }

        let rec = match (&blockdef.rec, receiver) {
            (Some(rec), Some(owner)) => {
                let reified = self.reify_gen_type(scope, table, gens, rec, owner)?;
                if self.doesnt_match(scope, &reified, owner)? {
                    return Err(ValidationError::ReceiverMismatch {
                        expected: reified,
                        found: owner.clone(),
                    }
                    .into());
                }
                Some(Box::new(reified))
            }
            (rec, _) => rec.as_ref().map(|rec| Box::new(rec.replacing(table))),
        };

        let mut params = Vec::with_capacity(blockdef.arity());
        for (index, (param, arg)) in blockdef.params().iter().zip(call.args.exprs()).enumerate() {
            let supplied = self.infer(call.args.scope, arg)?;
            let expected = if self.matches(scope, &param.ty, &supplied)? {
                param.ty.replacing(table)
            } else {
                let reified = self.reify_gen_type(scope, table, gens, &param.ty, &supplied)?;
                if self.doesnt_match(scope, &reified, &supplied)? {
                    return Err(ValidationError::ArgMismatch {
                        index,
                        expected: reified,
                        found: supplied,
                    }
                    .into());
                }
                reified
            };
            params.push(StructProp {
                ty: expected,
                sym: param.sym.clone(),
                expr: param.expr.clone(),
            });
        }

        let reified = Blockdef {
            gens: None,
            rec,
            args: Some(StructList::new(params)),
            ret: Box::new(blockdef.ret.replacing(table)),
            alias: None,
        };
        debug!("reified {blockdef} to {reified}");
        Ok(reified)
    }

    /// Walk `checked` alongside `control`, binding or checking every generic
    /// symbol of `table` met on the way. Returns `checked` with all bound
    /// generics substituted.
    pub fn reify_gen_type(
        &self,
        scope: ScopeId,
        table: &mut GenTable,
        gens: Option<&GenList>,
        checked: &Type,
        control: &Type,
    ) -> Result<Type, TypeError> {
        match checked {
            Type::Sym(sym) if !sym.is_parameterized() && table.knows(sym) => {
                self.reify_generic(scope, table, gens, sym, control)
            }
            Type::Sym(sym) if sym.is_parameterized() => {
                self.reify_parameterized(scope, table, gens, sym, control)
            }
            Type::Sym(_) => Ok(checked.clone()),
            Type::Struct(list) => {
                let paired = match control {
                    Type::Struct(other) if other.len() == list.len() => Some(other),
                    _ => None,
                };
                let mut props = Vec::with_capacity(list.len());
                for (i, prop) in list.props.iter().enumerate() {
                    let ty = match paired {
                        Some(other) => {
                            self.reify_gen_type(scope, table, gens, &prop.ty, &other.props[i].ty)?
                        }
                        None => prop.ty.replacing(table),
                    };
                    props.push(StructProp {
                        ty,
                        sym: prop.sym.clone(),
                        expr: prop.expr.clone(),
                    });
                }
                Ok(Type::Struct(StructList::new(props)))
            }
            Type::Vararg(inner) => {
                let control = match control {
                    Type::Vararg(other) => other.as_ref(),
                    other => other,
                };
                Ok(Type::vararg(self.reify_gen_type(scope, table, gens, inner, control)?))
            }
            Type::Optional(inner) => {
                let control = match control {
                    Type::Optional(other) => other.as_ref(),
                    other => other,
                };
                Ok(Type::optional(self.reify_gen_type(scope, table, gens, inner, control)?))
            }
            Type::Blockdef(blockdef) => self.reify_blockdef(scope, table, gens, blockdef, control),
        }
    }

    fn reify_generic(
        &self,
        scope: ScopeId,
        table: &mut GenTable,
        gens: Option<&GenList>,
        sym: &Sym,
        control: &Type,
    ) -> Result<Type, TypeError> {
        if let Some(bound) = table.get(sym) {
            if self.doesnt_match(scope, bound, control)? {
                return Err(TypeError::generics(sym.clone(), bound.clone(), control.clone()));
            }
            return Ok(bound.clone());
        }

        if let Some(upper) = gens.and_then(|gens| gens.bound_of(sym)) {
            if self.doesnt_match(scope, upper, control)? {
                return Err(TypeError::generics(sym.clone(), upper.clone(), control.clone()));
            }
        }

        table.bind_with(sym.clone(), control.clone(), |a, b| self.matches(scope, a, b))?;
        Ok(control.clone())
    }

    fn reify_parameterized(
        &self,
        scope: ScopeId,
        table: &mut GenTable,
        gens: Option<&GenList>,
        sym: &Sym,
        control: &Type,
    ) -> Result<Type, TypeError> {
        match control {
            Type::Sym(other) if other == sym && other.gens.len() == sym.gens.len() => {
                let mut args = Vec::with_capacity(sym.gens.len());
                for (arg, other) in sym.gens.iter().zip(&other.gens) {
                    args.push(self.reify_gen_type(scope, table, gens, arg, other)?);
                }
                Ok(Type::Sym(Sym::with_gens(sym.value.clone(), args)))
            }
            _ => {
                // bind through the expanded list, then substitute the arguments
                let mut scratch = GenTable::new();
                let expanded = self.expand(scope, sym, &mut scratch)?;
                self.reify_gen_type(scope, table, gens, &Type::Struct(expanded), control)?;
                Ok(Type::Sym(sym.clone()).replacing(table))
            }
        }
    }

    fn reify_blockdef(
        &self,
        scope: ScopeId,
        table: &mut GenTable,
        gens: Option<&GenList>,
        blockdef: &Blockdef,
        control: &Type,
    ) -> Result<Type, TypeError> {
        match self.unwrap_alias(scope, control) {
            Type::Blockdef(other) => {
                let rec = match (&blockdef.rec, &other.rec) {
                    (Some(rec), Some(other)) => {
                        Some(Box::new(self.reify_gen_type(scope, table, gens, rec, other)?))
                    }
                    (rec, _) => rec.as_ref().map(|rec| Box::new(rec.replacing(table))),
                };
                let args = match &blockdef.args {
                    Some(args) => {
                        let control = Type::Struct(StructList::new(other.params().to_vec()));
                        match self.reify_gen_type(scope, table, gens, &Type::Struct(args.clone()), &control)? {
                            Type::Struct(list) => Some(list),
                            _ => None,
                        }
                    }
                    None => None,
                };
                let ret = self.reify_gen_type(scope, table, gens, &blockdef.ret, &other.ret)?;
                Ok(Type::Blockdef(Blockdef {
                    gens: None,
                    rec,
                    args,
                    ret: Box::new(ret),
                    alias: None,
                }))
            }
            _ if blockdef.is_primitive() => {
                let terminal = self.bottom_most_type(scope, control);
                let ret = self.reify_gen_type(scope, table, gens, &blockdef.ret, &terminal)?;
                Ok(Type::Blockdef(Blockdef::new(None, ret)))
            }
            _ => Ok(Type::Blockdef(blockdef.replacing(table))),
        }
    }
}
