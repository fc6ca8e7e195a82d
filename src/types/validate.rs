//! # Call Validation
//!
//! [`Resolver::validate`] checks a [`Call`] against the block it invokes and
//! returns the call with its type filled in:
//!
//! 1. the operator getter must resolve to a block type,
//! 2. the argument count must equal the parameter count,
//! 3. generic blocks and method receivers are reified for this call,
//! 4. every argument must match its parameter, the first mismatch fails.
//!
//! The call's type becomes the (reified) return type. A non-empty generic
//! table is kept on the call so chained calls on its result inherit the
//! bindings.

use log::debug;

use crate::ast::{Call, Expr};
use crate::scope::ScopeId;

use super::error::{TypeError, ValidationError};
use super::gen_table::GenTable;
use super::infer::Resolver;
use super::ty::{Blockdef, Type};

impl Resolver<'_> {
    pub fn validate(&self, mut call: Call) -> Result<Call, TypeError> {
        let mut table = match call.op.origin.as_ref() {
            Expr::Call(parent) if !call.op.is_primitive() => {
                parent.gen_table.clone().unwrap_or_default()
            }
            _ => GenTable::new(),
        };

        let hop = self.infer_getter(&call.op, &mut table)?;
        let Some(blockdef) = self.callable(call.scope, &hop.ty) else {
            return Err(ValidationError::NotCallable { found: hop.ty }.into());
        };

        if blockdef.arity() != call.args.len() {
            return Err(ValidationError::ArityMismatch {
                expected: blockdef.arity(),
                found: call.args.len(),
            }
            .into());
        }

        let needs_reify = blockdef.is_generic() || (blockdef.rec.is_some() && hop.receiver.is_some());
        let blockdef = if needs_reify {
            self.infer_gens(&call, &blockdef, hop.receiver.as_ref(), &mut table)?
        } else {
            blockdef
        };

        for (index, (param, arg)) in blockdef.params().iter().zip(call.args.exprs()).enumerate() {
            let supplied = self.infer(call.args.scope, arg)?;
            if self.doesnt_match(call.scope, &param.ty, &supplied)? {
                return Err(ValidationError::ArgMismatch {
                    index,
                    expected: param.ty.clone(),
                    found: supplied,
                }
                .into());
            }
        }

        debug!("validated {call} : {}", blockdef.ret);
        call.ty = Some(*blockdef.ret);
        call.gen_table = (!table.is_empty()).then_some(table);
        Ok(call)
    }

    /// The block type behind `ty`, looking through aliases.
    fn callable(&self, scope: ScopeId, ty: &Type) -> Option<Blockdef> {
        match self.unwrap_alias(scope, ty) {
            Type::Blockdef(blockdef) => Some(blockdef),
            _ => None,
        }
    }
}
