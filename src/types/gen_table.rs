//! Per-call generic binding table.
//!
//! A `GenTable` knows which symbols are generic for the call being checked
//! and what each of them has been bound to so far. A generic may be bound
//! once; rebinding it to a type that does not match the existing binding is
//! a [`TypeError::Generics`] error.

use indexmap::{IndexMap, IndexSet};
use log::trace;

use super::error::TypeError;
use super::ty::{Sym, Type};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenTable {
    known: IndexSet<Sym>,
    bindings: IndexMap<Sym, Type>,
}

impl GenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `sym` as a generic symbol of the current call.
    pub fn declare(&mut self, sym: Sym) {
        self.known.insert(sym);
    }

    pub fn knows(&self, sym: &Sym) -> bool {
        self.known.contains(sym)
    }

    pub fn get(&self, sym: &Sym) -> Option<&Type> {
        self.bindings.get(sym)
    }

    pub fn contains(&self, sym: &Sym) -> bool {
        self.bindings.contains_key(sym)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Sym, &Type)> {
        self.bindings.iter()
    }

    /// Bind `sym` to `ty`, comparing with an existing binding by equality.
    pub fn bind(&mut self, sym: Sym, ty: Type) -> Result<(), TypeError> {
        self.bind_with(sym, ty, |a, b| Ok(a == b))
    }

    /// Bind `sym` to `ty`. An existing binding must be accepted by `same`,
    /// otherwise the table reports a conflict and stays unchanged.
    pub fn bind_with<F>(&mut self, sym: Sym, ty: Type, mut same: F) -> Result<(), TypeError>
    where
        F: FnMut(&Type, &Type) -> Result<bool, TypeError>,
    {
        if let Some(bound) = self.bindings.get(&sym) {
            if same(bound, &ty)? {
                return Ok(());
            }
            return Err(TypeError::generics(sym, bound.clone(), ty));
        }

        trace!("binding generic {sym} := {ty}");
        self.known.insert(sym.clone());
        self.bindings.insert(sym, ty);
        Ok(())
    }

    /// Merge every binding of `other` into this table.
    pub fn absorb<F>(&mut self, other: GenTable, mut same: F) -> Result<(), TypeError>
    where
        F: FnMut(&Type, &Type) -> Result<bool, TypeError>,
    {
        for sym in other.known {
            self.known.insert(sym);
        }
        for (sym, ty) in other.bindings {
            self.bind_with(sym, ty, &mut same)?;
        }
        Ok(())
    }
}
