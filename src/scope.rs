//! # Lexical Scope Tree
//!
//! Every block, list literal and argument list opens a lexical scope. Scopes
//! form a tree rooted at the program scope, and each scope owns:
//!
//! - the symbols declared directly in it,
//! - anonymous types introduced while parsing it,
//! - a *type-alias table* mapping a symbol to the type it denotes.
//!
//! The alias table is the single source of truth for "what type does this
//! name denote here": value bindings (`x: Num`), type definitions
//! (`Num = [...]`) and block parameters all land in it.
//!
//! ## Storage
//!
//! Scopes live in an arena owned by [`ScopeTree`] and are addressed by
//! [`ScopeId`]. Children point at their parent by id, which keeps the
//! "walk outwards" lookup a simple loop and avoids shared ownership.
//!
//! ## Lookup
//!
//! - [`ScopeTree::lookup_alias`] walks from a scope outwards and returns the
//!   first hit. Inner definitions shadow outer ones.
//! - [`ScopeTree::resolve_alias`] keeps following `Sym -> Sym` hops until it
//!   reaches something that is not a plain symbol.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use log::trace;

use crate::types::{Sym, Type, TypeError};

/// Index of a scope inside a [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single lexical scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub id: ScopeId,
    pub parent: Option<ScopeId>,
    pub syms: IndexSet<Sym>,
    pub types: Vec<Type>,
    pub type_aliases: IndexMap<Sym, Type>,
    pub children: Vec<ScopeId>,
}

impl Scope {
    fn new(id: ScopeId, parent: Option<ScopeId>) -> Self {
        Scope {
            id,
            parent,
            syms: IndexSet::new(),
            types: vec![],
            type_aliases: IndexMap::new(),
            children: vec![],
        }
    }
}

/// Arena of scopes. The root scope is created with the tree and always has
/// id `#0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope::new(ScopeId(0), None)],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Open a new scope nested in `parent`.
    pub fn child(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(id, Some(parent)));
        self.scopes[parent.index()].children.push(id);
        trace!("opened scope {id} under {parent}");
        id
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id).parent
    }

    pub fn children(&self, id: ScopeId) -> &[ScopeId] {
        &self.get(id).children
    }

    pub fn type_aliases(&self, id: ScopeId) -> &IndexMap<Sym, Type> {
        &self.get(id).type_aliases
    }

    /// Iterate `id` and all of its ancestors, innermost first.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(id), move |current| self.parent(*current))
    }

    pub fn declare_sym(&mut self, scope: ScopeId, sym: Sym) {
        self.scopes[scope.index()].syms.insert(sym);
    }

    pub fn declare_type(&mut self, scope: ScopeId, ty: Type) {
        self.scopes[scope.index()].types.push(ty);
    }

    /// Bind `sym` to `ty` in `scope`. The first definition wins; returns
    /// `false` if `sym` was already bound in this very scope.
    pub fn define_alias(&mut self, scope: ScopeId, sym: Sym, ty: Type) -> bool {
        let aliases = &mut self.scopes[scope.index()].type_aliases;
        if aliases.contains_key(&sym) {
            trace!("alias {sym} already defined in {scope}");
            return false;
        }

        aliases.insert(sym, ty);
        true
    }

    /// Define a named type. Same first-wins rule as [`Self::define_alias`],
    /// but lists and block types remember `sym` as their display name.
    pub fn define_typedef(&mut self, scope: ScopeId, sym: Sym, ty: Type) -> bool {
        let ty = match ty {
            Type::Struct(mut list) if list.alias.is_none() => {
                list.alias = Some(sym.clone());
                Type::Struct(list)
            }
            Type::Blockdef(mut blockdef) if blockdef.alias.is_none() => {
                blockdef.alias = Some(sym.clone());
                Type::Blockdef(blockdef)
            }
            other => other,
        };
        self.declare_type(scope, ty.clone());
        self.define_alias(scope, sym, ty)
    }

    /// Look `sym` up starting in `scope` and walking outwards. Returns the
    /// scope that holds the binding together with the bound type.
    pub fn lookup_alias(&self, scope: ScopeId, sym: &Sym) -> Option<(ScopeId, &Type)> {
        self.ancestors(scope).find_map(|id| {
            self.get(id)
                .type_aliases
                .get(sym)
                .map(|ty| (id, ty))
        })
    }

    /// Follow alias hops until reaching a type that is not a plain symbol.
    ///
    /// - The first hop must succeed, otherwise `sym` is undefined.
    /// - A later symbol without a binding is a de-facto named type and is
    ///   returned as `Type::Sym`.
    /// - A parameterized symbol (`List..[Num]`) ends the walk, since
    ///   collapsing it would drop its generic arguments.
    /// - Revisiting a symbol is a cycle and reported as an inference error.
    pub fn resolve_alias(&self, scope: ScopeId, sym: &Sym) -> Result<Type, TypeError> {
        let (_, first) = self
            .lookup_alias(scope, sym)
            .ok_or_else(|| TypeError::undefined_sym(sym.clone()))?;

        let mut seen = vec![sym.clone()];
        let mut current = first;

        loop {
            let next = match current {
                Type::Sym(next) if !next.is_parameterized() => next,
                other => return Ok(other.clone()),
            };

            if seen.contains(next) {
                return Err(TypeError::inferno(format!(
                    "alias cycle through {}",
                    seen.iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<_>>()
                        .join(" -> ")
                )));
            }

            trace!("alias hop {} -> {next}", seen[seen.len() - 1]);
            seen.push(next.clone());

            match self.lookup_alias(scope, next) {
                Some((_, ty)) => current = ty,
                None => return Ok(Type::Sym(next.clone())),
            }
        }
    }
}
