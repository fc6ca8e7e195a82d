//! # Type Resolver
//!
//! [`Resolver::infer`] computes the type of any expression in a given scope.
//! It never mutates the scope tree; the only state it threads around is the
//! [`GenTable`] of the call currently being checked.
//!
//! ## Rules
//!
//! | Expression | Type |
//! |------------|------|
//! | number / string literal | the well-known `Num` / `Str` alias |
//! | `Sym` | its alias, chains collapsed |
//! | list literal | a struct list of the element types |
//! | block | its declared or last-expression type, as a block type when it takes parameters |
//! | call | the type recorded by validation |
//! | getter | the origin type threaded through each member hop |
//!
//! List literals tolerate forward references: an element whose symbol is
//! not defined yet contributes the symbol itself as its type.
//!
//! ## Getter Hops
//!
//! Each hop must land on a struct list. A parameterized symbol such as
//! `List..[Num]` is expanded to its list with the declared generics mapped
//! onto the supplied arguments. A member missing from the list may still be
//! found as a block in scope whose receiver accepts the list.

use log::trace;

use crate::ast::{Block, Expr, Getter, RawProp, StructList, StructProp};
use crate::config::Context;
use crate::scope::{ScopeId, ScopeTree};

use super::error::TypeError;
use super::gen_table::GenTable;
use super::ty::{Blockdef, Sym, Type};

/// The result of walking a getter chain: the final member type and the
/// type it was taken from, if there was at least one hop.
#[derive(Debug, Clone, PartialEq)]
pub struct Hop {
    pub ty: Type,
    pub receiver: Option<Type>,
}

#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    pub scopes: &'a ScopeTree,
    pub context: &'a Context,
}

impl<'a> Resolver<'a> {
    pub fn new(scopes: &'a ScopeTree, context: &'a Context) -> Self {
        Resolver { scopes, context }
    }

    pub fn infer(&self, scope: ScopeId, expr: &Expr) -> Result<Type, TypeError> {
        match expr {
            Expr::Num(_) => self.infer_literal(scope, &self.context.num),
            Expr::Str(_) => self.infer_literal(scope, &self.context.str),
            Expr::Sym(sym) => self.scopes.resolve_alias(scope, sym),
            Expr::List(list) => self.infer_props(list.scope, &list.props).map(Type::Struct),
            Expr::Args(args) => self.infer_props(args.scope, &args.props).map(Type::Struct),
            Expr::Struct(list) => Ok(Type::Struct(list.clone())),
            Expr::Block(block) => self.infer_block(block),
            Expr::Call(call) => call.ty.clone().ok_or_else(|| {
                TypeError::inferno(format!("call {call} has not been validated"))
            }),
            Expr::Getter(getter) => {
                let mut table = GenTable::new();
                self.infer_getter(getter, &mut table).map(|hop| hop.ty)
            }
        }
    }

    fn infer_literal(&self, scope: ScopeId, sym: &Sym) -> Result<Type, TypeError> {
        match self.scopes.resolve_alias(scope, sym) {
            Err(TypeError::UndefinedSym { .. }) => Ok(Type::Sym(sym.clone())),
            other => other,
        }
    }

    /// Like [`Self::infer`], but an undefined symbol yields itself as its
    /// type instead of failing.
    fn infer_element(&self, scope: ScopeId, expr: &Expr) -> Result<Type, TypeError> {
        match self.infer(scope, expr) {
            Err(TypeError::UndefinedSym { sym }) if expr.as_sym() == Some(&sym) => {
                trace!("element {sym} is not defined yet, keeping it as its own type");
                Ok(Type::Sym(sym))
            }
            other => other,
        }
    }

    fn infer_props(&self, scope: ScopeId, props: &[RawProp]) -> Result<StructList, TypeError> {
        let types = props
            .iter()
            .map(|prop| self.infer_element(scope, &prop.expr))
            .collect::<Result<Vec<_>, _>>()?;

        if props.iter().all(|prop| prop.sym.is_none()) {
            match self.reduce_to_vararg(scope, &types) {
                Ok(reduced) => {
                    return Ok(StructList::new(
                        reduced.into_iter().map(StructProp::unnamed).collect(),
                    ));
                }
                Err(err) if err.is_fatal() => {
                    trace!("list keeps its element types: {err}");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(StructList::new(
            props
                .iter()
                .zip(types)
                .map(|(prop, ty)| StructProp {
                    ty,
                    sym: prop.sym.clone().unwrap_or_else(Sym::empty),
                    expr: Some(prop.expr.clone()),
                })
                .collect(),
        ))
    }

    fn infer_block(&self, block: &Block) -> Result<Type, TypeError> {
        let ret = match (&block.ret, block.body.last()) {
            (Some(ret), _) => ret.clone(),
            (None, Some(last)) => self.infer(block.scope, last)?,
            (None, None) => {
                return Err(TypeError::inferno("Empty blocks don't have return types"));
            }
        };

        if block.has_params() {
            return Ok(Type::Blockdef(Blockdef::new(block.args.clone(), ret)));
        }
        Ok(ret)
    }

    /// Thread the origin's type through every member of the chain. Generic
    /// bindings discovered on the way are recorded in `table`.
    pub fn infer_getter(
        &self,
        getter: &Getter,
        table: &mut GenTable,
    ) -> Result<Hop, TypeError> {
        let mut ty = self.infer(getter.scope, &getter.origin)?;
        let mut receiver = None;

        for sym in &getter.syms {
            let member = self.member(getter.scope, &ty, sym, table)?;
            trace!("getter hop {ty} .{sym} -> {member}");
            receiver = Some(ty);
            ty = member;
        }

        Ok(Hop { ty, receiver })
    }

    /// The type of member `sym` on `owner`.
    pub fn member(
        &self,
        scope: ScopeId,
        owner: &Type,
        sym: &Sym,
        table: &mut GenTable,
    ) -> Result<Type, TypeError> {
        let list = self.as_list(scope, owner, table)?;
        if let Some(prop) = list.get(sym) {
            return Ok(prop.ty.replacing(table));
        }

        if let Some(method) = self.receiver_method(scope, owner, sym)? {
            return Ok(Type::Blockdef(method));
        }

        Err(TypeError::inferno(format!("unable to find {sym} in {list}")))
    }

    /// A block bound to `sym` in scope whose declared receiver accepts
    /// `owner`. Receivers of generic blocks are accepted here and checked
    /// when the call is reified.
    pub fn receiver_method(
        &self,
        scope: ScopeId,
        owner: &Type,
        sym: &Sym,
    ) -> Result<Option<Blockdef>, TypeError> {
        let method = match self.scopes.resolve_alias(scope, sym) {
            Ok(Type::Blockdef(method)) => method,
            _ => return Ok(None),
        };
        let Some(rec) = &method.rec else {
            return Ok(None);
        };

        if method.is_generic() || self.matches(scope, rec, owner)? {
            return Ok(Some(method));
        }
        Ok(None)
    }

    /// View `ty` as a struct list, expanding aliases and parameterized
    /// symbols. Anything else cannot be hopped off.
    pub fn as_list(
        &self,
        scope: ScopeId,
        ty: &Type,
        table: &mut GenTable,
    ) -> Result<StructList, TypeError> {
        match ty {
            Type::Struct(list) => Ok(list.clone()),
            Type::Sym(sym) if sym.is_parameterized() => self.expand(scope, sym, table),
            Type::Sym(sym) => {
                let resolved = self.scopes.resolve_alias(scope, sym)?;
                if resolved == *ty {
                    return Err(TypeError::inferno(format!(
                        "{sym} is not a list and has no members"
                    )));
                }
                self.as_list(scope, &resolved, table)
            }
            other => Err(TypeError::inferno(format!(
                "cannot access members of {other}, it is not a list"
            ))),
        }
    }

    /// Expand a parameterized symbol into its list, binding the list's
    /// declared generics to the symbol's arguments in `table`.
    pub fn expand(
        &self,
        scope: ScopeId,
        sym: &Sym,
        table: &mut GenTable,
    ) -> Result<StructList, TypeError> {
        let base = match self.scopes.resolve_alias(scope, &sym.bare())? {
            Type::Struct(list) => list,
            other => {
                return Err(TypeError::inferno(format!(
                    "{sym} is parameterized but {} is {other}",
                    sym.value
                )));
            }
        };

        let merged = base.merged_gen_table(sym, table)?;
        table.absorb(merged, |a, b| self.matches(scope, a, b))?;
        Ok(base.replacing(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{GenList, RawList};

    fn num_list() -> Type {
        Type::Struct(StructList::new(vec![
            StructProp::named(Type::sym("Num"), "a"),
            StructProp::named(Type::sym("Num"), "b"),
        ]))
    }

    #[test]
    fn test_literals_without_prelude() {
        let tree = ScopeTree::new();
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        assert_eq!(resolver.infer(tree.root(), &Expr::int(1)).unwrap(), Type::sym("Num"));
        assert_eq!(resolver.infer(tree.root(), &Expr::str("s")).unwrap(), Type::sym("Str"));
    }

    #[test]
    fn test_literal_uses_alias() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        tree.define_typedef(root, Sym::new("Num"), num_list());
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let ty = resolver.infer(root, &Expr::float(1.5)).unwrap();
        assert_eq!(ty.as_struct().unwrap().alias, Some(Sym::new("Num")));
    }

    #[test]
    fn test_undefined_sym() {
        let tree = ScopeTree::new();
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let err = resolver.infer(tree.root(), &Expr::sym("ghost")).unwrap_err();
        assert_eq!(err, TypeError::undefined_sym(Sym::new("ghost")));
    }

    #[test]
    fn test_list_keeps_unresolved_sym() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        tree.define_alias(root, Sym::new("x"), Type::sym("Num"));
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let list = Expr::list(root, vec![Expr::sym("x"), Expr::sym("later")]);
        let ty = resolver.infer(root, &list).unwrap();
        assert_eq!(
            ty.as_struct().unwrap().types(),
            vec![Type::sym("Num"), Type::sym("later")]
        );
    }

    #[test]
    fn test_unnamed_list_reduces_runs() {
        let tree = ScopeTree::new();
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let list = Expr::list(tree.root(), vec![Expr::int(1), Expr::int(2), Expr::int(3)]);
        let ty = resolver.infer(tree.root(), &list).unwrap();
        assert_eq!(
            ty.as_struct().unwrap().types(),
            vec![Type::vararg(Type::sym("Num"))]
        );
    }

    #[test]
    fn test_unnamed_list_with_bad_run_keeps_elements() {
        let tree = ScopeTree::new();
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let list = Expr::list(
            tree.root(),
            vec![Expr::int(1), Expr::int(2), Expr::str("s")],
        );
        let ty = resolver.infer(tree.root(), &list).unwrap();
        assert_eq!(ty.as_struct().unwrap().len(), 3);
    }

    #[test]
    fn test_named_list_keeps_names() {
        let tree = ScopeTree::new();
        let root = tree.root();
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let list = Expr::List(RawList::new(
            root,
            vec![RawProp::named("a", Expr::int(1)), RawProp::named("b", Expr::int(2))],
        ));
        let ty = resolver.infer(root, &list).unwrap();
        let list = ty.as_struct().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(&Sym::new("b")).unwrap().ty, Type::sym("Num"));
    }

    #[test]
    fn test_empty_block_is_inferno() {
        let tree = ScopeTree::new();
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let err = resolver.infer(tree.root(), &Expr::block(tree.root(), vec![])).unwrap_err();
        assert!(err.is_inferno());
    }

    #[test]
    fn test_block_returns_last_expression() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let inner = tree.child(root);
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let block = Expr::block(inner, vec![Expr::str("a"), Expr::int(1)]);
        assert_eq!(resolver.infer(root, &block).unwrap(), Type::sym("Num"));
    }

    #[test]
    fn test_block_with_params_is_blockdef() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let inner = tree.child(root);
        tree.define_alias(inner, Sym::new("n"), Type::sym("Num"));
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let mut block = Block::new(inner, vec![Expr::sym("n")]);
        block.args = Some(StructList::new(vec![StructProp::named(Type::sym("Num"), "n")]));

        let ty = resolver.infer(root, &Expr::Block(block)).unwrap();
        let blockdef = ty.as_blockdef().unwrap();
        assert_eq!(blockdef.arity(), 1);
        assert_eq!(*blockdef.ret, Type::sym("Num"));
    }

    #[test]
    fn test_getter_hops_through_list() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        tree.define_alias(root, Sym::new("p"), num_list());
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let getter = Getter::member(root, Expr::sym("p"), Sym::new("b"));
        assert_eq!(
            resolver.infer(root, &Expr::Getter(getter)).unwrap(),
            Type::sym("Num")
        );
    }

    #[test]
    fn test_getter_off_non_list() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        tree.define_alias(root, Sym::new("n"), Type::sym("Num"));
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let getter = Getter::member(root, Expr::sym("n"), Sym::new("a"));
        let err = resolver.infer(root, &Expr::Getter(getter)).unwrap_err();
        assert!(err.is_inferno());
    }

    #[test]
    fn test_getter_missing_member() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        tree.define_alias(root, Sym::new("p"), num_list());
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let getter = Getter::member(root, Expr::sym("p"), Sym::new("c"));
        assert!(resolver.infer(root, &Expr::Getter(getter)).unwrap_err().is_inferno());
    }

    #[test]
    fn test_parameterized_sym_expands() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        let boxed = StructList::new(vec![StructProp::named(Type::sym("T"), "value")])
            .with_gens(GenList::of(&["T"]));
        tree.define_typedef(root, Sym::new("Box"), Type::Struct(boxed));
        tree.define_alias(
            root,
            Sym::new("b"),
            Type::Sym(Sym::with_gens("Box", vec![Type::sym("Str")])),
        );
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let getter = Getter::member(root, Expr::sym("b"), Sym::new("value"));
        let mut table = GenTable::new();
        let hop = resolver.infer_getter(&getter, &mut table).unwrap();
        assert_eq!(hop.ty, Type::sym("Str"));
        assert_eq!(table.get(&Sym::new("T")), Some(&Type::sym("Str")));
    }

    #[test]
    fn test_receiver_method_fallback() {
        let mut tree = ScopeTree::new();
        let root = tree.root();
        tree.define_alias(root, Sym::new("p"), num_list());
        let sum = Blockdef::new(None, Type::sym("Num")).with_receiver(num_list());
        tree.define_alias(root, Sym::new("sum"), Type::Blockdef(sum.clone()));
        let context = Context::default();
        let resolver = Resolver::new(&tree, &context);

        let getter = Getter::member(root, Expr::sym("p"), Sym::new("sum"));
        let hop = resolver.infer_getter(&getter, &mut GenTable::new()).unwrap();
        assert_eq!(hop.ty, Type::Blockdef(sum));
        assert_eq!(hop.receiver, Some(num_list()));
    }
}
