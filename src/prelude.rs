//! Built-in types.
//!
//! The number, string and `Bool` types are ordinary struct lists whose
//! members are blocks, so `a + b` folds to `a.+(b)` like any user-defined
//! operator.

use crate::ast::{StructList, StructProp};
use crate::config::Context;
use crate::scope::{ScopeId, ScopeTree};
use crate::types::{Blockdef, Sym, Type};

fn method(param: &Sym, name: &str, ret: &Sym) -> Type {
    Type::Blockdef(Blockdef::new(
        Some(StructList::new(vec![StructProp::named(
            Type::Sym(param.clone()),
            name,
        )])),
        Type::Sym(ret.clone()),
    ))
}

fn getter(ret: &Sym) -> Type {
    Type::Blockdef(Blockdef::new(None, Type::Sym(ret.clone())))
}

fn members(members: Vec<(&str, Type)>) -> Type {
    Type::Struct(StructList::new(
        members
            .into_iter()
            .map(|(name, ty)| StructProp::named(ty, name))
            .collect(),
    ))
}

pub fn bool_sym() -> Sym {
    Sym::new("Bool")
}

pub fn num_type(context: &Context) -> Type {
    let (num, boolean) = (&context.num, &bool_sym());
    let mut props = vec![("=", method(num, "value", num))];
    for op in ["+", "-", "*", "/", "%"] {
        props.push((op, method(num, "other", num)));
    }
    for op in ["==", "<", ">", "<=", ">="] {
        props.push((op, method(num, "other", boolean)));
    }
    props.push(("negate", getter(num)));
    members(props)
}

pub fn str_type(context: &Context) -> Type {
    let (s, boolean) = (&context.str, &bool_sym());
    members(vec![
        ("=", method(s, "value", s)),
        ("+", method(s, "other", s)),
        ("==", method(s, "other", boolean)),
        ("length", getter(&context.num)),
    ])
}

pub fn bool_type() -> Type {
    let boolean = &bool_sym();
    members(vec![
        ("=", method(boolean, "value", boolean)),
        ("&&", method(boolean, "other", boolean)),
        ("||", method(boolean, "other", boolean)),
        ("==", method(boolean, "other", boolean)),
        ("not", getter(boolean)),
    ])
}

/// Define the built-in types in `scope`. Existing definitions are kept.
pub fn install(scopes: &mut ScopeTree, scope: ScopeId, context: &Context) {
    scopes.define_typedef(scope, context.num.clone(), num_type(context));
    scopes.define_typedef(scope, context.str.clone(), str_type(context));
    scopes.define_typedef(scope, bool_sym(), bool_type());
}
