use crate::scope::ScopeId;
use crate::types::{GenTable, Sym, Type, TypeError};

use super::expression::Expr;

/// A property of a struct list: a type, a name (possibly empty) and an
/// optional default value.
#[derive(Debug, Clone, PartialEq)]
pub struct StructProp {
    pub ty: Type,
    pub sym: Sym,
    pub expr: Option<Expr>,
}

impl StructProp {
    pub fn new(ty: Type, sym: Sym) -> Self {
        StructProp {
            ty,
            sym,
            expr: None,
        }
    }

    pub fn named(ty: Type, name: &str) -> Self {
        Self::new(ty, Sym::new(name))
    }

    pub fn unnamed(ty: Type) -> Self {
        Self::new(ty, Sym::empty())
    }
}

/// An ordered list of typed properties, used both as a type (`[Num a]`) and
/// as the parameter list of a block.
///
/// `alias` only affects display and is ignored by equality.
#[derive(Debug, Clone)]
pub struct StructList {
    pub gens: Option<GenList>,
    pub props: Vec<StructProp>,
    pub alias: Option<Sym>,
}

impl PartialEq for StructList {
    fn eq(&self, other: &Self) -> bool {
        self.gens == other.gens && self.props == other.props
    }
}

impl StructList {
    pub fn new(props: Vec<StructProp>) -> Self {
        StructList {
            gens: None,
            props,
            alias: None,
        }
    }

    pub fn with_gens(mut self, gens: GenList) -> Self {
        self.gens = Some(gens);
        self
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// No property carries a name.
    pub fn is_positional(&self) -> bool {
        self.props.iter().all(|prop| prop.sym.is_empty())
    }

    pub fn get(&self, sym: &Sym) -> Option<&StructProp> {
        if sym.is_empty() {
            return None;
        }
        self.props.iter().find(|prop| &prop.sym == sym)
    }

    pub fn types(&self) -> Vec<Type> {
        self.props.iter().map(|prop| prop.ty.clone()).collect()
    }

    pub fn replacing(&self, table: &GenTable) -> StructList {
        StructList {
            gens: None,
            props: self
                .props
                .iter()
                .map(|prop| StructProp {
                    ty: prop.ty.replacing(table),
                    sym: prop.sym.clone(),
                    expr: prop.expr.clone(),
                })
                .collect(),
            alias: self.gens.is_none().then(|| self.alias.clone()).flatten(),
        }
    }

    /// Map this list's declared generics onto the arguments of the
    /// parameterized symbol `sym` naming it. Arguments that are themselves
    /// bound in `inferred` are replaced by their binding first.
    pub fn merged_gen_table(&self, sym: &Sym, inferred: &GenTable) -> Result<GenTable, TypeError> {
        let declared = self.gens.as_ref().map(|g| g.props.as_slice()).unwrap_or(&[]);
        if declared.len() != sym.gens.len() {
            return Err(TypeError::inferno(format!(
                "{sym} supplies {} generic(s) but {} declares {}",
                sym.gens.len(),
                sym.value,
                declared.len()
            )));
        }

        let mut table = GenTable::new();
        for (prop, arg) in declared.iter().zip(&sym.gens) {
            table.declare(prop.sym.clone());
            table.bind(prop.sym.clone(), arg.replacing(inferred))?;
        }
        Ok(table)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenProp {
    pub bound: Option<Type>,
    pub sym: Sym,
}

/// Generic parameter declarations, `[T, Num N]`. The optional type in front
/// of a symbol is its upper bound.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenList {
    pub props: Vec<GenProp>,
}

impl GenList {
    pub fn new(props: Vec<GenProp>) -> Self {
        GenList { props }
    }

    /// Unbounded generics with the given names.
    pub fn of(names: &[&str]) -> Self {
        GenList::new(
            names
                .iter()
                .map(|name| GenProp {
                    bound: None,
                    sym: Sym::new(*name),
                })
                .collect(),
        )
    }

    pub fn contains(&self, sym: &Sym) -> bool {
        self.props.iter().any(|prop| &prop.sym == sym)
    }

    pub fn bound_of(&self, sym: &Sym) -> Option<&Type> {
        self.props
            .iter()
            .find(|prop| &prop.sym == sym)
            .and_then(|prop| prop.bound.as_ref())
    }

    /// View the generics as a struct list: each generic becomes a property
    /// typed by its bound. Every entry needs a bound.
    pub fn as_struct_list(&self) -> Result<StructList, TypeError> {
        self.props
            .iter()
            .map(|prop| match &prop.bound {
                Some(bound) => Ok(StructProp::new(bound.clone(), prop.sym.clone())),
                None => Err(TypeError::inferno(format!(
                    "generic {} has no bound and cannot be a property",
                    prop.sym
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(StructList::new)
    }
}

/// One element of a list literal or argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct RawProp {
    pub sym: Option<Sym>,
    pub expr: Expr,
}

impl RawProp {
    pub fn unnamed(expr: Expr) -> Self {
        RawProp { sym: None, expr }
    }

    pub fn named(name: &str, expr: Expr) -> Self {
        RawProp {
            sym: Some(Sym::new(name)),
            expr,
        }
    }
}

/// A list literal as written in source, `[a 1, b 2]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawList {
    pub scope: ScopeId,
    pub props: Vec<RawProp>,
}

impl RawList {
    pub fn new(scope: ScopeId, props: Vec<RawProp>) -> Self {
        RawList { scope, props }
    }
}

/// The arguments of a call, `(a, b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgList {
    pub scope: ScopeId,
    pub props: Vec<RawProp>,
}

impl ArgList {
    pub fn new(scope: ScopeId, exprs: Vec<Expr>) -> Self {
        ArgList {
            scope,
            props: exprs.into_iter().map(RawProp::unnamed).collect(),
        }
    }

    pub fn empty(scope: ScopeId) -> Self {
        Self::new(scope, vec![])
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn push(&mut self, expr: Expr) {
        self.props.push(RawProp::unnamed(expr));
    }

    pub fn exprs(&self) -> impl Iterator<Item = &Expr> {
        self.props.iter().map(|prop| &prop.expr)
    }
}
