//! # Type Representation
//!
//! Adam types are structural. A type is one of:
//!
//! - `Sym` - a symbol naming a type, possibly parameterized (`List..[Num]`)
//! - `Struct` - a struct list, i.e. an ordered list of typed, optionally named
//!   properties (`[Num a, Str b]`)
//! - `Blockdef` - the type of a block (`{[Num other] Num}`), optionally with
//!   generics and a receiver
//! - `Vararg` - zero or more occurrences of a type (`Num...`)
//! - `Optional` - a type that may be omitted (`Num"`)
//!
//! A symbol is simultaneously a value-level name and a type-level name, so
//! [`Sym`] equality and hashing look only at the spelling of the symbol and
//! ignore its generic arguments.
//!
//! ## Substitution
//!
//! [`Type::replacing`] applies a [`GenTable`] to a type, swapping every bound
//! generic symbol for its binding. Lists and blocks drop their generic
//! declarations in the process.

use std::hash::{Hash, Hasher};

use crate::ast::{GenList, StructList, StructProp};

use super::gen_table::GenTable;

/// A symbol. Equality and hashing use only `value`.
#[derive(Debug, Clone)]
pub struct Sym {
    pub value: String,
    pub gens: Vec<Type>,
}

impl Sym {
    pub fn new(value: impl Into<String>) -> Self {
        Sym {
            value: value.into(),
            gens: vec![],
        }
    }

    pub fn with_gens(value: impl Into<String>, gens: Vec<Type>) -> Self {
        Sym {
            value: value.into(),
            gens,
        }
    }

    /// The placeholder name used for unnamed list properties.
    pub fn empty() -> Self {
        Sym::new("")
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_parameterized(&self) -> bool {
        !self.gens.is_empty()
    }

    /// The same symbol without generic arguments.
    pub fn bare(&self) -> Sym {
        Sym::new(self.value.clone())
    }
}

impl PartialEq for Sym {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Sym {}

impl Hash for Sym {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl From<&str> for Sym {
    fn from(value: &str) -> Self {
        Sym::new(value)
    }
}

/// The type of a block.
///
/// `args: None` and an empty argument list both mean "no parameters".
/// `alias` is a display name only and does not take part in equality.
#[derive(Debug, Clone)]
pub struct Blockdef {
    pub gens: Option<GenList>,
    pub rec: Option<Box<Type>>,
    pub args: Option<StructList>,
    pub ret: Box<Type>,
    pub alias: Option<Sym>,
}

impl PartialEq for Blockdef {
    fn eq(&self, other: &Self) -> bool {
        self.gens == other.gens
            && self.rec == other.rec
            && self.params() == other.params()
            && self.ret == other.ret
    }
}

impl Blockdef {
    pub fn new(args: Option<StructList>, ret: Type) -> Self {
        Blockdef {
            gens: None,
            rec: None,
            args,
            ret: Box::new(ret),
            alias: None,
        }
    }

    pub fn with_gens(mut self, gens: GenList) -> Self {
        self.gens = Some(gens);
        self
    }

    pub fn with_receiver(mut self, rec: Type) -> Self {
        self.rec = Some(Box::new(rec));
        self
    }

    /// Primitive blocks take nothing and declare no generics; they stand for
    /// their return type.
    pub fn is_primitive(&self) -> bool {
        self.gens.is_none() && self.params().is_empty()
    }

    pub fn is_generic(&self) -> bool {
        self.gens.as_ref().is_some_and(|gens| !gens.props.is_empty())
    }

    pub fn params(&self) -> &[StructProp] {
        self.args
            .as_ref()
            .map(|args| args.props.as_slice())
            .unwrap_or(&[])
    }

    pub fn arity(&self) -> usize {
        self.params().len()
    }

    pub fn replacing(&self, table: &GenTable) -> Blockdef {
        Blockdef {
            gens: self.gens.clone(),
            rec: self.rec.as_ref().map(|rec| Box::new(rec.replacing(table))),
            args: self.args.as_ref().map(|args| args.replacing(table)),
            ret: Box::new(self.ret.replacing(table)),
            alias: None,
        }
    }
}

/// Type equality is exact: unlike bare [`Sym`] equality, two symbol types
/// are equal only if their generic arguments are, so `List..[Num]` and
/// `List..[Str]` differ wherever they appear.
#[derive(Debug, Clone)]
pub enum Type {
    Sym(Sym),
    Struct(StructList),
    Blockdef(Blockdef),
    Vararg(Box<Type>),
    Optional(Box<Type>),
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Sym(a), Type::Sym(b)) => a.value == b.value && a.gens == b.gens,
            (Type::Struct(a), Type::Struct(b)) => a == b,
            (Type::Blockdef(a), Type::Blockdef(b)) => a == b,
            (Type::Vararg(a), Type::Vararg(b)) | (Type::Optional(a), Type::Optional(b)) => a == b,
            _ => false,
        }
    }
}

impl Type {
    pub fn sym(value: &str) -> Type {
        Type::Sym(Sym::new(value))
    }

    pub fn vararg(ty: Type) -> Type {
        Type::Vararg(Box::new(ty))
    }

    pub fn optional(ty: Type) -> Type {
        Type::Optional(Box::new(ty))
    }

    pub fn is_vararg(&self) -> bool {
        matches!(self, Type::Vararg(_))
    }

    pub fn as_sym(&self) -> Option<&Sym> {
        match self {
            Type::Sym(sym) => Some(sym),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructList> {
        match self {
            Type::Struct(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_blockdef(&self) -> Option<&Blockdef> {
        match self {
            Type::Blockdef(blockdef) => Some(blockdef),
            _ => None,
        }
    }

    /// Substitute every bound generic symbol with its binding.
    pub fn replacing(&self, table: &GenTable) -> Type {
        match self {
            Type::Sym(sym) if sym.is_parameterized() => Type::Sym(Sym::with_gens(
                sym.value.clone(),
                sym.gens.iter().map(|g| g.replacing(table)).collect(),
            )),
            Type::Sym(sym) => table.get(sym).cloned().unwrap_or_else(|| self.clone()),
            Type::Struct(list) => Type::Struct(list.replacing(table)),
            Type::Blockdef(blockdef) => Type::Blockdef(blockdef.replacing(table)),
            Type::Vararg(inner) => Type::vararg(inner.replacing(table)),
            Type::Optional(inner) => Type::optional(inner.replacing(table)),
        }
    }
}
