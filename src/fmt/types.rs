use std::fmt::{self, Display};

use crate::ast::{GenList, GenProp, StructList, StructProp};
use crate::types::{Blockdef, GenTable, Sym, Type};

use super::expr::join;

impl Display for Sym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if self.is_parameterized() {
            write!(f, "..[{}]", join(&self.gens))?;
        }
        Ok(())
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Sym(sym) => write!(f, "{sym}"),
            Type::Struct(list) => write!(f, "{list}"),
            Type::Blockdef(blockdef) => write!(f, "{blockdef}"),
            Type::Vararg(inner) => write!(f, "{inner}..."),
            Type::Optional(inner) => write!(f, "{inner}\""),
        }
    }
}

impl Display for StructProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sym.is_empty() {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "{} {}", self.ty, self.sym)
        }
    }
}

impl Display for StructList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(alias) = &self.alias {
            return write!(f, "{alias}");
        }
        if let Some(gens) = &self.gens {
            write!(f, "{gens}..")?;
        }
        write!(f, "[{}]", join(&self.props))
    }
}

impl Display for GenProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bound {
            Some(bound) => write!(f, "{bound} {}", self.sym),
            None => write!(f, "{}", self.sym),
        }
    }
}

impl Display for GenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", join(&self.props))
    }
}

impl Display for Blockdef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(alias) = &self.alias {
            return write!(f, "{alias}");
        }
        if let Some(gens) = &self.gens {
            write!(f, "{gens}..")?;
        }
        if let Some(rec) = &self.rec {
            write!(f, "{rec}.")?;
        }
        write!(f, "{{")?;
        if !self.params().is_empty() {
            write!(f, "[{}] ", join(self.params()))?;
        }
        write!(f, "{}}}", self.ret)
    }
}

impl Display for GenTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self
            .iter()
            .map(|(sym, ty)| format!("{sym} = {ty}"))
            .collect::<Vec<_>>();
        write!(f, "[{}]", bindings.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num() -> Type {
        Type::sym("Num")
    }

    #[test]
    fn test_struct_list() {
        let list = StructList::new(vec![
            StructProp::named(num(), "a"),
            StructProp::named(Type::sym("Str"), "b"),
        ]);
        assert_eq!(list.to_string(), "[Num a, Str b]");
    }

    #[test]
    fn test_generic_struct_list() {
        let list = StructList::new(vec![StructProp::named(Type::sym("T"), "head")])
            .with_gens(GenList::of(&["T"]));
        assert_eq!(list.to_string(), "[T]..[T head]");
    }

    #[test]
    fn test_alias_wins() {
        let mut list = StructList::new(vec![StructProp::unnamed(num())]);
        list.alias = Some(Sym::new("Wrapper"));
        assert_eq!(Type::Struct(list).to_string(), "Wrapper");
    }

    #[test]
    fn test_blockdef() {
        let plus = Blockdef::new(
            Some(StructList::new(vec![StructProp::named(num(), "other")])),
            num(),
        );
        assert_eq!(plus.to_string(), "{[Num other] Num}");
        assert_eq!(Blockdef::new(None, num()).to_string(), "{Num}");

        let method = Blockdef::new(None, Type::sym("Str"))
            .with_gens(GenList::of(&["T"]))
            .with_receiver(Type::sym("T"));
        assert_eq!(method.to_string(), "[T]..T.{Str}");
    }

    #[test]
    fn test_wrappers_and_parameterized() {
        assert_eq!(Type::vararg(num()).to_string(), "Num...");
        assert_eq!(Type::optional(num()).to_string(), "Num\"");
        assert_eq!(
            Type::Sym(Sym::with_gens("List", vec![num()])).to_string(),
            "List..[Num]"
        );
    }

    #[test]
    fn test_gen_table() {
        let mut table = GenTable::new();
        table.bind(Sym::new("T"), num()).unwrap();
        assert_eq!(table.to_string(), "[T = Num]");
    }
}
