pub mod error;
pub mod gen_table;
pub mod infer;
pub mod matching;
pub mod reify;
pub mod ty;
pub mod validate;

pub use error::{TypeError, ValidationError};
pub use gen_table::GenTable;
pub use infer::{Hop, Resolver};
pub use ty::{Blockdef, Sym, Type};
