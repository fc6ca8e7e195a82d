//! Resolver configuration.
//!
//! Literals have no declared type of their own. A number literal has the
//! type named by [`Config::num_type`], a string literal the one named by
//! [`Config::str_type`]. Both names are looked up like any other symbol, so
//! the prelude (or user code) decides what they denote.

use crate::types::Sym;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub num_type: String,
    pub str_type: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            num_type: "Num".to_string(),
            str_type: "Str".to_string(),
        }
    }
}

/// The well-known symbols derived from a [`Config`], shared by every
/// resolver of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub num: Sym,
    pub str: Sym,
}

impl From<&Config> for Context {
    fn from(config: &Config) -> Self {
        Context {
            num: Sym::new(config.num_type.clone()),
            str: Sym::new(config.str_type.clone()),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::from(&Config::default())
    }
}
