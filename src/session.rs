//! One compilation: the scope tree, the configuration and the entry points
//! the parser calls into.
//!
//! ```text
//! Parser --typedef(scope, sym, type)--> Session
//! Parser --Line { scope, exprs }-----> Session::desugar_line --> typed Expr
//! Session::desugar_program -----------> Program { lines, type_aliases }
//! ```

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::ast::{Call, Expr, Line};
use crate::config::{Config, Context};
use crate::desugar::{self, DesugarError};
use crate::prelude;
use crate::scope::{ScopeId, ScopeTree};
use crate::types::{Resolver, Sym, Type, TypeError};

/// The compiler-facing result: one typed expression per line and the root
/// scope's type definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub lines: Vec<Expr>,
    pub type_aliases: IndexMap<Sym, Type>,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    context: Context,
    scopes: ScopeTree,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Config::default())
    }
}

impl Session {
    /// A session with an empty root scope.
    pub fn new(config: Config) -> Self {
        let context = Context::from(&config);
        Session {
            config,
            context,
            scopes: ScopeTree::new(),
        }
    }

    /// A session whose root scope holds the built-in types.
    pub fn with_prelude(config: Config) -> Self {
        let mut session = Session::new(config);
        let root = session.root();
        prelude::install(&mut session.scopes, root, &session.context);
        session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn root(&self) -> ScopeId {
        self.scopes.root()
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub fn scopes_mut(&mut self) -> &mut ScopeTree {
        &mut self.scopes
    }

    /// Open a child scope of `parent`.
    pub fn enter(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.child(parent)
    }

    /// Record a type definition. A second definition of the same symbol in
    /// the same scope is ignored.
    pub fn typedef(&mut self, scope: ScopeId, sym: Sym, ty: Type) -> bool {
        let defined = self.scopes.define_typedef(scope, sym.clone(), ty);
        if !defined {
            warn!("type {sym} is already defined in scope {scope}, keeping the first definition");
        }
        defined
    }

    /// Declare a value `sym` of type `ty` in `scope`.
    pub fn bind(&mut self, scope: ScopeId, sym: Sym, ty: Type) -> bool {
        self.scopes.declare_sym(scope, sym.clone());
        self.scopes.define_alias(scope, sym, ty)
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.scopes, &self.context)
    }

    pub fn infer(&self, scope: ScopeId, expr: &Expr) -> Result<Type, TypeError> {
        self.resolver().infer(scope, expr)
    }

    pub fn validate(&self, call: Call) -> Result<Call, TypeError> {
        self.resolver().validate(call)
    }

    pub fn hustle(&self, scope: ScopeId, exprs: Vec<Expr>) -> Result<Vec<Expr>, TypeError> {
        desugar::hustle(&self.resolver(), scope, exprs)
    }

    pub fn desugar_line(&self, line: Line) -> Result<Expr, DesugarError> {
        desugar::desugar_line(&self.resolver(), line)
    }

    /// Desugar every line, collecting all line errors instead of stopping at
    /// the first one.
    pub fn desugar_program(&self, lines: Vec<Line>) -> Result<Program, Vec<DesugarError>> {
        let resolver = self.resolver();
        let mut exprs = Vec::with_capacity(lines.len());
        let mut errors = vec![];

        for line in lines {
            match desugar::desugar_line(&resolver, line) {
                Ok(expr) => {
                    debug!("line desugared to {expr}");
                    exprs.push(expr);
                }
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        info!("desugared {} line(s)", exprs.len());
        Ok(Program {
            lines: exprs,
            type_aliases: self.scopes.type_aliases(self.root()).clone(),
        })
    }
}
