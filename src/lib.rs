//! # Adam - Structural Types and Type-Directed Desugaring
//!
//! This crate is the semantic core of the Adam front end. The parser hands
//! it every source line as a flat sequence of expressions, with no operators
//! between them, and receives back a single fully typed call tree.
//!
//! ## Architecture Overview
//!
//! 1. **Scope tree** (`scope`) - nested namespaces mapping symbols to the
//!    types they denote
//! 2. **Type and expression model** (`ast`, `types::ty`) - closed sum types
//!    for expressions and structural types
//! 3. **Generic tables** (`types::gen_table`) - per-call bindings of generic
//!    symbols
//! 4. **Type resolver** (`types::infer`, `types::matching`, `types::reify`) -
//!    computes and compares types
//! 5. **Desugaring engine** (`desugar`) - folds a line into calls, keeping
//!    only folds that validate (`types::validate`)
//!
//! ## Pipeline Flow
//!
//! ```text
//! Parser
//!     ↓  typedefs (scope, sym, type)         lines (scope, [expr, expr, ...])
//! [Scope tree] ←──────────── lookups ────────── [Desugaring engine]
//!                                                  ↓  candidate calls
//!                                               [Call validation]
//!                                                  ↓
//!                                               one typed Expr per line
//!     ↓
//! Compiler (receives lines + root type aliases)
//! ```
//!
//! ## Key Design Decisions
//!
//! ### Everything is a member call
//! Adam has no operator grammar. `x = 5` arrives as `[x, =, 5]` and becomes
//! `x.=(5)` because `Num` has a one-argument member named `=`. The same
//! mechanism handles user-defined operators, unary members (`not flag`)
//! and trailing block arguments (`if (c) {1} else {2}`).
//!
//! ### Speculation through `Result`
//! Every candidate fold is built and validated; a failure only means "this
//! reading does not apply". Type errors are plain values, so discarding a
//! candidate is an ordinary match arm. A malformed vararg type is the one
//! error that aborts a line.
//!
//! ### Structural types
//! Two types match if they have the same shape. Aliases and blocks taking
//! nothing are looked through, so a `Num` alias or a `{Num}` thunk can stand
//! in for a `Num`.
//!
//! ### Scopes in an arena
//! Scopes are stored in a [`scope::ScopeTree`] and referred to by
//! [`scope::ScopeId`]. Expressions keep the id of the scope they were parsed
//! in.
//!
//! ## Module Organization
//!
//! - [`ast`] - expressions, lists and source lines
//! - [`scope`] - the scope tree and alias resolution
//! - [`types`] - types, errors, matching, reification and validation
//! - [`desugar`] - the line folding engine
//! - [`fmt`] - Adam notation for types and expressions
//! - [`prelude`] - the built-in `Num`, `Str` and `Bool` types
//! - [`config`] - names of the literal types
//! - [`session`] - one compilation, tying the above together
//!
//! ## Example
//!
//! ```
//! use adam::ast::{Expr, Line};
//! use adam::config::Config;
//! use adam::session::Session;
//! use adam::types::{Sym, Type};
//!
//! let mut session = Session::with_prelude(Config::default());
//! let root = session.root();
//! session.bind(root, Sym::new("x"), Type::sym("Num"));
//!
//! let line = Line::new(root, vec![Expr::sym("x"), Expr::sym("="), Expr::int(5)]);
//! let expr = session.desugar_line(line).unwrap();
//! assert_eq!(expr.to_string(), "x.=(5)");
//! ```

pub mod ast;
pub mod config;
pub mod desugar;
pub mod fmt;
pub mod prelude;
pub mod scope;
pub mod session;
pub mod types;
