//! # Type Error Definitions
//!
//! Errors raised while resolving, matching and validating Adam types.
//!
//! - `UndefinedSym` - a symbol has no alias binding in any enclosing scope
//! - `Inferno` - the resolver could not compute a type (empty block, getter
//!   hop off a non-list, unvalidated call, alias cycle)
//! - `Validation` - a call does not fit the block it invokes
//! - `Generics` - a generic symbol was bound to two incompatible types
//!
//! ## Speculation
//!
//! The desugaring engine tries candidate rewrites and discards the ones that
//! fail. Every error here is recoverable for that purpose except a malformed
//! vararg run, see [`TypeError::is_fatal`].
//!
//! ## Related Modules
//!
//! - [`crate::types::infer`] - the resolver producing most of these errors
//! - [`crate::types::validate`] - call validation producing `Validation`
//! - [`crate::desugar`] - wraps these into [`crate::desugar::DesugarError`]

use std::fmt;

use super::ty::{Sym, Type};

/// Reasons a call can be rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The operator of a call is not a block.
    NotCallable { found: Type },

    /// Argument count differs from the parameter count.
    ArityMismatch { expected: usize, found: usize },

    /// Argument at `index` does not match its parameter.
    ArgMismatch {
        index: usize,
        expected: Type,
        found: Type,
    },

    /// A vararg run was followed by further elements.
    VarargNotLast { position: usize, len: usize },

    /// The receiver of a method call does not match the declared receiver.
    ReceiverMismatch { expected: Type, found: Type },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotCallable { found } => write!(f, "{found} is not callable"),
            ValidationError::ArityMismatch { expected, found } => write!(
                f,
                "expected {expected} argument(s), found {found}"
            ),
            ValidationError::ArgMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "argument {index}: expected {expected}, found {found}"
            ),
            ValidationError::VarargNotLast { position, len } => write!(
                f,
                "vararg at position {position} must be the last of {len} element(s)"
            ),
            ValidationError::ReceiverMismatch { expected, found } => write!(
                f,
                "receiver mismatch: expected {expected}, found {found}"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Type error encountered while resolving or checking Adam types.
///
/// # Example Error Messages
///
/// ```text
/// Type error: undefined symbol: foo
/// Type error: Empty blocks don't have return types
/// Type error: invalid call: argument 0: expected Num, found Str
/// Type error: generic T is already bound to Num, cannot bind Str
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TypeError {
    /// A symbol with no alias binding in scope.
    UndefinedSym { sym: Sym },

    /// The resolver could not produce a type.
    Inferno { msg: String },

    /// A call that does not fit its block.
    Validation(ValidationError),

    /// A generic symbol bound twice to incompatible types.
    Generics { sym: Sym, bound: Type, attempted: Type },
}

impl TypeError {
    pub fn undefined_sym(sym: Sym) -> Self {
        TypeError::UndefinedSym { sym }
    }

    pub fn inferno(msg: impl Into<String>) -> Self {
        TypeError::Inferno { msg: msg.into() }
    }

    pub fn generics(sym: Sym, bound: Type, attempted: Type) -> Self {
        TypeError::Generics {
            sym,
            bound,
            attempted,
        }
    }

    /// Resolution failures, as opposed to failed checks.
    pub fn is_inferno(&self) -> bool {
        matches!(
            self,
            TypeError::UndefinedSym { .. } | TypeError::Inferno { .. }
        )
    }

    /// Errors that must abort speculation instead of discarding a candidate.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TypeError::Validation(ValidationError::VarargNotLast { .. })
        )
    }
}

impl From<ValidationError> for TypeError {
    fn from(err: ValidationError) -> Self {
        TypeError::Validation(err)
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TypeError::UndefinedSym { sym } => format!("undefined symbol: {sym}"),
            TypeError::Inferno { msg } => msg.clone(),
            TypeError::Validation(err) => format!("invalid call: {err}"),
            TypeError::Generics {
                sym,
                bound,
                attempted,
            } => format!("generic {sym} is already bound to {bound}, cannot bind {attempted}"),
        };
        write!(f, "Type error: {msg}")
    }
}

impl std::error::Error for TypeError {}
