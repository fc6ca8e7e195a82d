//! Source-like rendering for Adam types and expressions
//!
//! Types print in Adam notation:
//!
//! ```text
//! [Num a, Str b]            struct list
//! [T]..[T head]             generic struct list
//! {[Num other] Num}         block type
//! List..[Num]               parameterized symbol
//! Num...  Num"              vararg, optional
//! ```
//!
//! Desugared calls print with explicit member access, `x.+(5)`.

pub mod expr;
pub mod types;
