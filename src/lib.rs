//! # codifier-rs
//!
//! A variable codification library: reversible mappings between
//! symbolic/categorical values and the numeric codes that downstream
//! numeric algorithms consume.
//!
//! ## Core Design Principles
//!
//! - **Reversibility**: every symbol-to-code assignment is a bijection;
//!   `inverse_transform(transform(v)) == v` for every learned value.
//! - **First-seen, stable codes**: codes are dense, zero-based, assigned in
//!   the order symbols are first encountered, and never reassigned;
//!   incremental fitting only ever appends.
//! - **Open-world tolerance**: transforming a value never seen during
//!   fitting registers it under the next free code instead of failing.
//! - **Closed kind dispatch**: the five variable kinds form a closed enum,
//!   so every transform/revert/rewrite site is checked for exhaustiveness
//!   at compile time.
//!
//! ## Quick Start
//!
//! ```rust
//! use codifier_rs::{Codification, Value, VariableKind};
//!
//! let mut codes = Codification::new();
//! codes.add("color", VariableKind::Categorical).unwrap();
//! codes
//!     .fit_column(&[
//!         Value::from("red"),
//!         Value::from("green"),
//!         Value::from("blue"),
//!     ])
//!     .unwrap();
//!
//! // Dense one-hot row for "green": one slot per learned symbol.
//! let dense = codes.transform_dense(&[vec![Value::from("green")]]).unwrap();
//! assert_eq!(dense, vec![vec![0.0, 1.0, 0.0]]);
//!
//! // Scalar codes revert to the original symbol.
//! let code = codes.transform("color", &Value::from("blue")).unwrap();
//! assert_eq!(
//!     codes.inverse_transform("color", code).unwrap(),
//!     Value::from("blue")
//! );
//! ```
//!
//! ## Module Structure
//!
//! - `codification` — symbol tables, per-column codecs, and the
//!   multi-column engine with dense one-hot assembly and table rewriting
//! - `frame` — the in-memory tabular container the engine rewrites
//! - `serialization` — byte-level persistence of learned state

/// Symbol tables, per-column codecs, and the codification engine.
pub mod codification;

/// In-memory tabular container with named, typed columns.
pub mod frame;

/// Persistence of learned parameters.
pub mod serialization;

/// Re-export of the core types for convenient usage.
pub use codification::{Codification, CodificationError, ColumnCodec, SymbolMap, VariableKind};
pub use frame::{Column, ColumnType, Frame, Value};
