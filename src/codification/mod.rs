//! Variable codification: reversible mappings between symbolic values and
//! numeric codes.
//!
//! This module converts columns of symbolic/categorical data into dense
//! integer codes (and back), so that downstream numeric algorithms can
//! consume tabular data that mixes labels with numbers.
//!
//! # Components
//!
//! - [`SymbolMap`]: a dense, first-seen bijection between symbols and codes.
//! - [`ColumnCodec`]: one column's learned mapping, variable kind, and
//!   missing-value policy, with scalar and element-wise transform/revert.
//! - [`Codification`]: an ordered collection of codecs dispatching
//!   multi-column transform/revert, dense one-hot assembly, and table
//!   rewriting with schema expansion.
//!
//! # Example
//! ```ignore
//! use codifier_rs::{Codification, Value, VariableKind};
//!
//! let mut codes = Codification::new();
//! codes.add("color", VariableKind::Categorical)?;
//! codes.fit_column(&[Value::from("red"), Value::from("green")])?;
//!
//! // "green" one-hot encodes as [0, 1]
//! let dense = codes.transform_dense(&[vec![Value::from("green")]])?;
//! ```

pub mod error;

mod codec;
mod engine;
mod symbol_map;

pub use codec::{ColumnCodec, ColumnCodecParams};
pub use engine::{Codification, CodificationParams};
pub use error::CodificationError;
pub use symbol_map::SymbolMap;

/// The measurement kind of a codified column.
///
/// The set is closed: every transform, revert, and rewrite site matches on
/// it exhaustively, so adding a kind forces every dispatch to be revisited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VariableKind {
    /// Symbolic values mapped to a single integer code column.
    #[default]
    Ordinal,
    /// Symbolic values expanded to one indicator column per symbol.
    Categorical,
    /// Like [`Categorical`](VariableKind::Categorical), but the first-learned
    /// symbol is the omitted reference level: indicator columns exist only
    /// for the remaining symbols, and baseline rows stay all-zero.
    CategoricalWithBaseline,
    /// Numeric values coerced to floating point and passed through unchanged.
    Continuous,
    /// Numeric values rounded to the nearest integer on transform.
    Discrete,
}

impl VariableKind {
    /// Whether this kind maintains a symbol table.
    pub fn is_symbolic(self) -> bool {
        matches!(
            self,
            VariableKind::Ordinal
                | VariableKind::Categorical
                | VariableKind::CategoricalWithBaseline
        )
    }
}
