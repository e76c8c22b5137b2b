//! Per-column codecs.
//!
//! A [`ColumnCodec`] owns one column's learned symbol table, its variable
//! kind, and its missing-value policy, and exposes scalar and element-wise
//! transform/revert.

use crate::codification::error::CodificationError;
use crate::codification::symbol_map::SymbolMap;
use crate::codification::VariableKind;
use crate::frame::Value;
use serde::{Deserialize, Serialize};

/// Serializable parameters for a [`ColumnCodec`].
///
/// Contains only plain data; the forward lookup map is rebuilt from the
/// symbol list on load.
#[derive(Clone, Serialize, Deserialize)]
pub struct ColumnCodecParams {
    /// Column name the codec is keyed by.
    pub name: String,
    /// Variable kind.
    pub kind: VariableKind,
    /// Learned symbols in code order; empty for numeric kinds.
    pub symbols: Vec<Value>,
    /// Replacement substituted for missing input, if configured.
    pub replacement: Option<Value>,
}

/// Encoder/decoder for a single column.
///
/// Created empty, populated by one or more [`fit`] passes, and mutable
/// afterwards only through the unseen-value fallback: transforming a symbol
/// that was never fitted assigns it the next free code instead of failing.
///
/// # Example
/// ```ignore
/// use codifier_rs::{ColumnCodec, Value, VariableKind};
///
/// let mut codec = ColumnCodec::new("color", VariableKind::Categorical);
/// codec.fit(&[Value::from("red"), Value::from("green"), Value::from("blue")]);
///
/// assert_eq!(codec.transform_code(&Value::from("green"))?, 1);
/// assert_eq!(codec.inverse_transform(1)?, Value::from("green"));
/// ```
///
/// [`fit`]: ColumnCodec::fit
#[derive(Clone, Debug)]
pub struct ColumnCodec {
    name: String,
    kind: VariableKind,
    symbols: SymbolMap<Value>,
    replacement: Option<Value>,
}

impl ColumnCodec {
    /// Create an empty codec for a column.
    pub fn new(name: impl Into<String>, kind: VariableKind) -> Self {
        Self {
            name: name.into(),
            kind,
            symbols: SymbolMap::new(),
            replacement: None,
        }
    }

    /// Configure the value substituted for missing input.
    pub fn with_replacement(mut self, replacement: Value) -> Self {
        self.set_replacement(replacement);
        self
    }

    /// Set the value substituted for missing input.
    ///
    /// The missing marker itself is not a usable replacement and is ignored.
    pub fn set_replacement(&mut self, replacement: Value) {
        if !replacement.is_missing() {
            self.replacement = Some(replacement);
        }
    }

    /// The column name this codec is keyed by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The codec's variable kind.
    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    /// The configured missing-value replacement, if any.
    pub fn replacement(&self) -> Option<&Value> {
        self.replacement.as_ref()
    }

    /// Whether `value` is the missing marker.
    ///
    /// This is an identity test against the sentinel, not a value-equality
    /// comparison.
    pub fn is_missing(&self, value: &Value) -> bool {
        value.is_missing()
    }

    /// Number of distinct symbols learned so far (0 for numeric kinds).
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Learned symbols in code order.
    pub fn symbols(&self) -> &[Value] {
        self.symbols.symbols()
    }

    /// The code assigned to `value`, without the unseen-value fallback.
    pub fn code(&self, value: &Value) -> Option<usize> {
        self.symbols.code(value)
    }

    /// The symbol assigned to `code`.
    pub fn symbol(&self, code: usize) -> Option<&Value> {
        self.symbols.symbol(code)
    }

    /// Output slots this codec contributes to a dense row.
    ///
    /// Single-slot for Ordinal/Continuous/Discrete, one per symbol for
    /// Categorical, one per non-baseline symbol for CategoricalWithBaseline.
    pub fn number_of_outputs(&self) -> usize {
        match self.kind {
            VariableKind::Ordinal | VariableKind::Continuous | VariableKind::Discrete => 1,
            VariableKind::Categorical => self.symbols.len(),
            VariableKind::CategoricalWithBaseline => self.symbols.len().saturating_sub(1),
        }
    }

    /// Fit the symbol table from a column of values.
    ///
    /// Values are scanned in order and each one not yet in the table is
    /// assigned the next free code. Missing values are skipped, not coded.
    /// Callable repeatedly: later passes append new symbols without
    /// disturbing codes already assigned. Numeric kinds learn nothing.
    pub fn fit(&mut self, values: &[Value]) {
        if !self.kind.is_symbolic() {
            return;
        }
        for value in values {
            if value.is_missing() {
                continue;
            }
            self.symbols.get_or_insert(value);
        }
    }

    /// Scalar transform in floating-point space.
    ///
    /// Symbolic kinds return the value's code, assigning the next free code
    /// to values never fitted. Continuous coerces the input to `f64` and
    /// passes it through; Discrete coerces and rounds to the nearest integer
    /// (half away from zero). Missing input substitutes the configured
    /// replacement; without one, numeric kinds propagate `f64::NAN` and
    /// symbolic kinds fail with `MissingValue`.
    pub fn transform_value(&mut self, value: &Value) -> Result<f64, CodificationError> {
        if value.is_missing() {
            let replacement = match self.replacement.clone() {
                Some(replacement) => replacement,
                None if self.kind.is_symbolic() => {
                    return Err(CodificationError::MissingValue {
                        column: self.name.clone(),
                    });
                }
                None => return Ok(f64::NAN),
            };
            return self.transform_present(&replacement);
        }
        self.transform_present(value)
    }

    fn transform_present(&mut self, value: &Value) -> Result<f64, CodificationError> {
        if self.kind.is_symbolic() {
            return Ok(self.symbols.get_or_insert(value) as f64);
        }
        let numeric = value
            .as_f64()
            .ok_or_else(|| CodificationError::InvalidNumeric {
                column: self.name.clone(),
                value: value.to_string(),
            })?;
        Ok(match self.kind {
            VariableKind::Discrete => numeric.round(),
            _ => numeric,
        })
    }

    /// Scalar transform in integer code space.
    ///
    /// Symbolic kinds are exact; numeric kinds round the coerced value to the
    /// nearest integer (the lossless channel for Continuous is the dense
    /// transform). Missing input with no replacement fails with
    /// `MissingValue` since integer space has no missing marker.
    pub fn transform_code(&mut self, value: &Value) -> Result<i64, CodificationError> {
        let out = self.transform_value(value)?;
        if out.is_nan() {
            return Err(CodificationError::MissingValue {
                column: self.name.clone(),
            });
        }
        Ok(out.round() as i64)
    }

    /// Element-wise [`transform_code`](ColumnCodec::transform_code).
    pub fn transform_many(&mut self, values: &[Value]) -> Result<Vec<i64>, CodificationError> {
        values.iter().map(|value| self.transform_code(value)).collect()
    }

    /// Inverse lookup of a single code.
    ///
    /// Symbolic kinds fail with `UnknownCode` for codes never assigned.
    /// Continuous reverts to a float cell, Discrete to an integer cell.
    pub fn inverse_transform(&self, code: i64) -> Result<Value, CodificationError> {
        match self.kind {
            VariableKind::Continuous => Ok(Value::Float(code as f64)),
            VariableKind::Discrete => Ok(Value::Int(code)),
            _ => usize::try_from(code)
                .ok()
                .and_then(|code| self.symbols.symbol(code))
                .cloned()
                .ok_or_else(|| CodificationError::UnknownCode {
                    column: self.name.clone(),
                    code,
                }),
        }
    }

    /// Element-wise [`inverse_transform`](ColumnCodec::inverse_transform).
    pub fn inverse_transform_many(&self, codes: &[i64]) -> Result<Vec<Value>, CodificationError> {
        codes.iter().map(|&code| self.inverse_transform(code)).collect()
    }

    /// Extract learned state as a serializable representation.
    pub fn extract_params(&self) -> ColumnCodecParams {
        ColumnCodecParams {
            name: self.name.clone(),
            kind: self.kind,
            symbols: self.symbols.symbols().to_vec(),
            replacement: self.replacement.clone(),
        }
    }

    /// Reconstruct a codec from parameters.
    pub fn from_params(params: ColumnCodecParams) -> Self {
        Self {
            name: params.name,
            kind: params.kind,
            symbols: SymbolMap::from_symbols(params.symbols),
            replacement: params.replacement,
        }
    }
}
