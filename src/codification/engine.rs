//! Codification engine.
//!
//! A [`Codification`] owns an ordered collection of [`ColumnCodec`]s, keyed
//! by column name and by position, and dispatches multi-column
//! transform/revert calls, dense one-hot assembly, and whole-table rewriting
//! with schema expansion.

use crate::codification::codec::{ColumnCodec, ColumnCodecParams};
use crate::codification::error::CodificationError;
use crate::codification::VariableKind;
use crate::frame::{Column, ColumnType, Frame, Value};
use crate::serialization::SerializableParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializable parameters for a [`Codification`] engine.
#[derive(Clone, Serialize, Deserialize)]
pub struct CodificationParams {
    /// Parameters of each codec in registration order.
    pub codecs: Vec<ColumnCodecParams>,
    /// Engine-wide default replacement for missing input.
    pub default_replacement: Option<Value>,
}

/// Multi-column codification engine.
///
/// Codecs are registered (or auto-created during fitting) in a stable order:
/// positional calls walk them in registration order, named calls look them up
/// by column name. Fitting and transforming mutate the engine (the symbol
/// tables grow through the unseen-value fallback), so shared use across
/// threads must be synchronized by the caller.
///
/// # Example
/// ```ignore
/// use codifier_rs::{Codification, Value, VariableKind};
///
/// let mut codes = Codification::new();
/// codes.add("color", VariableKind::Categorical)?;
/// codes.fit_column(&[Value::from("red"), Value::from("green"), Value::from("blue")])?;
///
/// // Dense one-hot row for "green": [0, 1, 0]
/// let rows = codes.transform_dense(&[vec![Value::from("green")]])?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct Codification {
    codecs: Vec<ColumnCodec>,
    default_replacement: Option<Value>,
}

impl Codification {
    /// Create an engine with no codecs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a default missing-value replacement.
    ///
    /// The default is copied into codecs registered afterwards; codecs can
    /// still override it individually.
    pub fn with_default_replacement(mut self, replacement: Value) -> Self {
        if !replacement.is_missing() {
            self.default_replacement = Some(replacement);
        }
        self
    }

    /// Number of registered codecs.
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Whether no codecs are registered.
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// All codecs in registration order.
    pub fn codecs(&self) -> &[ColumnCodec] {
        &self.codecs
    }

    /// Registered column names in registration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.codecs.iter().map(ColumnCodec::name).collect()
    }

    /// Look up a codec by column name.
    pub fn codec(&self, name: &str) -> Option<&ColumnCodec> {
        self.codecs.iter().find(|c| c.name() == name)
    }

    /// Look up a codec by position.
    pub fn codec_at(&self, index: usize) -> Option<&ColumnCodec> {
        self.codecs.get(index)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.codecs.iter().position(|c| c.name() == name)
    }

    fn codec_mut(&mut self, name: &str) -> Result<&mut ColumnCodec, CodificationError> {
        let index = self
            .position(name)
            .ok_or_else(|| CodificationError::UnknownColumn(name.to_string()))?;
        Ok(&mut self.codecs[index])
    }

    /// Register a new codec for a column.
    ///
    /// Fails with `DuplicateName` if the name is already registered. The
    /// returned reference can be used for per-codec configuration.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        kind: VariableKind,
    ) -> Result<&mut ColumnCodec, CodificationError> {
        let name = name.into();
        if self.position(&name).is_some() {
            return Err(CodificationError::DuplicateName(name));
        }
        let mut codec = ColumnCodec::new(name, kind);
        if let Some(default) = &self.default_replacement {
            codec.set_replacement(default.clone());
        }
        self.codecs.push(codec);
        let index = self.codecs.len() - 1;
        Ok(&mut self.codecs[index])
    }

    /// Fit from single-column data.
    ///
    /// Requires exactly one codec; when none is registered yet, one named
    /// `"0"` with the default kind is created first.
    pub fn fit_column(&mut self, values: &[Value]) -> Result<(), CodificationError> {
        if self.codecs.is_empty() {
            self.add("0", VariableKind::default())?;
        }
        if self.codecs.len() != 1 {
            return Err(CodificationError::ShapeMismatch {
                expected: "exactly one codec for single-column data".to_string(),
                got: format!("{} codecs", self.codecs.len()),
            });
        }
        self.codecs[0].fit(values);
        Ok(())
    }

    /// Fit from multi-column data, positionally.
    ///
    /// Codecs are matched to columns in registration order; unmatched
    /// columns get auto-created codecs named by positional index (`"0"`,
    /// `"1"`, ...) with the default kind. Fails with `ShapeMismatch` when
    /// more codecs are registered than the data has columns.
    pub fn fit(&mut self, samples: &[Vec<Value>]) -> Result<(), CodificationError> {
        let n_columns = samples.iter().map(Vec::len).max().unwrap_or(0);
        if self.codecs.len() > n_columns {
            return Err(CodificationError::ShapeMismatch {
                expected: format!("at least {} data columns", self.codecs.len()),
                got: format!("{} columns", n_columns),
            });
        }
        for index in self.codecs.len()..n_columns {
            self.add(index.to_string(), VariableKind::default())?;
        }
        for (index, codec) in self.codecs.iter_mut().enumerate() {
            for row in samples {
                if let Some(value) = row.get(index) {
                    codec.fit(std::slice::from_ref(value));
                }
            }
        }
        Ok(())
    }

    /// Weighted multi-column fitting.
    ///
    /// Weighted learning is unimplemented by design: any `Some` weights fail
    /// with `NotSupported`, `None` delegates to [`fit`](Codification::fit).
    pub fn fit_weighted(
        &mut self,
        samples: &[Vec<Value>],
        weights: Option<&[f64]>,
    ) -> Result<(), CodificationError> {
        if weights.is_some() {
            return Err(CodificationError::NotSupported(
                "weighted fitting".to_string(),
            ));
        }
        self.fit(samples)
    }

    /// Weighted single-column fitting; same contract as
    /// [`fit_weighted`](Codification::fit_weighted).
    pub fn fit_column_weighted(
        &mut self,
        values: &[Value],
        weights: Option<&[f64]>,
    ) -> Result<(), CodificationError> {
        if weights.is_some() {
            return Err(CodificationError::NotSupported(
                "weighted fitting".to_string(),
            ));
        }
        self.fit_column(values)
    }

    /// Fit registered codecs from the same-named columns of a frame.
    ///
    /// On an engine with no codecs, a default-kind codec is first registered
    /// for every text column of the frame. Fails with `UnknownColumn` when a
    /// registered codec has no matching column.
    pub fn fit_frame(&mut self, frame: &Frame) -> Result<(), CodificationError> {
        if self.codecs.is_empty() {
            for column in frame.columns() {
                if column.column_type() == ColumnType::Text {
                    self.add(column.name().to_string(), VariableKind::default())?;
                }
            }
        }
        for index in 0..self.codecs.len() {
            let name = self.codecs[index].name().to_string();
            let column = frame
                .column(&name)
                .ok_or(CodificationError::UnknownColumn(name))?;
            self.codecs[index].fit(column.values());
        }
        Ok(())
    }

    /// Transform one value through the named codec.
    pub fn transform(&mut self, name: &str, value: &Value) -> Result<i64, CodificationError> {
        self.codec_mut(name)?.transform_code(value)
    }

    /// Transform values positionally across codecs in registration order.
    ///
    /// Fewer values than codecs transforms a prefix; more values than codecs
    /// fails with `TooManyValues`.
    pub fn transform_row(&mut self, values: &[Value]) -> Result<Vec<i64>, CodificationError> {
        if values.len() > self.codecs.len() {
            return Err(CodificationError::TooManyValues {
                given: values.len(),
                codecs: self.codecs.len(),
            });
        }
        values
            .iter()
            .zip(self.codecs.iter_mut())
            .map(|(value, codec)| codec.transform_code(value))
            .collect()
    }

    /// Transform values through the codecs named alongside them.
    pub fn transform_named(
        &mut self,
        names: &[&str],
        values: &[Value],
    ) -> Result<Vec<i64>, CodificationError> {
        if names.len() != values.len() {
            return Err(CodificationError::ShapeMismatch {
                expected: format!("{} values for {} names", names.len(), names.len()),
                got: format!("{} values", values.len()),
            });
        }
        names
            .iter()
            .zip(values)
            .map(|(name, value)| self.transform(name, value))
            .collect()
    }

    /// Total width of a dense output row.
    ///
    /// Each codec contributes [`ColumnCodec::number_of_outputs`] slots.
    pub fn number_of_outputs(&self) -> usize {
        self.codecs.iter().map(ColumnCodec::number_of_outputs).sum()
    }

    /// Dense transform of one row into a caller-supplied buffer.
    ///
    /// The buffer must be pre-sized to [`number_of_outputs`]; anything else
    /// fails with `ShapeMismatch`.
    ///
    /// [`number_of_outputs`]: Codification::number_of_outputs
    pub fn transform_dense_into(
        &mut self,
        row: &[Value],
        out: &mut [f64],
    ) -> Result<(), CodificationError> {
        let widths: Vec<usize> = self
            .codecs
            .iter()
            .map(ColumnCodec::number_of_outputs)
            .collect();
        let width: usize = widths.iter().sum();
        if out.len() != width {
            return Err(CodificationError::ShapeMismatch {
                expected: format!("output buffer of width {}", width),
                got: format!("width {}", out.len()),
            });
        }
        self.dense_row(row, &widths, out)
    }

    /// Dense transform of many rows.
    ///
    /// Per row and codec: Continuous emits the coerced value, Discrete the
    /// rounded value, Ordinal its single code, Categorical a one-hot block of
    /// width `symbol_count`, and CategoricalWithBaseline a block of width
    /// `symbol_count - 1` that stays all-zero for the baseline symbol. The
    /// layout is frozen at the start of the call: a symbol first seen here is
    /// still registered by the fallback, but its indicator has no slot and
    /// its block stays all-zero.
    pub fn transform_dense(
        &mut self,
        rows: &[Vec<Value>],
    ) -> Result<Vec<Vec<f64>>, CodificationError> {
        if rows.iter().any(|row| row.len() > self.codecs.len()) {
            return Err(CodificationError::TooManyValues {
                given: rows.iter().map(Vec::len).max().unwrap_or(0),
                codecs: self.codecs.len(),
            });
        }
        let widths: Vec<usize> = self
            .codecs
            .iter()
            .map(ColumnCodec::number_of_outputs)
            .collect();
        let width: usize = widths.iter().sum();
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let mut buffer = vec![0.0; width];
            self.dense_row(row, &widths, &mut buffer)?;
            out.push(buffer);
        }
        Ok(out)
    }

    fn dense_row(
        &mut self,
        row: &[Value],
        widths: &[usize],
        out: &mut [f64],
    ) -> Result<(), CodificationError> {
        if row.len() > self.codecs.len() {
            return Err(CodificationError::TooManyValues {
                given: row.len(),
                codecs: self.codecs.len(),
            });
        }
        out.fill(0.0);
        let mut offset = 0;
        for (index, codec) in self.codecs.iter_mut().enumerate() {
            let width = widths[index];
            let block = &mut out[offset..offset + width];
            offset += width;

            // Absent cells and missing cells with no replacement skip
            // coding: NaN in single-slot columns, all-zero one-hot blocks.
            let value = match row.get(index) {
                Some(value) if !value.is_missing() || codec.replacement().is_some() => value,
                _ => {
                    match codec.kind() {
                        VariableKind::Ordinal
                        | VariableKind::Continuous
                        | VariableKind::Discrete => block[0] = f64::NAN,
                        VariableKind::Categorical | VariableKind::CategoricalWithBaseline => {}
                    }
                    continue;
                }
            };

            match codec.kind() {
                VariableKind::Ordinal | VariableKind::Continuous | VariableKind::Discrete => {
                    block[0] = codec.transform_value(value)?;
                }
                VariableKind::Categorical => {
                    let code = codec.transform_value(value)? as usize;
                    if code < width {
                        block[code] = 1.0;
                    }
                }
                VariableKind::CategoricalWithBaseline => {
                    let code = codec.transform_value(value)? as usize;
                    if code > 0 && code - 1 < width {
                        block[code - 1] = 1.0;
                    }
                }
            }
        }
        Ok(())
    }

    /// Revert one code through the named codec.
    pub fn inverse_transform(&self, name: &str, code: i64) -> Result<Value, CodificationError> {
        self.codec(name)
            .ok_or_else(|| CodificationError::UnknownColumn(name.to_string()))?
            .inverse_transform(code)
    }

    /// Revert codes positionally across codecs in registration order.
    pub fn inverse_transform_row(&self, codes: &[i64]) -> Result<Vec<Value>, CodificationError> {
        if codes.len() > self.codecs.len() {
            return Err(CodificationError::TooManyValues {
                given: codes.len(),
                codecs: self.codecs.len(),
            });
        }
        codes
            .iter()
            .zip(&self.codecs)
            .map(|(&code, codec)| codec.inverse_transform(code))
            .collect()
    }

    /// Revert codes through the codecs named alongside them.
    pub fn inverse_transform_named(
        &self,
        names: &[&str],
        codes: &[i64],
    ) -> Result<Vec<Value>, CodificationError> {
        if names.len() != codes.len() {
            return Err(CodificationError::ShapeMismatch {
                expected: format!("{} codes for {} names", names.len(), names.len()),
                got: format!("{} codes", codes.len()),
            });
        }
        names
            .iter()
            .zip(codes)
            .map(|(name, &code)| self.inverse_transform(name, code))
            .collect()
    }

    /// Revert a column of codes on a single-codec engine.
    ///
    /// With more than one codec the target is ambiguous and the call fails
    /// with `AmbiguousColumn`.
    pub fn inverse_transform_column(
        &self,
        codes: &[i64],
    ) -> Result<Vec<Value>, CodificationError> {
        match self.codecs.as_slice() {
            [codec] => codec.inverse_transform_many(codes),
            [] => Err(CodificationError::ShapeMismatch {
                expected: "one registered codec".to_string(),
                got: "none".to_string(),
            }),
            _ => Err(CodificationError::AmbiguousColumn {
                registered: self.codecs.len(),
            }),
        }
    }

    /// Revert dense rows produced by [`transform_dense`].
    ///
    /// Single-slot kinds read their slot back (`NaN` reverts to the missing
    /// marker); one-hot kinds scan their block for the set indicator, with an
    /// all-zero baseline block reverting to the baseline symbol.
    ///
    /// [`transform_dense`]: Codification::transform_dense
    pub fn inverse_transform_dense(
        &self,
        rows: &[Vec<f64>],
    ) -> Result<Vec<Vec<Value>>, CodificationError> {
        let width = self.number_of_outputs();
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            if row.len() != width {
                return Err(CodificationError::ShapeMismatch {
                    expected: format!("dense row of width {}", width),
                    got: format!("width {}", row.len()),
                });
            }
            let mut values = Vec::with_capacity(self.codecs.len());
            let mut offset = 0;
            for codec in &self.codecs {
                let block = &row[offset..offset + codec.number_of_outputs()];
                offset += block.len();
                values.push(Self::revert_block(codec, block)?);
            }
            out.push(values);
        }
        Ok(out)
    }

    fn revert_block(codec: &ColumnCodec, block: &[f64]) -> Result<Value, CodificationError> {
        let set_indicator = || block.iter().position(|&slot| slot > 0.5);
        match codec.kind() {
            VariableKind::Continuous => Ok(block[0]
                .is_nan()
                .then_some(Value::Missing)
                .unwrap_or(Value::Float(block[0]))),
            VariableKind::Discrete => Ok(block[0]
                .is_nan()
                .then_some(Value::Missing)
                .unwrap_or(Value::Int(block[0].round() as i64))),
            VariableKind::Ordinal => {
                if block[0].is_nan() {
                    return Ok(Value::Missing);
                }
                codec.inverse_transform(block[0].round() as i64)
            }
            VariableKind::Categorical => match set_indicator() {
                Some(index) => codec.inverse_transform(index as i64),
                None => Ok(Value::Missing),
            },
            VariableKind::CategoricalWithBaseline => match set_indicator() {
                Some(index) => codec.inverse_transform(index as i64 + 1),
                None if codec.symbol_count() > 0 => codec.inverse_transform(0),
                None => Ok(Value::Missing),
            },
        }
    }

    /// Rewrite a table, codifying every column that has a registered codec.
    ///
    /// Ordinal columns are retyped to integer codes in place (to the
    /// replacement's type when one is configured), with the mapping lazily
    /// extended for values unseen at fit time. Categorical columns are
    /// replaced by one `"<column>: <symbol>"` indicator column per symbol;
    /// the baseline variant omits the first-learned symbol's column.
    /// Continuous and Discrete columns are retyped to floating point with
    /// values copied unchanged (no rounding here). Columns without a codec
    /// pass through untouched.
    ///
    /// Missing cells are replaced by the configured substitute where the
    /// column survives and are excluded from indicator/code assignment.
    /// Indicator columns exist only for symbols known when the output schema
    /// is laid out: a symbol first met mid-rewrite extends the mapping, but
    /// its indicator writes are dropped and the row's block stays all-zero.
    pub fn apply(&mut self, frame: &Frame) -> Result<Frame, CodificationError> {
        let n_rows = frame.n_rows();
        let mut columns: Vec<Column> = Vec::new();

        for column in frame.columns() {
            let Some(position) = self.position(column.name()) else {
                columns.push(column.clone());
                continue;
            };
            let codec = &mut self.codecs[position];

            match codec.kind() {
                VariableKind::Ordinal => {
                    let ty = codec
                        .replacement()
                        .and_then(Value::column_type)
                        .unwrap_or(ColumnType::Int);
                    let mut values = Vec::with_capacity(n_rows);
                    for cell in column.values() {
                        if cell.is_missing() {
                            values.push(codec.replacement().cloned().unwrap_or(Value::Missing));
                        } else {
                            values.push(Value::Int(codec.transform_code(cell)?));
                        }
                    }
                    columns.push(Column::new(column.name(), ty, values));
                }
                VariableKind::Categorical | VariableKind::CategoricalWithBaseline => {
                    let skip = match codec.kind() {
                        VariableKind::CategoricalWithBaseline => 1,
                        _ => 0,
                    };
                    // Schema first: indicators exist only for symbols known now.
                    let names: Vec<String> = codec
                        .symbols()
                        .iter()
                        .skip(skip)
                        .map(|symbol| format!("{}: {}", column.name(), symbol))
                        .collect();
                    let mut indicators = vec![vec![Value::Int(0); n_rows]; names.len()];
                    for (row, cell) in column.values().iter().enumerate() {
                        if cell.is_missing() {
                            continue;
                        }
                        let code = codec.transform_code(cell)? as usize;
                        if code >= skip {
                            if let Some(indicator) = indicators.get_mut(code - skip) {
                                indicator[row] = Value::Int(1);
                            }
                        }
                    }
                    for (name, values) in names.into_iter().zip(indicators) {
                        columns.push(Column::new(name, ColumnType::Int, values));
                    }
                }
                VariableKind::Continuous | VariableKind::Discrete => {
                    let mut values = Vec::with_capacity(n_rows);
                    for cell in column.values() {
                        if cell.is_missing() {
                            values.push(codec.replacement().cloned().unwrap_or(Value::Missing));
                        } else {
                            let numeric = cell.as_f64().ok_or_else(|| {
                                CodificationError::InvalidNumeric {
                                    column: column.name().to_string(),
                                    value: cell.to_string(),
                                }
                            })?;
                            values.push(Value::Float(numeric));
                        }
                    }
                    columns.push(Column::new(column.name(), ColumnType::Float, values));
                }
            }
        }

        Frame::from_columns(columns).map_err(CodificationError::from)
    }

    /// Extract learned state as a serializable representation.
    ///
    /// A reloaded engine behaves identically to a freshly fitted one; codec
    /// params carry their resolved missing policy, so nothing needs re-wiring
    /// after [`from_params`](Codification::from_params).
    pub fn extract_params(&self) -> CodificationParams {
        CodificationParams {
            codecs: self.codecs.iter().map(ColumnCodec::extract_params).collect(),
            default_replacement: self.default_replacement.clone(),
        }
    }

    /// Reconstruct an engine from parameters.
    pub fn from_params(params: CodificationParams) -> Self {
        Self {
            codecs: params
                .codecs
                .into_iter()
                .map(ColumnCodec::from_params)
                .collect(),
            default_replacement: params.default_replacement,
        }
    }

    /// Save the engine's learned state to a file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let bytes = self
            .extract_params()
            .to_bytes()
            .map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }

    /// Load an engine from a file written by
    /// [`save_to_file`](Codification::save_to_file).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CodificationError> {
        let bytes = std::fs::read(path)?;
        let params = CodificationParams::from_bytes(&bytes)?;
        Ok(Self::from_params(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_rows() -> Vec<Vec<Value>> {
        ["red", "green", "blue", "red"]
            .iter()
            .map(|&c| vec![Value::from(c)])
            .collect()
    }

    fn color_engine(kind: VariableKind) -> Codification {
        let mut codes = Codification::new();
        codes.add("C", kind).unwrap();
        codes.fit(&color_rows()).unwrap();
        codes
    }

    #[test]
    fn test_engine_add_duplicate_name() {
        let mut codes = Codification::new();
        codes.add("color", VariableKind::Ordinal).unwrap();
        let result = codes.add("color", VariableKind::Categorical);
        assert!(matches!(result, Err(CodificationError::DuplicateName(_))));
        assert_eq!(codes.len(), 1);
    }

    #[test]
    fn test_engine_fit_column_auto_creates_codec() {
        let mut codes = Codification::new();
        codes
            .fit_column(&[Value::from("x"), Value::from("y")])
            .unwrap();

        assert_eq!(codes.len(), 1);
        let codec = codes.codec("0").unwrap();
        assert_eq!(codec.kind(), VariableKind::Ordinal);
        assert_eq!(codes.transform("0", &Value::from("y")).unwrap(), 1);
    }

    #[test]
    fn test_engine_fit_column_rejects_multi_codec() {
        let mut codes = Codification::new();
        codes.add("a", VariableKind::Ordinal).unwrap();
        codes.add("b", VariableKind::Ordinal).unwrap();
        let result = codes.fit_column(&[Value::from("x")]);
        assert!(matches!(result, Err(CodificationError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_engine_fit_auto_names_positional_codecs() {
        let mut codes = Codification::new();
        codes.add("first", VariableKind::Ordinal).unwrap();
        codes
            .fit(&[
                vec![Value::from("a"), Value::from("p"), Value::from("u")],
                vec![Value::from("b"), Value::from("q"), Value::from("v")],
            ])
            .unwrap();

        assert_eq!(codes.len(), 3);
        assert!(codes.codec("first").is_some());
        assert!(codes.codec("1").is_some());
        assert!(codes.codec("2").is_some());
        assert_eq!(codes.transform("1", &Value::from("q")).unwrap(), 1);
    }

    #[test]
    fn test_engine_fit_more_codecs_than_columns() {
        let mut codes = Codification::new();
        codes.add("a", VariableKind::Ordinal).unwrap();
        codes.add("b", VariableKind::Ordinal).unwrap();
        let result = codes.fit(&[vec![Value::from("x")]]);
        assert!(matches!(result, Err(CodificationError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_engine_weighted_fitting_rejected() {
        let mut codes = Codification::new();
        let samples = vec![vec![Value::from("x")]];

        let result = codes.fit_weighted(&samples, Some(&[1.0]));
        assert!(matches!(result, Err(CodificationError::NotSupported(_))));

        let result = codes.fit_column_weighted(&[Value::from("x")], Some(&[1.0]));
        assert!(matches!(result, Err(CodificationError::NotSupported(_))));

        // Absent weights delegate to the unweighted paths.
        codes.fit_weighted(&samples, None).unwrap();
        assert_eq!(codes.len(), 1);
    }

    #[test]
    fn test_engine_transform_unknown_column() {
        let mut codes = color_engine(VariableKind::Ordinal);
        let result = codes.transform("missing", &Value::from("red"));
        assert!(matches!(result, Err(CodificationError::UnknownColumn(_))));
    }

    #[test]
    fn test_engine_transform_row_positional() {
        let mut codes = Codification::new();
        codes.add("A", VariableKind::Ordinal).unwrap();
        codes.add("B", VariableKind::Ordinal).unwrap();
        codes
            .fit(&[
                vec![Value::from("x"), Value::from("y")],
                vec![Value::from("z"), Value::from("w")],
            ])
            .unwrap();

        assert_eq!(
            codes
                .transform_row(&[Value::from("z"), Value::from("w")])
                .unwrap(),
            vec![1, 1]
        );
        // A prefix is fine.
        assert_eq!(codes.transform_row(&[Value::from("x")]).unwrap(), vec![0]);
        // More values than codecs is not.
        let result =
            codes.transform_row(&[Value::from("x"), Value::from("y"), Value::from("z")]);
        assert!(matches!(
            result,
            Err(CodificationError::TooManyValues { given: 3, codecs: 2 })
        ));
    }

    #[test]
    fn test_engine_transform_named_pairs() {
        let mut codes = Codification::new();
        codes.add("A", VariableKind::Ordinal).unwrap();
        codes.add("B", VariableKind::Ordinal).unwrap();
        codes.fit_frame(&frame_of(vec![
            ("A", ColumnType::Text, vec![Value::from("x"), Value::from("q")]),
            ("B", ColumnType::Text, vec![Value::from("y"), Value::from("r")]),
        ]))
        .unwrap();

        // Each named codec reports its own first-seen code.
        let codes_out = codes
            .transform_named(&["A", "B"], &[Value::from("x"), Value::from("y")])
            .unwrap();
        assert_eq!(codes_out, vec![0, 0]);

        let result = codes.transform_named(&["A", "B"], &[Value::from("x")]);
        assert!(matches!(result, Err(CodificationError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_engine_number_of_outputs_mixed() {
        let mut codes = Codification::new();
        codes.add("color", VariableKind::Categorical).unwrap();
        codes.add("grade", VariableKind::CategoricalWithBaseline).unwrap();
        codes.add("rank", VariableKind::Ordinal).unwrap();
        codes.add("fare", VariableKind::Continuous).unwrap();
        codes.add("age", VariableKind::Discrete).unwrap();
        codes
            .fit(&[
                vec![
                    Value::from("red"),
                    Value::from("a"),
                    Value::from("low"),
                    Value::Float(1.0),
                    Value::Int(30),
                ],
                vec![
                    Value::from("green"),
                    Value::from("b"),
                    Value::from("high"),
                    Value::Float(2.0),
                    Value::Int(40),
                ],
                vec![
                    Value::from("blue"),
                    Value::from("c"),
                    Value::from("low"),
                    Value::Float(3.0),
                    Value::Int(50),
                ],
            ])
            .unwrap();

        // 3 one-hot + (3 - 1) baseline + 1 ordinal + 1 continuous + 1 discrete
        assert_eq!(codes.number_of_outputs(), 3 + 2 + 1 + 1 + 1);
    }

    #[test]
    fn test_engine_dense_one_hot_scenario() {
        let mut codes = color_engine(VariableKind::Categorical);

        let rows = codes
            .transform_dense(&[vec![Value::from("green")]])
            .unwrap();
        assert_eq!(rows, vec![vec![0.0, 1.0, 0.0]]);
    }

    #[test]
    fn test_engine_dense_baseline_scenario() {
        let mut codes = color_engine(VariableKind::CategoricalWithBaseline);

        // Baseline symbol ("red", code 0) leaves the block all-zero.
        let rows = codes
            .transform_dense(&[vec![Value::from("red")], vec![Value::from("blue")]])
            .unwrap();
        assert_eq!(rows[0], vec![0.0, 0.0]);
        assert_eq!(rows[1], vec![0.0, 1.0]);
    }

    #[test]
    fn test_engine_dense_mixed_kinds() {
        let mut codes = Codification::new();
        codes.add("rank", VariableKind::Ordinal).unwrap();
        codes.add("fare", VariableKind::Continuous).unwrap();
        codes.add("age", VariableKind::Discrete).unwrap();
        codes
            .fit(&[
                vec![Value::from("low"), Value::Float(0.0), Value::Int(0)],
                vec![Value::from("high"), Value::Float(0.0), Value::Int(0)],
            ])
            .unwrap();

        let rows = codes
            .transform_dense(&[vec![
                Value::from("high"),
                Value::from("3.6"),
                Value::from("3.6"),
            ]])
            .unwrap();
        assert_eq!(rows, vec![vec![1.0, 3.6, 4.0]]);
    }

    #[test]
    fn test_engine_dense_into_buffer() {
        let mut codes = color_engine(VariableKind::Categorical);

        let mut buffer = vec![9.0; 3];
        codes
            .transform_dense_into(&[Value::from("blue")], &mut buffer)
            .unwrap();
        assert_eq!(buffer, vec![0.0, 0.0, 1.0]);

        let mut wrong = vec![0.0; 2];
        let result = codes.transform_dense_into(&[Value::from("blue")], &mut wrong);
        assert!(matches!(result, Err(CodificationError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_engine_dense_missing_cells() {
        let mut codes = Codification::new();
        codes.add("color", VariableKind::Categorical).unwrap();
        codes.add("fare", VariableKind::Continuous).unwrap();
        codes
            .fit(&[
                vec![Value::from("red"), Value::Float(1.0)],
                vec![Value::from("blue"), Value::Float(2.0)],
            ])
            .unwrap();

        let rows = codes
            .transform_dense(&[vec![Value::Missing, Value::Missing]])
            .unwrap();
        assert_eq!(rows[0][0], 0.0);
        assert_eq!(rows[0][1], 0.0);
        assert!(rows[0][2].is_nan());
    }

    #[test]
    fn test_engine_dense_unseen_symbol_keeps_width() {
        let mut codes = color_engine(VariableKind::Categorical);

        let rows = codes
            .transform_dense(&[vec![Value::from("violet")]])
            .unwrap();
        // Layout frozen at call time: the new symbol has no slot yet...
        assert_eq!(rows, vec![vec![0.0, 0.0, 0.0]]);
        // ...but the mapping did extend.
        assert_eq!(codes.codec("C").unwrap().symbol_count(), 4);
        assert_eq!(codes.number_of_outputs(), 4);
    }

    #[test]
    fn test_engine_inverse_transform_row_round_trip() {
        let mut codes = Codification::new();
        codes.add("A", VariableKind::Ordinal).unwrap();
        codes.add("B", VariableKind::Ordinal).unwrap();
        codes
            .fit(&[
                vec![Value::from("x"), Value::from("y")],
                vec![Value::from("z"), Value::from("w")],
            ])
            .unwrap();

        let encoded = codes
            .transform_row(&[Value::from("z"), Value::from("y")])
            .unwrap();
        let decoded = codes.inverse_transform_row(&encoded).unwrap();
        assert_eq!(decoded, vec![Value::from("z"), Value::from("y")]);

        let named = codes
            .inverse_transform_named(&["B", "A"], &[0, 1])
            .unwrap();
        assert_eq!(named, vec![Value::from("y"), Value::from("z")]);
    }

    #[test]
    fn test_engine_inverse_transform_column_ambiguity() {
        let mut single = Codification::new();
        single.fit_column(&[Value::from("x"), Value::from("y")]).unwrap();
        assert_eq!(
            single.inverse_transform_column(&[1, 0]).unwrap(),
            vec![Value::from("y"), Value::from("x")]
        );

        let mut multi = Codification::new();
        multi.add("a", VariableKind::Ordinal).unwrap();
        multi.add("b", VariableKind::Ordinal).unwrap();
        assert!(matches!(
            multi.inverse_transform_column(&[0]),
            Err(CodificationError::AmbiguousColumn { registered: 2 })
        ));
    }

    #[test]
    fn test_engine_inverse_transform_unknown_code_propagates() {
        let codes = color_engine(VariableKind::Ordinal);
        let result = codes.inverse_transform("C", 17);
        assert!(matches!(result, Err(CodificationError::UnknownCode { .. })));
    }

    #[test]
    fn test_engine_inverse_dense_round_trip() {
        let mut codes = Codification::new();
        codes.add("color", VariableKind::Categorical).unwrap();
        codes.add("grade", VariableKind::CategoricalWithBaseline).unwrap();
        codes.add("rank", VariableKind::Ordinal).unwrap();
        codes.add("fare", VariableKind::Continuous).unwrap();
        let samples = vec![
            vec![
                Value::from("red"),
                Value::from("a"),
                Value::from("low"),
                Value::Float(1.5),
            ],
            vec![
                Value::from("blue"),
                Value::from("b"),
                Value::from("high"),
                Value::Float(2.5),
            ],
        ];
        codes.fit(&samples).unwrap();

        let dense = codes.transform_dense(&samples).unwrap();
        let decoded = codes.inverse_transform_dense(&dense).unwrap();
        // The baseline row decodes back to the baseline symbol.
        assert_eq!(decoded[0][1], Value::from("a"));
        assert_eq!(
            decoded,
            vec![
                vec![
                    Value::from("red"),
                    Value::from("a"),
                    Value::from("low"),
                    Value::Float(1.5),
                ],
                vec![
                    Value::from("blue"),
                    Value::from("b"),
                    Value::from("high"),
                    Value::Float(2.5),
                ],
            ]
        );
    }

    fn frame_of(columns: Vec<(&str, ColumnType, Vec<Value>)>) -> Frame {
        Frame::from_columns(
            columns
                .into_iter()
                .map(|(name, ty, values)| Column::new(name, ty, values))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_engine_apply_ordinal_retypes_to_codes() {
        let mut codes = Codification::new();
        codes.add("rank", VariableKind::Ordinal).unwrap();
        let frame = frame_of(vec![(
            "rank",
            ColumnType::Text,
            vec![Value::from("low"), Value::from("high"), Value::from("low")],
        )]);
        codes.fit_frame(&frame).unwrap();

        let rewritten = codes.apply(&frame).unwrap();
        let column = rewritten.column("rank").unwrap();
        assert_eq!(column.column_type(), ColumnType::Int);
        assert_eq!(
            column.values(),
            &[Value::Int(0), Value::Int(1), Value::Int(0)]
        );
    }

    #[test]
    fn test_engine_apply_categorical_expands_columns() {
        let mut codes = Codification::new();
        codes.add("C", VariableKind::Categorical).unwrap();
        let frame = frame_of(vec![(
            "C",
            ColumnType::Text,
            vec![
                Value::from("red"),
                Value::from("green"),
                Value::from("blue"),
                Value::from("red"),
            ],
        )]);
        codes.fit_frame(&frame).unwrap();

        let rewritten = codes.apply(&frame).unwrap();
        assert_eq!(rewritten.n_columns(), 3);
        assert!(rewritten.column("C").is_none());

        // Every symbol, including the first, gets an indicator column.
        let red = rewritten.column("C: red").unwrap();
        let green = rewritten.column("C: green").unwrap();
        let blue = rewritten.column("C: blue").unwrap();
        assert_eq!(
            red.values(),
            &[Value::Int(1), Value::Int(0), Value::Int(0), Value::Int(1)]
        );
        assert_eq!(
            green.values(),
            &[Value::Int(0), Value::Int(1), Value::Int(0), Value::Int(0)]
        );
        assert_eq!(
            blue.values(),
            &[Value::Int(0), Value::Int(0), Value::Int(1), Value::Int(0)]
        );
    }

    #[test]
    fn test_engine_apply_baseline_omits_first_symbol() {
        let mut codes = Codification::new();
        codes.add("C", VariableKind::CategoricalWithBaseline).unwrap();
        let frame = frame_of(vec![(
            "C",
            ColumnType::Text,
            vec![Value::from("red"), Value::from("green"), Value::from("blue")],
        )]);
        codes.fit_frame(&frame).unwrap();

        let rewritten = codes.apply(&frame).unwrap();
        assert_eq!(rewritten.n_columns(), 2);
        assert!(rewritten.column("C: red").is_none());

        // The baseline row leaves both indicators at zero.
        let green = rewritten.column("C: green").unwrap();
        let blue = rewritten.column("C: blue").unwrap();
        assert_eq!(green.get(0), Some(&Value::Int(0)));
        assert_eq!(blue.get(0), Some(&Value::Int(0)));
        assert_eq!(green.get(1), Some(&Value::Int(1)));
        assert_eq!(blue.get(2), Some(&Value::Int(1)));
    }

    #[test]
    fn test_engine_apply_numeric_and_passthrough() {
        let mut codes = Codification::new();
        codes.add("fare", VariableKind::Continuous).unwrap();
        codes.add("age", VariableKind::Discrete).unwrap();
        let frame = frame_of(vec![
            (
                "fare",
                ColumnType::Text,
                vec![Value::from("3.6"), Value::from("1.25")],
            ),
            (
                "age",
                ColumnType::Text,
                vec![Value::from("3.6"), Value::from("40")],
            ),
            (
                "note",
                ColumnType::Text,
                vec![Value::from("keep"), Value::from("me")],
            ),
        ]);
        codes.fit_frame(&frame).unwrap();

        let rewritten = codes.apply(&frame).unwrap();

        let fare = rewritten.column("fare").unwrap();
        assert_eq!(fare.column_type(), ColumnType::Float);
        assert_eq!(fare.values(), &[Value::Float(3.6), Value::Float(1.25)]);

        // The table pass copies discrete values unrounded; rounding belongs
        // to the dense/scalar transforms.
        let age = rewritten.column("age").unwrap();
        assert_eq!(age.column_type(), ColumnType::Float);
        assert_eq!(age.values(), &[Value::Float(3.6), Value::Float(40.0)]);

        let note = rewritten.column("note").unwrap();
        assert_eq!(note.column_type(), ColumnType::Text);
        assert_eq!(note.values(), &[Value::from("keep"), Value::from("me")]);
    }

    #[test]
    fn test_engine_apply_missing_cells() {
        let mut codes = Codification::new();
        codes
            .add("rank", VariableKind::Ordinal)
            .unwrap()
            .set_replacement(Value::from("unknown"));
        codes.add("C", VariableKind::Categorical).unwrap();
        let frame = frame_of(vec![
            (
                "rank",
                ColumnType::Text,
                vec![Value::from("low"), Value::Missing],
            ),
            (
                "C",
                ColumnType::Text,
                vec![Value::from("red"), Value::Missing],
            ),
        ]);
        codes.fit_frame(&frame).unwrap();

        let rewritten = codes.apply(&frame).unwrap();

        // Ordinal: substitute written raw, excluded from code assignment,
        // and the column takes the replacement's type.
        let rank = rewritten.column("rank").unwrap();
        assert_eq!(rank.column_type(), ColumnType::Text);
        assert_eq!(rank.get(0), Some(&Value::Int(0)));
        assert_eq!(rank.get(1), Some(&Value::from("unknown")));

        // Missing rows leave every indicator at zero.
        let red = rewritten.column("C: red").unwrap();
        assert_eq!(red.get(1), Some(&Value::Int(0)));
    }

    #[test]
    fn test_engine_apply_unseen_symbol_extends_mapping() {
        let mut codes = Codification::new();
        codes.add("C", VariableKind::Categorical).unwrap();
        codes.fit(&color_rows()).unwrap();

        let frame = frame_of(vec![(
            "C",
            ColumnType::Text,
            vec![Value::from("red"), Value::from("violet")],
        )]);
        let rewritten = codes.apply(&frame).unwrap();

        // Schema was laid out before the rewrite: three indicator columns,
        // and the unseen symbol's row stays all-zero.
        assert_eq!(rewritten.n_columns(), 3);
        for name in ["C: red", "C: green", "C: blue"] {
            assert_eq!(rewritten.column(name).unwrap().get(1), Some(&Value::Int(0)));
        }
        // The mapping still extended.
        assert_eq!(codes.codec("C").unwrap().symbol_count(), 4);
    }

    #[test]
    fn test_engine_default_replacement_seeds_new_codecs() {
        let mut codes =
            Codification::new().with_default_replacement(Value::from("n/a"));
        codes.add("a", VariableKind::Ordinal).unwrap();
        assert_eq!(
            codes.codec("a").unwrap().replacement(),
            Some(&Value::from("n/a"))
        );
    }

    #[test]
    fn test_engine_params_round_trip() {
        let mut codes = Codification::new();
        codes.add("color", VariableKind::Categorical).unwrap();
        codes.add("fare", VariableKind::Continuous).unwrap();
        codes
            .fit(&[
                vec![Value::from("red"), Value::Float(1.0)],
                vec![Value::from("green"), Value::Float(2.0)],
            ])
            .unwrap();

        let mut restored = Codification::from_params(codes.extract_params());
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.number_of_outputs(), codes.number_of_outputs());
        assert_eq!(
            restored.transform("color", &Value::from("green")).unwrap(),
            1
        );
    }

    #[test]
    fn test_engine_file_round_trip() {
        let mut codes = Codification::new();
        codes.add("color", VariableKind::Categorical).unwrap();
        codes.fit(&color_rows()).unwrap();

        let path = std::env::temp_dir().join("test_codification.bin");
        codes.save_to_file(&path).unwrap();

        let mut loaded = Codification::load_from_file(&path).unwrap();
        let dense = loaded
            .transform_dense(&[vec![Value::from("green")]])
            .unwrap();
        assert_eq!(dense, vec![vec![0.0, 1.0, 0.0]]);
        assert_eq!(
            loaded.inverse_transform("color", 2).unwrap(),
            Value::from("blue")
        );

        std::fs::remove_file(path).ok();
    }
}
