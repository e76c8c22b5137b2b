//! Adult Income Codification Walkthrough
//!
//! This example demonstrates a complete codification workflow on a small
//! census-style dataset, showcasing the core capabilities:
//! - Mixed variable kinds (ordinal, categorical, baseline, continuous, discrete)
//! - Missing value replacement
//! - Dense one-hot transforms and their inverse
//! - Whole-table rewriting with schema expansion
//! - Engine serialization
//!
//! Run with: cargo run --example adult_codification

use codifier_rs::{Codification, Column, ColumnType, Frame, Value, VariableKind};
use std::error::Error;

/// A handful of census records.
/// Columns: [education, occupation, sex, age, hours-per-week]
/// - education: ordinal (school < bachelors < masters)
/// - occupation: categorical, one indicator column per value
/// - sex: categorical with baseline, first value is the reference level
/// - age: discrete (rounds on transform)
/// - hours-per-week: continuous (passes through)
fn census_frame() -> Result<Frame, Box<dyn Error>> {
    let education = vec![
        Value::from("bachelors"),
        Value::from("school"),
        Value::from("masters"),
        Value::from("bachelors"),
        Value::Missing,
        Value::from("school"),
    ];
    let occupation = vec![
        Value::from("tech"),
        Value::from("sales"),
        Value::from("tech"),
        Value::from("transport"),
        Value::from("sales"),
        Value::from("tech"),
    ];
    let sex = vec![
        Value::from("male"),
        Value::from("female"),
        Value::from("female"),
        Value::from("male"),
        Value::from("female"),
        Value::from("male"),
    ];
    let age = vec![
        Value::Float(38.4),
        Value::Int(25),
        Value::Float(44.6),
        Value::Int(31),
        Value::Int(52),
        Value::Missing,
    ];
    let hours = vec![
        Value::Float(40.0),
        Value::Float(32.5),
        Value::Float(45.0),
        Value::Float(40.0),
        Value::Float(20.0),
        Value::Float(38.5),
    ];

    Ok(Frame::from_columns(vec![
        Column::new("education", ColumnType::Text, education),
        Column::new("occupation", ColumnType::Text, occupation),
        Column::new("sex", ColumnType::Text, sex),
        Column::new("age", ColumnType::Float, age),
        Column::new("hours-per-week", ColumnType::Float, hours),
    ])?)
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Adult Income Codification Walkthrough ===\n");

    let frame = census_frame()?;
    println!(
        "Loaded {} rows x {} columns",
        frame.n_rows(),
        frame.n_columns()
    );

    // --- Register one codec per column ------------------------------------
    let mut codes = Codification::new();
    codes
        .add("education", VariableKind::Ordinal)?
        .set_replacement(Value::from("school"));
    codes.add("occupation", VariableKind::Categorical)?;
    codes.add("sex", VariableKind::CategoricalWithBaseline)?;
    codes
        .add("age", VariableKind::Discrete)?
        .set_replacement(Value::Float(38.0));
    codes.add("hours-per-week", VariableKind::Continuous)?;

    codes.fit_frame(&frame)?;

    println!("\nLearned symbol tables:");
    for codec in codes.codecs() {
        if codec.symbol_count() > 0 {
            let symbols: Vec<String> = codec
                .symbols()
                .iter()
                .map(|symbol| symbol.to_string())
                .collect();
            println!("  {:<15} {:?}", codec.name(), symbols);
        }
    }

    // --- Scalar and named transforms --------------------------------------
    let education_code = codes.transform("education", &Value::from("masters"))?;
    println!("\n'masters' encodes as {}", education_code);
    println!(
        "code {} decodes back to '{}'",
        education_code,
        codes.inverse_transform("education", education_code)?
    );

    let pair = codes.transform_named(
        &["occupation", "sex"],
        &[Value::from("sales"), Value::from("female")],
    )?;
    println!("(occupation, sex) = (sales, female) encodes as {:?}", pair);

    // --- Dense one-hot transform ------------------------------------------
    println!(
        "\nDense output width: {} (1 ordinal + {} occupation indicators + {} sex indicators + 2 numeric)",
        codes.number_of_outputs(),
        codes.codec("occupation").map_or(0, |c| c.number_of_outputs()),
        codes.codec("sex").map_or(0, |c| c.number_of_outputs()),
    );
    let row = vec![
        Value::from("bachelors"),
        Value::from("tech"),
        Value::from("female"),
        Value::Float(38.4),
        Value::Float(40.0),
    ];
    let dense = codes.transform_dense(&[row])?;
    println!("Dense row: {:?}", dense[0]);

    // --- Whole-table rewriting --------------------------------------------
    let rewritten = codes.apply(&frame)?;
    println!("\nRewritten schema ({} columns):", rewritten.n_columns());
    for column in rewritten.columns() {
        println!("  {:<25} {:?}", column.name(), column.column_type());
    }
    if let Some(column) = rewritten.column("occupation: tech") {
        println!(
            "Row 0 of 'occupation: tech': {}",
            column.get(0).unwrap_or(&Value::Missing)
        );
    }

    // --- Persistence -------------------------------------------------------
    let path = std::env::temp_dir().join("adult_codification.bin");
    codes.save_to_file(&path)?;
    let mut loaded = Codification::load_from_file(&path)?;
    let check = loaded.transform("education", &Value::from("masters"))?;
    println!(
        "\nReloaded engine agrees: 'masters' -> {} ({})",
        check,
        if check == education_code { "ok" } else { "MISMATCH" }
    );
    std::fs::remove_file(path).ok();

    println!("\n=== Done ===");
    Ok(())
}
