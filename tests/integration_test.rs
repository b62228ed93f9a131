use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};
use anyhow::{anyhow, Result};
use serde_json::Value;

#[test]
fn test_cli_outputs_sorted_json_report() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_broker-statement-parser");
    let sample_path = Path::new("samples").join("statement.xlsx");

    let output = Command::new(binary_path)
        .arg(sample_path)
        .output()?;

    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout)?;
    let operations = report["operations"].as_array().ok_or_else(|| anyhow!("operations missing from report"))?;

    assert_eq!(report["account_id"], "123456");
    assert_eq!(report["account_agreement_date"], "2020-02-01");
    assert_eq!(report["period_start"], "2023-07-01");
    assert_eq!(report["unknown_operations"], serde_json::json!(["Перевод"]));
    assert_eq!(operations.len(), 6);

    let dates: Vec<&str> = operations.iter().filter_map(|operation| operation["date"].as_str()).collect();
    assert_eq!(dates.len(), operations.len());
    assert!(dates.windows(2).all(|pair| pair[0] <= pair[1]));

    let dividend = &operations[0];
    assert_eq!(dividend["operation_type"], "dividend");
    assert_eq!(dividend["payment_sum"].as_f64(), Some(1500.5));
    assert_eq!(dividend["isin"], "RU0009029540");
    assert_eq!(dividend["date"], "2023-07-03 00:00:00");

    let sell = &operations[5];
    assert_eq!(sell["operation_type"], "sell");
    assert_eq!(sell["ticker"], "SBER");
    assert_eq!(sell["quantity"], 100);

    Ok(())
}

#[test]
fn test_cli_outputs_csv_operations() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_broker-statement-parser");
    let sample_path = Path::new("samples").join("statement.xlsx");

    let output = Command::new(binary_path)
        .arg(sample_path)
        .arg("error")
        .arg("csv")
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();

    assert_eq!(
        lines.next(),
        Some("date,operation_type,payment_sum,currency,ticker,isin,price,quantity,aci,comment,operation_id")
    );
    assert_eq!(lines.count(), 6);

    Ok(())
}

#[test]
fn test_cli_reads_statement_from_stdin() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_broker-statement-parser");
    let sample = File::open(Path::new("samples").join("statement.xlsx"))?;

    let output = Command::new(binary_path)
        .arg("-")
        .stdin(Stdio::from(sample))
        .output()?;

    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report["operations"].as_array().map(Vec::len), Some(6));

    Ok(())
}

#[test]
fn test_cli_reports_unreadable_stdin_statement() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_broker-statement-parser");
    let not_a_workbook = File::open("Cargo.toml")?;

    let output = Command::new(binary_path)
        .arg("-")
        .stdin(Stdio::from(not_a_workbook))
        .output()?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)?.contains("Failed to parse statement from stdin"));

    Ok(())
}

#[test]
fn test_cli_rejects_unsupported_extension() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_broker-statement-parser");

    let output = Command::new(binary_path)
        .arg("Cargo.toml")
        .output()?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)?.contains("Unsupported statement file"));

    Ok(())
}

#[test]
fn test_cli_fails_on_missing_file() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_broker-statement-parser");

    let output = Command::new(binary_path)
        .arg(Path::new("samples").join("does_not_exist.xlsx"))
        .output()?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_cli_requires_statement_argument() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_broker-statement-parser");

    let output = Command::new(binary_path).output()?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Usage"));

    Ok(())
}
