use super::{StatementEngine, StatementError};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use tempfile::Builder;

use crate::grid::{Grid, GridError};
use crate::models::{DiagnosticReason, OperationType, SectionKind};
use crate::sections::{CashOperationsParser, SectionParser};
use crate::types::Cell;

fn grid(rows: Vec<Vec<&str>>) -> Grid {
    Grid::new(rows.into_iter()
        .map(|row| row.into_iter()
            .map(|value| if value.is_empty() { Cell::Empty } else { Cell::text(value) })
            .collect())
        .collect())
}

fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("samples").join("statement.xlsx")
}

fn mixed_statement() -> Grid {
    grid(vec![
        vec!["2.1. Сделки:"],
        vec!["Облигация"],
        vec![
            "Сделка совершена", "Номер сделки", "Куплено, шт", "Цена, %", "Сумма платежа", "НКД покупки",
            "Продано, шт", "Цена, %", "Сумма выручки", "НКД продажи", "Валюта"
        ],
        vec!["SU26238RMFS4 ОФЗ 26238 ISIN: RU000A1038V6"],
        vec!["01.07.2023", "B1", "10", "65,3", "6530", "120,4", "", "", "", "", "РУБЛЬ"],
        vec![],
        vec!["Дата", "Операция", "Сумма зачисления", "Сумма списания"],
        vec!["05.07.2023", "Приход ДС", "1000", ""],
        vec!["02.07.2023", "Вывод ДС", "", "300"],
        vec!["01.07.2023", "Дивиденды", "50", ""]
    ])
}

#[test]
fn test_engine_merges_and_sorts_sections() -> Result<()> {
    let report = StatementEngine::new().parse_grid(&mixed_statement());

    let types: Vec<OperationType> = report.operations.iter().map(|operation| operation.operation_type).collect();
    assert_eq!(types, vec![OperationType::Dividend, OperationType::Buy, OperationType::Withdrawal, OperationType::Deposit]);
    assert!(report.operations.windows(2).all(|pair| pair[0].sort_key() <= pair[1].sort_key()));
    assert_eq!(report.operations[1].isin, "RU000A1038V6");

    Ok(())
}

#[test]
fn test_engine_normalizes_currency_spellings() {
    let report = StatementEngine::new().parse_grid(&mixed_statement());

    assert!(report.operations.iter().all(|operation| operation.currency == "RUB"));
}

#[test]
fn test_engine_reports_missing_sections() {
    let report = StatementEngine::new().parse_grid(&mixed_statement());

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].section, SectionKind::CurrencyTrades);
    assert_eq!(report.warnings[0].reason, DiagnosticReason::SectionNotFound);
}

#[test]
fn test_engine_output_is_deterministic() -> Result<()> {
    let engine = StatementEngine::new();
    let statement = mixed_statement();

    let first = serde_json::to_string(&engine.parse_grid(&statement))?;
    let second = serde_json::to_string(&engine.parse_grid(&statement))?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_engine_runs_custom_parsers_only() {
    let cash: Arc<dyn SectionParser> = Arc::new(CashOperationsParser::default());
    let report = StatementEngine::with_parsers(vec![cash]).parse_grid(&mixed_statement());

    assert_eq!(report.operations.len(), 3);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_engine_empty_grid_yields_empty_report() {
    let report = StatementEngine::default().parse_grid(&Grid::default());

    assert!(report.operations.is_empty());
    assert_eq!(report.metadata.account_id, None);
    assert_eq!(report.warnings.len(), 3);
}

#[test]
fn test_engine_rejects_unsupported_extension() -> Result<()> {
    let mut file = Builder::new().suffix(".csv").tempfile()?;
    writeln!(file, "date,operation")?;

    let result = StatementEngine::new().parse_file(file.path());

    assert!(matches!(result, Err(StatementError::Load(GridError::UnsupportedExtension { .. }))));
    Ok(())
}

#[test]
fn test_engine_parses_sample_statement() -> Result<()> {
    let report = StatementEngine::new().parse_file(&sample_path())?;

    assert_eq!(report.metadata.account_id.as_deref(), Some("123456"));
    assert_eq!(report.metadata.period_end, NaiveDate::from_ymd_opt(2023, 7, 31));
    assert_eq!(report.metadata.unknown_operations, vec!["Перевод".to_string()]);
    assert_eq!(report.operations.len(), 6);
    assert_eq!(report.warnings.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_engine_run_parses_on_blocking_worker() -> Result<()> {
    let report = StatementEngine::new().run(sample_path()).await?;

    let types: Vec<OperationType> = report.operations.iter().map(|operation| operation.operation_type).collect();
    assert_eq!(types, vec![
        OperationType::Dividend,
        OperationType::CurrencyBuy,
        OperationType::Commission,
        OperationType::Withholding,
        OperationType::Buy,
        OperationType::Sell
    ]);
    assert_eq!(report.operations[4].currency, "RUB");

    Ok(())
}

#[tokio::test]
async fn test_engine_run_bytes_matches_file() -> Result<()> {
    let engine = StatementEngine::new();
    let bytes = fs::read(sample_path())?;

    let from_bytes = engine.run_bytes(bytes).await?;
    let from_file = engine.run(sample_path()).await?;

    assert_eq!(from_bytes, from_file);
    Ok(())
}

#[tokio::test]
async fn test_engine_run_surfaces_missing_file() {
    let result = StatementEngine::new().run(PathBuf::from("samples/missing.xlsx")).await;

    assert!(matches!(result, Err(StatementError::Load(GridError::Open { .. }))));
}
