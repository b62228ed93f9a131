mod diagnostic;
mod field;
mod operation;
mod report;

use serde::Serialize;

pub use diagnostic::{Diagnostic, DiagnosticReason, Diagnostics};
pub use field::Field;
pub use operation::Operation;
pub use report::{HeaderMetadata, StatementReport};

/// Closed vocabulary of normalized operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Dividend,
    Coupon,
    Buy,
    Sell,
    CurrencyBuy,
    CurrencySale,
    Commission,
    CommissionRefund,
    Withholding,
    Refund,
    OtherIncome,
    OtherExpense,
    Deposit,
    Withdrawal,
    Repayment,
    Amortization,
    Other
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Dividend => "dividend",
            OperationType::Coupon => "coupon",
            OperationType::Buy => "buy",
            OperationType::Sell => "sell",
            OperationType::CurrencyBuy => "currency_buy",
            OperationType::CurrencySale => "currency_sale",
            OperationType::Commission => "commission",
            OperationType::CommissionRefund => "commission_refund",
            OperationType::Withholding => "withholding",
            OperationType::Refund => "refund",
            OperationType::OtherIncome => "other_income",
            OperationType::OtherExpense => "other_expense",
            OperationType::Deposit => "deposit",
            OperationType::Withdrawal => "withdrawal",
            OperationType::Repayment => "repayment",
            OperationType::Amortization => "amortization",
            OperationType::Other => "other"
        }
    }
}

/// Logical table of a statement that produced an operation or a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    CashOperations,
    CurrencyTrades,
    SecuritiesTrades,
    StockTrades,
    BondTrades
}
