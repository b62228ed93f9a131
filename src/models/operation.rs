use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::models::OperationType;
use crate::types::format_timestamp;

/// One normalized statement event, built from a single source row.
///
/// Direction is carried by `operation_type`; `payment_sum` is always a magnitude.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    /// Execution or booking time, serialized as `YYYY-MM-DD HH:MM:SS`.
    #[serde(serialize_with = "serialize_timestamp")]
    pub date: Option<NaiveDateTime>,
    pub operation_type: OperationType,
    #[serde(with = "rust_decimal::serde::float")]
    pub payment_sum: Decimal,
    pub currency: String,
    pub ticker: String,
    pub isin: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u64,
    /// Accrued coupon interest, only set for bond trades.
    #[serde(with = "rust_decimal::serde::float")]
    pub aci: Decimal,
    pub comment: String,
    pub operation_id: String
}

impl Operation {
    pub fn new(date: NaiveDateTime, operation_type: OperationType, payment_sum: Decimal, currency: impl Into<String>) -> Self {
        Self {
            date: Some(date),
            operation_type,
            payment_sum: payment_sum.abs(),
            currency: currency.into(),
            ticker: String::new(),
            isin: String::new(),
            price: Decimal::ZERO,
            quantity: 0,
            aci: Decimal::ZERO,
            comment: String::new(),
            operation_id: String::new()
        }
    }

    pub fn with_instrument(mut self, ticker: impl Into<String>, isin: impl Into<String>) -> Self {
        self.ticker = ticker.into();
        self.isin = isin.into();
        self
    }

    pub fn with_trade(mut self, price: Decimal, quantity: u64, aci: Decimal) -> Self {
        self.price = price;
        self.quantity = quantity;
        self.aci = aci;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = operation_id.into();
        self
    }

    /// Total ordering key; operations without a date sort first.
    pub fn sort_key(&self) -> Option<NaiveDateTime> {
        self.date
    }
}

fn serialize_timestamp<S: Serializer>(date: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
    match date {
        Some(timestamp) => serializer.serialize_str(&format_timestamp(timestamp)),
        None => serializer.serialize_none()
    }
}
