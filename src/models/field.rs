use serde::Serialize;

/// Semantic column of a statement table, independent of its header wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    OperationId,
    Date,
    Time,
    Operation,
    Credit,
    Debit,
    Comment,
    Currency,
    BuyQuantity,
    SellQuantity,
    BuyPrice,
    SellPrice,
    BuyPayment,
    SellPayment,
    BuyAci,
    SellAci
}
