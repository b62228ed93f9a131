use rust_decimal::Decimal;

use crate::models::OperationType;

/// Which amount column of a cash row carries the movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Credit,
    Debit
}

impl Side {
    /// Credit when the credit amount is nonzero, otherwise debit.
    pub fn of(credit: Decimal) -> Self {
        if credit.is_zero() { Side::Debit } else { Side::Credit }
    }
}

/// How a recognized cash label becomes an operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRule {
    Direct(OperationType),
    Directional {
        credit: OperationType,
        debit: OperationType
    }
}

impl LabelRule {
    pub fn classify(&self, side: Side) -> OperationType {
        match (self, side) {
            (LabelRule::Direct(operation_type), _) => *operation_type,
            (LabelRule::Directional { credit, .. }, Side::Credit) => *credit,
            (LabelRule::Directional { debit, .. }, Side::Debit) => *debit
        }
    }
}

const ALLOWED: &[&str] = &[
    "Вознаграждение компании",
    "Дивиденды",
    "НДФЛ",
    "Погашение купона",
    "Погашение облигации",
    "Приход ДС",
    "Проценты по займам \"овернайт\"",
    "Проценты по займам \"овернайт ЦБ\"",
    "Частичное погашение облигации",
    "Вывод ДС"
];

const SKIPPED: &[&str] = &[
    "Внебиржевая сделка FX (22*)",
    "Займы \"овернайт\"",
    "НКД от операций",
    "Покупка/Продажа",
    "Покупка/Продажа (репо)",
    "Переводы между площадками"
];

const RULES: &[(&str, LabelRule)] = &[
    ("Дивиденды", LabelRule::Direct(OperationType::Dividend)),
    ("Погашение купона", LabelRule::Direct(OperationType::Coupon)),
    ("Погашение облигации", LabelRule::Direct(OperationType::Repayment)),
    ("Приход ДС", LabelRule::Direct(OperationType::Deposit)),
    ("Частичное погашение облигации", LabelRule::Direct(OperationType::Amortization)),
    ("Вывод ДС", LabelRule::Direct(OperationType::Withdrawal)),
    ("Проценты по займам \"овернайт\"", LabelRule::Directional {
        credit: OperationType::OtherIncome,
        debit: OperationType::OtherExpense
    }),
    ("Проценты по займам \"овернайт ЦБ\"", LabelRule::Directional {
        credit: OperationType::OtherIncome,
        debit: OperationType::OtherExpense
    }),
    ("Вознаграждение компании", LabelRule::Directional {
        credit: OperationType::CommissionRefund,
        debit: OperationType::Commission
    }),
    ("НДФЛ", LabelRule::Directional {
        credit: OperationType::Refund,
        debit: OperationType::Withholding
    })
];

/// Static label tables driving cash classification. Labels match exactly after trimming.
#[derive(Debug, Clone, Copy)]
pub struct CashVocabulary {
    allowed: &'static [&'static str],
    skipped: &'static [&'static str],
    rules: &'static [(&'static str, LabelRule)]
}

impl CashVocabulary {
    pub fn standard() -> Self {
        Self::new(ALLOWED, SKIPPED, RULES)
    }

    pub fn new(allowed: &'static [&'static str], skipped: &'static [&'static str], rules: &'static [(&'static str, LabelRule)]) -> Self {
        Self { allowed, skipped, rules }
    }

    pub fn accepts(&self, label: &str) -> bool {
        !label.is_empty() && !self.skipped.contains(&label) && self.allowed.contains(&label)
    }

    /// Allow-listed labels without a rule classify as `Other`.
    pub fn classify(&self, label: &str, credit: Decimal) -> OperationType {
        self.rules.iter()
            .find(|(key, _)| *key == label)
            .map(|(_, rule)| rule.classify(Side::of(credit)))
            .unwrap_or(OperationType::Other)
    }
}

impl Default for CashVocabulary {
    fn default() -> Self {
        Self::standard()
    }
}
