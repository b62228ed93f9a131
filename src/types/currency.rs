/// Spellings of currency codes found in statements, mapped to the code reported in output.
const STANDARD_CODES: &[(&str, &str)] = &[
    ("AED", "AED"), ("AMD", "AMD"), ("BYN", "BYN"), ("CHF", "CHF"), ("CNY", "CNY"),
    ("EUR", "EUR"), ("GBP", "GBP"), ("HKD", "HKD"), ("JPY", "JPY"), ("KGS", "KGS"),
    ("KZT", "KZT"), ("NOK", "NOK"), ("RUB", "RUB"), ("РУБЛЬ", "RUB"), ("Рубль", "RUB"),
    ("SEK", "SEK"), ("TJS", "TJS"), ("TRY", "TRY"), ("USD", "USD"), ("UZS", "UZS"),
    ("XAG", "XAG"), ("XAU", "XAU"), ("ZAR", "ZAR")
];

/// Immutable lookup from statement spellings to currency codes.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyTable {
    codes: &'static [(&'static str, &'static str)]
}

impl CurrencyTable {
    pub fn standard() -> Self {
        Self { codes: STANDARD_CODES }
    }

    /// Exact-match lookup of a spelling.
    pub fn lookup(&self, spelling: &str) -> Option<&'static str> {
        self.codes.iter()
            .find(|(key, _)| *key == spelling)
            .map(|(_, code)| *code)
    }

    /// Maps a known spelling to its code and passes anything else through unchanged.
    pub fn normalize(&self, spelling: &str) -> String {
        self.lookup(spelling).map(str::to_string).unwrap_or_else(|| spelling.to_string())
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::standard()
    }
}
