//! Transaction import and banking provider normalization
//!
//! The engine trusts its input. Everything that turns outside data into
//! well-formed `Transaction`s lives here:
//! - JSON arrays of transaction records (the dashboard's stored format)
//! - CSV exports with a fixed header
//! - Raw banking provider payloads with signed amounts and class codes

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, WriterBuilder};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionType};

/// Category used when a record carries none
pub const FALLBACK_CATEGORY: &str = "Other";

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    /// JSON array of transaction records
    Json,
    /// CSV with `id,merchant,category,amount,type,date,is_recurring,logo`
    Csv,
    /// Banking provider payload: `{"data": [...]}` with signed amounts
    Provider,
}

impl ImportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Provider => "provider",
        }
    }
}

impl std::str::FromStr for ImportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "provider" | "bank" => Ok(Self::Provider),
            _ => Err(format!("Unknown import format: {}", s)),
        }
    }
}

impl std::fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detect the input format from the file extension and leading content
///
/// Returns None if the format is not recognized.
pub fn detect_format(path: &Path, content: &str) -> Option<ImportFormat> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    if extension.as_deref() == Some("csv") {
        return Some(ImportFormat::Csv);
    }

    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return Some(ImportFormat::Json);
    }
    if trimmed.starts_with('{') && trimmed.contains("\"data\"") {
        return Some(ImportFormat::Provider);
    }
    if trimmed.starts_with("id,") || trimmed.starts_with("merchant,") {
        return Some(ImportFormat::Csv);
    }

    None
}

/// Parse transactions in the given format
pub fn parse<R: Read>(reader: R, format: ImportFormat) -> Result<Vec<Transaction>> {
    let transactions = match format {
        ImportFormat::Json => parse_json(reader)?,
        ImportFormat::Csv => parse_csv(reader)?,
        ImportFormat::Provider => ProviderNormalizer::new()?.parse_json(reader)?,
    };
    debug!(format = format.as_str(), count = transactions.len(), "Parsed transactions");
    Ok(transactions)
}

/// A transaction record as it appears in JSON feeds and CSV exports
#[derive(Debug, Deserialize)]
struct RawRecord {
    id: Option<String>,
    merchant: String,
    category: Option<String>,
    amount: f64,
    #[serde(rename = "type")]
    transaction_type: String,
    date: String,
    #[serde(alias = "isRecurring")]
    is_recurring: Option<bool>,
    logo: Option<String>,
}

impl RawRecord {
    fn into_transaction(self, row: usize) -> Result<Transaction> {
        let date = parse_date(&self.date)
            .map_err(|e| Error::Import(format!("Row {}: {}", row, e)))?;

        let transaction_type: TransactionType = self
            .transaction_type
            .parse()
            .map_err(|e: String| Error::Import(format!("Row {}: {}", row, e)))?;

        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Row {}: amount must be a non-negative number, got {}",
                row, self.amount
            )));
        }

        let id = match self.id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => generate_id(&date, &self.merchant, self.amount),
        };

        let category = self
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

        Ok(Transaction {
            id,
            merchant: self.merchant,
            category,
            amount: self.amount,
            transaction_type,
            date,
            is_recurring: self.is_recurring.unwrap_or(false),
            logo: self.logo.filter(|l| !l.is_empty()),
        })
    }
}

/// Parse a JSON array of transaction records
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let records: Vec<RawRecord> = serde_json::from_reader(reader)?;
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| record.into_transaction(i + 1))
        .collect()
}

/// Parse a CSV export
/// Format: id,merchant,category,amount,type,date,is_recurring,logo
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for (i, result) in rdr.deserialize::<RawRecord>().enumerate() {
        let record = result?;
        transactions.push(record.into_transaction(i + 1)?);
    }

    Ok(transactions)
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    merchant: &'a str,
    category: &'a str,
    amount: f64,
    #[serde(rename = "type")]
    transaction_type: &'static str,
    date: String,
    is_recurring: bool,
    logo: &'a str,
}

/// Write transactions in the CSV export format
pub fn write_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for tx in transactions {
        wtr.serialize(CsvRow {
            id: &tx.id,
            merchant: &tx.merchant,
            category: &tx.category,
            amount: tx.amount,
            transaction_type: tx.transaction_type.as_str(),
            date: tx.date.format("%Y-%m-%d").to_string(),
            is_recurring: tx.is_recurring,
            logo: tx.logo.as_deref().unwrap_or(""),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Generate a stable id for records that arrive without one
fn generate_id(date: &NaiveDate, merchant: &str, amount: f64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(merchant.as_bytes());
    hasher.update(amount.to_be_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("txn_{}", &digest[..16])
}

/// Parse a date in any of the supported formats
///
/// Timestamps keep the calendar date in their own offset.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Ok(date);
    }

    Err(Error::InvalidData(format!("Unrecognized date: {}", s)))
}

/// Descriptions containing any of these are treated as subscriptions
const SUBSCRIPTION_KEYWORDS: &[&str] = &[
    "netflix",
    "spotify",
    "apple",
    "google",
    "amazon prime",
    "disney",
    "hulu",
    "adobe",
    "microsoft",
    "dropbox",
    "gym",
    "fitness",
    "subscription",
    "monthly",
    "recurring",
    "stan",
    "binge",
    "kayo",
    "foxtel",
    "audible",
];

/// Map a provider class/sub-class code to a dashboard category
pub fn map_provider_category(code: &str) -> Option<&'static str> {
    match code.to_lowercase().as_str() {
        "income" => Some("Salary"),
        "transfer" => Some("Transfer"),
        "payment" => Some("Payment"),
        "cash-withdrawal" => Some("Cash"),
        "bank-fee" => Some("Fees"),
        "food-and-drink" => Some("Dining"),
        "groceries" => Some("Groceries"),
        "transport" => Some("Transportation"),
        "entertainment" => Some("Entertainment"),
        "shopping" => Some("Shopping"),
        "health" => Some("Health"),
        "utilities" => Some("Utilities"),
        "housing" => Some("Home"),
        "insurance" => Some("Insurance"),
        "education" => Some("Education"),
        _ => None,
    }
}

/// Provider response envelope
#[derive(Debug, Deserialize)]
pub struct ProviderPayload {
    #[serde(default)]
    pub data: Vec<ProviderTransaction>,
}

/// Classification code attached to a provider record
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderClass {
    pub code: Option<String>,
}

/// Providers send amounts either as numbers or as decimal strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProviderAmount {
    Number(f64),
    Text(String),
}

impl ProviderAmount {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }
}

/// A raw banking provider record. Negative amounts are debits.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderTransaction {
    pub id: Option<String>,
    pub description: Option<String>,
    pub amount: Option<ProviderAmount>,
    pub class: Option<ProviderClass>,
    pub sub_class: Option<ProviderClass>,
    pub post_date: Option<String>,
    pub transaction_date: Option<String>,
}

/// Converts banking provider records into transactions
pub struct ProviderNormalizer {
    subscription_pattern: Regex,
}

impl ProviderNormalizer {
    pub fn new() -> Result<Self> {
        let alternation = SUBSCRIPTION_KEYWORDS
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let subscription_pattern = Regex::new(&format!("(?i)(?:{})", alternation))?;
        Ok(Self {
            subscription_pattern,
        })
    }

    /// Whether a description looks like a subscription charge
    pub fn is_subscription(&self, description: &str) -> bool {
        self.subscription_pattern.is_match(description)
    }

    /// Parse and normalize a provider payload
    pub fn parse_json<R: Read>(&self, reader: R) -> Result<Vec<Transaction>> {
        let payload: ProviderPayload = serde_json::from_reader(reader)?;
        Ok(self.normalize(&payload.data))
    }

    /// Normalize provider records, skipping ones without a usable date or amount
    pub fn normalize(&self, records: &[ProviderTransaction]) -> Vec<Transaction> {
        let mut transactions = Vec::with_capacity(records.len());
        let mut skipped = 0usize;

        for (index, record) in records.iter().enumerate() {
            match self.normalize_one(index, record) {
                Some(tx) => transactions.push(tx),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(skipped, "Skipped malformed provider records");
        }
        debug!(count = transactions.len(), "Normalized provider records");

        transactions
    }

    fn normalize_one(&self, index: usize, record: &ProviderTransaction) -> Option<Transaction> {
        let Some(signed) = record.amount.as_ref().and_then(ProviderAmount::value) else {
            warn!(index, "Provider record has no usable amount");
            return None;
        };

        let date = record
            .post_date
            .as_deref()
            .or(record.transaction_date.as_deref())
            .and_then(|s| parse_date(s).ok());
        let Some(date) = date else {
            warn!(index, "Provider record has no usable date");
            return None;
        };

        let merchant = record
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        let is_subscription = self.is_subscription(&merchant);
        let transaction_type = if signed > 0.0 {
            TransactionType::Income
        } else if is_subscription {
            TransactionType::Subscription
        } else {
            TransactionType::Expense
        };

        Some(Transaction {
            id: record
                .id
                .clone()
                .unwrap_or_else(|| format!("txn_{}", index)),
            merchant,
            category: provider_category(record).to_string(),
            amount: signed.abs(),
            transaction_type,
            date,
            is_recurring: is_subscription,
            logo: None,
        })
    }
}

/// Sub-class code wins over class code; unknown codes fall back to "Other"
fn provider_category(record: &ProviderTransaction) -> &'static str {
    let code_of = |class: &Option<ProviderClass>| {
        class
            .as_ref()
            .and_then(|c| c.code.as_deref())
            .and_then(map_provider_category)
    };

    code_of(&record.sub_class)
        .or_else(|| code_of(&record.class))
        .unwrap_or(FALLBACK_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-15").unwrap(), date(2024, 3, 15));
        assert_eq!(parse_date("2024-03-15T10:30:00.000Z").unwrap(), date(2024, 3, 15));
        assert_eq!(parse_date("2024-03-15T23:30:00-05:00").unwrap(), date(2024, 3, 15));
        assert_eq!(parse_date("2024-03-15T08:00:00").unwrap(), date(2024, 3, 15));
        assert_eq!(parse_date("03/15/2024").unwrap(), date(2024, 3, 15));
        assert!(parse_date("15th March").is_err());
    }

    #[test]
    fn test_import_format_parse() {
        assert_eq!("CSV".parse::<ImportFormat>().unwrap(), ImportFormat::Csv);
        assert_eq!("bank".parse::<ImportFormat>().unwrap(), ImportFormat::Provider);
        assert!("xml".parse::<ImportFormat>().is_err());
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("tx.csv"), "anything"),
            Some(ImportFormat::Csv)
        );
        assert_eq!(
            detect_format(Path::new("tx.json"), "  [{\"id\":1}]"),
            Some(ImportFormat::Json)
        );
        assert_eq!(
            detect_format(Path::new("raw.json"), "{\"data\": []}"),
            Some(ImportFormat::Provider)
        );
        assert_eq!(
            detect_format(Path::new("export"), "id,merchant,category"),
            Some(ImportFormat::Csv)
        );
        assert_eq!(detect_format(Path::new("notes.txt"), "hello"), None);
    }

    #[test]
    fn test_parse_json_records() {
        let json = r#"[
            {"id":"txn_1","merchant":"Acme Corp Payroll","category":"Salary","amount":5200.0,
             "type":"income","date":"2024-02-15T00:00:00.000Z"},
            {"id":"txn_2","merchant":"Netflix","category":"Entertainment","amount":15.99,
             "type":"subscription","date":"2024-02-02","isRecurring":true,"logo":"🎬"}
        ]"#;

        let txs = parse_json(json.as_bytes()).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].transaction_type, TransactionType::Income);
        assert_eq!(txs[0].date, date(2024, 2, 15));
        assert!(txs[1].is_recurring);
        assert_eq!(txs[1].logo.as_deref(), Some("🎬"));
    }

    #[test]
    fn test_parse_json_rejects_negative_amount() {
        let json = r#"[{"merchant":"Cafe","category":"Dining","amount":-4.5,"type":"expense","date":"2024-01-01"}]"#;
        let err = parse_json(json.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_parse_json_rejects_unknown_type() {
        let json = r#"[{"merchant":"Cafe","category":"Dining","amount":4.5,"type":"refund","date":"2024-01-01"}]"#;
        let err = parse_json(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Row 1"));
    }

    #[test]
    fn test_parse_csv_with_optional_columns() {
        let csv = "id,merchant,category,amount,type,date,is_recurring,logo\n\
                   txn_1,Whole Foods Market,Groceries,82.10,expense,2024-01-05,,\n\
                   ,Gym Membership,Health,49.99,expense,2024-01-02,true,🏋️\n\
                   txn_3,Odd Shop,,12.00,expense,2024-01-09,false,\n";

        let txs = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(txs.len(), 3);
        assert_eq!(txs[0].id, "txn_1");
        assert!(!txs[0].is_recurring);
        assert!(txs[1].id.starts_with("txn_"));
        assert!(txs[1].is_recurring);
        assert_eq!(txs[1].logo.as_deref(), Some("🏋️"));
        assert_eq!(txs[2].category, FALLBACK_CATEGORY);
    }

    #[test]
    fn test_generated_ids_are_stable() {
        let d = date(2024, 1, 2);
        assert_eq!(generate_id(&d, "Gym", 49.99), generate_id(&d, "Gym", 49.99));
        assert_ne!(generate_id(&d, "Gym", 49.99), generate_id(&d, "Gym", 50.0));
    }

    #[test]
    fn test_csv_write_then_read() {
        let txs = vec![
            Transaction::new("a", "Spotify", "Entertainment", 9.99, TransactionType::Subscription, date(2024, 1, 3))
                .recurring()
                .with_logo("🎵"),
            Transaction::new("b", "Uber", "Transportation", 23.4, TransactionType::Expense, date(2024, 1, 4)),
        ];

        let mut buf = Vec::new();
        write_csv(&mut buf, &txs).unwrap();
        let parsed = parse_csv(buf.as_slice()).unwrap();
        assert_eq!(parsed, txs);
    }

    #[test]
    fn test_provider_normalization() {
        let payload = r#"{"data": [
            {"id":"p1","description":"NETFLIX.COM","amount":"-15.99",
             "class":{"code":"payment"},"subClass":{"code":"entertainment"},
             "postDate":"2024-02-03T00:00:00Z"},
            {"id":"p2","description":"ACME PAYROLL","amount":"5200.00",
             "class":{"code":"income"},"transactionDate":"2024-02-15"},
            {"description":"Corner Store","amount":-8.5,"class":{"code":"mystery"},
             "postDate":"2024-02-04"},
            {"id":"p4","description":"No Date","amount":"-1.00"}
        ]}"#;

        let normalizer = ProviderNormalizer::new().unwrap();
        let txs = normalizer.parse_json(payload.as_bytes()).unwrap();
        assert_eq!(txs.len(), 3);

        assert_eq!(txs[0].transaction_type, TransactionType::Subscription);
        assert!(txs[0].is_recurring);
        assert_eq!(txs[0].category, "Entertainment");
        assert_eq!(txs[0].amount, 15.99);

        assert_eq!(txs[1].transaction_type, TransactionType::Income);
        assert_eq!(txs[1].category, "Salary");
        assert_eq!(txs[1].date, date(2024, 2, 15));

        assert_eq!(txs[2].id, "txn_2");
        assert_eq!(txs[2].transaction_type, TransactionType::Expense);
        assert_eq!(txs[2].category, FALLBACK_CATEGORY);
    }

    #[test]
    fn test_positive_subscription_keyword_is_still_income() {
        let normalizer = ProviderNormalizer::new().unwrap();
        let record = ProviderTransaction {
            id: None,
            description: Some("Apple refund".into()),
            amount: Some(ProviderAmount::Number(4.99)),
            class: None,
            sub_class: None,
            post_date: Some("2024-01-01".into()),
            transaction_date: None,
        };

        let txs = normalizer.normalize(&[record]);
        assert_eq!(txs[0].transaction_type, TransactionType::Income);
        assert!(txs[0].is_recurring);
        assert_eq!(txs[0].merchant, "Apple refund");
    }

    #[test]
    fn test_subscription_keywords_case_insensitive() {
        let normalizer = ProviderNormalizer::new().unwrap();
        assert!(normalizer.is_subscription("Amazon PRIME Membership"));
        assert!(normalizer.is_subscription("Anytime FITNESS"));
        assert!(!normalizer.is_subscription("Whole Foods"));
    }
}
