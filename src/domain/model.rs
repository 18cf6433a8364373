use crate::utils::error::ImportError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Customer group assigned to every imported customer.
pub const DEFAULT_GROUP_ID: u32 = 1;

pub const EMAIL_FIELD: &str = "emailaddress";
pub const FIRST_NAME_FIELD: &str = "fname";
pub const LAST_NAME_FIELD: &str = "lname";

/// Keys every raw record must carry before it can be mapped.
pub const REQUIRED_FIELDS: [&str; 3] = [EMAIL_FIELD, FIRST_NAME_FIELD, LAST_NAME_FIELD];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    Csv,
    Json,
    Xml,
}

impl ImportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportFormat::Csv => "csv",
            ImportFormat::Json => "json",
            ImportFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A format token that names none of the known formats.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown import format '{0}'")]
pub struct UnknownFormat(pub String);

impl FromStr for ImportFormat {
    type Err = UnknownFormat;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "csv" => Ok(ImportFormat::Csv),
            "json" => Ok(ImportFormat::Json),
            "xml" => Ok(ImportFormat::Xml),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

/// One source row or object, keyed by column name in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based position among the records yielded by the reader.
    pub index: usize,
    /// Source line, when the format has lines.
    pub line: Option<u64>,
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new(index: usize, line: Option<u64>) -> Self {
        Self {
            index,
            line,
            fields: Vec::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    /// Later duplicates of a key shadow earlier ones.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let position = self.fields.iter().rposition(|(k, _)| k == key)?;
        let (_, value) = self.fields.remove(position);
        self.fields.retain(|(k, _)| k != key);
        Some(value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// First entry of `required` that this record does not carry.
    pub fn first_missing<'a>(&self, required: &[&'a str]) -> Option<&'a str> {
        required.iter().copied().find(|key| !self.contains_key(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Website and store scope of a run, resolved once and passed down explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreContext {
    pub website_id: u32,
    pub store_id: u32,
}

impl Default for StoreContext {
    fn default() -> Self {
        Self {
            website_id: 1,
            store_id: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub website_id: u32,
    pub store_id: u32,
    pub group_id: u32,
}

/// Customer entity as held by a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<u64>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub website_id: u32,
    pub store_id: u32,
    pub group_id: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Overwrites every importable field; identity and timestamps are left alone.
    pub fn apply(&mut self, record: &CustomerRecord) {
        self.email = record.email.clone();
        self.first_name = record.first_name.clone();
        self.last_name = record.last_name.clone();
        self.website_id = record.website_id;
        self.store_id = record.store_id;
        self.group_id = record.group_id;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Created,
    Updated,
}

#[derive(Debug)]
pub struct RecordFailure {
    pub index: usize,
    pub line: Option<u64>,
    pub email: Option<String>,
    pub error: ImportError,
}

impl fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}", self.index)?;
        if let Some(line) = self.line {
            write!(f, " (line {})", line)?;
        }
        if let Some(email) = &self.email {
            write!(f, " <{}>", email)?;
        }
        write!(f, ": {}", self.error)
    }
}

#[derive(Debug)]
pub enum RecordOutcome {
    Saved(SaveKind),
    Failed(RecordFailure),
}

#[derive(Debug)]
pub struct ImportSummary {
    pub profile: String,
    pub format: ImportFormat,
    pub created: usize,
    pub updated: usize,
    pub failures: Vec<RecordFailure>,
}

impl ImportSummary {
    pub fn new(profile: impl Into<String>, format: ImportFormat) -> Self {
        Self {
            profile: profile.into(),
            format,
            created: 0,
            updated: 0,
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Saved(SaveKind::Created) => self.created += 1,
            RecordOutcome::Saved(SaveKind::Updated) => self.updated += 1,
            RecordOutcome::Failed(failure) => self.failures.push(failure),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.created + self.updated
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn processed(&self) -> usize {
        self.succeeded() + self.failed()
    }

    /// True when the run completed without a single record failure.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_lookup_and_duplicates() {
        let mut raw = RawRecord::new(1, Some(2));
        raw.insert("emailaddress", "a@b.com");
        raw.insert("fname", "Ann");
        raw.insert("fname", "Anne");

        assert_eq!(raw.get("emailaddress"), Some("a@b.com"));
        assert_eq!(raw.get("fname"), Some("Anne"));
        assert_eq!(raw.get("lname"), None);
        assert_eq!(raw.first_missing(&REQUIRED_FIELDS), Some("lname"));
        assert_eq!(raw.keys().collect::<Vec<_>>(), ["emailaddress", "fname", "fname"]);

        assert_eq!(raw.remove("fname"), Some("Anne".to_string()));
        assert!(!raw.contains_key("fname"));
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn test_format_tokens_are_case_sensitive() {
        assert_eq!("csv".parse::<ImportFormat>().unwrap(), ImportFormat::Csv);
        assert_eq!("json".parse::<ImportFormat>().unwrap(), ImportFormat::Json);
        assert_eq!("xml".parse::<ImportFormat>().unwrap(), ImportFormat::Xml);
        assert!("CSV".parse::<ImportFormat>().is_err());
        assert!("txt".parse::<ImportFormat>().is_err());
    }

    #[test]
    fn test_unknown_format_error_names_only_the_token() {
        let err = "txt".parse::<ImportFormat>().unwrap_err();
        assert_eq!(err, UnknownFormat("txt".to_string()));
        assert_eq!(err.to_string(), "unknown import format 'txt'");
    }

    #[test]
    fn test_customer_apply_keeps_identity() {
        let mut customer = Customer {
            id: Some(7),
            email: "old@b.com".to_string(),
            group_id: 4,
            ..Default::default()
        };
        let record = CustomerRecord {
            email: "a@b.com".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            website_id: 2,
            store_id: 3,
            group_id: DEFAULT_GROUP_ID,
        };

        customer.apply(&record);

        assert_eq!(customer.id, Some(7));
        assert_eq!(customer.email, "a@b.com");
        assert_eq!(customer.website_id, 2);
        assert_eq!(customer.store_id, 3);
        assert_eq!(customer.group_id, 1);
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = ImportSummary::new("weekly-csv", ImportFormat::Csv);
        summary.record(RecordOutcome::Saved(SaveKind::Created));
        summary.record(RecordOutcome::Saved(SaveKind::Updated));
        summary.record(RecordOutcome::Failed(RecordFailure {
            index: 3,
            line: Some(4),
            email: None,
            error: ImportError::EmptyField {
                field: EMAIL_FIELD.to_string(),
            },
        }));

        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.processed(), 3);
        assert!(!summary.is_clean());
        assert_eq!(
            summary.failures[0].to_string(),
            "record 3 (line 4): Required field 'emailaddress' is empty"
        );
    }
}
