use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::features::transactions::dtos::validate_amount;
use crate::features::transactions::models::TransactionFields;

pub const CATEGORIES_FILE: &str = "categories.json";
pub const TRANSACTIONS_FILE: &str = "transactions.json";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Category '{0}' is listed more than once")]
    DuplicateCategory(String),

    #[error("Transaction '{description}' references unknown category '{category}'")]
    UnknownCategory {
        description: String,
        category: String,
    },

    #[error("Transaction '{description}' is invalid: {reason}")]
    InvalidTransaction { description: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One entry of `transactions.json`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedTransaction {
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: String,
    /// Category referenced by name
    pub category: String,
    pub user_id: i32,
    #[serde(deserialize_with = "deserialize_iso8601")]
    pub date: DateTime<Utc>,
}

impl SeedTransaction {
    /// Same field rules the API applies to a request body
    fn check_fields(&self) -> Result<(), SeedError> {
        let invalid = |reason: String| SeedError::InvalidTransaction {
            description: self.description.clone(),
            reason,
        };

        if self.description.is_empty() {
            return Err(invalid("description must not be empty".to_string()));
        }
        if self.kind.is_empty() {
            return Err(invalid("type must not be empty".to_string()));
        }
        validate_amount(&self.amount).map_err(|e| {
            invalid(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            )
        })
    }
}

/// Accepts RFC 3339 timestamps as well as offset-less ISO-8601 date-times and
/// plain dates; values without an offset are taken as UTC.
fn deserialize_iso8601<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_iso8601(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid ISO-8601 date '{}'", raw))
    })
}

fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// The two bulk-load documents: category names and transactions that reference them by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedDocument {
    pub categories: Vec<String>,
    pub transactions: Vec<SeedTransaction>,
}

impl SeedDocument {
    /// Read `categories.json` and `transactions.json` from `dir`
    pub fn load(dir: &Path) -> Result<Self, SeedError> {
        Ok(Self {
            categories: read_json(&dir.join(CATEGORIES_FILE))?,
            transactions: read_json(&dir.join(TRANSACTIONS_FILE))?,
        })
    }

    /// Check the document is self-consistent before anything touches the database
    pub fn validate(&self) -> Result<(), SeedError> {
        let mut seen = HashSet::new();
        for name in &self.categories {
            if !seen.insert(name.as_str()) {
                return Err(SeedError::DuplicateCategory(name.clone()));
            }
        }

        for transaction in &self.transactions {
            transaction.check_fields()?;

            if !seen.contains(transaction.category.as_str()) {
                return Err(SeedError::UnknownCategory {
                    description: transaction.description.clone(),
                    category: transaction.category.clone(),
                });
            }
        }

        Ok(())
    }

    /// Turn every seed transaction into insertable fields using `category_ids` (name → id)
    pub fn resolve(
        &self,
        category_ids: &HashMap<String, i32>,
    ) -> Result<Vec<TransactionFields>, SeedError> {
        self.transactions
            .iter()
            .map(|t| {
                let category_id = category_ids.get(&t.category).copied().ok_or_else(|| {
                    SeedError::UnknownCategory {
                        description: t.description.clone(),
                        category: t.category.clone(),
                    }
                })?;

                Ok(TransactionFields {
                    description: t.description.clone(),
                    amount: t.amount,
                    kind: t.kind.clone(),
                    category_id,
                    user_id: t.user_id,
                    date: Some(t.date),
                })
            })
            .collect()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SeedError> {
    let raw = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
