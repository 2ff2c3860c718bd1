use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::categories::dtos::CategoryResponseDto;

/// Fractional digits kept for monetary amounts (`NUMERIC(10, 2)`)
pub const AMOUNT_SCALE: u32 = 2;

/// Exclusive magnitude bound for `NUMERIC(10, 2)`: eight integer digits
const AMOUNT_LIMIT: i64 = 100_000_000;

/// Request DTO for creating or fully replacing a transaction
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TransactionRequestDto {
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,

    /// Monetary amount with at most two decimal places
    #[validate(custom(function = "validate_amount"))]
    #[schema(value_type = f64, example = 50.25)]
    pub amount: Decimal,

    /// Free-form kind, usually `debit` or `credit`
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type must not be empty"))]
    pub kind: String,

    pub category_id: i32,

    pub user_id: i32,

    /// Defaults to the creation time; omitted on update keeps the stored date
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Amount must fit `NUMERIC(10, 2)` without rounding
pub fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(ValidationError::new("amount_scale").with_message(Cow::Borrowed(
            "amount must have at most 2 decimal places",
        )));
    }

    if amount.abs() >= Decimal::new(AMOUNT_LIMIT, 0) {
        return Err(ValidationError::new("amount_range").with_message(Cow::Borrowed(
            "amount must be less than 100000000 in magnitude",
        )));
    }

    Ok(())
}

/// Response DTO for a transaction with its category embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponseDto {
    pub id: i32,
    pub description: String,
    /// Serialized as a JSON number, never a string
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 50.25)]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: String,
    pub category_id: i32,
    pub user_id: i32,
    pub date: DateTime<Utc>,
    pub category_rel: CategoryResponseDto,
}
