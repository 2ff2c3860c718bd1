use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::transactions::dtos::{TransactionRequestDto, TransactionResponseDto};

/// A transaction row joined with the name of its category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TransactionWithCategory {
    pub id: i32,
    pub description: String,
    pub amount: Decimal,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub category_id: i32,
    pub user_id: i32,
    pub date: DateTime<Utc>,
    pub category_name: String,
}

/// Column values written by an insert or a full update.
///
/// `date: None` means "now" on insert and "keep the stored date" on update.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub description: String,
    pub amount: Decimal,
    pub kind: String,
    pub category_id: i32,
    pub user_id: i32,
    pub date: Option<DateTime<Utc>>,
}

impl From<TransactionRequestDto> for TransactionFields {
    fn from(dto: TransactionRequestDto) -> Self {
        Self {
            description: dto.description,
            amount: dto.amount,
            kind: dto.kind,
            category_id: dto.category_id,
            user_id: dto.user_id,
            date: dto.date,
        }
    }
}

impl From<TransactionWithCategory> for TransactionResponseDto {
    fn from(t: TransactionWithCategory) -> Self {
        Self {
            id: t.id,
            description: t.description,
            amount: t.amount,
            kind: t.kind,
            category_id: t.category_id,
            user_id: t.user_id,
            date: t.date,
            category_rel: CategoryResponseDto {
                id: t.category_id,
                name: t.category_name,
            },
        }
    }
}
