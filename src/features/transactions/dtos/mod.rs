mod transaction_dto;

pub use transaction_dto::{validate_amount, TransactionRequestDto, TransactionResponseDto};
