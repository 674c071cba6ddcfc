use std::sync::LazyLock;

use plates::PlateDraft;
use regex::Regex;

use crate::error::AppError::{self, MalformedPayload};

// plain digits with an optional fraction: no sign, exponent or bare leading dot
static PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("price pattern is valid"));

/// Rejects drafts the dashboard could not render: blank names or prices that are not decimals.
pub fn validate_draft(draft: &PlateDraft) -> Result<(), AppError> {
    if draft.name.trim().is_empty() {
        return Err(MalformedPayload("name must not be empty".to_string()));
    }

    let price = draft.price.trim();
    if !PRICE.is_match(price) {
        return Err(MalformedPayload(format!("price {price:?} is not a decimal")));
    }

    Ok(())
}
