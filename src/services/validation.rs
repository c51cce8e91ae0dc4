use std::str::FromStr;

use garde::Validate;
use tracing::warn;

use crate::models::form::FieldErrorMap;
use crate::models::product::{ProductDraft, ProductField};

/// Longest accepted product name, in characters.
const MAX_NAME_CHARS: usize = 100;

/// Longest accepted description, in characters.
const MAX_DESCRIPTION_CHARS: usize = 500;

/// Candidate record checked by garde. Field names are the wire keys so
/// report paths map straight back onto [`ProductField`].
#[derive(Debug, Validate)]
struct ProductCandidate<'a> {
    #[garde(custom(check_name))]
    pname: &'a str,

    #[garde(custom(check_category))]
    pcat: &'a str,

    #[garde(custom(check_price))]
    price: &'a str,

    #[garde(custom(check_quantity))]
    qty: &'a str,

    #[garde(custom(check_description))]
    descr: &'a str,
}

/// Validate a draft against the product business rules.
///
/// Pure: the same draft always yields the same map. Covers:
/// - name required, bounded length
/// - category required
/// - price required, numeric, greater than zero
/// - quantity required, whole number, at least 1
/// - description bounded length
///
/// The image is not inspected here; see [`crate::services::image`].
pub fn validate_product(draft: &ProductDraft) -> FieldErrorMap {
    let candidate = ProductCandidate {
        pname: &draft.name,
        pcat: &draft.category_id,
        price: &draft.price,
        qty: &draft.quantity,
        descr: &draft.description,
    };

    let mut errors = FieldErrorMap::new();
    if let Err(report) = candidate.validate() {
        for (path, error) in report.iter() {
            let key = path.to_string();
            match ProductField::from_str(&key) {
                Ok(field) => errors.insert(field, error.message()),
                Err(_) => warn!(path = %key, "Validation error for unknown product field"),
            }
        }
    }
    errors
}

/// Validate one field of the draft. Returns that field's message, if any.
pub fn validate_field(draft: &ProductDraft, field: ProductField) -> Option<String> {
    validate_product(draft).get(field).map(str::to_string)
}

fn check_name(value: &str, _ctx: &()) -> garde::Result {
    let value = value.trim();
    if value.is_empty() {
        return Err(garde::Error::new("Product name is required"));
    }
    if value.chars().count() > MAX_NAME_CHARS {
        return Err(garde::Error::new(format!(
            "Product name must be at most {} characters",
            MAX_NAME_CHARS
        )));
    }
    Ok(())
}

fn check_category(value: &str, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("Category is required"));
    }
    Ok(())
}

fn check_price(value: &str, _ctx: &()) -> garde::Result {
    let value = value.trim();
    if value.is_empty() {
        return Err(garde::Error::new("Price is required"));
    }
    match value.parse::<f64>() {
        Ok(price) if !price.is_finite() => Err(garde::Error::new("Price must be a number")),
        Ok(price) if price > 0.0 => Ok(()),
        Ok(_) => Err(garde::Error::new("Price must be greater than zero")),
        Err(_) => Err(garde::Error::new("Price must be a number")),
    }
}

fn check_quantity(value: &str, _ctx: &()) -> garde::Result {
    let value = value.trim();
    if value.is_empty() {
        return Err(garde::Error::new("Quantity is required"));
    }
    match value.parse::<i64>() {
        Ok(qty) if qty >= 1 => Ok(()),
        Ok(_) => Err(garde::Error::new("Quantity must be at least 1")),
        Err(_) => Err(garde::Error::new("Quantity must be a whole number")),
    }
}

fn check_description(value: &str, _ctx: &()) -> garde::Result {
    if value.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(garde::Error::new(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_CHARS
        )));
    }
    Ok(())
}
