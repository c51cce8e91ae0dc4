use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::models::image::ImageFile;

/// Fields of the product form, named by their wire keys.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum ProductField {
    #[serde(rename = "pname")]
    #[strum(serialize = "pname")]
    Name,

    #[serde(rename = "pcat")]
    #[strum(serialize = "pcat")]
    Category,

    #[serde(rename = "price")]
    #[strum(serialize = "price")]
    Price,

    #[serde(rename = "qty")]
    #[strum(serialize = "qty")]
    Quantity,

    #[serde(rename = "descr")]
    #[strum(serialize = "descr")]
    Description,

    #[serde(rename = "photo")]
    #[strum(serialize = "photo")]
    Image,
}

impl ProductField {
    /// Fields marked touched on a submit attempt.
    pub const REQUIRED: [ProductField; 5] = [
        ProductField::Name,
        ProductField::Category,
        ProductField::Price,
        ProductField::Quantity,
        ProductField::Image,
    ];

    pub fn is_text(self) -> bool {
        !matches!(self, ProductField::Image)
    }
}

/// In-progress product being created or edited.
///
/// Numeric fields are kept as the raw text the user typed so that
/// "required" and "not a number" can be reported separately.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category_id: String,
    pub price: String,
    pub quantity: String,
    pub description: String,
    pub seller_id: String,
    pub image: Option<ImageFile>,
}

impl ProductDraft {
    /// Empty draft for the create screen. Quantity starts at 1.
    pub fn new(seller_id: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            category_id: String::new(),
            price: String::new(),
            quantity: "1".to_string(),
            description: String::new(),
            seller_id: seller_id.into(),
            image: None,
        }
    }

    /// Draft pre-populated from a fetched record. The stored image stays remote.
    pub fn from_record(record: &ProductRecord, seller_id: impl Into<String>) -> Self {
        Self {
            name: record.name.clone(),
            category_id: record.category_id.clone(),
            price: record.price.clone(),
            quantity: record.quantity.clone(),
            description: record.description.clone(),
            seller_id: seller_id.into(),
            image: None,
        }
    }

    pub fn value(&self, field: ProductField) -> Option<&str> {
        match field {
            ProductField::Name => Some(&self.name),
            ProductField::Category => Some(&self.category_id),
            ProductField::Price => Some(&self.price),
            ProductField::Quantity => Some(&self.quantity),
            ProductField::Description => Some(&self.description),
            ProductField::Image => None,
        }
    }

    /// Set a text field. Returns false for the image field, which only
    /// changes through image selection.
    pub fn set(&mut self, field: ProductField, value: String) -> bool {
        let slot = match field {
            ProductField::Name => &mut self.name,
            ProductField::Category => &mut self.category_id,
            ProductField::Price => &mut self.price,
            ProductField::Quantity => &mut self.quantity,
            ProductField::Description => &mut self.description,
            ProductField::Image => return false,
        };
        *slot = value;
        true
    }
}

/// Product as returned by `GET api/products/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "pname")]
    pub name: String,

    #[serde(rename = "pcat", deserialize_with = "string_or_number")]
    pub category_id: String,

    #[serde(deserialize_with = "string_or_number")]
    pub price: String,

    #[serde(rename = "qty", deserialize_with = "string_or_number")]
    pub quantity: String,

    #[serde(rename = "descr", default)]
    pub description: String,

    /// Stored image file name, served under `images/`
    #[serde(default)]
    pub photo: Option<String>,
}

/// Selectable category from `GET api/category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "catid", deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(rename = "catname")]
    pub display_name: String,
}

/// The backend is loose about numeric columns: accept `"50"`, `50` or `null`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
