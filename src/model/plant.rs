//! Catalog item records and the add-plant payload.
//!
//! `Plant` mirrors the JSON served by the catalog API. `PlantDraft` is the raw
//! add-plant form; `PlantDraft::validate` turns it into a `NewPlant` payload or
//! a list of field errors.

use crate::model::error::{FieldError, FieldName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum plant name length accepted by the form.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum description length accepted by the form.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Stock above this is "In Stock"; 1..=this is "Low Stock".
pub const LOW_STOCK_THRESHOLD: u32 = 20;

// ===== CareLevel / PlantSize =====

/// How much attention a plant needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CareLevel {
    /// Low maintenance.
    #[default]
    Easy,
    /// Regular attention.
    Medium,
    /// Demanding.
    Hard,
}

impl FromStr for CareLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(CareLevel::Easy),
            "medium" => Ok(CareLevel::Medium),
            "hard" => Ok(CareLevel::Hard),
            other => Err(format!("Unknown care level: {other}")),
        }
    }
}

/// Mature plant size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlantSize {
    /// Tabletop.
    Small,
    /// Floor pot.
    #[default]
    Medium,
    /// Tree or large shrub.
    Large,
}

impl FromStr for PlantSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(PlantSize::Small),
            "medium" => Ok(PlantSize::Medium),
            "large" => Ok(PlantSize::Large),
            other => Err(format!("Unknown size: {other}")),
        }
    }
}

// ===== StockStatus =====

/// Availability label derived from a stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    /// More than [`LOW_STOCK_THRESHOLD`] units.
    InStock,
    /// Between 1 and [`LOW_STOCK_THRESHOLD`] units.
    LowStock,
    /// Zero units.
    OutOfStock,
}

impl StockStatus {
    /// Classify a stock count.
    pub fn for_stock(stock: u32) -> Self {
        if stock > LOW_STOCK_THRESHOLD {
            StockStatus::InStock
        } else if stock > 0 {
            StockStatus::LowStock
        } else {
            StockStatus::OutOfStock
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

// ===== Plant =====

/// A catalog item as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawPlant")]
pub struct Plant {
    /// Server-assigned id (`_id` or `id` on the wire).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price in rupees.
    pub price: f64,
    /// Category names.
    pub categories: Vec<String>,
    /// Units in stock.
    pub stock: u32,
    /// Image URL.
    pub image: String,
    /// Free-text description.
    pub description: String,
    /// Care level.
    pub care_level: CareLevel,
    /// Mature size.
    pub size: PlantSize,
    /// Creation timestamp, when the server sends one.
    pub created_at: Option<DateTime<Utc>>,
}

impl Plant {
    /// Availability derived from `stock`.
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::for_stock(self.stock)
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - ₹{} [{}] ({}, {})",
            self.name,
            self.price,
            self.categories.join(", "),
            self.stock_status().label(),
            self.stock
        )
    }
}

/// Wire shape accepted on input: tolerates `_id` and a legacy single `category`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlant {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    id: String,
    name: String,
    price: f64,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    stock: u32,
    #[serde(default)]
    image: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    care_level: CareLevel,
    #[serde(default)]
    size: PlantSize,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<RawPlant> for Plant {
    fn from(raw: RawPlant) -> Self {
        let mut categories = raw.categories;
        if categories.is_empty() {
            categories.extend(raw.category.filter(|c| !c.is_empty()));
        }
        Plant {
            id: raw.id,
            name: raw.name,
            price: raw.price,
            categories,
            stock: raw.stock,
            image: raw.image,
            description: raw.description,
            care_level: raw.care_level,
            size: raw.size,
            created_at: raw.created_at,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

// ===== Response envelopes =====

/// `GET /api/plants` response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlantPage {
    /// Items on the requested page.
    pub data: Vec<Plant>,
    /// Total matches across all pages.
    pub count: u64,
}

/// Generic `{ "data": T }` envelope used by the other endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataEnvelope<T> {
    /// Wrapped payload.
    pub data: T,
}

// ===== NewPlant / PlantDraft =====

/// Validated `POST /api/plants` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlant {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Positive price.
    pub price: f64,
    /// At least one category.
    pub categories: Vec<String>,
    /// Units in stock.
    pub stock: u32,
    /// Non-empty image URL.
    pub image: String,
    /// Optional description, possibly empty.
    pub description: String,
    /// Care level.
    pub care_level: CareLevel,
    /// Mature size.
    pub size: PlantSize,
}

/// Raw add-plant form input. All numeric fields are unparsed text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlantDraft {
    /// Name as typed.
    pub name: String,
    /// Price text.
    pub price: String,
    /// Selected categories.
    pub categories: Vec<String>,
    /// Stock text; empty means zero.
    pub stock: String,
    /// Image URL as typed.
    pub image: String,
    /// Description as typed.
    pub description: String,
    /// Selected care level.
    pub care_level: CareLevel,
    /// Selected size.
    pub size: PlantSize,
}

impl PlantDraft {
    /// Validate the draft and build the request payload.
    ///
    /// Collects every failing field rather than stopping at the first, so the
    /// form can mark all of them at once.
    pub fn validate(&self) -> Result<NewPlant, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new(FieldName::Name, "Plant name is required"));
        } else if self.name.chars().count() > MAX_NAME_LEN {
            errors.push(FieldError::new(
                FieldName::Name,
                format!("Plant name cannot exceed {MAX_NAME_LEN} characters"),
            ));
        }

        let price = match self.price.trim() {
            "" => {
                errors.push(FieldError::new(FieldName::Price, "Price is required"));
                None
            }
            raw => match raw.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
                _ => {
                    errors.push(FieldError::new(
                        FieldName::Price,
                        "Price must be a positive number",
                    ));
                    None
                }
            },
        };

        let categories: Vec<String> = self
            .categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        if categories.is_empty() {
            errors.push(FieldError::new(
                FieldName::Categories,
                "At least one category is required",
            ));
        }

        if self.image.trim().is_empty() {
            errors.push(FieldError::new(FieldName::Image, "Image URL is required"));
        }

        let stock = match self.stock.trim() {
            "" => Some(0),
            raw => match raw.parse::<u32>() {
                Ok(value) => Some(value),
                Err(_) => {
                    errors.push(FieldError::new(
                        FieldName::Stock,
                        "Stock must be a positive number",
                    ));
                    None
                }
            },
        };

        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            errors.push(FieldError::new(
                FieldName::Description,
                format!("Description cannot exceed {MAX_DESCRIPTION_LEN} characters"),
            ));
        }

        match (price, stock) {
            (Some(price), Some(stock)) if errors.is_empty() => Ok(NewPlant {
                name: name.to_string(),
                price,
                categories,
                stock,
                image: self.image.trim().to_string(),
                description: self.description.clone(),
                care_level: self.care_level,
                size: self.size,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[path = "plant_tests.rs"]
mod tests;
