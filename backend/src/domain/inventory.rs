//! Inventory items and the coercion rules applied to incoming item fields.
//!
//! Clients send loosely typed JSON (quantities typed into text boxes arrive as
//! strings). [`ItemDraft::try_from_input`] turns those raw values into a
//! validated draft:
//!
//! - `quantity` accepts integers, floats (truncated toward zero) and numeric
//!   strings; it is required.
//! - `price` accepts numbers and numeric strings; anything else becomes `0`.
//! - negative quantities or prices are rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Largest quantity accepted; matches the width of the storage column.
pub const MAX_QUANTITY: u32 = i32::MAX as u32;

/// Identifier of an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Reasons an item payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemValidationError {
    /// Name was missing or blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Quantity was absent or null.
    #[error("quantity is required")]
    MissingQuantity,
    /// Quantity could not be read as a number.
    #[error("quantity must be a whole number")]
    InvalidQuantity,
    /// Quantity was below zero.
    #[error("quantity must not be negative")]
    NegativeQuantity,
    /// Quantity exceeded [`MAX_QUANTITY`].
    #[error("quantity must be at most {max}")]
    QuantityTooLarge {
        /// Upper bound.
        max: u32,
    },
    /// Price was below zero.
    #[error("price must not be negative")]
    NegativePrice,
}

impl ItemValidationError {
    /// Stable code reported alongside the message.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::MissingQuantity => "missing_quantity",
            Self::InvalidQuantity => "invalid_quantity",
            Self::NegativeQuantity => "negative_quantity",
            Self::QuantityTooLarge { .. } => "quantity_too_large",
            Self::NegativePrice => "negative_price",
        }
    }
}

/// Raw item fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemInput {
    /// Display name.
    pub name: Option<String>,
    /// Free-text category.
    pub category: Option<String>,
    /// Quantity in any JSON shape.
    pub quantity: Option<Value>,
    /// Unit price in any JSON shape.
    pub price: Option<Value>,
}

/// Validated item fields, ready to be stored.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `quantity` is at most [`MAX_QUANTITY`].
/// - `price` is finite and not negative.
///
/// # Examples
/// ```
/// use inventory_backend::domain::{ItemDraft, ItemInput};
/// use serde_json::json;
///
/// let draft = ItemDraft::try_from_input(ItemInput {
///     name: Some("Cotton Fabric".into()),
///     category: Some("Fabric".into()),
///     quantity: Some(json!("50")),
///     price: Some(json!(4000)),
/// })
/// .unwrap();
/// assert_eq!(draft.quantity(), 50);
/// assert_eq!(draft.price(), 4000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    name: String,
    category: String,
    quantity: u32,
    price: f64,
}

impl ItemDraft {
    /// Build a draft from already typed values.
    pub fn new(
        name: &str,
        category: &str,
        quantity: u32,
        price: f64,
    ) -> Result<Self, ItemValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ItemValidationError::EmptyName);
        }
        if quantity > MAX_QUANTITY {
            return Err(ItemValidationError::QuantityTooLarge { max: MAX_QUANTITY });
        }
        Ok(Self {
            name: name.to_owned(),
            category: category.trim().to_owned(),
            quantity,
            price: normalise_price(price)?,
        })
    }

    /// Coerce loosely typed client input into a draft.
    pub fn try_from_input(input: ItemInput) -> Result<Self, ItemValidationError> {
        let quantity = coerce_quantity(input.quantity.as_ref())?;
        let price = coerce_price(input.price.as_ref());
        Self::new(
            input.name.as_deref().unwrap_or_default(),
            input.category.as_deref().unwrap_or_default(),
            quantity,
            price,
        )
    }

    /// Item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Item category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Units in stock.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }
}

fn coerce_quantity(raw: Option<&Value>) -> Result<u32, ItemValidationError> {
    match raw {
        None | Some(Value::Null) => Err(ItemValidationError::MissingQuantity),
        Some(Value::Number(number)) => match number.as_i64() {
            Some(whole) => whole_quantity(whole),
            None => number
                .as_f64()
                .ok_or(ItemValidationError::InvalidQuantity)
                .and_then(fractional_quantity),
        },
        Some(Value::String(text)) => {
            let text = text.trim();
            if let Ok(whole) = text.parse::<i64>() {
                return whole_quantity(whole);
            }
            text.parse::<f64>()
                .map_err(|_| ItemValidationError::InvalidQuantity)
                .and_then(fractional_quantity)
        }
        Some(_) => Err(ItemValidationError::InvalidQuantity),
    }
}

fn whole_quantity(value: i64) -> Result<u32, ItemValidationError> {
    if value < 0 {
        return Err(ItemValidationError::NegativeQuantity);
    }
    u32::try_from(value)
        .ok()
        .filter(|quantity| *quantity <= MAX_QUANTITY)
        .ok_or(ItemValidationError::QuantityTooLarge { max: MAX_QUANTITY })
}

fn fractional_quantity(value: f64) -> Result<u32, ItemValidationError> {
    if !value.is_finite() {
        return Err(ItemValidationError::InvalidQuantity);
    }
    let truncated = value.trunc();
    if truncated < 0.0 {
        return Err(ItemValidationError::NegativeQuantity);
    }
    if truncated > f64::from(MAX_QUANTITY) {
        return Err(ItemValidationError::QuantityTooLarge { max: MAX_QUANTITY });
    }
    // In range and integral after the checks above.
    Ok(truncated as u32)
}

fn coerce_price(raw: Option<&Value>) -> f64 {
    let parsed = match raw {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|price| price.is_finite()).unwrap_or(0.0)
}

fn normalise_price(price: f64) -> Result<f64, ItemValidationError> {
    if !price.is_finite() {
        return Ok(0.0);
    }
    if price < 0.0 {
        return Err(ItemValidationError::NegativePrice);
    }
    // Collapse negative zero so it never serialises as `-0.0`.
    Ok(price + 0.0)
}

/// A stored inventory item.
///
/// Serialises as `{id, name, category, quantity, price}`; the same shape is
/// embedded in history entries as the item snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    id: ItemId,
    #[schema(example = "Cotton Fabric")]
    name: String,
    #[schema(example = "Fabric")]
    category: String,
    #[schema(example = 50)]
    quantity: u32,
    #[schema(example = 4000.0)]
    price: f64,
}

impl InventoryItem {
    /// Combine an identifier with validated fields.
    #[must_use]
    pub fn new(id: ItemId, draft: ItemDraft) -> Self {
        let ItemDraft {
            name,
            category,
            quantity,
            price,
        } = draft;
        Self {
            id,
            name,
            category,
            quantity,
            price,
        }
    }

    /// Item identifier.
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Item category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Units in stock.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }
}
