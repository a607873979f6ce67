use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single item as declared by the caller. Everything except the
/// unit amount is optional; projection fills in the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineItem {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Unit amount in cents.
    pub amount: Option<i32>,
    pub quantity: Option<i32>,
    pub code: Option<String>,
}

/// A line item after projection: every field resolved, ready to be
/// shaped for whichever upstream surface needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub name: String,
    pub description: String,
    /// Unit amount in cents.
    pub amount: i32,
    pub quantity: i32,
    pub code: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("either items or a total amount must be provided")]
    MissingCartData,
}

/// The caller's cart: declared items, or a flat fallback amount that
/// becomes a single synthetic line.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    pub items: Vec<LineItem>,
    pub fallback_amount: Option<i32>,
}

impl Cart {
    pub fn new(items: Vec<LineItem>, fallback_amount: Option<i32>) -> Self {
        Self {
            items,
            fallback_amount,
        }
    }

    /// Normalize the cart into provider-neutral lines.
    ///
    /// Defaults: name "Item", description falls back to the name,
    /// quantity 1, code a fresh UUID. An empty cart with a fallback
    /// amount yields exactly one synthetic "Pagamento" line with code
    /// "item-1"; an empty cart without one is a request error.
    pub fn project(&self) -> Result<Vec<CartLine>, CartError> {
        if !self.items.is_empty() {
            return Ok(self
                .items
                .iter()
                .map(|item| {
                    let name = item.name.clone().unwrap_or_else(|| "Item".to_string());
                    CartLine {
                        description: item.description.clone().unwrap_or_else(|| name.clone()),
                        name,
                        amount: item.amount.unwrap_or(0),
                        quantity: item.quantity.unwrap_or(1),
                        code: item
                            .code
                            .clone()
                            .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    }
                })
                .collect());
        }

        let amount = self.fallback_amount.ok_or(CartError::MissingCartData)?;
        Ok(vec![CartLine {
            name: "Pagamento".to_string(),
            description: "Pagamento".to_string(),
            amount,
            quantity: 1,
            code: "item-1".to_string(),
        }])
    }

    /// The payable total: sum of unit amount times quantity over the
    /// declared items, or the fallback amount for an empty cart.
    pub fn total(&self) -> Option<i32> {
        if self.items.is_empty() {
            return self.fallback_amount;
        }
        Some(
            self.items
                .iter()
                .map(|i| i.amount.unwrap_or(0) * i.quantity.unwrap_or(1))
                .sum(),
        )
    }

    /// The total the Payment Link surface quotes: a caller-declared
    /// amount wins over the item sum. Kept separate from `total` on
    /// purpose; the two surfaces have different data at hand.
    pub fn quoted_total(&self) -> i32 {
        self.fallback_amount
            .or_else(|| self.total())
            .unwrap_or(0)
    }
}
