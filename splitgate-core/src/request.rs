use crate::cart::{Cart, LineItem};
use crate::customer::Customer;
use crate::payment::{Boleto, CreditCard, DebitCard, PaymentMethod, Pix};
use crate::split::SplitPlan;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The canonical description of a sale, shared by every payload
/// adapter. Each upstream surface consumes the fields it needs and
/// ignores the rest; tenant identity and credentials live outside
/// this model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Caller-side order identifier.
    pub code: Option<String>,
    /// Flat total in cents; used when `items` is empty, and preferred
    /// by the Payment Link surface as the quoted total.
    pub amount: Option<i32>,

    pub customer_id: Option<String>,
    pub customer: Option<Customer>,

    #[serde(default)]
    pub items: Vec<LineItem>,

    pub payment_method: Option<PaymentMethod>,
    pub credit_card: Option<CreditCard>,
    pub debit_card: Option<DebitCard>,
    pub pix: Option<Pix>,
    pub boleto: Option<Boleto>,

    #[serde(default)]
    pub split: SplitPlan,

    pub closed: Option<bool>,
    pub shipping: Option<Shipping>,
    pub metadata: Option<HashMap<String, String>>,

    /// Payment Link installment ceiling.
    pub installments: Option<i32>,
    /// Invoice descriptor, truncated to 13 characters on the wire.
    pub statement_descriptor: Option<String>,
}

impl PaymentRequest {
    pub fn cart(&self) -> Cart {
        Cart::new(self.items.clone(), self.amount)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shipping {
    /// Delivery amount in cents.
    pub amount: Option<i32>,
    pub description: Option<String>,
    pub recipient_name: Option<String>,
    pub recipient_phone: Option<String>,
    pub address: Option<crate::customer::Address>,
}

impl Shipping {
    pub fn to_payload(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        if let Some(amount) = self.amount {
            map.insert("amount".to_string(), serde_json::json!(amount));
        }
        if let Some(description) = &self.description {
            map.insert(
                "description".to_string(),
                serde_json::Value::String(description.clone()),
            );
        }
        if let Some(name) = &self.recipient_name {
            map.insert(
                "recipient_name".to_string(),
                serde_json::Value::String(name.clone()),
            );
        }
        if let Some(phone) = &self.recipient_phone {
            map.insert(
                "recipient_phone".to_string(),
                serde_json::Value::String(phone.clone()),
            );
        }
        if let Some(address) = &self.address {
            map.insert("address".to_string(), address.to_payload());
        }
        serde_json::Value::Object(map)
    }
}
