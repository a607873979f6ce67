use crate::customer::Address;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// Payment methods accepted across the upstream surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Pix,
    Boleto,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Boleto => "boleto",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credit card data: a stored card id, a tokenized card, or raw card
/// fields (tests only), plus capture settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditCard {
    pub card_id: Option<String>,
    pub card_token: Option<String>,
    pub number: Option<String>,
    pub holder_name: Option<String>,
    pub exp_month: Option<i32>,
    pub exp_year: Option<i32>,
    pub cvv: Option<String>,
    pub billing_address: Option<Address>,
    pub installments: Option<i32>,
    /// "auth_only" or "auth_and_capture" (default).
    pub operation_type: Option<String>,
    pub statement_descriptor: Option<String>,
}

impl CreditCard {
    pub fn to_payload(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "operation_type".to_string(),
            Value::String(
                self.operation_type
                    .clone()
                    .unwrap_or_else(|| "auth_and_capture".into()),
            ),
        );
        if let Some(installments) = self.installments {
            map.insert("installments".to_string(), json!(installments));
        }
        if let Some(descriptor) = &self.statement_descriptor {
            map.insert(
                "statement_descriptor".to_string(),
                Value::String(descriptor.clone()),
            );
        }

        if let Some(card_id) = &self.card_id {
            map.insert("card_id".to_string(), Value::String(card_id.clone()));
        } else if let Some(token) = &self.card_token {
            map.insert("card_token".to_string(), Value::String(token.clone()));
        } else {
            map.insert(
                "card".to_string(),
                raw_card_payload(
                    &self.number,
                    &self.holder_name,
                    self.exp_month,
                    self.exp_year,
                    &self.cvv,
                    &self.billing_address,
                ),
            );
        }

        Value::Object(map)
    }
}

/// Debit card data; always sent as raw card fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebitCard {
    pub number: Option<String>,
    pub holder_name: Option<String>,
    pub exp_month: Option<i32>,
    pub exp_year: Option<i32>,
    pub cvv: Option<String>,
    pub billing_address: Option<Address>,
    pub statement_descriptor: Option<String>,
}

impl DebitCard {
    pub fn to_payload(&self) -> Value {
        let mut map = Map::new();
        if let Some(descriptor) = &self.statement_descriptor {
            map.insert(
                "statement_descriptor".to_string(),
                Value::String(descriptor.clone()),
            );
        }
        map.insert(
            "card".to_string(),
            raw_card_payload(
                &self.number,
                &self.holder_name,
                self.exp_month,
                self.exp_year,
                &self.cvv,
                &self.billing_address,
            ),
        );
        Value::Object(map)
    }
}

fn raw_card_payload(
    number: &Option<String>,
    holder_name: &Option<String>,
    exp_month: Option<i32>,
    exp_year: Option<i32>,
    cvv: &Option<String>,
    billing_address: &Option<Address>,
) -> Value {
    let mut card = Map::new();
    card.insert("number".to_string(), json!(number));
    card.insert("holder_name".to_string(), json!(holder_name));
    card.insert("exp_month".to_string(), json!(exp_month));
    card.insert("exp_year".to_string(), json!(exp_year));
    card.insert("cvv".to_string(), json!(cvv));
    if let Some(address) = billing_address {
        card.insert("billing_address".to_string(), address.to_payload());
    }
    Value::Object(card)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pix {
    /// QR code lifetime in seconds.
    pub expires_in: Option<i64>,
}

/// Default PIX QR code lifetime on the Order surface: 24 hours.
pub const DEFAULT_PIX_EXPIRES_IN: i64 = 86_400;

impl Pix {
    pub fn to_payload(&self) -> Value {
        json!({
            "expires_in": self.expires_in.unwrap_or(DEFAULT_PIX_EXPIRES_IN),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Boleto {
    pub instructions: Option<String>,
    pub due_at: Option<NaiveDate>,
}

impl Boleto {
    pub fn to_payload(&self) -> Value {
        let mut map = Map::new();
        if let Some(instructions) = &self.instructions {
            map.insert(
                "instructions".to_string(),
                Value::String(instructions.clone()),
            );
        }
        if let Some(due_at) = self.due_at {
            map.insert(
                "due_at".to_string(),
                Value::String(due_at.format("%Y-%m-%d").to_string()),
            );
        }
        Value::Object(map)
    }
}
