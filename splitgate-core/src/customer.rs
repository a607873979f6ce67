use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Postal address in the provider's shape (snake_case keys,
/// `line_1`/`line_2` street lines).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub line_1: Option<String>,
    pub line_2: Option<String>,
}

impl Address {
    /// Provider payload with absent fields omitted rather than null.
    pub fn to_payload(&self) -> Value {
        let mut map = Map::new();
        insert_opt(&mut map, "country", &self.country);
        insert_opt(&mut map, "state", &self.state);
        insert_opt(&mut map, "city", &self.city);
        insert_opt(&mut map, "zip_code", &self.zip_code);
        insert_opt(&mut map, "line_1", &self.line_1);
        insert_opt(&mut map, "line_2", &self.line_2);
        Value::Object(map)
    }
}

/// Customer identity as the caller declares it. Only the name is
/// required; document type and entity type default on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: Option<String>,
    /// "individual" or "company".
    pub r#type: Option<String>,
    /// CPF/CNPJ/passport number.
    pub document: Option<String>,
    /// "CPF", "CNPJ" or "PASSPORT".
    pub document_type: Option<String>,
    pub code: Option<String>,
    pub gender: Option<String>,
    /// YYYY-MM-DD.
    pub birthdate: Option<String>,
    pub address: Option<Address>,
    pub phones: Option<Value>,
    pub metadata: Option<HashMap<String, String>>,
}

impl Customer {
    /// Inline customer object for the Order payload.
    pub fn to_payload(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        insert_opt(&mut map, "email", &self.email);

        if let Some(document) = &self.document {
            map.insert("document".to_string(), Value::String(document.clone()));
            map.insert(
                "type".to_string(),
                Value::String(self.r#type.clone().unwrap_or_else(|| "individual".into())),
            );
            map.insert(
                "document_type".to_string(),
                Value::String(self.document_type.clone().unwrap_or_else(|| "CPF".into())),
            );
        }

        insert_opt(&mut map, "code", &self.code);
        insert_opt(&mut map, "gender", &self.gender);
        insert_opt(&mut map, "birthdate", &self.birthdate);

        if let Some(address) = &self.address {
            map.insert("address".to_string(), address.to_payload());
        }
        if let Some(phones) = &self.phones {
            map.insert("phones".to_string(), phones.clone());
        }
        if let Some(metadata) = &self.metadata {
            if let Ok(value) = serde_json::to_value(metadata) {
                map.insert("metadata".to_string(), value);
            }
        }

        Value::Object(map)
    }

    /// Payload for the customer registration endpoints. Same shape as
    /// the inline order customer, but the document is normalized to
    /// digits only (the provider rejects punctuated CPF/CNPJ here).
    pub fn to_registration_payload(&self) -> Value {
        let mut payload = self.to_payload();
        if let Some(document) = &self.document {
            let digits: String = document.chars().filter(|c| c.is_ascii_digit()).collect();
            payload["document"] = Value::String(digits);
        }
        payload
    }
}

fn insert_opt(map: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        map.insert(key.to_string(), Value::String(value.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted_not_null() {
        let customer = Customer {
            name: "Ana Souza".to_string(),
            ..Default::default()
        };
        let payload = customer.to_payload();
        assert_eq!(payload["name"], "Ana Souza");
        assert!(payload.get("email").is_none());
        assert!(payload.get("document").is_none());
        assert!(payload.get("type").is_none());
    }

    #[test]
    fn document_brings_type_defaults_with_it() {
        let customer = Customer {
            name: "Ana Souza".to_string(),
            document: Some("12345678901".to_string()),
            ..Default::default()
        };
        let payload = customer.to_payload();
        assert_eq!(payload["type"], "individual");
        assert_eq!(payload["document_type"], "CPF");
    }

    #[test]
    fn registration_payload_strips_document_punctuation() {
        let customer = Customer {
            name: "Ana Souza".to_string(),
            document: Some("123.456.789-01".to_string()),
            ..Default::default()
        };
        let payload = customer.to_registration_payload();
        assert_eq!(payload["document"], "12345678901");
    }

    #[test]
    fn address_uses_provider_key_names() {
        let address = Address {
            zip_code: Some("01310100".to_string()),
            line_1: Some("1000, Av. Paulista, Bela Vista".to_string()),
            ..Default::default()
        };
        let payload = address.to_payload();
        assert_eq!(payload["zip_code"], "01310100");
        assert_eq!(payload["line_1"], "1000, Av. Paulista, Bela Vista");
        assert!(payload.get("line_2").is_none());
    }
}
