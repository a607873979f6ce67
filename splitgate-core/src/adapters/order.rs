use super::{AdapterError, PayloadAdapter};
use crate::payment::PaymentMethod;
use crate::request::PaymentRequest;
use serde_json::{json, Map, Value};

/// Adapter for the closed Order API: the caller supplies the customer
/// and the payment method up front, and the provider charges
/// immediately.
pub struct OrderPayloadAdapter;

impl PayloadAdapter for OrderPayloadAdapter {
    fn path(&self) -> &'static str {
        "/orders"
    }

    fn project(&self, request: &PaymentRequest) -> Result<Value, AdapterError> {
        let cart = request.cart();
        let lines = cart.project()?;
        request.split.validate(cart.total().unwrap_or(0))?;

        let mut root = Map::new();

        if let Some(code) = &request.code {
            if !code.is_empty() {
                root.insert("code".to_string(), Value::String(code.clone()));
            }
        }

        let items: Vec<Value> = lines
            .iter()
            .map(|line| {
                json!({
                    "amount": line.amount,
                    "description": line.description,
                    "quantity": line.quantity,
                    "code": line.code,
                })
            })
            .collect();
        root.insert("items".to_string(), Value::Array(items));

        if let Some(customer) = &request.customer {
            root.insert("customer".to_string(), customer.to_payload());
        } else if let Some(customer_id) = &request.customer_id {
            root.insert(
                "customer_id".to_string(),
                Value::String(customer_id.clone()),
            );
        } else {
            return Err(AdapterError::MissingCustomer);
        }

        root.insert(
            "payments".to_string(),
            Value::Array(vec![self.build_payment(request)?]),
        );

        if !request.split.is_empty() {
            root.insert("split".to_string(), Value::Array(request.split.to_wire(None)));
        }

        root.insert("closed".to_string(), json!(request.closed.unwrap_or(true)));

        if let Some(shipping) = &request.shipping {
            root.insert("shipping".to_string(), shipping.to_payload());
        }
        if let Some(metadata) = &request.metadata {
            if let Ok(value) = serde_json::to_value(metadata) {
                root.insert("metadata".to_string(), value);
            }
        }

        Ok(Value::Object(root))
    }
}

impl OrderPayloadAdapter {
    /// The single payment entry: method marker, the method-specific
    /// payload under its own key, and the split mirrored inside.
    fn build_payment(&self, request: &PaymentRequest) -> Result<Value, AdapterError> {
        let method = request
            .payment_method
            .ok_or(AdapterError::MissingPaymentMethod)?;

        let mut payment = Map::new();
        payment.insert(
            "payment_method".to_string(),
            Value::String(method.as_str().to_string()),
        );

        let method_payload = match method {
            PaymentMethod::CreditCard => request
                .credit_card
                .as_ref()
                .ok_or(AdapterError::MissingMethodData(method))?
                .to_payload(),
            PaymentMethod::DebitCard => request
                .debit_card
                .as_ref()
                .ok_or(AdapterError::MissingMethodData(method))?
                .to_payload(),
            PaymentMethod::Pix => request.pix.clone().unwrap_or_default().to_payload(),
            PaymentMethod::Boleto => request.boleto.clone().unwrap_or_default().to_payload(),
        };
        payment.insert(method.as_str().to_string(), method_payload);

        if !request.split.is_empty() {
            payment.insert(
                "split".to_string(),
                Value::Array(request.split.to_wire(None)),
            );
        }

        Ok(Value::Object(payment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;
    use crate::customer::Customer;
    use crate::payment::{CreditCard, Pix};
    use crate::split::{SplitError, SplitMode, SplitPlan, SplitRule};

    fn split_90_10() -> SplitPlan {
        SplitPlan(vec![
            SplitRule {
                recipient_id: "rp_1".to_string(),
                amount: Some(90),
                mode: SplitMode::Percentage,
                liable: Some(true),
            },
            SplitRule {
                recipient_id: "rp_2".to_string(),
                amount: Some(10),
                mode: SplitMode::Percentage,
                liable: Some(false),
            },
        ])
    }

    fn pix_request() -> PaymentRequest {
        PaymentRequest {
            amount: Some(10000),
            customer_id: Some("cus_123".to_string()),
            payment_method: Some(PaymentMethod::Pix),
            split: split_90_10(),
            ..Default::default()
        }
    }

    #[test]
    fn split_options_follow_the_liable_flag() {
        let payload = OrderPayloadAdapter.project(&pix_request()).unwrap();
        let split = &payload["payments"][0]["split"];
        assert_eq!(split[0]["recipient_id"], "rp_1");
        assert_eq!(split[0]["options"]["charge_processing_fee"], true);
        assert_eq!(split[1]["recipient_id"], "rp_2");
        assert_eq!(split[1]["options"]["charge_processing_fee"], false);
        // the plan is mirrored at the root, exactly as the provider expects
        assert_eq!(payload["split"], *split);
    }

    #[test]
    fn invalid_percentage_sum_is_rejected_before_building() {
        let mut request = pix_request();
        request.split.0[1].amount = Some(5);
        let err = OrderPayloadAdapter.project(&request).unwrap_err();
        assert_eq!(
            err,
            AdapterError::Split(SplitError::SumMismatch {
                expected: 100,
                actual: 95
            })
        );
    }

    #[test]
    fn required_top_level_keys_are_present() {
        let payload = OrderPayloadAdapter.project(&pix_request()).unwrap();
        assert!(payload.get("items").is_some());
        assert!(payload.get("payments").is_some());
        assert_eq!(payload["customer_id"], "cus_123");
        assert_eq!(payload["closed"], true);
        assert_eq!(payload["payments"][0]["payment_method"], "pix");
        assert_eq!(payload["payments"][0]["pix"]["expires_in"], 86_400);
    }

    #[test]
    fn missing_customer_identity_is_an_error() {
        let mut request = pix_request();
        request.customer_id = None;
        assert_eq!(
            OrderPayloadAdapter.project(&request).unwrap_err(),
            AdapterError::MissingCustomer
        );

        request.customer = Some(Customer {
            name: "Ana Souza".to_string(),
            ..Default::default()
        });
        let payload = OrderPayloadAdapter.project(&request).unwrap();
        assert_eq!(payload["customer"]["name"], "Ana Souza");
        assert!(payload.get("customer_id").is_none());
    }

    #[test]
    fn credit_card_without_data_is_an_error() {
        let mut request = pix_request();
        request.payment_method = Some(PaymentMethod::CreditCard);
        assert_eq!(
            OrderPayloadAdapter.project(&request).unwrap_err(),
            AdapterError::MissingMethodData(PaymentMethod::CreditCard)
        );

        request.credit_card = Some(CreditCard {
            card_token: Some("tok_456".to_string()),
            ..Default::default()
        });
        let payload = OrderPayloadAdapter.project(&request).unwrap();
        assert_eq!(
            payload["payments"][0]["credit_card"]["card_token"],
            "tok_456"
        );
    }

    #[test]
    fn declared_items_replace_the_fallback_amount() {
        let mut request = pix_request();
        request.pix = Some(Pix {
            expires_in: Some(1800),
        });
        request.items = vec![LineItem {
            name: Some("Mensalidade".to_string()),
            amount: Some(5000),
            quantity: Some(2),
            code: Some("mens-01".to_string()),
            ..Default::default()
        }];
        let payload = OrderPayloadAdapter.project(&request).unwrap();
        assert_eq!(payload["items"][0]["amount"], 5000);
        assert_eq!(payload["items"][0]["quantity"], 2);
        assert_eq!(payload["items"][0]["description"], "Mensalidade");
        assert_eq!(payload["payments"][0]["pix"]["expires_in"], 1800);
    }

    #[test]
    fn flat_split_validates_against_the_cart_total() {
        let mut request = pix_request();
        request.split = SplitPlan(vec![
            SplitRule {
                recipient_id: "rp_1".to_string(),
                amount: Some(3000),
                mode: SplitMode::Flat,
                liable: Some(true),
            },
            SplitRule {
                recipient_id: "rp_2".to_string(),
                amount: Some(7000),
                mode: SplitMode::Flat,
                liable: Some(false),
            },
        ]);
        assert!(OrderPayloadAdapter.project(&request).is_ok());

        request.amount = Some(9000);
        assert!(matches!(
            OrderPayloadAdapter.project(&request),
            Err(AdapterError::Split(SplitError::SumMismatch { .. }))
        ));
    }
}
