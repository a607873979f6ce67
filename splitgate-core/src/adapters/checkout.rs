use super::{AdapterError, PayloadAdapter};
use crate::request::PaymentRequest;
use crate::split::SplitMode;
use serde_json::{json, Value};

/// 50-day PIX window, in minutes.
const PIX_EXPIRES_IN: i64 = 50 * 24 * 60;

/// Boleto due 50 days after emission.
const BOLETO_DUE_IN_DAYS: i32 = 50;

const MAX_INSTALLMENTS: i32 = 6;

/// Adapter for the legacy simplified checkout. Every setting is
/// pinned: long-lived PIX and boleto windows, six interest-free
/// installments, and split rules always sent as percentage whatever
/// mode the caller declared. Kept as-is for the old storefront.
pub struct CheckoutPayloadAdapter;

impl PayloadAdapter for CheckoutPayloadAdapter {
    fn path(&self) -> &'static str {
        "/paymentlinks"
    }

    fn project(&self, request: &PaymentRequest) -> Result<Value, AdapterError> {
        let cart = request.cart();
        let lines = cart.project()?;
        let total = cart.quoted_total();
        request.split.validate(total)?;

        let items: Vec<Value> = lines
            .iter()
            .map(|line| {
                json!({
                    "name": line.name,
                    "description": line.description,
                    "amount": line.amount,
                    "default_quantity": line.quantity,
                })
            })
            .collect();

        let mut root = json!({
            "type": "order",
            "payment_settings": {
                "accepted_payment_methods": ["pix", "boleto", "credit_card"],
                "pix_settings": { "expires_in": PIX_EXPIRES_IN },
                "boleto_settings": { "due_in": BOLETO_DUE_IN_DAYS },
                "credit_card_settings": {
                    "operation_type": "auth_and_capture",
                    "installments_setup": {
                        "max_installments": MAX_INSTALLMENTS,
                        "amount": total,
                        "interest_type": "simple",
                        "interest_rate": 0,
                        "free_installments": MAX_INSTALLMENTS,
                    },
                },
            },
            "cart_settings": { "items": items },
        });

        if !request.split.is_empty() {
            root["split_settings"] = json!({
                "rules": request.split.to_wire(Some(SplitMode::Percentage)),
            });
        }

        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::{SplitPlan, SplitRule};

    fn checkout_request() -> PaymentRequest {
        PaymentRequest {
            amount: Some(15000),
            split: SplitPlan(vec![
                SplitRule {
                    recipient_id: "rp_1".to_string(),
                    amount: Some(80),
                    mode: SplitMode::Percentage,
                    liable: Some(true),
                },
                SplitRule {
                    recipient_id: "re_2".to_string(),
                    amount: Some(20),
                    mode: SplitMode::Percentage,
                    liable: Some(false),
                },
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn fixed_windows_and_installments_are_pinned() {
        let payload = CheckoutPayloadAdapter.project(&checkout_request()).unwrap();
        let settings = &payload["payment_settings"];
        assert_eq!(settings["pix_settings"]["expires_in"], 72_000);
        assert_eq!(settings["boleto_settings"]["due_in"], 50);

        let setup = &settings["credit_card_settings"]["installments_setup"];
        assert_eq!(setup["max_installments"], 6);
        assert_eq!(setup["free_installments"], 6);
        assert_eq!(setup["interest_rate"], 0);
        assert_eq!(setup["amount"], 15000);
    }

    #[test]
    fn accepted_methods_include_boleto() {
        let payload = CheckoutPayloadAdapter.project(&checkout_request()).unwrap();
        assert_eq!(
            payload["payment_settings"]["accepted_payment_methods"],
            json!(["pix", "boleto", "credit_card"])
        );
    }

    #[test]
    fn split_rules_are_always_sent_as_percentage() {
        let mut request = checkout_request();
        request.split.0[0].mode = SplitMode::Flat;
        request.split.0[0].amount = Some(12000);
        request.split.0[1].mode = SplitMode::Flat;
        request.split.0[1].amount = Some(3000);

        let payload = CheckoutPayloadAdapter.project(&request).unwrap();
        let rules = &payload["split_settings"]["rules"];
        assert_eq!(rules[0]["type"], "percentage");
        assert_eq!(rules[1]["type"], "percentage");
    }

    #[test]
    fn fallback_item_fills_the_cart() {
        let payload = CheckoutPayloadAdapter.project(&checkout_request()).unwrap();
        let item = &payload["cart_settings"]["items"][0];
        assert_eq!(item["name"], "Pagamento");
        assert_eq!(item["description"], "Pagamento");
        assert_eq!(item["amount"], 15000);
        assert_eq!(item["default_quantity"], 1);
    }
}
