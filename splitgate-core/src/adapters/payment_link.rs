use super::{AdapterError, PayloadAdapter};
use crate::request::PaymentRequest;
use serde_json::{json, Value};

/// Statement descriptor limit imposed by the provider.
const STATEMENT_DESCRIPTOR_MAX: usize = 13;

/// Default installment ceiling when the caller does not pick one.
const DEFAULT_MAX_INSTALLMENTS: i32 = 12;

/// Installments free of interest, capped by the ceiling.
const FREE_INSTALLMENTS: i32 = 3;

/// PIX QR code lifetime on payment links: one hour.
const PIX_EXPIRES_IN: i64 = 3600;

/// Adapter for the self-service Payment Link API: the provider hosts
/// the checkout page and the customer fills in their own data, so no
/// customer or payment-method payload is required here.
pub struct PaymentLinkPayloadAdapter;

impl PayloadAdapter for PaymentLinkPayloadAdapter {
    fn path(&self) -> &'static str {
        "/paymentlinks"
    }

    fn project(&self, request: &PaymentRequest) -> Result<Value, AdapterError> {
        let cart = request.cart();
        let lines = cart.project()?;
        // This surface validates flat splits against the quoted total,
        // not a caller-supplied one; a declared amount wins over the
        // item sum.
        let total = cart.quoted_total();
        request.split.validate(total)?;

        let items: Vec<Value> = lines
            .iter()
            .map(|line| {
                json!({
                    "name": line.name,
                    "amount": line.amount,
                    "default_quantity": line.quantity,
                })
            })
            .collect();

        let max_installments = request.installments.unwrap_or(DEFAULT_MAX_INSTALLMENTS);

        let mut root = json!({
            "is_building": false,
            "type": "order",
            "payment_settings": {
                "accepted_payment_methods": ["credit_card", "pix"],
                "statement_descriptor": statement_descriptor(request),
                "credit_card_settings": {
                    "operation_type": "auth_and_capture",
                    "installments_setup": {
                        "interest_type": "simple",
                        "max_installments": max_installments,
                        "free_installments": FREE_INSTALLMENTS.min(max_installments),
                        "amount": total,
                        "interest_rate": 1,
                    },
                },
                "pix_settings": { "expires_in": PIX_EXPIRES_IN },
            },
            "cart_settings": { "items": items },
        });

        if !request.split.is_empty() {
            root["split_settings"] = json!({ "rules": request.split.to_wire(None) });
        }

        Ok(root)
    }
}

fn statement_descriptor(request: &PaymentRequest) -> String {
    request
        .statement_descriptor
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("Pagamento")
        .chars()
        .take(STATEMENT_DESCRIPTOR_MAX)
        .collect()
}
