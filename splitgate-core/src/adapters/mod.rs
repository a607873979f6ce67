use crate::cart::CartError;
use crate::payment::PaymentMethod;
use crate::request::PaymentRequest;
use crate::split::SplitError;
use serde_json::Value;

mod checkout;
mod order;
mod payment_link;

pub use checkout::CheckoutPayloadAdapter;
pub use order::OrderPayloadAdapter;
pub use payment_link::PaymentLinkPayloadAdapter;

/// Projects the canonical request into one upstream surface's payload
/// tree. Implementations are pure: they validate, build the full tree
/// or fail, and never touch the network.
pub trait PayloadAdapter {
    /// Upstream path the payload is posted to.
    fn path(&self) -> &'static str;

    fn project(&self, request: &PaymentRequest) -> Result<Value, AdapterError>;
}

/// Request-validation failures raised while building a payload.
/// Nothing is ever sent upstream when one of these occurs.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("either customer or customer_id must be provided")]
    MissingCustomer,

    #[error("a payment method is required")]
    MissingPaymentMethod,

    #[error("{0} payment data is required")]
    MissingMethodData(PaymentMethod),
}
