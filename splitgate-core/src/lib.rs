pub mod adapters;
pub mod cart;
pub mod customer;
pub mod payment;
pub mod request;
pub mod split;

pub use adapters::{
    CheckoutPayloadAdapter, OrderPayloadAdapter, PayloadAdapter, PaymentLinkPayloadAdapter,
};
pub use request::PaymentRequest;
