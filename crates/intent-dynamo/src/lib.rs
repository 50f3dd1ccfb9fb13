//! # intent-dynamo
//!
//! DynamoDB storage backend for the payment-intents service, using
//! `aws-sdk-dynamodb`.
//!
//! Items are written in the flat layout produced by `StorageItem::output`:
//! strings as `S`, numbers as `N`, booleans as `BOOL`, nulls as `NULL`.

mod conversions;
mod repository;

pub use conversions::{from_attribute_map, to_attribute_map, AttributeMap};
pub use repository::DynamoPaymentRepository;
