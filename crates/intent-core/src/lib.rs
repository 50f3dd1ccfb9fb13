//! # intent-core
//!
//! Core types and traits for the payment-intents service.
//!
//! This crate provides:
//! - `Payment`, the write-once payment record
//! - `StorageItem` for mapping entities to key-value store items
//! - `PaymentRepository` trait (and an in-memory implementation)
//! - `PaymentGateway` trait for the third-party payment processor
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use intent_core::{Currency, Payment, PaymentIntentRequest};
//!
//! // £5.54 becomes 554 minor units
//! let payment = Payment::create(5.54, "Order #1", Currency::GBP)?;
//!
//! let intent = gateway
//!     .create_payment_intent(&PaymentIntentRequest::for_payment(&payment))
//!     .await?;
//!
//! let payment = payment.attach_intent(&intent);
//! repository.put_payment(&payment).await?;
//!
//! // Hand intent.client_secret to the browser
//! ```

pub mod currency;
pub mod error;
pub mod gateway;
pub mod item;
pub mod payment;
pub mod repository;

// Re-exports for convenience
pub use currency::{Currency, MAX_MINOR_AMOUNT};
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway, PaymentIntent, PaymentIntentRequest};
pub use item::{Item, StorageItem};
pub use payment::{Payment, PaymentStatus};
pub use repository::{BoxedPaymentRepository, InMemoryPaymentRepository, PaymentRepository};
