//! # DPO Module
//!
//! Client for the DPO (3G Direct Pay) API3G gateway and the Actix handlers
//! that expose it.
pub mod dpo_checkout;
pub mod dpo_gateway;
pub mod dpo_xml;
pub mod error;

pub use dpo_gateway::{DpoClient, MobileMoneyOptions};
pub use dpo_xml::{Allocation, ChargeResult, TokenCreationResult};
pub use error::DpoError;
