//! Gateway connector integrations: wire request building and response
//! handling for each supported flow.

pub mod connectors;
pub mod types;

pub use connectors::{Paynow, Stripe};
