pub mod paynow;
pub mod stripe;

pub use self::{paynow::Paynow, stripe::Stripe};
