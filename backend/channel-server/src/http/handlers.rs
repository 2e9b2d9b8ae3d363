pub mod health;
pub mod paynow;
pub mod stripe;
