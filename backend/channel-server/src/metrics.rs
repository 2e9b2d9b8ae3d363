use lazy_static::lazy_static;
use prometheus::{register_int_counter, IntCounter};

lazy_static! {
    /// Total number of payment submissions across both channels
    pub static ref PAYMENTS_INITIATED: IntCounter = register_int_counter!(
        "payments_initiated_total",
        "Total number of payment submissions across both channels"
    ).expect("Failed to register payments_initiated_total");

    /// Payment submissions the gateway declined or that never completed
    pub static ref PAYMENTS_FAILED: IntCounter = register_int_counter!(
        "payments_failed_total",
        "Total number of payment submissions that failed"
    ).expect("Failed to register payments_failed_total");

    /// Poll-URL status checks performed against the gateway
    pub static ref PAYMENT_STATUS_CHECKS: IntCounter = register_int_counter!(
        "payment_status_checks_total",
        "Total number of payment status checks performed"
    ).expect("Failed to register payment_status_checks_total");

    /// Session snapshots written to the cache
    pub static ref SESSIONS_PERSISTED: IntCounter = register_int_counter!(
        "sessions_persisted_total",
        "Total number of session snapshots written to the cache"
    ).expect("Failed to register sessions_persisted_total");
}
