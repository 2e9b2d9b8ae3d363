pub mod app;
pub mod channels;
pub mod configs;
pub mod drivers;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod storage;

/// Name of this service as it appears in logs and filters.
#[macro_export]
macro_rules! service_name {
    () => {
        "channel_server"
    };
}
