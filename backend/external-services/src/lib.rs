//! Outbound plumbing shared by the connectors: the HTTP client that carries
//! connector requests to the gateways, and the process-wide metrics.

pub mod service;
pub mod shared_metrics;
