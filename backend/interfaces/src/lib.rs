//! Traits at the seams between the channel workflows, the connector
//! integrations, and the outbound HTTP client.

pub mod api;
pub mod connector_integration_v2;
pub mod connector_types;
