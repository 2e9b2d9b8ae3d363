//! Marker types identifying the flow a connector integration handles.

#[derive(Debug, Clone)]
pub struct Authorize;

#[derive(Debug, Clone)]
pub struct PSync;

#[derive(Debug, Clone)]
pub struct CreateCheckoutSession;
