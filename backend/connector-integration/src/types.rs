/// Pairs a parsed connector response with the router data it belongs to,
/// for the transformer `TryFrom` impls.
pub struct ResponseRouterData<Response, RouterData> {
    pub response: Response,
    pub router_data: RouterData,
    pub http_code: u16,
}
