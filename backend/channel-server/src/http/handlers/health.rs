pub async fn health() -> &'static str {
    "health is good"
}
