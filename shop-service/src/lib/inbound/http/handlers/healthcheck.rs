/// Liveness check. Answers `OK` whatever the request carries.
pub async fn healthcheck() -> &'static str {
    "OK"
}
