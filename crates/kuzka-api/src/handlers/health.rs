//! Health check handler.

use axum::{extract::State, Json};

use crate::state::AppState;
use crate::types::HealthResponse;

/// GET /api/health - Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.config.uptime_seconds(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_health_handler() {
        let dir = tempdir().unwrap();
        let config = ApiConfig::new("127.0.0.1", 0, "admin", "secret").with_data_dir(dir.path());
        let response = health(State(AppState::new(config))).await;

        assert_eq!(response.status, "ok");
        assert!(!response.version.is_empty());
    }
}
