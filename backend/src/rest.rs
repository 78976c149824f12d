use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use shared::SaveAvailabilityRequest;
use tracing::info;

use crate::domain::{AvailabilityStore, SaveError};

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub availability: AvailabilityStore,
}

impl AppState {
    /// Create new application state with the given AvailabilityStore
    pub fn new(availability: AvailabilityStore) -> Self {
        Self { availability }
    }
}

/// Router for the availability API endpoints
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/availability/:person_id",
            get(list_availability).post(save_availability),
        )
        .with_state(state)
}

/// Axum handler function for GET /api/availability/:person_id
pub async fn list_availability(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/availability/{}", person_id);

    match state.availability.list(&person_id).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            tracing::error!("Error listing availability: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error listing availability",
            )
                .into_response()
        }
    }
}

/// Axum handler function for POST /api/availability/:person_id
pub async fn save_availability(
    State(state): State<AppState>,
    Path(person_id): Path<String>,
    Json(request): Json<SaveAvailabilityRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/availability/{} - date: {}",
        person_id, request.date
    );

    match state.availability.save(&person_id, &request).await {
        Ok(()) => (StatusCode::CREATED, Json(request)).into_response(),
        Err(SaveError::InvalidDate(date)) => {
            (StatusCode::BAD_REQUEST, format!("Invalid date: {}", date)).into_response()
        }
        Err(SaveError::Database(e)) => {
            tracing::error!("Error saving availability: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save availability",
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use axum::body::Body;
    use axum::http::Request;
    use shared::{AvailabilityRecord, AvailabilityStatus};
    use tower::util::ServiceExt;

    /// Helper to create a router backed by a fresh test database
    async fn setup_test_router() -> Router {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        api_router(AppState::new(AvailabilityStore::new(db)))
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        serde_json::from_slice(&bytes).expect("Failed to parse body")
    }

    #[tokio::test]
    async fn test_list_unknown_person_returns_empty_array() {
        let app = setup_test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/availability/alice")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let records: Vec<AvailabilityRecord> = body_json(response).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_list_round_trip() {
        let app = setup_test_router().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/availability/alice")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"date":"2024-03-10","status":"unavailable"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/availability/alice")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let records: Vec<AvailabilityRecord> = body_json(response).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2024-03-10");
        assert_eq!(records[0].status, AvailabilityStatus::Unavailable);
    }

    #[tokio::test]
    async fn test_save_rejects_unknown_status() {
        let app = setup_test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/availability/alice")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"date":"2024-03-10","status":"busy"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_date() {
        let app = setup_test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/availability/alice")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"date":"garbage","status":"preferred"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
