use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use tower_http::cors::CorsLayer;

use crate::error::AppError;
use crate::twilio::SmsSender;
use crate::types::{AlertRequest, AlertResponse, HealthResponse};

pub struct AppState {
    pub sender: Box<dyn SmsSender>,
    /// Fixed alert recipient, in E.164 format.
    pub recipient: String,
}

/// Build the application router. CORS is wide open so the demo frontend can
/// call in from any origin.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/send_alert", post(send_alert))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn send_alert(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AlertRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::BadRequest("message must not be empty".to_string()));
    }

    info!("Received alert, relaying to {}", state.recipient);

    let sid = state
        .sender
        .send(&state.recipient, &req.message)
        .await
        .map_err(AppError::Send)?;

    info!("Alert sent, sid {}", sid);
    Ok((
        StatusCode::OK,
        Json(AlertResponse {
            status: "Alert sent".to_string(),
            sid,
        }),
    ))
}

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twilio::{MockSmsSender, SendError};
    use serde_json::{json, Value};

    const RECIPIENT: &str = "+919360331390";

    /// Serve the router on an ephemeral port and return its base URL.
    async fn serve(sender: MockSmsSender) -> String {
        let state = Arc::new(AppState {
            sender: Box::new(sender),
            recipient: RECIPIENT.to_string(),
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn valid_alert_returns_the_confirmation_sid() {
        let mut sender = MockSmsSender::new();
        sender
            .expect_send()
            .withf(|to, body| to == RECIPIENT && body == "Patient vitals critical")
            .times(1)
            .returning(|_, _| Ok("SM123".to_string()));
        let url = serve(sender).await;

        let response = reqwest::Client::new()
            .post(format!("{url}/send_alert"))
            .json(&json!({ "message": "Patient vitals critical" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "status": "Alert sent", "sid": "SM123" }));
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_sending() {
        let mut sender = MockSmsSender::new();
        sender.expect_send().never();
        let url = serve(sender).await;

        let response = reqwest::Client::new()
            .post(format!("{url}/send_alert"))
            .json(&json!({ "message": "   " }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["detail"], "message must not be empty");
    }

    #[tokio::test]
    async fn missing_message_field_is_rejected_without_sending() {
        let mut sender = MockSmsSender::new();
        sender.expect_send().never();
        let url = serve(sender).await;

        let response = reqwest::Client::new()
            .post(format!("{url}/send_alert"))
            .json(&json!({ "text": "wrong field" }))
            .send()
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn non_string_message_is_rejected_without_sending() {
        let mut sender = MockSmsSender::new();
        sender.expect_send().never();
        let url = serve(sender).await;

        let response = reqwest::Client::new()
            .post(format!("{url}/send_alert"))
            .json(&json!({ "message": 5 }))
            .send()
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn provider_rejection_surfaces_as_500_with_detail() {
        let mut sender = MockSmsSender::new();
        sender.expect_send().returning(|_, _| {
            Err(SendError::Rejected {
                code: 21614,
                message: "The number is unverified".to_string(),
            })
        });
        let url = serve(sender).await;

        let response = reqwest::Client::new()
            .post(format!("{url}/send_alert"))
            .json(&json!({ "message": "help" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 500);
        let body: Value = response.json().await.unwrap();
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("The number is unverified"));
    }

    #[tokio::test]
    async fn unexpected_fault_still_answers_with_json_detail() {
        let mut sender = MockSmsSender::new();
        sender.expect_send().returning(|_, _| {
            Err(SendError::UnexpectedResponse {
                status: 503,
                body: "upstream down".to_string(),
            })
        });
        let url = serve(sender).await;

        let response = reqwest::Client::new()
            .post(format!("{url}/send_alert"))
            .json(&json!({ "message": "help" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 500);
        let body: Value = response.json().await.unwrap();
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let url = serve(MockSmsSender::new()).await;

        let response = reqwest::get(format!("{url}/health")).await.unwrap();

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
