use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AlertRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub status: String,
    pub sid: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}
