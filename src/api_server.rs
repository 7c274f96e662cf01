// Axum API Server Module
//
// Purpose: REST API over the crop and fertilizer lookups
// Tables are loaded once at startup and shared read-only through Arc

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

use std::path::Path;
use std::sync::Arc;

use crate::chart::FactorChart;
use crate::data::RecommendationData;
use crate::errors::InputError;
use crate::recommender::Recommender;
use crate::types::{CropQuery, FertilizerQuery, PredictionRequest};
use crate::utils::InputRanges;
use crate::{NO_CROP_MATCH, NO_FERTILIZER_MATCH};

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

impl AppState {
    /// Load both tables; any structural fault aborts startup
    pub async fn new(crop_path: &Path, fertilizer_path: &Path, ranges: InputRanges) -> anyhow::Result<Self> {
        let crop_path = crop_path.to_path_buf();
        let fertilizer_path = fertilizer_path.to_path_buf();

        tracing::info!("Loading recommendation tables...");
        let data = tokio::task::spawn_blocking(move || {
            RecommendationData::load_from(&crop_path, &fertilizer_path)
        })
        .await??;

        Ok(Self::from_recommender(Recommender::new(data, ranges)))
    }

    pub fn from_recommender(recommender: Recommender) -> Self {
        Self {
            recommender: Arc::new(recommender),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Input form support
        .route("/api/soil-types", get(get_soil_types))
        .route("/api/ranges", get(get_ranges))

        // Lookups
        .route("/api/predict", post(predict))
        .route("/api/crop", post(crop_lookup))
        .route("/api/fertilizer", post(fertilizer_lookup))

        // Factor chart (SVG)
        .route("/api/chart", post(factor_chart))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_soil_types(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "soil_types": state.recommender.soil_types()
    }))
}

async fn get_ranges(State(state): State<AppState>) -> Json<InputRanges> {
    Json(state.recommender.ranges().clone())
}

/// Full prediction: validation, both lookups, factor chart data
///
/// POST /api/predict
async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<PredictionRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let recommender = state.recommender.clone();

    let recommendation = tokio::task::spawn_blocking(move || recommender.recommend(&payload))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    tracing::info!(
        crop = %recommendation.crop,
        fertilizer = %recommendation.fertilizer,
        "Prediction served"
    );

    Ok(Json(serde_json::json!({
        "crop": recommendation.crop,
        "fertilizer": recommendation.fertilizer,
        "crop_matched": recommendation.crop_matched(),
        "fertilizer_matched": recommendation.fertilizer_matched(),
        "factors": recommendation.factors,
    })))
}

async fn crop_lookup(
    State(state): State<AppState>,
    Json(query): Json<CropQuery>,
) -> Json<serde_json::Value> {
    let crop = state.recommender.crop(&query);
    Json(serde_json::json!({
        "crop": crop,
        "matched": crop != NO_CROP_MATCH,
    }))
}

async fn fertilizer_lookup(
    State(state): State<AppState>,
    Json(query): Json<FertilizerQuery>,
) -> Json<serde_json::Value> {
    let fertilizer = state.recommender.fertilizer(&query);
    Json(serde_json::json!({
        "fertilizer": fertilizer,
        "matched": fertilizer != NO_FERTILIZER_MATCH,
    }))
}

/// Factor chart as SVG (soil type is not checked; it is not plotted)
async fn factor_chart(
    State(state): State<AppState>,
    Json(payload): Json<PredictionRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.recommender.ranges().validate(&payload)?;
    let svg = FactorChart::from_request(&payload).to_svg();
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl From<InputError> for AppError {
    fn from(err: InputError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
