use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use symptomx_ranking::{PredictionResponse, SymptomChecker};
use tracing::{debug, error, info};

/// Shared server state with a write-once engine slot.
///
/// Until an engine is installed every model endpoint answers 503.
pub struct AppState {
    engine: RwLock<Option<Arc<SymptomChecker>>>,
}

impl AppState {
    /// State with no engine yet
    pub fn loading() -> Self {
        Self {
            engine: RwLock::new(None),
        }
    }

    /// State serving the given engine
    pub fn ready(engine: SymptomChecker) -> Self {
        Self {
            engine: RwLock::new(Some(Arc::new(engine))),
        }
    }

    /// Install the engine. Returns false, leaving the state unchanged, if one
    /// was already installed.
    pub fn install(&self, engine: SymptomChecker) -> bool {
        let mut slot = self.engine.write();
        if slot.is_some() {
            return false;
        }
        *slot = Some(Arc::new(engine));
        true
    }

    pub fn is_ready(&self) -> bool {
        self.engine.read().is_some()
    }

    pub fn engine(&self) -> Option<Arc<SymptomChecker>> {
        self.engine.read().clone()
    }
}

#[derive(Deserialize)]
struct PredictRequest {
    symptoms: Vec<String>,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: &'static str,
    vocabulary_size: usize,
    diseases: usize,
    training_rows: usize,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<AppState>, host: String, port: u16) -> std::io::Result<()> {
        info!("Binding HTTP API on {}:{}", host, port);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(configure)
        })
        .bind((host.as_str(), port))?
        .run()
        .await
    }
}

/// Register the API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/readyz", web::get().to(readyz))
        .route("/predict", web::post().to(predict))
        .route("/symptoms", web::get().to(list_symptoms))
        .route("/diseases", web::get().to(list_diseases));
}

fn not_ready() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(serde_json::json!({
        "error": "model not loaded"
    }))
}

async fn root() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "API running"
    })))
}

async fn readyz(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    match state.engine() {
        Some(engine) => Ok(HttpResponse::Ok().json(ReadyResponse {
            status: "ready",
            vocabulary_size: engine.vocabulary().len(),
            diseases: engine.labels().len(),
            training_rows: engine.training_rows(),
        })),
        None => Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "loading"
        }))),
    }
}

async fn predict(
    state: web::Data<Arc<AppState>>,
    req: web::Json<PredictRequest>,
) -> ActixResult<HttpResponse> {
    let engine = match state.engine() {
        Some(engine) => engine,
        None => return Ok(not_ready()),
    };

    match engine.analyze(req.symptoms.as_slice()) {
        Ok(analysis) => {
            debug!(
                symptoms = req.symptoms.len(),
                no_match = analysis.prediction.is_no_match(),
                "Prediction served"
            );
            Ok(HttpResponse::Ok().json(PredictionResponse::from(analysis)))
        }
        Err(e) => {
            error!("Prediction failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}

async fn list_symptoms(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    match state.engine() {
        Some(engine) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "symptoms": engine.vocabulary().labels()
        }))),
        None => Ok(not_ready()),
    }
}

async fn list_diseases(state: web::Data<Arc<AppState>>) -> ActixResult<HttpResponse> {
    match state.engine() {
        Some(engine) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "diseases": engine.labels().labels()
        }))),
        None => Ok(not_ready()),
    }
}
