//! Servidor web Axum do serviço de extração de entidades nomeadas
//!
//! Expõe o núcleo síncrono de `ner-core` como uma API JSON:
//!
//! | Rota                 | Verbo | Descrição                                  |
//! |----------------------|-------|--------------------------------------------|
//! | `/hello`             | GET   | Verificação de vida                        |
//! | `/extract`           | POST  | Extração sobre texto enviado pelo cliente  |
//! | `/ner/demo`          | POST  | Fluxo completo sobre o documento de demo   |
//! | `/ner/process-jobs`  | POST  | Lote de documentos vindos do triplestore   |

mod config;
mod jobs;
mod mock_data;
mod triplestore;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use ner_core::{
    ExtractError, Extraction, ExtractionRequest, Extractor, ModelRegistry, PatternLibrary,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use config::AppConfig;
use triplestore::Triplestore;

/// Estado compartilhado da aplicação
struct AppState {
    extractor: Arc<Extractor>,
    store: Triplestore,
    config: AppConfig,
}

#[derive(Deserialize)]
struct ExtractBody {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    min_confidence: Option<f64>,
    #[serde(default)]
    max_entities: Option<usize>,
}

#[derive(Deserialize, Default)]
struct DemoBody {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    method: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env().expect("configuração inválida no ambiente");
    let extractor = Extractor::new(
        PatternLibrary::standard().expect("padrões embutidos inválidos"),
        ModelRegistry::standard(),
        config.settings(),
    );
    let store = Triplestore::new(config.sparql_endpoint.clone());
    let bind = config.bind.clone();

    let state = Arc::new(AppState {
        extractor: Arc::new(extractor),
        store,
        config,
    });

    let listener = tokio::net::TcpListener::bind(&bind).await.unwrap();
    info!("🚀 Serviço NER escutando em http://{bind}");
    axum::serve(listener, app(state)).await.unwrap();
}

/// Monta o roteador completo (separado do `main` para os testes).
fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/hello", get(hello_handler))
        .route("/extract", post(extract_handler))
        .route("/ner/demo", post(demo_handler))
        .route("/ner/process-jobs", post(jobs_handler))
        .layer(cors)
        .with_state(state)
}

/// Verificação de vida
async fn hello_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Hello from NER service!" }))
}

/// Extração sobre texto fornecido pelo cliente
async fn extract_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExtractBody>,
) -> impl IntoResponse {
    let request = ExtractionRequest {
        text: body.text,
        language: body
            .language
            .unwrap_or_else(|| state.config.default_language.clone()),
        method: body
            .method
            .unwrap_or_else(|| state.config.default_method.clone()),
        min_confidence: body.min_confidence,
        max_entities: body.max_entities,
    };

    match run_extraction(&state, request).await {
        Ok(extraction) => (StatusCode::OK, Json(success_envelope(&extraction))).into_response(),
        Err(err) => failure_response(&err).into_response(),
    }
}

/// Fluxo completo sobre o documento de demonstração embutido
async fn demo_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<DemoBody>>,
) -> impl IntoResponse {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let language = body
        .language
        .unwrap_or_else(|| state.config.default_language.clone());
    let method = body
        .method
        .unwrap_or_else(|| state.config.default_method.clone());

    info!("[DEMO] executando o fluxo de extração sobre o documento de demonstração");
    let request = ExtractionRequest::new(mock_data::GENT_BESLUIT, &language, &method);

    match run_extraction(&state, request).await {
        Ok(extraction) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "demo_mode": true,
                "message": "fluxo de demonstração concluído",
                "document_type": "besluit municipal (Gemeente Zonnedorp)",
                "language": extraction.language,
                "method": extraction.method,
                "entities_found": extraction.count(),
                "entities": extraction.entities,
                "text_processed": mock_data::GENT_BESLUIT,
                "processed_at": chrono::Utc::now().to_rfc3339(),
            })),
        )
            .into_response(),
        Err(err) => failure_response(&err).into_response(),
    }
}

/// Lote de documentos do triplestore
async fn jobs_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match jobs::process_documents(&state.store, Arc::clone(&state.extractor), &state.config).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "success": false,
                "error": format!("falha ao consultar o triplestore: {err}"),
            })),
        )
            .into_response(),
    }
}

/// Roda o núcleo síncrono fora do executor async.
async fn run_extraction(
    state: &Arc<AppState>,
    request: ExtractionRequest,
) -> Result<Extraction, ExtractError> {
    let extractor = Arc::clone(&state.extractor);
    tokio::task::spawn_blocking(move || extractor.process(&request))
        .await
        .map_err(|err| ExtractError::Extraction(format!("tarefa de extração abortada: {err}")))?
}

fn success_envelope(extraction: &Extraction) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "language": extraction.language,
        "method": extraction.method,
        "entities_found": extraction.count(),
        "entities": extraction.entities,
        "processed_at": chrono::Utc::now().to_rfc3339(),
    })
}

/// Mapeia a taxonomia de erros do núcleo para códigos HTTP.
fn status_for(err: &ExtractError) -> StatusCode {
    match err {
        ExtractError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ExtractError::ModelUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ExtractError::Configuration(_) | ExtractError::Extraction(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn failure_response(err: &ExtractError) -> (StatusCode, Json<serde_json::Value>) {
    (
        status_for(err),
        Json(serde_json::json!({
            "success": false,
            "error": err.to_string(),
        })),
    )
}
