use axum::{
    Router,
    http::{HeaderValue, StatusCode, header::InvalidHeaderValue},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::{handlers::rest, service::NoteService};

/// Allows `origin` with credentials. Methods and headers are mirrored from
/// the preflight request because wildcards may not be combined with credentials.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = origin.parse::<HeaderValue>()?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

pub fn router(service: Arc<NoteService>, cors: CorsLayer) -> Router {
    let notes = get(rest::get_all_notes).post(rest::create_note);
    let note = get(rest::get_one_note)
        .put(rest::update_note)
        .delete(rest::delete_note);

    Router::new()
        .route("/", get(root))
        .route("/notes/", notes.clone())
        .route("/notes", notes)
        .route("/notes/{id}", note)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Notes API is up").into_response()
}
