pub mod middleware;
pub mod protocol;
pub mod rest;
pub mod state;

pub use middleware::json_method_not_allowed;
pub use rest::{
    create_question_handler, delete_question_handler, list_categories_handler,
    list_questions_handler, not_found_fallback, play_quiz_handler,
    questions_by_category_handler, search_questions_handler, ApiDoc,
};
pub use state::AppState;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the CORS policy. `None` allows any origin.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                AllowOrigin::any()
            }
        },
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

/// Assembles the complete application: API routes plus the Swagger UI.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = cors_layer(app_state.config.cors_allow_origin.as_deref());

    let api_router = Router::new()
        .route("/categories", get(list_categories_handler))
        .route(
            "/categories/{category_id}/questions",
            get(questions_by_category_handler),
        )
        .route("/questions", get(list_questions_handler))
        .route("/questions/{question_id}", delete(delete_question_handler))
        .route("/questions/add", post(create_question_handler))
        .route("/questions/search", post(search_questions_handler))
        .route("/quizzes", post(play_quiz_handler))
        .fallback(not_found_fallback)
        .layer(axum_middleware::from_fn(json_method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
