//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::{ErrorBody, RequestError};
use crate::web::protocol::{
    CategoriesResponse, NewQuestionRequest, PageParams, QuestionListResponse, QuestionView,
    QuizRequest, QuizResponse, SearchRequest,
};
use crate::web::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use trivia_core::{
    category_map, next_question, paginate, CategoryFilter, CategoryId, CategoryMap, PageRequest,
    PortError, Question, QuestionId,
};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories_handler,
        list_questions_handler,
        delete_question_handler,
        create_question_handler,
        search_questions_handler,
        questions_by_category_handler,
        play_quiz_handler,
    ),
    components(
        schemas(
            QuestionView,
            CategoriesResponse,
            QuestionListResponse,
            QuizResponse,
            NewQuestionRequest,
            SearchRequest,
            QuizRequest,
            ErrorBody,
        )
    ),
    tags(
        (name = "Trivia API", description = "Question listing, search, editing and quiz play.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Helpers
//=========================================================================================

/// Logs a store fault and hides its detail from the client.
fn store_fault(action: &'static str) -> impl Fn(PortError) -> RequestError {
    move |e| {
        error!("Failed to {}: {:?}", action, e);
        RequestError::from(e)
    }
}

fn page_of(query: Result<Query<PageParams>, QueryRejection>) -> PageRequest {
    query
        .map(|Query(params)| params.page_request())
        .unwrap_or_default()
}

async fn load_categories(app_state: &AppState) -> Result<CategoryMap, RequestError> {
    let categories = app_state
        .store
        .list_categories()
        .await
        .map_err(store_fault("list categories"))?;
    Ok(category_map(&categories))
}

/// The full listing as seen right after a mutation, paginated from `page`.
async fn listing_after_mutation(
    app_state: &AppState,
    page: PageRequest,
) -> Result<QuestionListResponse, RequestError> {
    let questions = app_state
        .store
        .list_all()
        .await
        .map_err(store_fault("list questions"))?;
    let categories = load_categories(app_state).await?;
    Ok(QuestionListResponse::new(
        paginate(&questions, page),
        questions.len(),
        categories,
    ))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List every category as an `id -> label` map.
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories", body = CategoriesResponse),
        (status = 422, description = "The store could not be read", body = ErrorBody)
    )
)]
pub async fn list_categories_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, RequestError> {
    let categories = load_categories(&app_state).await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

/// List one page of questions ordered by id.
#[utoipa::path(
    get,
    path = "/questions",
    params(PageParams),
    responses(
        (status = 200, description = "One page of questions", body = QuestionListResponse),
        (status = 404, description = "The requested page is empty", body = ErrorBody)
    )
)]
pub async fn list_questions_handler(
    State(app_state): State<Arc<AppState>>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<QuestionListResponse>, RequestError> {
    let page = page_of(query);
    let questions = app_state
        .store
        .list_all()
        .await
        .map_err(store_fault("list questions"))?;

    let current = paginate(&questions, page);
    if current.is_empty() {
        debug!("Page {} of {} questions is empty", page.page_number(), questions.len());
        return Err(RequestError::NotFound);
    }

    let categories = load_categories(&app_state).await?;
    Ok(Json(QuestionListResponse::new(
        current,
        questions.len(),
        categories,
    )))
}

/// Delete a question and return the refreshed listing.
#[utoipa::path(
    delete,
    path = "/questions/{question_id}",
    params(
        ("question_id" = i64, Path, description = "Id of the question to delete."),
        PageParams
    ),
    responses(
        (status = 200, description = "Question deleted", body = QuestionListResponse),
        (status = 422, description = "No such question, or the store refused", body = ErrorBody)
    )
)]
pub async fn delete_question_handler(
    State(app_state): State<Arc<AppState>>,
    path: Result<Path<QuestionId>, PathRejection>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<QuestionListResponse>, RequestError> {
    let Path(question_id) = path.map_err(|e| {
        warn!("Rejected delete with bad id: {}", e);
        RequestError::Unprocessable
    })?;

    let deleted = app_state
        .store
        .delete(question_id)
        .await
        .map_err(store_fault("delete question"))?;
    if !deleted {
        warn!("Question {} does not exist", question_id);
        return Err(RequestError::Unprocessable);
    }
    info!("Deleted question {}", question_id);

    let listing = listing_after_mutation(&app_state, page_of(query)).await?;
    Ok(Json(listing.deleted(question_id)))
}

/// Create a question and return the refreshed listing.
#[utoipa::path(
    post,
    path = "/questions/add",
    params(PageParams),
    request_body = NewQuestionRequest,
    responses(
        (status = 200, description = "Question created", body = QuestionListResponse),
        (status = 422, description = "Missing or invalid fields, or the store refused", body = ErrorBody)
    )
)]
pub async fn create_question_handler(
    State(app_state): State<Arc<AppState>>,
    query: Result<Query<PageParams>, QueryRejection>,
    payload: Result<Json<NewQuestionRequest>, JsonRejection>,
) -> Result<Json<QuestionListResponse>, RequestError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Rejected question body: {}", e);
        RequestError::Unprocessable
    })?;

    let draft = request.into_draft().map_err(|reason| {
        warn!("Rejected question: {}", reason);
        RequestError::Unprocessable
    })?;
    draft.validate().map_err(|e| {
        warn!("Rejected question: {}", e);
        RequestError::Unprocessable
    })?;

    let question = app_state
        .store
        .insert(draft)
        .await
        .map_err(store_fault("insert question"))?;
    info!("Created question {} in category {}", question.id, question.category);

    let listing = listing_after_mutation(&app_state, page_of(query)).await?;
    Ok(Json(listing.created(question.id)))
}

/// Search question text, ignoring case. An empty term lists everything.
#[utoipa::path(
    post,
    path = "/questions/search",
    params(PageParams),
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching questions", body = QuestionListResponse),
        (status = 400, description = "The body is not a search request", body = ErrorBody),
        (status = 404, description = "Nothing matches the term", body = ErrorBody)
    )
)]
pub async fn search_questions_handler(
    State(app_state): State<Arc<AppState>>,
    query: Result<Query<PageParams>, QueryRejection>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<QuestionListResponse>, RequestError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Rejected search body: {}", e);
        RequestError::BadRequest
    })?;
    let page = page_of(query);

    let questions = match request.term() {
        Some(term) => {
            let matches = app_state
                .store
                .search(term)
                .await
                .map_err(store_fault("search questions"))?;
            if matches.is_empty() {
                debug!("No question matches '{}'", term);
                return Err(RequestError::NotFound);
            }
            matches
        }
        None => app_state
            .store
            .list_all()
            .await
            .map_err(store_fault("list questions"))?,
    };

    let categories = load_categories(&app_state).await?;
    Ok(Json(QuestionListResponse::new(
        paginate(&questions, page),
        questions.len(),
        categories,
    )))
}

/// List one page of the questions in a category.
#[utoipa::path(
    get,
    path = "/categories/{category_id}/questions",
    params(
        ("category_id" = i64, Path, description = "Id of the category."),
        PageParams
    ),
    responses(
        (status = 200, description = "Questions of the category", body = QuestionListResponse),
        (status = 404, description = "The category has no questions", body = ErrorBody),
        (status = 422, description = "The store could not be read", body = ErrorBody)
    )
)]
pub async fn questions_by_category_handler(
    State(app_state): State<Arc<AppState>>,
    path: Result<Path<CategoryId>, PathRejection>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<QuestionListResponse>, RequestError> {
    let Path(category_id) = path.map_err(|e| {
        warn!("Rejected category id: {}", e);
        RequestError::NotFound
    })?;

    let questions = app_state
        .store
        .list_by_category(category_id)
        .await
        .map_err(store_fault("list questions by category"))?;
    if questions.is_empty() {
        debug!("Category {} has no questions", category_id);
        return Err(RequestError::NotFound);
    }

    let categories = load_categories(&app_state).await?;
    Ok(Json(QuestionListResponse::new(
        paginate(&questions, page_of(query)),
        questions.len(),
        categories,
    )))
}

/// Draw a random question the player has not seen yet.
#[utoipa::path(
    post,
    path = "/quizzes",
    request_body = QuizRequest,
    responses(
        (status = 200, description = "The next question, or null once the pool is exhausted", body = QuizResponse),
        (status = 400, description = "Malformed quiz category or previous questions", body = ErrorBody)
    )
)]
pub async fn play_quiz_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, RequestError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Rejected quiz body: {}", e);
        RequestError::BadRequest
    })?;
    let params = request.into_params().map_err(|reason| {
        warn!("Rejected quiz request: {}", reason);
        RequestError::BadRequest
    })?;

    let eligible: Vec<Question> = match params.filter {
        CategoryFilter::Any => app_state.store.list_all().await,
        CategoryFilter::Only(id) => app_state.store.list_by_category(id).await,
    }
    .map_err(store_fault("load quiz questions"))?;

    let categories = load_categories(&app_state).await?;
    let draw = next_question(&eligible, &params.excluded);
    match draw.question() {
        Some(q) => debug!("Quiz drew question {} from {} unseen", q.id, draw.remaining()),
        None => debug!("Quiz pool exhausted after {} questions", params.excluded.len()),
    }

    Ok(Json(QuizResponse {
        success: true,
        question: draw.question().map(QuestionView::from),
        total_questions: draw.remaining(),
        categories,
        current_category: String::new(),
    }))
}

/// Unknown routes answer with the JSON not-found body.
pub async fn not_found_fallback() -> RequestError {
    RequestError::NotFound
}
