use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::session::{Interaction, SessionStore};
use super::system::{
    DiscountRequest, ExperienceRequest, FormSubmission, SpecialistRequest,
    VeteranPersonalizationSystem,
};
use super::PersonalizationError;
use crate::content::PageContext;
use crate::profile::{FormData, ProfileId, ProfileStore, SessionData};

type SharedSystem<P, S> = Arc<VeteranPersonalizationSystem<P, S>>;

/// Body for one-shot profile classification.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ProfileRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub form_data: Option<FormData>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Router exposing profile classification and session personalization endpoints.
pub fn personalization_router<P, S>(system: SharedSystem<P, S>) -> Router
where
    P: ProfileStore + 'static,
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/veterans/profiles", post(create_profile::<P, S>))
        .route(
            "/api/v1/veterans/profiles/:profile_id",
            get(get_profile::<P, S>),
        )
        .route("/api/v1/veterans/sessions", post(start_session::<P, S>))
        .route(
            "/api/v1/veterans/sessions/:session_id",
            get(get_session::<P, S>).delete(end_session::<P, S>),
        )
        .route(
            "/api/v1/veterans/sessions/:session_id/context/:context",
            get(context_view::<P, S>),
        )
        .route(
            "/api/v1/veterans/sessions/:session_id/forms",
            post(submit_form::<P, S>),
        )
        .route(
            "/api/v1/veterans/sessions/:session_id/discounts",
            post(apply_discounts::<P, S>),
        )
        .route(
            "/api/v1/veterans/sessions/:session_id/specialist",
            post(request_specialist::<P, S>),
        )
        .route(
            "/api/v1/veterans/sessions/:session_id/interactions",
            post(record_interaction::<P, S>),
        )
        .route("/api/v1/veterans/analytics", get(analytics::<P, S>))
        .with_state(system)
}

fn error_response(error: PersonalizationError) -> Response {
    let status = match &error {
        PersonalizationError::Store(_) => StatusCode::NOT_FOUND,
        PersonalizationError::UnknownContext(_) => StatusCode::BAD_REQUEST,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T, PersonalizationError>,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_profile<P, S>(
    State(system): State<SharedSystem<P, S>>,
    Json(request): Json<ProfileRequest>,
) -> Response
where
    P: ProfileStore + 'static,
    S: SessionStore + 'static,
{
    let session = request.user_id.map(|user_id| SessionData {
        user_id: Some(user_id),
    });
    let profile = system.profiles().classify(
        &request.text,
        request.form_data.as_ref(),
        session.as_ref(),
    );
    (StatusCode::OK, Json(profile)).into_response()
}

pub(crate) async fn get_profile<P, S>(
    State(system): State<SharedSystem<P, S>>,
    Path(profile_id): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
    S: SessionStore + 'static,
{
    let result = system
        .profiles()
        .get_profile(&ProfileId(profile_id))
        .map_err(PersonalizationError::from);
    respond(StatusCode::OK, result)
}

pub(crate) async fn start_session<P, S>(
    State(system): State<SharedSystem<P, S>>,
    Json(request): Json<ExperienceRequest>,
) -> Response
where
    P: ProfileStore + 'static,
    S: SessionStore + 'static,
{
    respond(
        StatusCode::CREATED,
        system.initialize_veteran_experience(request),
    )
}

pub(crate) async fn get_session<P, S>(
    State(system): State<SharedSystem<P, S>>,
    Path(session_id): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
    S: SessionStore + 'static,
{
    respond(StatusCode::OK, system.session(&session_id))
}

pub(crate) async fn end_session<P, S>(
    State(system): State<SharedSystem<P, S>>,
    Path(session_id): Path<String>,
) -> Response
where
    P: ProfileStore + 'static,
    S: SessionStore + 'static,
{
    match system.end_session(&session_id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn context_view<P, S>(
    State(system): State<SharedSystem<P, S>>,
    Path((session_id, context)): Path<(String, String)>,
) -> Response
where
    P: ProfileStore + 'static,
    S: SessionStore + 'static,
{
    let result = context
        .parse::<PageContext>()
        .map_err(PersonalizationError::from)
        .and_then(|context| system.get_contextualized_experience(&session_id, context));
    respond(StatusCode::OK, result)
}

pub(crate) async fn submit_form<P, S>(
    State(system): State<SharedSystem<P, S>>,
    Path(session_id): Path<String>,
    Json(submission): Json<FormSubmission>,
) -> Response
where
    P: ProfileStore + 'static,
    S: SessionStore + 'static,
{
    respond(
        StatusCode::OK,
        system.process_veteran_form_submission(&session_id, submission),
    )
}

pub(crate) async fn apply_discounts<P, S>(
    State(system): State<SharedSystem<P, S>>,
    Path(session_id): Path<String>,
    Json(request): Json<DiscountRequest>,
) -> Response
where
    P: ProfileStore + 'static,
    S: SessionStore + 'static,
{
    respond(
        StatusCode::OK,
        system.apply_veteran_discounts(&session_id, request),
    )
}

pub(crate) async fn request_specialist<P, S>(
    State(system): State<SharedSystem<P, S>>,
    Path(session_id): Path<String>,
    Json(request): Json<SpecialistRequest>,
) -> Response
where
    P: ProfileStore + 'static,
    S: SessionStore + 'static,
{
    respond(
        StatusCode::OK,
        system.request_specialist_contact(&session_id, request),
    )
}

pub(crate) async fn record_interaction<P, S>(
    State(system): State<SharedSystem<P, S>>,
    Path(session_id): Path<String>,
    Json(interaction): Json<Interaction>,
) -> Response
where
    P: ProfileStore + 'static,
    S: SessionStore + 'static,
{
    respond(
        StatusCode::ACCEPTED,
        system.record_interaction(&session_id, interaction),
    )
}

pub(crate) async fn analytics<P, S>(State(system): State<SharedSystem<P, S>>) -> Response
where
    P: ProfileStore + 'static,
    S: SessionStore + 'static,
{
    (StatusCode::OK, Json(system.analytics())).into_response()
}
