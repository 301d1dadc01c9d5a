use super::controller::SearchController;
use super::types::{
    LoadMoreResponse, SearchState, SetsResponse, SubmitQueryRequest, SubmitQueryResponse,
};
use crate::catalog::sets::is_known_set;
use crate::catalog::types::Card;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_submit_query(
    Extension(controller): Extension<Arc<SearchController>>,
    Json(req): Json<SubmitQueryRequest>,
) -> Result<(StatusCode, Json<SubmitQueryResponse>), StatusCode> {
    let set = req
        .set
        .map(|code| code.trim().to_uppercase())
        .filter(|code| !code.is_empty());
    if let Some(code) = &set {
        if !is_known_set(code) {
            tracing::debug!("Rejecting search in unknown set {}", code);
            return Err(StatusCode::BAD_REQUEST);
        }
    }

    let token = controller.submit_query(req.query, set);
    Ok((StatusCode::ACCEPTED, Json(SubmitQueryResponse { token })))
}

pub async fn handle_load_more(
    Extension(controller): Extension<Arc<SearchController>>,
) -> (StatusCode, Json<LoadMoreResponse>) {
    let started = controller.load_more();
    let status = if started {
        StatusCode::ACCEPTED
    } else {
        StatusCode::OK
    };
    (status, Json(LoadMoreResponse { started }))
}

pub async fn handle_get_state(
    Extension(controller): Extension<Arc<SearchController>>,
) -> Json<SearchState> {
    Json(controller.state())
}

pub async fn handle_reset(Extension(controller): Extension<Arc<SearchController>>) -> StatusCode {
    controller.reset();
    StatusCode::NO_CONTENT
}

pub async fn handle_get_card(
    Extension(controller): Extension<Arc<SearchController>>,
    Path((set_code, card_code)): Path<(String, String)>,
) -> Result<Json<Card>, StatusCode> {
    let token = controller.current_token();
    match controller.resolve_item(&set_code, &card_code, token).await {
        Ok(Some(card)) => Ok(Json(card)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Card lookup {}/{} failed: {}", set_code, card_code, e);
            Err(StatusCode::BAD_GATEWAY)
        }
    }
}

pub async fn handle_list_sets(
    Extension(controller): Extension<Arc<SearchController>>,
) -> Json<SetsResponse> {
    Json(SetsResponse {
        known: controller.universe().to_vec(),
        cached: controller.cached_sets(),
    })
}
