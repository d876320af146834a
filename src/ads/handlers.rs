use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    ads::{
        dto::{AdResponse, CreateAdRequest, Pagination, UpdateAdRequest},
        policy::can_mutate,
        repo::Ad,
    },
    auth::extractors::AuthUser,
    error::{ApiError, ApiMessage},
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/ads/:id", get(get_ad))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/ads", post(create_ad).get(list_my_ads))
        .route("/ads/:id", put(update_ad).delete(delete_ad))
}

fn parse_ad_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Validation("Invalid ad ID".into()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[instrument(skip(state, payload))]
pub async fn create_ad(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CreateAdRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiMessage>), ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::Validation("Invalid JSON".into()))?;

    let (title, description) = match (non_empty(payload.title), non_empty(payload.description)) {
        (Some(t), Some(d)) => (t, d),
        _ => {
            warn!(owner_id = user_id, "ad payload missing title or description");
            return Err(ApiError::Validation(
                "Title and description are required".into(),
            ));
        }
    };

    let ad = Ad::create(&state.db, &title, &description, user_id).await?;

    info!(ad_id = ad.id, owner_id = user_id, "ad created");
    Ok((
        StatusCode::CREATED,
        Json(ApiMessage::new("Ad created successfully!")),
    ))
}

#[instrument(skip(state))]
pub async fn get_ad(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AdResponse>, ApiError> {
    let id = parse_ad_id(&id)?;
    let ad = Ad::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Ad not found"))?;
    Ok(Json(ad.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_ad(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAdRequest>, JsonRejection>,
) -> Result<Json<ApiMessage>, ApiError> {
    let id = parse_ad_id(&id)?;
    let Json(payload) = payload.map_err(|_| ApiError::Validation("Invalid JSON".into()))?;

    // existence before ownership: probing an unknown id yields 404, not 403
    let ad = Ad::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Ad not found"))?;
    if !can_mutate(user_id, ad.owner_id) {
        warn!(ad_id = id, caller = user_id, owner = ad.owner_id, "update forbidden");
        return Err(ApiError::Forbidden(
            "You are not authorized to update this ad",
        ));
    }

    Ad::update(
        &state.db,
        id,
        payload.title.as_deref(),
        payload.description.as_deref(),
    )
    .await?
    .ok_or(ApiError::NotFound("Ad not found"))?;

    info!(ad_id = id, owner_id = user_id, "ad updated");
    Ok(Json(ApiMessage::new("Ad updated successfully!")))
}

#[instrument(skip(state))]
pub async fn delete_ad(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiMessage>, ApiError> {
    let id = parse_ad_id(&id)?;

    let ad = Ad::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Ad not found"))?;
    if !can_mutate(user_id, ad.owner_id) {
        warn!(ad_id = id, caller = user_id, owner = ad.owner_id, "delete forbidden");
        return Err(ApiError::Forbidden(
            "You are not authorized to delete this ad",
        ));
    }

    if !Ad::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Ad not found"));
    }

    info!(ad_id = id, owner_id = user_id, "ad deleted");
    Ok(Json(ApiMessage::new("Ad deleted successfully!")))
}

#[instrument(skip(state))]
pub async fn list_my_ads(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<AdResponse>>, ApiError> {
    let ads = Ad::list_by_owner(&state.db, user_id, p.limit, p.offset).await?;
    Ok(Json(ads.into_iter().map(AdResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ad_id_accepts_integers() {
        assert_eq!(parse_ad_id("1").unwrap(), 1);
        assert_eq!(parse_ad_id("9007199").unwrap(), 9007199);
    }

    #[test]
    fn parse_ad_id_rejects_garbage() {
        let err = parse_ad_id("abc").unwrap_err();
        assert_eq!(err.to_string(), "Invalid ad ID");
        assert!(parse_ad_id("1.5").is_err());
        assert!(parse_ad_id("").is_err());
    }

    #[test]
    fn non_empty_filters_blank_fields() {
        assert_eq!(non_empty(Some("T".into())).as_deref(), Some("T"));
        assert!(non_empty(Some(String::new())).is_none());
        assert!(non_empty(None).is_none());
    }
}
