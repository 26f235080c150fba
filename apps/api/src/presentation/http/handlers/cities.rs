use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;

use crate::application::cities::dto::{CityDto, CityQuery, CityWithoutPointsOfInterestDto};
use crate::presentation::http::{errors::AppError, state::AppState};

pub async fn get_cities(
    State(state): State<AppState>,
) -> Result<Json<Vec<CityWithoutPointsOfInterestDto>>, AppError> {
    let repo = state.repository();
    let cities = repo.get_cities().await?;

    Ok(Json(state.mapper.to_city_summaries(&cities)))
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CityResponse {
    WithPoints(CityDto),
    Summary(CityWithoutPointsOfInterestDto),
}

/// Without `includePointsOfInterest=true` the body is a city summary;
/// otherwise it is the full city with its points.
pub async fn get_city(
    State(state): State<AppState>,
    Path(city_id): Path<i32>,
    Query(params): Query<CityQuery>,
) -> Result<Json<CityResponse>, AppError> {
    let repo = state.repository();
    let city = state
        .validator
        .validate_get_city(city_id, params.include_points_of_interest, &repo)
        .await?;

    let body = if params.include_points_of_interest {
        CityResponse::WithPoints(state.mapper.to_city_dto(&city))
    } else {
        CityResponse::Summary(state.mapper.to_city_summary(&city))
    };

    Ok(Json(body))
}
