use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::application::points_of_interest::{
    dto::{PointOfInterestDto, PointOfInterestForCreationDto, PointOfInterestForUpdateDto},
    patch::PatchDocument,
};
use crate::domain::city::{entity::PointOfInterest, repository::CityInfoRepository};
use crate::presentation::http::{errors::AppError, extract::optional_json, state::AppState};

pub const DELETED_SUBJECT: &str = "Point of interest deleted.";

async fn save_changes(repo: &mut CityInfoRepository) -> Result<(), AppError> {
    if repo.save().await {
        Ok(())
    } else {
        Err(AppError::Internal("Saving city info changes failed".into()))
    }
}

fn location(city_id: i32, point: &PointOfInterest) -> String {
    format!("/api/cities/{}/pointsofinterest/{}", city_id, point.id)
}

pub async fn get_points_of_interest(
    State(state): State<AppState>,
    Path(city_id): Path<i32>,
) -> Result<Json<Vec<PointOfInterestDto>>, AppError> {
    let repo = state.repository();
    state.validator.validate_get_points(city_id, &repo).await?;

    let points = repo.get_points_of_interest_for_city(city_id).await?;
    Ok(Json(state.mapper.to_point_of_interest_dtos(&points)))
}

pub async fn get_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, id)): Path<(i32, i32)>,
) -> Result<Json<PointOfInterestDto>, AppError> {
    let repo = state.repository();
    let point = state.validator.validate_get_point(city_id, id, &repo).await?;

    Ok(Json(state.mapper.to_point_of_interest_dto(&point)))
}

pub async fn create_point_of_interest(
    State(state): State<AppState>,
    Path(city_id): Path<i32>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let input: Option<PointOfInterestForCreationDto> = optional_json(&body);
    let mut repo = state.repository();

    let new_point = state
        .validator
        .validate_create(city_id, input.as_ref(), &repo)
        .await?;

    let created = repo.add_point_of_interest_for_city(city_id, new_point).await?;
    save_changes(&mut repo).await?;

    tracing::info!(city_id, point_id = created.id, "Created point of interest");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(city_id, &created))],
        Json(state.mapper.to_point_of_interest_dto(&created)),
    ))
}

pub async fn update_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, id)): Path<(i32, i32)>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let input: Option<PointOfInterestForUpdateDto> = optional_json(&body);
    let mut repo = state.repository();

    let mut point = state
        .validator
        .validate_update(city_id, id, input.as_ref(), &repo)
        .await?;

    if let Some(update) = &input {
        state.mapper.apply_update(update, &mut point);
    }
    repo.update_point_of_interest(point);
    save_changes(&mut repo).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn partially_update_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, id)): Path<(i32, i32)>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let patch: Option<PatchDocument> = optional_json(&body);
    let mut repo = state.repository();

    let validated = state
        .validator
        .validate_partially(city_id, id, patch.as_ref(), &repo)
        .await?;

    let mut point = validated.point;
    state.mapper.apply_update(&validated.patched, &mut point);
    repo.update_point_of_interest(point);
    save_changes(&mut repo).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Removes the point, then notifies. A failed notification is logged and
/// the delete still answers 204.
pub async fn delete_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, id)): Path<(i32, i32)>,
) -> Result<StatusCode, AppError> {
    let mut repo = state.repository();
    let point = state.validator.validate_delete(city_id, id, &repo).await?;

    repo.delete_point_of_interest(&point);
    save_changes(&mut repo).await?;

    let message = format!(
        "Point of interest {} with id {} was deleted.",
        point.name, point.id
    );
    if let Err(e) = state.mail_service.send(DELETED_SUBJECT, &message).await {
        tracing::warn!(error = %e, point_id = point.id, "Failed to send deletion notice");
    }

    Ok(StatusCode::NO_CONTENT)
}
