//! Per-endpoint precondition checks.
//!
//! Every check runs against a borrowed [`CityInfoRepository`] and returns the
//! data the handler needs next, or the first failure in evaluation order. The
//! validator never stages changes; handlers do that once a check succeeds.

use super::model_errors::ModelErrors;
use crate::application::mapper::CityInfoMapper;
use crate::application::points_of_interest::dto::{
    PointOfInterestForCreationDto, PointOfInterestForUpdateDto,
};
use crate::application::points_of_interest::patch::PatchDocument;
use crate::domain::city::entity::{City, NewPointOfInterest, PointOfInterest};
use crate::domain::city::errors::DomainError;
use crate::domain::city::repository::CityInfoRepository;
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

pub const DESCRIPTION_EQUALS_NAME: &str =
    "The provided description should be different from the name.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// Missing input, or input that broke a rule. `None` when there is
    /// nothing more specific to report than "no usable body".
    #[error("Bad request")]
    BadRequest(Option<ModelErrors>),
    #[error("Not found: {0}")]
    NotFound(String),
    /// A lookup failed in the store before any rule could be decided.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for ValidationFailure {
    fn from(err: DomainError) -> Self {
        ValidationFailure::Internal(err.to_string())
    }
}

/// A patch that applied cleanly and whose result passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPatch {
    /// The point as currently persisted.
    pub point: PointOfInterest,
    /// The working copy after the patch.
    pub patched: PointOfInterestForUpdateDto,
}

pub struct RequestValidator {
    mapper: Arc<CityInfoMapper>,
}

impl RequestValidator {
    pub fn new(mapper: Arc<CityInfoMapper>) -> Self {
        Self { mapper }
    }

    pub async fn validate_get_city(
        &self,
        city_id: i32,
        include_points: bool,
        repo: &CityInfoRepository,
    ) -> Result<City, ValidationFailure> {
        repo.get_city(city_id, include_points)
            .await?
            .ok_or_else(|| {
                tracing::info!(city_id, "City was not found");
                ValidationFailure::NotFound(format!("City {}", city_id))
            })
    }

    pub async fn validate_get_points(
        &self,
        city_id: i32,
        repo: &CityInfoRepository,
    ) -> Result<(), ValidationFailure> {
        ensure_city_exists(city_id, repo).await
    }

    pub async fn validate_get_point(
        &self,
        city_id: i32,
        id: i32,
        repo: &CityInfoRepository,
    ) -> Result<PointOfInterest, ValidationFailure> {
        existing_point(city_id, id, repo).await
    }

    pub async fn validate_create(
        &self,
        city_id: i32,
        point: Option<&PointOfInterestForCreationDto>,
        repo: &CityInfoRepository,
    ) -> Result<NewPointOfInterest, ValidationFailure> {
        let point = point.ok_or(ValidationFailure::BadRequest(None))?;

        if point.description_matches_name() {
            return Err(description_equals_name());
        }

        ensure_city_exists(city_id, repo).await?;

        point
            .validate()
            .map_err(|e| ValidationFailure::BadRequest(Some(e.into())))?;

        Ok(self.mapper.to_new_point(point))
    }

    pub async fn validate_update(
        &self,
        city_id: i32,
        id: i32,
        point: Option<&PointOfInterestForUpdateDto>,
        repo: &CityInfoRepository,
    ) -> Result<PointOfInterest, ValidationFailure> {
        let point = point.ok_or(ValidationFailure::BadRequest(None))?;

        if point.description_matches_name() {
            return Err(description_equals_name());
        }

        let current = existing_point(city_id, id, repo).await?;

        point
            .validate()
            .map_err(|e| ValidationFailure::BadRequest(Some(e.into())))?;

        Ok(current)
    }

    /// The persisted point is left alone: the patch runs on a mapped copy.
    ///
    /// A description equal to the name is reported together with any other
    /// validation errors of the patched copy.
    pub async fn validate_partially(
        &self,
        city_id: i32,
        id: i32,
        patch: Option<&PatchDocument>,
        repo: &CityInfoRepository,
    ) -> Result<ValidatedPatch, ValidationFailure> {
        let patch = patch.ok_or(ValidationFailure::BadRequest(None))?;

        let point = existing_point(city_id, id, repo).await?;

        let mut patched = self.mapper.to_point_for_update(&point);
        patch
            .apply_to(&mut patched)
            .map_err(|errors| ValidationFailure::BadRequest(Some(errors)))?;

        let mut errors = ModelErrors::new();
        if patched.description_matches_name() {
            errors.add("Description", DESCRIPTION_EQUALS_NAME);
        }
        if let Err(e) = patched.validate() {
            errors.merge(e.into());
        }
        if !errors.is_empty() {
            return Err(ValidationFailure::BadRequest(Some(errors)));
        }

        Ok(ValidatedPatch { point, patched })
    }

    pub async fn validate_delete(
        &self,
        city_id: i32,
        id: i32,
        repo: &CityInfoRepository,
    ) -> Result<PointOfInterest, ValidationFailure> {
        existing_point(city_id, id, repo).await
    }
}

fn description_equals_name() -> ValidationFailure {
    ValidationFailure::BadRequest(Some(ModelErrors::single(
        "Description",
        DESCRIPTION_EQUALS_NAME,
    )))
}

async fn ensure_city_exists(
    city_id: i32,
    repo: &CityInfoRepository,
) -> Result<(), ValidationFailure> {
    if repo.city_exists(city_id).await? {
        Ok(())
    } else {
        tracing::info!(city_id, "City was not found when accessing points of interest");
        Err(ValidationFailure::NotFound(format!("City {}", city_id)))
    }
}

async fn existing_point(
    city_id: i32,
    id: i32,
    repo: &CityInfoRepository,
) -> Result<PointOfInterest, ValidationFailure> {
    ensure_city_exists(city_id, repo).await?;
    repo.get_point_of_interest_for_city(city_id, id)
        .await?
        .ok_or_else(|| {
            tracing::info!(city_id, point_id = id, "Point of interest was not found");
            ValidationFailure::NotFound(format!(
                "Point of interest {} in city {}",
                id, city_id
            ))
        })
}
