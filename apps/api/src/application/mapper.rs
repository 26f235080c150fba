//! Entity ↔ DTO conversions.
//!
//! One `CityInfoMapper` is built at startup and shared through the app
//! state; it carries no mutable state.

use crate::application::cities::dto::{CityDto, CityWithoutPointsOfInterestDto};
use crate::application::points_of_interest::dto::{
    PointOfInterestDto, PointOfInterestForCreationDto, PointOfInterestForUpdateDto,
};
use crate::domain::city::entity::{City, NewPointOfInterest, PointOfInterest};

#[derive(Debug, Clone, Copy, Default)]
pub struct CityInfoMapper;

impl CityInfoMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn to_city_summary(&self, city: &City) -> CityWithoutPointsOfInterestDto {
        CityWithoutPointsOfInterestDto {
            id: city.id,
            name: city.name.clone(),
            description: city.description.clone(),
        }
    }

    pub fn to_city_summaries(&self, cities: &[City]) -> Vec<CityWithoutPointsOfInterestDto> {
        cities.iter().map(|c| self.to_city_summary(c)).collect()
    }

    pub fn to_city_dto(&self, city: &City) -> CityDto {
        let points_of_interest = self.to_point_of_interest_dtos(&city.points_of_interest);
        CityDto {
            id: city.id,
            name: city.name.clone(),
            description: city.description.clone(),
            number_of_points_of_interest: points_of_interest.len(),
            points_of_interest,
        }
    }

    pub fn to_point_of_interest_dto(&self, point: &PointOfInterest) -> PointOfInterestDto {
        PointOfInterestDto {
            id: point.id,
            name: point.name.clone(),
            description: point.description.clone(),
        }
    }

    pub fn to_point_of_interest_dtos(&self, points: &[PointOfInterest]) -> Vec<PointOfInterestDto> {
        points
            .iter()
            .map(|p| self.to_point_of_interest_dto(p))
            .collect()
    }

    /// Working copy a patch document is applied to.
    pub fn to_point_for_update(&self, point: &PointOfInterest) -> PointOfInterestForUpdateDto {
        PointOfInterestForUpdateDto {
            name: Some(point.name.clone()),
            description: point.description.clone(),
        }
    }

    /// Only call with a DTO that passed validation; a missing name maps to "".
    pub fn to_new_point(&self, dto: &PointOfInterestForCreationDto) -> NewPointOfInterest {
        NewPointOfInterest {
            name: dto.name.clone().unwrap_or_default(),
            description: dto.description.clone(),
        }
    }

    pub fn apply_update(&self, dto: &PointOfInterestForUpdateDto, point: &mut PointOfInterest) {
        point.name = dto.name.clone().unwrap_or_default();
        point.description = dto.description.clone();
    }
}
