//! Port for the backing store of cities and points of interest.
//!
//! A gateway answers reads against committed state and applies a whole
//! [`PendingChange`] batch atomically: either every change becomes visible
//! or none does.

use super::entity::{City, PointOfInterest};
use super::errors::DomainError;
use async_trait::async_trait;

/// A mutation staged by a unit of work and applied on commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    Insert(PointOfInterest),
    Update(PointOfInterest),
    Delete { city_id: i32, point_id: i32 },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CityInfoGateway: Send + Sync {
    async fn city_exists(&self, city_id: i32) -> Result<bool, DomainError>;

    /// Points are loaded only when `include_points` is set.
    async fn find_city(
        &self,
        city_id: i32,
        include_points: bool,
    ) -> Result<Option<City>, DomainError>;

    /// All cities without their points, in the order the store keeps them.
    async fn find_cities(&self) -> Result<Vec<City>, DomainError>;

    async fn find_points_for_city(&self, city_id: i32)
    -> Result<Vec<PointOfInterest>, DomainError>;

    async fn find_point_for_city(
        &self,
        city_id: i32,
        point_id: i32,
    ) -> Result<Option<PointOfInterest>, DomainError>;

    /// Highest point of interest id across every city, 0 when there are none.
    async fn max_point_of_interest_id(&self) -> Result<i32, DomainError>;

    async fn commit(&self, changes: Vec<PendingChange>) -> Result<(), DomainError>;

    async fn ping(&self) -> Result<(), DomainError>;
}
