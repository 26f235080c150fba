use crate::domain::city::{
    entity::{City, PointOfInterest},
    errors::DomainError,
    gateway::{CityInfoGateway, PendingChange},
};
use crate::infrastructure::seed::SeedData;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local store used by the reference deployment and by tests.
///
/// Cities own their points. Commits are applied to a copy that only replaces
/// the live data once every change has gone through.
pub struct InMemoryCityInfoGateway {
    cities: RwLock<Vec<City>>,
}

impl InMemoryCityInfoGateway {
    pub fn new(mut cities: Vec<City>) -> Self {
        for city in &mut cities {
            for point in &mut city.points_of_interest {
                point.city_id = city.id;
            }
        }
        Self {
            cities: RwLock::new(cities),
        }
    }

    pub fn from_seed(seed: SeedData) -> Self {
        Self::new(seed.into_cities())
    }
}

fn apply_change(cities: &mut [City], change: PendingChange) -> Result<(), DomainError> {
    match change {
        PendingChange::Insert(point) => {
            let taken = cities
                .iter()
                .flat_map(|c| &c.points_of_interest)
                .any(|p| p.id == point.id);
            if taken {
                return Err(DomainError::Conflict(format!(
                    "Point of interest id {} is already taken",
                    point.id
                )));
            }
            let city = cities
                .iter_mut()
                .find(|c| c.id == point.city_id)
                .ok_or_else(|| DomainError::NotFound(format!("City {}", point.city_id)))?;
            city.points_of_interest.push(point);
        }
        PendingChange::Update(point) => {
            let existing = cities
                .iter_mut()
                .filter(|c| c.id == point.city_id)
                .flat_map(|c| c.points_of_interest.iter_mut())
                .find(|p| p.id == point.id)
                .ok_or_else(|| {
                    DomainError::Conflict(format!("Point of interest {} no longer exists", point.id))
                })?;
            *existing = point;
        }
        PendingChange::Delete { city_id, point_id } => {
            let city = cities
                .iter_mut()
                .find(|c| c.id == city_id)
                .ok_or_else(|| DomainError::NotFound(format!("City {}", city_id)))?;
            let before = city.points_of_interest.len();
            city.points_of_interest.retain(|p| p.id != point_id);
            if city.points_of_interest.len() == before {
                return Err(DomainError::Conflict(format!(
                    "Point of interest {} no longer exists",
                    point_id
                )));
            }
        }
    }
    Ok(())
}

#[async_trait]
impl CityInfoGateway for InMemoryCityInfoGateway {
    async fn city_exists(&self, city_id: i32) -> Result<bool, DomainError> {
        Ok(self.cities.read().await.iter().any(|c| c.id == city_id))
    }

    async fn find_city(
        &self,
        city_id: i32,
        include_points: bool,
    ) -> Result<Option<City>, DomainError> {
        let cities = self.cities.read().await;
        Ok(cities.iter().find(|c| c.id == city_id).map(|c| {
            if include_points {
                c.clone()
            } else {
                c.without_points()
            }
        }))
    }

    async fn find_cities(&self) -> Result<Vec<City>, DomainError> {
        let cities = self.cities.read().await;
        Ok(cities.iter().map(City::without_points).collect())
    }

    async fn find_points_for_city(
        &self,
        city_id: i32,
    ) -> Result<Vec<PointOfInterest>, DomainError> {
        let cities = self.cities.read().await;
        Ok(cities
            .iter()
            .find(|c| c.id == city_id)
            .map(|c| c.points_of_interest.clone())
            .unwrap_or_default())
    }

    async fn find_point_for_city(
        &self,
        city_id: i32,
        point_id: i32,
    ) -> Result<Option<PointOfInterest>, DomainError> {
        let cities = self.cities.read().await;
        Ok(cities
            .iter()
            .find(|c| c.id == city_id)
            .and_then(|c| c.points_of_interest.iter().find(|p| p.id == point_id))
            .cloned())
    }

    async fn max_point_of_interest_id(&self) -> Result<i32, DomainError> {
        let cities = self.cities.read().await;
        Ok(cities
            .iter()
            .flat_map(|c| &c.points_of_interest)
            .map(|p| p.id)
            .max()
            .unwrap_or(0))
    }

    async fn commit(&self, changes: Vec<PendingChange>) -> Result<(), DomainError> {
        let mut cities = self.cities.write().await;
        let mut working = cities.clone();
        for change in changes {
            apply_change(&mut working, change)?;
        }
        *cities = working;
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
