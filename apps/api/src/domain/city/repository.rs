use super::entity::{City, NewPointOfInterest, PointOfInterest};
use super::errors::DomainError;
use super::gateway::{CityInfoGateway, PendingChange};
use std::sync::Arc;

/// Unit of work over a [`CityInfoGateway`].
///
/// Reads go straight to the gateway and only see committed state. Mutations
/// are staged and become visible to other requests once [`save`] succeeds.
/// Build one per request.
///
/// [`save`]: CityInfoRepository::save
pub struct CityInfoRepository {
    gateway: Arc<dyn CityInfoGateway>,
    pending: Vec<PendingChange>,
}

impl CityInfoRepository {
    pub fn new(gateway: Arc<dyn CityInfoGateway>) -> Self {
        Self {
            gateway,
            pending: Vec::new(),
        }
    }

    pub async fn city_exists(&self, city_id: i32) -> Result<bool, DomainError> {
        self.gateway.city_exists(city_id).await
    }

    pub async fn get_city(
        &self,
        city_id: i32,
        include_points: bool,
    ) -> Result<Option<City>, DomainError> {
        self.gateway.find_city(city_id, include_points).await
    }

    pub async fn get_cities(&self) -> Result<Vec<City>, DomainError> {
        self.gateway.find_cities().await
    }

    /// Empty both when the city is unknown and when it has no points.
    pub async fn get_points_of_interest_for_city(
        &self,
        city_id: i32,
    ) -> Result<Vec<PointOfInterest>, DomainError> {
        self.gateway.find_points_for_city(city_id).await
    }

    pub async fn get_point_of_interest_for_city(
        &self,
        city_id: i32,
        point_id: i32,
    ) -> Result<Option<PointOfInterest>, DomainError> {
        self.gateway.find_point_for_city(city_id, point_id).await
    }

    /// Stage a new point for `city_id`.
    ///
    /// The id is one past the highest id in the whole store (points staged in
    /// this unit of work included), not per city. Fails with `Conflict` once
    /// the highest id is `i32::MAX`.
    pub async fn add_point_of_interest_for_city(
        &mut self,
        city_id: i32,
        point: NewPointOfInterest,
    ) -> Result<PointOfInterest, DomainError> {
        let committed_max = self.gateway.max_point_of_interest_id().await?;
        let staged_max = self
            .pending
            .iter()
            .filter_map(|change| match change {
                PendingChange::Insert(p) => Some(p.id),
                _ => None,
            })
            .max()
            .unwrap_or(0);

        let id = committed_max
            .max(staged_max)
            .checked_add(1)
            .ok_or_else(|| DomainError::Conflict("Point of interest ids are exhausted".into()))?;

        let created = PointOfInterest {
            id,
            name: point.name,
            description: point.description,
            city_id,
        };
        self.pending.push(PendingChange::Insert(created.clone()));
        Ok(created)
    }

    pub fn update_point_of_interest(&mut self, point: PointOfInterest) {
        self.pending.push(PendingChange::Update(point));
    }

    pub fn delete_point_of_interest(&mut self, point: &PointOfInterest) {
        self.pending.push(PendingChange::Delete {
            city_id: point.city_id,
            point_id: point.id,
        });
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Commit staged changes. Returns `false` when the gateway rejects them.
    ///
    /// Staged changes are dropped whether or not the commit succeeds.
    pub async fn save(&mut self) -> bool {
        let changes = std::mem::take(&mut self.pending);
        if changes.is_empty() {
            return true;
        }

        let count = changes.len();
        match self.gateway.commit(changes).await {
            Ok(()) => {
                tracing::debug!(changes = count, "Committed city info changes");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, changes = count, "Failed to commit city info changes");
                false
            }
        }
    }
}
