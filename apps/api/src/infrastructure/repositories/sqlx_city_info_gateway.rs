use crate::domain::city::{
    entity::{City, PointOfInterest},
    errors::DomainError,
    gateway::{CityInfoGateway, PendingChange},
};
use crate::infrastructure::seed::SeedData;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

pub struct SqlxCityInfoGateway {
    pub pool: PgPool,
}

impl SqlxCityInfoGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the seed when the `cities` table is empty. Returns whether
    /// anything was written.
    pub async fn seed_if_empty(&self, seed: SeedData) -> Result<bool, DomainError> {
        let mut tx = self.pool.begin().await.map_err(infrastructure)?;

        let has_cities =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM cities)")
                .fetch_one(&mut *tx)
                .await
                .map_err(infrastructure)?;
        if has_cities {
            return Ok(false);
        }

        for city in seed.into_cities() {
            sqlx::query("INSERT INTO cities (id, name, description) VALUES ($1, $2, $3)")
                .bind(city.id)
                .bind(&city.name)
                .bind(&city.description)
                .execute(&mut *tx)
                .await
                .map_err(infrastructure)?;
            for point in &city.points_of_interest {
                insert_point(&mut tx, point).await?;
            }
        }

        // Keep SERIAL in step with the explicit ids above.
        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('cities', 'id'), COALESCE(MAX(id), 1)) FROM cities",
        )
        .execute(&mut *tx)
        .await
        .map_err(infrastructure)?;

        tx.commit().await.map_err(infrastructure)?;
        tracing::info!("Seeded city info store");
        Ok(true)
    }
}

fn infrastructure(err: sqlx::Error) -> DomainError {
    DomainError::InfrastructureError(err.to_string())
}

async fn insert_point(
    tx: &mut Transaction<'_, Postgres>,
    point: &PointOfInterest,
) -> Result<(), DomainError> {
    sqlx::query(
        "INSERT INTO points_of_interest (id, name, description, city_id) VALUES ($1, $2, $3, $4)",
    )
    .bind(point.id)
    .bind(&point.name)
    .bind(&point.description)
    .bind(point.city_id)
    .execute(&mut **tx)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => DomainError::Conflict(
            format!("Point of interest id {} is already taken", point.id),
        ),
        sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
            DomainError::NotFound(format!("City {}", point.city_id))
        }
        other => infrastructure(other),
    })?;
    Ok(())
}

#[async_trait]
impl CityInfoGateway for SqlxCityInfoGateway {
    async fn city_exists(&self, city_id: i32) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM cities WHERE id = $1)")
            .bind(city_id)
            .fetch_one(&self.pool)
            .await
            .map_err(infrastructure)
    }

    async fn find_city(
        &self,
        city_id: i32,
        include_points: bool,
    ) -> Result<Option<City>, DomainError> {
        let city = sqlx::query_as::<_, City>(
            "SELECT id, name, description FROM cities WHERE id = $1",
        )
        .bind(city_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;

        match city {
            Some(mut city) if include_points => {
                city.points_of_interest = self.find_points_for_city(city.id).await?;
                Ok(Some(city))
            }
            other => Ok(other),
        }
    }

    async fn find_cities(&self) -> Result<Vec<City>, DomainError> {
        sqlx::query_as::<_, City>("SELECT id, name, description FROM cities ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure)
    }

    async fn find_points_for_city(
        &self,
        city_id: i32,
    ) -> Result<Vec<PointOfInterest>, DomainError> {
        sqlx::query_as::<_, PointOfInterest>(
            "SELECT id, name, description, city_id FROM points_of_interest \
             WHERE city_id = $1 ORDER BY id",
        )
        .bind(city_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)
    }

    async fn find_point_for_city(
        &self,
        city_id: i32,
        point_id: i32,
    ) -> Result<Option<PointOfInterest>, DomainError> {
        sqlx::query_as::<_, PointOfInterest>(
            "SELECT id, name, description, city_id FROM points_of_interest \
             WHERE city_id = $1 AND id = $2",
        )
        .bind(city_id)
        .bind(point_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)
    }

    async fn max_point_of_interest_id(&self) -> Result<i32, DomainError> {
        sqlx::query_scalar::<_, i32>("SELECT COALESCE(MAX(id), 0) FROM points_of_interest")
            .fetch_one(&self.pool)
            .await
            .map_err(infrastructure)
    }

    async fn commit(&self, changes: Vec<PendingChange>) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(infrastructure)?;

        for change in &changes {
            match change {
                PendingChange::Insert(point) => insert_point(&mut tx, point).await?,
                PendingChange::Update(point) => {
                    let result = sqlx::query(
                        "UPDATE points_of_interest SET name = $1, description = $2 \
                         WHERE id = $3 AND city_id = $4",
                    )
                    .bind(&point.name)
                    .bind(&point.description)
                    .bind(point.id)
                    .bind(point.city_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(infrastructure)?;
                    if result.rows_affected() != 1 {
                        return Err(DomainError::Conflict(format!(
                            "Point of interest {} no longer exists",
                            point.id
                        )));
                    }
                }
                PendingChange::Delete { city_id, point_id } => {
                    let result = sqlx::query(
                        "DELETE FROM points_of_interest WHERE id = $1 AND city_id = $2",
                    )
                    .bind(*point_id)
                    .bind(*city_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(infrastructure)?;
                    if result.rows_affected() != 1 {
                        return Err(DomainError::Conflict(format!(
                            "Point of interest {} no longer exists",
                            point_id
                        )));
                    }
                }
            }
        }

        // Dropping the transaction on an early return rolls it back.
        tx.commit().await.map_err(infrastructure)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(infrastructure)
    }
}
