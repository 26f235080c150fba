use serde::{Deserialize, Serialize};

/// A seeded city together with the points of interest it owns.
///
/// `points_of_interest` is only populated when the caller asked for it;
/// otherwise it is empty, never missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(skip)]
    #[serde(default)]
    pub points_of_interest: Vec<PointOfInterest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PointOfInterest {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub city_id: i32,
}

/// A validated point of interest that has not been given an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPointOfInterest {
    pub name: String,
    pub description: Option<String>,
}

impl City {
    /// Copy of the city without its points, as returned by summary lookups.
    pub fn without_points(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            points_of_interest: Vec::new(),
        }
    }
}
