//! Static seed the stores are loaded from at startup.

use crate::domain::city::entity::{City, PointOfInterest};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

const EMBEDDED_SEED: &str = include_str!("../../seed/cities.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub cities: Vec<SeedCity>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedCity {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub points_of_interest: Vec<SeedPointOfInterest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedPointOfInterest {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl SeedData {
    pub fn embedded() -> anyhow::Result<Self> {
        serde_json::from_str(EMBEDDED_SEED).context("Embedded seed is not valid JSON")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Seed file {} is not valid JSON", path.display()))
    }

    /// Load `path` when given, the embedded seed otherwise.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Self::embedded(),
        }
    }

    pub fn into_cities(self) -> Vec<City> {
        self.cities
            .into_iter()
            .map(|city| {
                let city_id = city.id;
                City {
                    id: city_id,
                    name: city.name,
                    description: city.description,
                    points_of_interest: city
                        .points_of_interest
                        .into_iter()
                        .map(|p| PointOfInterest {
                            id: p.id,
                            name: p.name,
                            description: p.description,
                            city_id,
                        })
                        .collect(),
                }
            })
            .collect()
    }
}
