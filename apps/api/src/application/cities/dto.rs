use crate::application::points_of_interest::dto::PointOfInterestDto;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CityWithoutPointsOfInterestDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CityDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub number_of_points_of_interest: usize,
    pub points_of_interest: Vec<PointOfInterestDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityQuery {
    #[serde(default)]
    pub include_points_of_interest: bool,
}
