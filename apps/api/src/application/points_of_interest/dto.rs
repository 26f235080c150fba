//! Wire shapes for points of interest.
//!
//! Input DTOs keep every field optional so that a missing field reaches the
//! validator instead of failing deserialization, and so that a patch can
//! clear a field.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

pub const NAME_MAX_LENGTH: u64 = 50;
pub const DESCRIPTION_MAX_LENGTH: u64 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PointOfInterestDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PointOfInterestForCreationDto {
    #[validate(
        required(message = "You should provide a name value."),
        length(max = 50, message = "The name can be at most 50 characters long.")
    )]
    pub name: Option<String>,

    #[validate(length(max = 200, message = "The description can be at most 200 characters long."))]
    pub description: Option<String>,
}

/// Body of a full update, and the working copy a patch is applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PointOfInterestForUpdateDto {
    #[validate(
        required(message = "You should provide a name value."),
        length(max = 50, message = "The name can be at most 50 characters long.")
    )]
    pub name: Option<String>,

    #[validate(length(max = 200, message = "The description can be at most 200 characters long."))]
    pub description: Option<String>,
}

impl PointOfInterestForCreationDto {
    /// Exact comparison: no trimming, no case folding. Two missing values match.
    pub fn description_matches_name(&self) -> bool {
        self.description == self.name
    }
}

impl PointOfInterestForUpdateDto {
    pub fn description_matches_name(&self) -> bool {
        self.description == self.name
    }
}
