//! JSON Patch (RFC 6902) applied to [`PointOfInterestForUpdateDto`].
//!
//! Only the `/name` and `/description` members exist. Property names are
//! matched case-insensitively and `~0`/`~1` escapes are decoded. `remove` on
//! a member sets it to `null` because a DTO field cannot disappear.
//!
//! A failing operation is recorded and skipped; later operations still run.
//! The caller decides what to do with a partially applied copy, which is why
//! patches are only ever applied to a working copy.

use crate::application::points_of_interest::dto::PointOfInterestForUpdateDto;
use crate::application::validation::model_errors::ModelErrors;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(Vec<PatchOperation>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Member {
    Name,
    Description,
}

impl Member {
    fn parse(path: &str) -> Result<Self, String> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        if trimmed.contains('/') {
            return Err(format!(
                "The target location specified by path '{}' was not found.",
                path
            ));
        }

        let segment = trimmed.replace("~1", "/").replace("~0", "~");
        if segment.eq_ignore_ascii_case("name") {
            Ok(Self::Name)
        } else if segment.eq_ignore_ascii_case("description") {
            Ok(Self::Description)
        } else {
            Err(format!(
                "The target location specified by path segment '{}' was not found.",
                segment
            ))
        }
    }

    fn get(self, target: &PointOfInterestForUpdateDto) -> Option<String> {
        match self {
            Self::Name => target.name.clone(),
            Self::Description => target.description.clone(),
        }
    }

    fn set(self, target: &mut PointOfInterestForUpdateDto, value: Option<String>) {
        match self {
            Self::Name => target.name = value,
            Self::Description => target.description = value,
        }
    }
}

fn string_value(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Null => Ok(None),
        other => Err(format!("The value '{}' is invalid for target location.", other)),
    }
}

impl PatchOperation {
    /// Path the error for this operation is reported under.
    fn error_key(&self) -> &str {
        match self {
            Self::Add { path, .. }
            | Self::Remove { path }
            | Self::Replace { path, .. }
            | Self::Test { path, .. } => path,
            Self::Move { from, path } | Self::Copy { from, path } => {
                if Member::parse(from).is_err() {
                    from
                } else {
                    path
                }
            }
        }
    }

    fn apply(&self, target: &mut PointOfInterestForUpdateDto) -> Result<(), String> {
        match self {
            Self::Add { path, value } | Self::Replace { path, value } => {
                let member = Member::parse(path)?;
                member.set(target, string_value(value)?);
            }
            Self::Remove { path } => {
                Member::parse(path)?.set(target, None);
            }
            Self::Move { from, path } => {
                let source = Member::parse(from)?;
                let destination = Member::parse(path)?;
                if source != destination {
                    let value = source.get(target);
                    source.set(target, None);
                    destination.set(target, value);
                }
            }
            Self::Copy { from, path } => {
                let source = Member::parse(from)?;
                let destination = Member::parse(path)?;
                destination.set(target, source.get(target));
            }
            Self::Test { path, value } => {
                let member = Member::parse(path)?;
                let expected = string_value(value)?;
                let current = member.get(target);
                if current != expected {
                    return Err(format!(
                        "The current value '{}' at path '{}' is not equal to the test value '{}'.",
                        current.unwrap_or_default(),
                        path,
                        expected.unwrap_or_default()
                    ));
                }
            }
        }
        Ok(())
    }
}

impl PatchDocument {
    /// Apply every operation in order, collecting the ones that fail.
    pub fn apply_to(&self, target: &mut PointOfInterestForUpdateDto) -> Result<(), ModelErrors> {
        let mut errors = ModelErrors::new();
        for operation in &self.0 {
            if let Err(message) = operation.apply(target) {
                tracing::debug!(?operation, %message, "Patch operation rejected");
                errors.add(operation.error_key(), &message);
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
