//! Enum types stored as strings on entity rows, with typed accessors.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Annotation tool a class is defined for. Stored as its SCREAMING_SNAKE_CASE
/// name in the `tool_type` column.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolType {
    Polygon,
    BoundingBox,
    Polyline,
    KeyPoint,
    Cuboid,
}

impl ToolType {
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

/// Sortable columns for paged class queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortBy {
    Name,
    CreateTime,
}

/// Sort direction. Ascending unless descending is asked for explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, AsRefStr, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}
