use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::common_types::ToolType;

/// A labeling category defined within a dataset. Rows are soft-deleted by
/// setting `deleted_at`; every query is expected to filter on it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dataset_classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub dataset_id: i32,
    pub name: String,
    pub tool_type: String,
    /// JSON document describing the labeling attributes of this class
    pub attributes: Option<String>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
    pub deleted_at: Option<ChronoDateTimeUtc>,
}

impl Model {
    pub fn get_tool_type(&self) -> Option<ToolType> {
        ToolType::from_name(&self.tool_type)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::dataset_class_ontologies::Entity")]
    DatasetClassOntologies,
}

impl Related<super::dataset_class_ontologies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DatasetClassOntologies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
