use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Link between a dataset class and a class defined in an external ontology.
/// One row per dataset class, enforced by a unique index.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dataset_class_ontologies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub dataset_class_id: i32,
    pub ontology_id: i32,
    pub class_id: i32,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dataset_classes::Entity",
        from = "Column::DatasetClassId",
        to = "super::dataset_classes::Column::Id"
    )]
    DatasetClasses,
}

impl Related<super::dataset_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DatasetClasses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
