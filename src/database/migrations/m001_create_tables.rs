use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create dataset_classes table
        manager
            .create_table(
                Table::create()
                    .table(DatasetClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DatasetClasses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DatasetClasses::DatasetId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DatasetClasses::Name).text().not_null())
                    .col(ColumnDef::new(DatasetClasses::ToolType).text().not_null())
                    .col(ColumnDef::new(DatasetClasses::Attributes).text())
                    .col(
                        ColumnDef::new(DatasetClasses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DatasetClasses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DatasetClasses::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Create dataset_class_ontologies table
        manager
            .create_table(
                Table::create()
                    .table(DatasetClassOntologies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DatasetClassOntologies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DatasetClassOntologies::DatasetClassId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DatasetClassOntologies::OntologyId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DatasetClassOntologies::ClassId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DatasetClassOntologies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DatasetClassOntologies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_dataset_class_ontologies_class_id")
                            .from(
                                DatasetClassOntologies::Table,
                                DatasetClassOntologies::DatasetClassId,
                            )
                            .to(DatasetClasses::Table, DatasetClasses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup index for per-dataset queries
        manager
            .create_index(
                Index::create()
                    .name("idx_dataset_classes_dataset_id")
                    .table(DatasetClasses::Table)
                    .col(DatasetClasses::DatasetId)
                    .to_owned(),
            )
            .await?;

        // One ontology mapping per dataset class
        manager
            .create_index(
                Index::create()
                    .name("idx_dataset_class_ontologies_class_unique")
                    .table(DatasetClassOntologies::Table)
                    .col(DatasetClassOntologies::DatasetClassId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Name uniqueness only applies to live rows, so the index has to be
        // partial; the schema builder cannot express that.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_dataset_classes_dataset_tool_name \
                 ON dataset_classes (dataset_id, tool_type, name) \
                 WHERE deleted_at IS NULL",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(DatasetClassOntologies::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(DatasetClasses::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum DatasetClasses {
    Table,
    Id,
    DatasetId,
    Name,
    ToolType,
    Attributes,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum DatasetClassOntologies {
    Table,
    Id,
    DatasetClassId,
    OntologyId,
    ClassId,
    CreatedAt,
    UpdatedAt,
}
