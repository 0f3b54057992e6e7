use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::common::db_errors::is_unique_violation;
use crate::common::Page;
use crate::database::entities::common_types::{SortBy, SortOrder, ToolType};
use crate::database::entities::{dataset_class_ontologies, dataset_classes};
use crate::errors::{DatasetClassError, DatasetClassResult};

/// Service for managing dataset classes and their ontology mappings
#[derive(Clone)]
pub struct DatasetClassService {
    db: DatabaseConnection,
}

/// Input for creating or updating a dataset class. `dataset_id` and `name`
/// are required; the rest is optional. When both `ontology_id` and
/// `class_id` are present, the class's ontology mapping is written in the
/// same transaction.
#[derive(Clone, Debug)]
pub struct SaveDatasetClass {
    pub id: Option<i32>,
    pub dataset_id: Option<i32>,
    pub name: Option<String>,
    pub tool_type: ToolType,
    pub attributes: Option<serde_json::Value>,
    pub ontology_id: Option<i32>,
    pub class_id: Option<i32>,
}

/// Typed filter for paged class queries. `dataset_id` is the only required
/// predicate; every other field narrows the result when set.
#[derive(Clone, Debug, Default)]
pub struct DatasetClassQuery {
    pub dataset_id: i32,
    pub tool_type: Option<ToolType>,
    pub created_from: Option<chrono::DateTime<chrono::Utc>>,
    pub created_to: Option<chrono::DateTime<chrono::Utc>>,
    pub name: Option<String>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

/// A class row with its ontology mapping merged in, as returned by
/// [`DatasetClassService::find_by_id`].
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetClassDetail {
    pub class: dataset_classes::Model,
    pub ontology_id: Option<i32>,
    pub class_id: Option<i32>,
}

impl DatasetClassService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create or update a dataset class.
    ///
    /// Runs in one transaction covering the class row and, when both
    /// `ontology_id` and `class_id` are supplied, the ontology mapping row.
    /// A unique-constraint violation on the class name surfaces as
    /// [`DatasetClassError::DuplicateName`].
    pub async fn save(
        &self,
        input: SaveDatasetClass,
    ) -> DatasetClassResult<dataset_classes::Model> {
        let dataset_id = input
            .dataset_id
            .ok_or_else(|| DatasetClassError::MissingField("dataset_id".to_string()))?;
        let name = input
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| DatasetClassError::MissingField("name".to_string()))?;

        let attributes = input.attributes.as_ref().map(|value| value.to_string());
        let now = chrono::Utc::now();

        let txn = self.db.begin().await?;

        let existing = match input.id {
            Some(id) => {
                dataset_classes::Entity::find_by_id(id)
                    .filter(dataset_classes::Column::DeletedAt.is_null())
                    .one(&txn)
                    .await?
            }
            None => None,
        };

        let result = match existing {
            Some(class) => {
                let mut active: dataset_classes::ActiveModel = class.into();
                active.dataset_id = Set(dataset_id);
                active.name = Set(name.clone());
                active.tool_type = Set(input.tool_type.as_ref().to_string());
                active.attributes = Set(attributes);
                active.updated_at = Set(now);
                active.update(&txn).await
            }
            None => {
                let mut active = dataset_classes::ActiveModel {
                    dataset_id: Set(dataset_id),
                    name: Set(name.clone()),
                    tool_type: Set(input.tool_type.as_ref().to_string()),
                    attributes: Set(attributes),
                    created_at: Set(now),
                    updated_at: Set(now),
                    deleted_at: Set(None),
                    ..Default::default()
                };
                // An explicit id that names no live row inserts under that id
                if let Some(id) = input.id {
                    active.id = Set(id);
                }
                active.insert(&txn).await
            }
        };

        let saved = result.map_err(|err| {
            if is_unique_violation(&err) {
                DatasetClassError::duplicate_name(dataset_id, name.clone())
            } else {
                DatasetClassError::from(err)
            }
        })?;

        if let (Some(ontology_id), Some(class_id)) = (input.ontology_id, input.class_id) {
            self.upsert_ontology_mapping(&txn, saved.id, ontology_id, class_id, now)
                .await?;
        }

        txn.commit().await?;
        debug!(class_id = saved.id, dataset_id, "saved dataset class");
        Ok(saved)
    }

    /// The name cannot repeat under the same dataset and tool type. Returns
    /// true when another live row (excluding `id`, if given) already holds
    /// the name.
    pub async fn validate_name_exists(
        &self,
        id: Option<i32>,
        dataset_id: i32,
        name: &str,
        tool_type: ToolType,
    ) -> DatasetClassResult<bool> {
        let mut query = dataset_classes::Entity::find()
            .filter(dataset_classes::Column::Name.eq(name))
            .filter(dataset_classes::Column::DatasetId.eq(dataset_id))
            .filter(dataset_classes::Column::ToolType.eq(tool_type.as_ref()))
            .filter(dataset_classes::Column::DeletedAt.is_null());

        if let Some(id) = id {
            query = query.filter(dataset_classes::Column::Id.ne(id));
        }

        Ok(query.count(&self.db).await? > 0)
    }

    /// Paged class query. `page_no` is 1-based; results are ordered by the
    /// requested field, ascending unless descending is asked for.
    pub async fn find_by_page(
        &self,
        page_no: u64,
        page_size: u64,
        query: DatasetClassQuery,
    ) -> DatasetClassResult<Page<dataset_classes::Model>> {
        let page_no = page_no.max(1);
        let page_size = page_size.max(1);

        let mut select = dataset_classes::Entity::find()
            .filter(dataset_classes::Column::DatasetId.eq(query.dataset_id))
            .filter(dataset_classes::Column::DeletedAt.is_null());

        if let Some(tool_type) = query.tool_type {
            select = select.filter(dataset_classes::Column::ToolType.eq(tool_type.as_ref()));
        }
        if let Some(from) = query.created_from {
            select = select.filter(dataset_classes::Column::CreatedAt.gte(from));
        }
        if let Some(to) = query.created_to {
            select = select.filter(dataset_classes::Column::CreatedAt.lte(to));
        }
        if let Some(name) = query.name.as_deref().filter(|name| !name.is_empty()) {
            select = select.filter(dataset_classes::Column::Name.contains(name));
        }

        if let Some(sort_by) = query.sort_by {
            let column = match sort_by {
                SortBy::Name => dataset_classes::Column::Name,
                SortBy::CreateTime => dataset_classes::Column::CreatedAt,
            };
            select = match query.sort_order.unwrap_or_default() {
                SortOrder::Asc => select.order_by_asc(column),
                SortOrder::Desc => select.order_by_desc(column),
            };
        }

        let paginator = select.paginate(&self.db, page_size);
        let totals = paginator.num_items_and_pages().await?;
        let items = paginator.fetch_page(page_no - 1).await?;

        Ok(Page::new(items, page_no, page_size, totals.number_of_items))
    }

    /// Load a class with its ontology mapping merged in. Returns `None` for
    /// unknown or deleted ids.
    pub async fn find_by_id(&self, id: i32) -> DatasetClassResult<Option<DatasetClassDetail>> {
        let class = dataset_classes::Entity::find_by_id(id)
            .filter(dataset_classes::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        let Some(class) = class else {
            return Ok(None);
        };

        // Most recent mapping wins should legacy data hold more than one
        let mapping = dataset_class_ontologies::Entity::find()
            .filter(dataset_class_ontologies::Column::DatasetClassId.eq(id))
            .order_by_desc(dataset_class_ontologies::Column::Id)
            .one(&self.db)
            .await?;

        Ok(Some(DatasetClassDetail {
            ontology_id: mapping.as_ref().map(|m| m.ontology_id),
            class_id: mapping.as_ref().map(|m| m.class_id),
            class,
        }))
    }

    /// Remove a class: its ontology mapping rows go away for good, the class
    /// row itself is soft-deleted. Unknown ids are a no-op.
    pub async fn delete(&self, id: i32) -> DatasetClassResult<()> {
        let txn = self.db.begin().await?;

        dataset_class_ontologies::Entity::delete_many()
            .filter(dataset_class_ontologies::Column::DatasetClassId.eq(id))
            .exec(&txn)
            .await?;

        if let Some(class) = dataset_classes::Entity::find_by_id(id)
            .filter(dataset_classes::Column::DeletedAt.is_null())
            .one(&txn)
            .await?
        {
            let mut active: dataset_classes::ActiveModel = class.into();
            active.deleted_at = Set(Some(chrono::Utc::now()));
            active.update(&txn).await?;
        }

        txn.commit().await?;
        debug!(class_id = id, "deleted dataset class");
        Ok(())
    }

    /// Every live class of a dataset, no paging.
    pub async fn find_all(&self, dataset_id: i32) -> DatasetClassResult<Vec<dataset_classes::Model>> {
        let classes = dataset_classes::Entity::find()
            .filter(dataset_classes::Column::DatasetId.eq(dataset_id))
            .filter(dataset_classes::Column::DeletedAt.is_null())
            .all(&self.db)
            .await?;
        Ok(classes)
    }

    async fn upsert_ontology_mapping(
        &self,
        txn: &DatabaseTransaction,
        dataset_class_id: i32,
        ontology_id: i32,
        class_id: i32,
        now: chrono::DateTime<chrono::Utc>,
    ) -> DatasetClassResult<()> {
        let existing = dataset_class_ontologies::Entity::find()
            .filter(dataset_class_ontologies::Column::DatasetClassId.eq(dataset_class_id))
            .order_by_desc(dataset_class_ontologies::Column::Id)
            .one(txn)
            .await?;

        match existing {
            Some(mapping) => {
                let mut active: dataset_class_ontologies::ActiveModel = mapping.into();
                active.ontology_id = Set(ontology_id);
                active.class_id = Set(class_id);
                active.updated_at = Set(now);
                active.update(txn).await?;
            }
            None => {
                dataset_class_ontologies::ActiveModel {
                    dataset_class_id: Set(dataset_class_id),
                    ontology_id: Set(ontology_id),
                    class_id: Set(class_id),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(txn)
                .await?;
            }
        }

        Ok(())
    }
}
