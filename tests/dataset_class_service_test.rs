//! End-to-end paging and filtering behavior of the dataset class service.

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use annokit::database::entities::common_types::{SortBy, SortOrder, ToolType};
use annokit::database::entities::dataset_classes;
use annokit::database::test_utils::setup_test_db;
use annokit::services::{DatasetClassQuery, DatasetClassService, SaveDatasetClass};

fn save_input(dataset_id: i32, name: &str, tool_type: ToolType) -> SaveDatasetClass {
    SaveDatasetClass {
        id: None,
        dataset_id: Some(dataset_id),
        name: Some(name.to_string()),
        tool_type,
        attributes: None,
        ontology_id: None,
        class_id: None,
    }
}

/// Insert a class row with a pinned creation time, bypassing the service.
async fn insert_with_created_at(
    db: &DatabaseConnection,
    dataset_id: i32,
    name: &str,
    days_ago: i64,
) -> dataset_classes::Model {
    let created = Utc::now() - Duration::days(days_ago);
    dataset_classes::ActiveModel {
        dataset_id: Set(dataset_id),
        name: Set(name.to_string()),
        tool_type: Set(ToolType::Polygon.as_ref().to_string()),
        attributes: Set(None),
        created_at: Set(created),
        updated_at: Set(created),
        deleted_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

#[tokio::test]
async fn test_paging_walks_all_pages() {
    let db = setup_test_db().await;
    let service = DatasetClassService::new(db);

    for i in 1..=5 {
        service
            .save(save_input(1, &format!("cls-{}", i), ToolType::Polygon))
            .await
            .unwrap();
    }

    let query = DatasetClassQuery {
        dataset_id: 1,
        sort_by: Some(SortBy::Name),
        ..Default::default()
    };

    let mut seen = Vec::new();
    for page_no in 1..=3 {
        let page = service
            .find_by_page(page_no, 2, query.clone())
            .await
            .unwrap();
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page_no, page_no);
        seen.extend(page.items.into_iter().map(|c| c.name));
    }

    assert_eq!(seen, vec!["cls-1", "cls-2", "cls-3", "cls-4", "cls-5"]);
}

#[tokio::test]
async fn test_created_range_bounds_are_independent() {
    let db = setup_test_db().await;
    let service = DatasetClassService::new(db.clone());

    insert_with_created_at(&db, 1, "old", 10).await;
    insert_with_created_at(&db, 1, "mid", 5).await;
    insert_with_created_at(&db, 1, "new", 1).await;

    // Lower bound only
    let query = DatasetClassQuery {
        dataset_id: 1,
        created_from: Some(Utc::now() - Duration::days(6)),
        sort_by: Some(SortBy::CreateTime),
        ..Default::default()
    };
    let page = service.find_by_page(1, 10, query).await.unwrap();
    let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["mid", "new"]);

    // Upper bound only
    let query = DatasetClassQuery {
        dataset_id: 1,
        created_to: Some(Utc::now() - Duration::days(6)),
        ..Default::default()
    };
    let page = service.find_by_page(1, 10, query).await.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "old");

    // Both bounds
    let query = DatasetClassQuery {
        dataset_id: 1,
        created_from: Some(Utc::now() - Duration::days(6)),
        created_to: Some(Utc::now() - Duration::days(2)),
        ..Default::default()
    };
    let page = service.find_by_page(1, 10, query).await.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "mid");
}

#[tokio::test]
async fn test_tool_type_filter_and_create_time_order() {
    let db = setup_test_db().await;
    let service = DatasetClassService::new(db.clone());

    insert_with_created_at(&db, 1, "first", 3).await;
    insert_with_created_at(&db, 1, "second", 2).await;
    service
        .save(save_input(1, "boxed", ToolType::BoundingBox))
        .await
        .unwrap();

    let query = DatasetClassQuery {
        dataset_id: 1,
        tool_type: Some(ToolType::Polygon),
        sort_by: Some(SortBy::CreateTime),
        sort_order: Some(SortOrder::Desc),
        ..Default::default()
    };
    let page = service.find_by_page(1, 10, query).await.unwrap();
    let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["second", "first"]);

    let query = DatasetClassQuery {
        dataset_id: 1,
        tool_type: Some(ToolType::BoundingBox),
        ..Default::default()
    };
    let page = service.find_by_page(1, 10, query).await.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "boxed");
}

#[tokio::test]
async fn test_attributes_round_trip() {
    let db = setup_test_db().await;
    let service = DatasetClassService::new(db);

    let mut input = save_input(1, "Car", ToolType::Polygon);
    input.attributes = Some(serde_json::json!({"color": "#fcb17a", "options": ["suv", "van"]}));
    let saved = service.save(input).await.unwrap();

    let detail = service.find_by_id(saved.id).await.unwrap().unwrap();
    let attributes: serde_json::Value =
        serde_json::from_str(detail.class.attributes.as_deref().unwrap()).unwrap();
    assert_eq!(attributes["color"], "#fcb17a");
    assert_eq!(detail.class.get_tool_type(), Some(ToolType::Polygon));
}
