pub mod dataset_class_service;

pub use dataset_class_service::{
    DatasetClassDetail, DatasetClassQuery, DatasetClassService, SaveDatasetClass,
};
