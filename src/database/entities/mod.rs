pub mod common_types;
pub mod dataset_class_ontologies;
pub mod dataset_classes;
