pub mod persistence_error;
pub mod sample_table_1_repository;
pub mod user_repository;
