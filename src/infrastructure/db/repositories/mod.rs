pub mod sample_table_1_repository_sqlx;
pub mod user_repository_sqlx;
