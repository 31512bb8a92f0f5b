pub mod sample_table_1;
pub mod user;

pub use sample_table_1::SampleTable1Entity;
pub use user::UserEntity;
