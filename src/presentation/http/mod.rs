pub mod router;
pub mod security;
