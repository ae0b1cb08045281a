pub mod database;
pub mod entities;
pub mod password;
pub mod repositories;
pub mod traits;
