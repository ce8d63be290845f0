//! Infrastructure layer - database connections, state building, error mapping.

pub mod db;
pub mod db_errors;
pub mod state;
