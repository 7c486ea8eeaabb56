pub mod database;
pub mod errors;
pub mod models;
pub mod search;
pub mod server;
pub mod services;
