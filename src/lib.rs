pub mod app;
pub mod config;
pub mod corpus;
pub mod error;
pub mod models;
pub mod random;
pub mod resolver;
pub mod weather;
