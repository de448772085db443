pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod store;
pub mod validation;
