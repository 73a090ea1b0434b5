pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod policy;
pub mod routes;
pub mod store;
