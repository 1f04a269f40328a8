//! # LVUP EDU API Server Library
//!
//! HTTP layer of the LVUP EDU backend: configuration, error mapping, router
//! assembly and route handlers. Domain models and the aggregation logic live
//! in `lvup-shared`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: HTTP middleware (security headers)
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
