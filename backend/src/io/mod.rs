//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: REST endpoints consumed by the web frontend
//! - **Data Serialization**: converting between JSON DTOs and domain types
//! - **Error Translation**: mapping domain errors to HTTP status codes
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum
//! - **Serialization**: Serde with the DTOs from the `shared` crate

pub mod rest;
