//! Quotes ("citazioni") backend.
//!
//! - `db`: domain model, storage traits and the SQLite implementation
//! - `service`: the quote operations, validation and realtime change feed
//! - `api`: HTTP surface over the service

pub mod api;
pub mod db;
pub mod service;
