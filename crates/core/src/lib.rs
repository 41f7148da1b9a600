//! Rollbook Core — student records, bulk import formats, and database layer.

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
