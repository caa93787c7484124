//! Unit share price upload & query service.
//!
//! One uploaded CSV file is the whole database: `POST /sharedata` replaces
//! it, `GET /sharedata` parses it, checks the minimum-data rules, and serves
//! it sorted per the requested display order.

pub mod config;
pub mod ingest;
pub mod models;
pub mod query;
pub mod server;
pub mod storage;
