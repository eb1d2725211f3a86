//! Collects HeadHunter vacancies per qualification level and region, stores
//! them as CSV, and produces summary statistics and charts.

pub mod collector;
pub mod config;
pub mod error;
pub mod models;
pub mod processing;
pub mod report;
pub mod stats;
pub mod storage;
