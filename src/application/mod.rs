// Application layer - Pipeline stages and dashboard use cases
pub mod aggregator;
pub mod chart_builder;
pub mod dashboard_service;
pub mod grouping;
pub mod ingestion;
pub mod pipeline;
pub mod readings_repository;
pub mod refresh;
pub mod summary_builder;

#[cfg(test)]
pub(crate) mod fake_repository;
