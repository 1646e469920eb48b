pub mod alert_classifier;
pub mod calendar_service;
pub mod cell_builder;
pub mod date_range;
pub mod hotel_service;
pub mod occupancy_resolver;
pub mod override_reconciler;
pub mod rate_aggregator;
