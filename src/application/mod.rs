// Application layer - chart policy and use cases
pub mod chart_policy;
pub mod chart_service;
pub mod info_panel;
pub mod retry;
pub mod station_service;
pub mod weather_repository;
