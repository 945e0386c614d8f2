// Domain layer - weather data and chart models
pub mod chart;
pub mod parameter;
pub mod sample;
pub mod station;
