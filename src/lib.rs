//! Chart-ready weather station data: fetches sensor records from the station
//! API and applies the time-axis and value formatting policy used by the
//! dashboard's line charts, map markers and info panel.
pub mod application;
pub mod domain;
pub mod infrastructure;
