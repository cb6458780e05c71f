//! Concrete adapter implementations for the port traits.

pub mod binance_adapter;
pub mod csv_adapter;
pub mod csv_report_adapter;
pub mod file_config_adapter;
