pub mod chart_service;
pub mod history_service;
pub mod metrics_service;
pub mod tick_service;
