pub mod transformer;
pub mod chart_builder;
pub mod chart_service;
pub mod page;
