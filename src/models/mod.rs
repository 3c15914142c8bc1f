pub mod record;
pub mod series;
pub mod chart;
