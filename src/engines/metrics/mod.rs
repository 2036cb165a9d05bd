pub mod accuracy;
pub mod engine;

pub use accuracy::AccuracyMetrics;
pub use engine::MetricsEngine;
