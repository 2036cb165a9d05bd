pub mod report;
pub mod runner;

pub use report::{FamilyReport, SearchReport};
pub use runner::{ForecasterSet, SearchRunner};
