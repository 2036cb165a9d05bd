mod csv;
mod types;
mod validator;

pub use csv::CsvConnector;
pub use types::{LoadedSeries, SeriesMetadata};
pub use validator::DataValidator;
