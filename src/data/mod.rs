pub mod connectors;
pub mod scaling;
pub mod split;
pub mod windows;

pub use connectors::{CsvConnector, DataValidator, LoadedSeries, SeriesMetadata};
pub use scaling::{MinMaxScaler, ScaleTransform};
pub use split::{SeriesSplit, SimpleSplitter};
pub use windows::WindowedDataset;
