pub mod traits;
pub mod evolution;
pub mod walk_forward;
pub mod search;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use walk_forward::WalkForwardConfig;
pub use search::SearchConfig;
