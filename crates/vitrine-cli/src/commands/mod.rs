pub mod config;
pub mod lookup;
pub mod preview;
pub mod sync;

pub use config::{config_init, config_show};
pub use lookup::run_lookup;
pub use preview::run_preview;
pub use sync::run_sync;
