mod manager;

pub use manager::{DisplayId, DisplayManager};
