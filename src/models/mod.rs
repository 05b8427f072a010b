pub mod status;

pub use status::{ContextWindow, CurrentUsage, ModelInfo, StatusInput};
