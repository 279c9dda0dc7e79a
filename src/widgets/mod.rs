//! Chat widgets.

pub mod banner;
pub mod loader;
pub mod message;

pub use banner::ErrorBanner;
pub use loader::ThinkingIndicator;
pub use message::{Author, MessageView};
