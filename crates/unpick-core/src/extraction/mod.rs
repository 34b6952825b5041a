//! Staged extraction of selected entries.

pub mod events;
pub mod pipeline;
pub mod session;
pub mod staging;

pub use events::ChannelObserver;
pub use events::ProcessEvent;
pub use events::ProcessHandle;
pub use events::spawn_process;
pub use pipeline::run_pipeline;
pub use session::ExtractionSession;
pub use session::SessionBuilder;
