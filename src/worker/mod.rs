//! Background worker for index loading and asynchronous search.
//!
//! Directory scanning and, in `worker` search mode, filtering run on a Zellij
//! worker thread so the plugin thread never blocks on the filesystem.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: worker implementation and message processing

pub mod handler;
pub mod messages;

pub use handler::LauncherWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
