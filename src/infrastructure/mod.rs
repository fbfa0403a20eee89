//! Infrastructure layer for filesystem and host interactions.
//!
//! - `paths`: sandbox path mapping (the host folder is mounted at `/host`)
//! - `command`: host command lines for launching applications

pub mod command;
pub mod paths;

pub use command::launch_command;
pub use paths::{display_path, expand_tilde, get_data_dir, to_command_path};
