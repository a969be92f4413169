//! Umbrella crate for the video stream data workspace.
//!
//! Re-exports the schema library so integration tests and downstream users
//! can depend on a single package.

pub use stream_data::*;
