//! Typed description of video capture streams and their YAML store.
//!
//! A store is a sequence of [`StreamInfo`] entries. [`load`] parses the file,
//! promotes every raw mapping into typed entities and rejects unknown fields
//! or enum values; [`save`] flattens the entities back into plain YAML.

pub mod coerce;
pub mod control;
pub mod domain;
pub mod error;
pub mod interop;
pub mod persist;
pub mod stream_info;
pub mod stream_value;
pub mod tree;
pub mod values;

pub use coerce::{Coerce, Raw};
pub use control::StreamControl;
pub use domain::{Codec, ControlKind, Domain, Encoding};
pub use error::{Error, Result, SchemaError};
pub use persist::{from_yaml_str, load, save, streams_from_tree, to_yaml_string};
pub use stream_info::{StreamInfo, StreamInfoInput, DEFAULT_BACKEND};
pub use stream_value::{StreamValue, StreamValueInput};
pub use tree::{stream_as_tree, streams_as_tree, ToTree};
pub use values::{ControlValue, Resolution};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
