//! Conversion of typed entities into a plain YAML tree.
//!
//! Enum members become their value strings, entities become mappings keyed by
//! field name in declaration order. Conversion is total.

use crate::control::StreamControl;
use crate::domain::{Codec, ControlKind, Domain, Encoding};
use crate::stream_info::StreamInfo;
use crate::stream_value::StreamValue;
use crate::values::{ControlValue, Resolution};
use serde_yaml::{Mapping, Value};
use std::collections::{BTreeMap, BTreeSet};

pub trait ToTree {
    fn to_tree(&self) -> Value;
}

impl ToTree for String {
    fn to_tree(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToTree for bool {
    fn to_tree(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToTree for i64 {
    fn to_tree(&self) -> Value {
        Value::Number((*self).into())
    }
}

impl ToTree for u32 {
    fn to_tree(&self) -> Value {
        Value::Number((*self).into())
    }
}

impl ToTree for f64 {
    fn to_tree(&self) -> Value {
        Value::Number((*self).into())
    }
}

impl<T: ToTree> ToTree for Option<T> {
    fn to_tree(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToTree::to_tree)
    }
}

impl<T: ToTree> ToTree for Vec<T> {
    fn to_tree(&self) -> Value {
        Value::Sequence(self.iter().map(ToTree::to_tree).collect())
    }
}

impl<T: ToTree> ToTree for BTreeSet<T> {
    fn to_tree(&self) -> Value {
        Value::Sequence(self.iter().map(ToTree::to_tree).collect())
    }
}

impl<A: ToTree, B: ToTree> ToTree for (A, B) {
    fn to_tree(&self) -> Value {
        Value::Sequence(vec![self.0.to_tree(), self.1.to_tree()])
    }
}

impl<T: ToTree> ToTree for BTreeMap<String, T> {
    fn to_tree(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(key, value)| (Value::String(key.clone()), value.to_tree()))
                .collect(),
        )
    }
}

macro_rules! domain_to_tree {
    ($($ty:ty),+) => {$(
        impl ToTree for $ty {
            fn to_tree(&self) -> Value {
                Value::String(self.as_str().to_string())
            }
        }
    )+};
}

domain_to_tree!(ControlKind, Encoding, Codec);

impl ToTree for Resolution {
    fn to_tree(&self) -> Value {
        (self.width, self.height).to_tree()
    }
}

impl ToTree for ControlValue {
    fn to_tree(&self) -> Value {
        match self {
            ControlValue::Bool(b) => b.to_tree(),
            ControlValue::Int(i) => i.to_tree(),
            ControlValue::Float(f) => f.to_tree(),
            ControlValue::Text(s) => s.to_tree(),
        }
    }
}

/// Ordered mapping builder for entity conversion.
struct Entry(Mapping);

impl Entry {
    fn new() -> Self {
        Self(Mapping::new())
    }

    fn field(mut self, name: &str, value: &impl ToTree) -> Self {
        self.0.insert(Value::from(name), value.to_tree());
        self
    }

    fn finish(self) -> Value {
        Value::Mapping(self.0)
    }
}

impl ToTree for StreamControl {
    fn to_tree(&self) -> Value {
        Entry::new()
            .field("type", &self.kind)
            .field("name", &self.name)
            .field("writable", &self.writable)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .field("value", &self.value)
            .field("options", &self.options)
            .finish()
    }
}

impl ToTree for StreamValue {
    fn to_tree(&self) -> Value {
        Entry::new()
            .field("resolution", &self.resolution)
            .field("fps", &self.fps)
            .field("controls", &self.controls)
            .field("encoding", &self.encoding)
            .field("codec", &self.codec)
            .finish()
    }
}

impl ToTree for StreamInfo {
    fn to_tree(&self) -> Value {
        Entry::new()
            .field("name", &self.name)
            .field("stream_path", &self.stream_path)
            .field("driver", &self.driver)
            .field("codec", &self.codec)
            .field("controls", &self.controls)
            .field("resolutions", &self.resolutions)
            .field("max_fps", &self.max_fps)
            .field("values", &self.values)
            .field("backend", &self.backend)
            .finish()
    }
}

/// Plain tree of a single stream.
pub fn stream_as_tree(stream: &StreamInfo) -> Value {
    stream.to_tree()
}

/// Top-level sequence in the shape [`crate::streams_from_tree`] expects.
pub fn streams_as_tree(streams: &[StreamInfo]) -> Value {
    Value::Sequence(streams.iter().map(ToTree::to_tree).collect())
}
