use crate::coerce::{self, Coerce, Fields, Raw};
use crate::domain::{Codec, Encoding};
use crate::error::SchemaError;
use crate::values::{ControlValue, Resolution};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// The currently selected configuration of a stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamValue {
    pub resolution: Resolution,
    pub fps: f64,
    /// Applied control values keyed by `StreamControl::name`; `None` is stored as null.
    pub controls: BTreeMap<String, Option<ControlValue>>,
    pub encoding: Encoding,
    pub codec: Codec,
}

/// Constructor input whose enum fields may still be raw.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamValueInput {
    pub resolution: Resolution,
    pub fps: f64,
    pub controls: BTreeMap<String, Option<ControlValue>>,
    pub encoding: Option<Raw<Encoding>>,
    pub codec: Option<Raw<Codec>>,
}

impl StreamValue {
    pub(crate) const ENTITY: &'static str = "StreamValue";
    pub const FIELDS: &'static [&'static str] =
        &["resolution", "fps", "controls", "encoding", "codec"];

    pub fn new(resolution: Resolution, fps: f64) -> Self {
        Self {
            resolution,
            fps,
            controls: BTreeMap::new(),
            encoding: Encoding::default(),
            codec: Codec::default(),
        }
    }

    /// Build from an input whose `encoding`/`codec` may be raw, absent or falsy.
    pub fn from_input(input: StreamValueInput) -> Result<Self, SchemaError> {
        Ok(Self {
            resolution: input.resolution,
            fps: input.fps,
            controls: input.controls,
            encoding: coerce::coerce_or_default(input.encoding)?,
            codec: coerce::coerce_or_default(input.codec)?,
        })
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn control(mut self, name: impl Into<String>, value: impl Into<ControlValue>) -> Self {
        self.controls.insert(name.into(), Some(value.into()));
        self
    }

    /// Record a control whose applied value is unknown.
    pub fn unset_control(mut self, name: impl Into<String>) -> Self {
        self.controls.insert(name.into(), None);
        self
    }

    /// Applied value of a control, if one is recorded and set.
    pub fn applied(&self, name: &str) -> Option<&ControlValue> {
        self.controls.get(name).and_then(Option::as_ref)
    }
}

fn applied_value(value: &Value) -> Result<Option<ControlValue>, String> {
    if value.is_null() {
        return Ok(None);
    }
    ControlValue::from_tree(value).map(Some)
}

impl From<StreamValue> for StreamValueInput {
    fn from(value: StreamValue) -> Self {
        Self {
            resolution: value.resolution,
            fps: value.fps,
            controls: value.controls,
            encoding: Some(Raw::Typed(value.encoding)),
            codec: Some(Raw::Typed(value.codec)),
        }
    }
}

impl Coerce for StreamValue {
    fn from_value(value: Value) -> Result<Self, SchemaError> {
        let mut fields = Fields::open(Self::ENTITY, Self::FIELDS, value)?;
        Ok(Self {
            resolution: fields.required("resolution", Resolution::from_tree)?,
            fps: fields.required("fps", coerce::float)?,
            controls: fields
                .table("controls", applied_value)?
                .into_iter()
                .collect(),
            encoding: fields.member_or_default("encoding")?,
            codec: fields.member_or_default("codec")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ToTree;

    fn value(text: &str) -> Result<StreamValue, SchemaError> {
        StreamValue::from_value(serde_yaml::from_str(text).unwrap())
    }

    #[test]
    fn test_defaults() {
        let v = value("{resolution: [640, 480], fps: 30, controls: {}}").unwrap();
        assert_eq!(v, StreamValue::new(Resolution::new(640, 480), 30.0));
        assert_eq!(v.encoding, Encoding::Passthrough);
        assert_eq!(v.codec, Codec::Unknown);
        assert!(v.controls.is_empty());
    }

    #[test]
    fn test_falsy_encoding_uses_default() {
        let v = value("{resolution: [640, 480], fps: 30, controls: {}, encoding: '', codec: ~}").unwrap();
        assert_eq!(v.encoding, Encoding::Passthrough);
        assert_eq!(v.codec, Codec::Unknown);
    }

    #[test]
    fn test_full_value() {
        let v = value(
            "resolution: [1280, 720]\nfps: 15.5\nencoding: bgr\ncodec: YUYV\n\
             controls: {Brightness: -3, Power Line Frequency: 2, Auto: true}",
        )
        .unwrap();
        assert_eq!(v.fps, 15.5);
        assert_eq!(v.encoding, Encoding::Bgr);
        assert_eq!(v.codec, Codec::Yuyv);
        assert_eq!(v.applied("Power Line Frequency"), Some(&ControlValue::Int(2)));
        assert_eq!(v.applied("Brightness"), Some(&ControlValue::Int(-3)));
        assert_eq!(v.applied("Auto"), Some(&ControlValue::Bool(true)));
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        assert_eq!(
            value("{fps: 30, controls: {}}").unwrap_err(),
            SchemaError::MissingField {
                entity: "StreamValue",
                field: "resolution"
            }
        );
        assert_eq!(
            value("{resolution: [640, 480], fps: 30}").unwrap_err(),
            SchemaError::MissingField {
                entity: "StreamValue",
                field: "controls"
            }
        );
        assert!(matches!(
            value("{resolution: [640], fps: 30, controls: {}}").unwrap_err(),
            SchemaError::InvalidField { ref field, .. } if field == "resolution"
        ));
        assert!(matches!(
            value("{resolution: [640, 480], fps: 30, controls: {}, encoding: yuv}").unwrap_err(),
            SchemaError::UnknownVariant { domain: "encoding", .. }
        ));
        assert!(matches!(
            value("{resolution: [640, 480], fps: 30, controls: {}, gain: 3}").unwrap_err(),
            SchemaError::UnknownField { .. }
        ));
    }

    #[test]
    fn test_null_applied_value() {
        let v = value("{resolution: [640, 480], fps: 30, controls: {Brightness: ~, Gain: 4}}").unwrap();
        assert_eq!(v.controls.get("Brightness"), Some(&None));
        assert_eq!(v.applied("Brightness"), None);
        assert_eq!(v.applied("Gain"), Some(&ControlValue::Int(4)));

        let again = StreamValue::from_value(v.to_tree()).unwrap();
        assert_eq!(again, v);
    }

    #[test]
    fn test_from_input_is_idempotent() {
        let original = StreamValue::new(Resolution::new(640, 480), 30.0)
            .encoding(Encoding::Rgb)
            .codec(Codec::Mjpeg)
            .control("Gain", 4)
            .unset_control("Zoom");
        let again = StreamValue::from_input(original.clone().into()).unwrap();
        assert_eq!(again, original);
    }

    #[test]
    fn test_from_input_with_raw_enums() {
        let input = StreamValueInput {
            resolution: Resolution::new(320, 240),
            fps: 10.0,
            controls: BTreeMap::new(),
            encoding: Some(Raw::Value(Value::from("grey16"))),
            codec: None,
        };
        let v = StreamValue::from_input(input).unwrap();
        assert_eq!(v.encoding, Encoding::Grey16);
        assert_eq!(v.codec, Codec::Unknown);
    }
}
