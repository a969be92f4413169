use crate::coerce::{self, Coerce, Fields, Raw};
use crate::control::StreamControl;
use crate::domain::Codec;
use crate::error::SchemaError;
use crate::stream_value::StreamValue;
use crate::values::Resolution;
use serde_yaml::Value;

pub const DEFAULT_BACKEND: &str = "v4l2";

/// Capabilities of one stream together with its active configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfo {
    pub name: String,
    /// Unique stream path, e.g. `/dev/video0`.
    pub stream_path: String,
    /// Capture driver, e.g. `uvcvideo` for a local webcam or `webrtc`.
    pub driver: String,
    /// Every codec the device can produce.
    pub codec: Vec<Codec>,
    pub controls: Vec<StreamControl>,
    /// Available resolutions; the first one is the device default.
    pub resolutions: Vec<Resolution>,
    /// Frame rate ceiling at the default resolution.
    pub max_fps: f64,
    pub values: StreamValue,
    /// Local capture backend (OpenCV backend name when OpenCV is used).
    pub backend: String,
}

/// Constructor input whose enum and nested-entity fields may still be raw.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamInfoInput {
    pub name: String,
    pub stream_path: String,
    pub driver: String,
    pub codec: Vec<Raw<Codec>>,
    pub controls: Vec<Raw<StreamControl>>,
    pub resolutions: Vec<Resolution>,
    pub max_fps: f64,
    pub values: Raw<StreamValue>,
    pub backend: Option<String>,
}

impl StreamInfo {
    pub(crate) const ENTITY: &'static str = "StreamInfo";
    pub const FIELDS: &'static [&'static str] = &[
        "name",
        "stream_path",
        "driver",
        "codec",
        "controls",
        "resolutions",
        "max_fps",
        "values",
        "backend",
    ];

    /// Build from an input, promoting any raw codec, control or value entries.
    pub fn new(input: StreamInfoInput) -> Result<Self, SchemaError> {
        Ok(Self {
            name: input.name,
            stream_path: input.stream_path,
            driver: input.driver,
            codec: coerce::coerce_all(input.codec)?,
            controls: coerce::coerce_all(input.controls)?,
            resolutions: input.resolutions,
            max_fps: input.max_fps,
            values: StreamValue::coerce(input.values)?,
            backend: input.backend.unwrap_or_else(|| DEFAULT_BACKEND.to_string()),
        })
    }

    /// Look a control up by name.
    pub fn control(&self, name: &str) -> Option<&StreamControl> {
        self.controls.iter().find(|c| c.name == name)
    }

    pub fn control_mut(&mut self, name: &str) -> Option<&mut StreamControl> {
        self.controls.iter_mut().find(|c| c.name == name)
    }

    /// The device default resolution (first entry of `resolutions`).
    pub fn default_resolution(&self) -> Option<Resolution> {
        self.resolutions.first().copied()
    }

    pub fn supports(&self, codec: Codec) -> bool {
        self.codec.contains(&codec)
    }
}

impl From<StreamInfo> for StreamInfoInput {
    fn from(info: StreamInfo) -> Self {
        Self {
            name: info.name,
            stream_path: info.stream_path,
            driver: info.driver,
            codec: info.codec.into_iter().map(Raw::Typed).collect(),
            controls: info.controls.into_iter().map(Raw::Typed).collect(),
            resolutions: info.resolutions,
            max_fps: info.max_fps,
            values: Raw::Typed(info.values),
            backend: Some(info.backend),
        }
    }
}

impl Coerce for StreamInfo {
    fn from_value(value: Value) -> Result<Self, SchemaError> {
        let mut fields = Fields::open(Self::ENTITY, Self::FIELDS, value)?;
        Ok(Self {
            name: fields.required("name", coerce::string)?,
            stream_path: fields.required("stream_path", coerce::string)?,
            driver: fields.required("driver", coerce::string)?,
            codec: fields.entities("codec")?,
            controls: fields.required_entities("controls")?,
            resolutions: fields.required_list("resolutions", Resolution::from_tree)?,
            max_fps: fields.required("max_fps", coerce::float)?,
            values: fields.entity("values")?,
            backend: fields
                .optional("backend", coerce::string)?
                .unwrap_or_else(|| DEFAULT_BACKEND.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ControlKind, Encoding};
    use crate::tree::ToTree;

    const WEBRTC: &str = r#"
name: Door Camera
stream_path: webrtc://door
driver: webrtc
codec: [YUYV, MJPEG]
controls:
  - {type: int, name: Zoom, min: 1, max: 4}
  - {type: bool, name: Privacy, value: false}
resolutions: [[1920, 1080], [1280, 720]]
max_fps: 25
values:
  resolution: [1920, 1080]
  fps: 25
  controls: {Zoom: 2}
"#;

    fn sample() -> StreamInfo {
        StreamInfo::from_value(serde_yaml::from_str(WEBRTC).unwrap()).unwrap()
    }

    #[test]
    fn test_nested_values_are_promoted() {
        let info = sample();
        assert_eq!(info.codec, vec![Codec::Yuyv, Codec::Mjpeg]);
        assert_eq!(info.controls.len(), 2);
        assert_eq!(info.controls[0].kind, ControlKind::Int);
        assert_eq!(info.controls[1].name, "Privacy");
        assert_eq!(info.values.encoding, Encoding::Passthrough);
        assert_eq!(info.backend, "v4l2");
        assert_eq!(info.default_resolution(), Some(Resolution::new(1920, 1080)));
        assert!(info.supports(Codec::Mjpeg));
        assert!(!info.supports(Codec::Xvid));
        assert_eq!(info.control("Zoom").map(|c| c.max), Some(4.0));
        assert!(info.control("Focus").is_none());
    }

    #[test]
    fn test_new_accepts_typed_input() {
        let info = sample();
        let again = StreamInfo::new(info.clone().into()).unwrap();
        assert_eq!(again, info);
    }

    #[test]
    fn test_new_accepts_mixed_input() {
        let info = sample();
        let mut input = StreamInfoInput::from(info.clone());
        input.codec = vec![Raw::Value(Value::from("YUYV")), Raw::Typed(Codec::Mjpeg)];
        input.controls[1] = Raw::Value(info.controls[1].to_tree());
        input.values = Raw::Value(info.values.to_tree());
        input.backend = None;
        assert_eq!(StreamInfo::new(input).unwrap(), info);
    }

    #[test]
    fn test_recoercing_the_tree_is_a_no_op() {
        let info = sample();
        let once = StreamInfo::coerce(Raw::Value(info.to_tree())).unwrap();
        let twice = StreamInfo::coerce(Raw::Typed(once.clone())).unwrap();
        assert_eq!(once, info);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_missing_required_field() {
        for field in ["controls", "resolutions", "max_fps", "values"] {
            let mut tree: Value = serde_yaml::from_str(WEBRTC).unwrap();
            tree.as_mapping_mut().unwrap().remove(field);
            assert_eq!(
                StreamInfo::from_value(tree).unwrap_err(),
                SchemaError::MissingField {
                    entity: "StreamInfo",
                    field
                },
                "without {field}"
            );
        }
    }

    #[test]
    fn test_empty_collections_are_kept() {
        let text = WEBRTC
            .replace("codec: [YUYV, MJPEG]\n", "")
            .replace("resolutions: [[1920, 1080], [1280, 720]]", "resolutions: []");
        let mut tree: Value = serde_yaml::from_str(&text).unwrap();
        tree["controls"] = Value::Sequence(Vec::new());
        let info = StreamInfo::from_value(tree).unwrap();
        assert!(info.codec.is_empty());
        assert!(info.controls.is_empty());
        assert!(info.resolutions.is_empty());
        assert_eq!(info.default_resolution(), None);
    }

    #[test]
    fn test_unknown_codec_in_list() {
        let text = WEBRTC.replace("[YUYV, MJPEG]", "[YUYV, H264]");
        let err = StreamInfo::from_value(serde_yaml::from_str(&text).unwrap()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownVariant {
                domain: "codec",
                value: "H264".into()
            }
        );
    }

    #[test]
    fn test_nested_errors_propagate_unchanged() {
        let text = WEBRTC.replace("{type: bool, name: Privacy", "{type: bool, label: Privacy");
        let err = StreamInfo::from_value(serde_yaml::from_str(&text).unwrap()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownField {
                entity: "StreamControl",
                field: "label".into()
            }
        );
    }
}
