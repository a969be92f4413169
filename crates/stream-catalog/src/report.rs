//! Flat, printable views over a loaded catalog.

use serde::Serialize;
use stream_data::{ControlKind, ControlValue, StreamControl, StreamInfo};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamSummary {
    pub name: String,
    pub stream_path: String,
    pub driver: String,
    pub backend: String,
    pub default_resolution: Option<String>,
    pub codecs: Vec<String>,
    /// Applied settings, e.g. `1280x720 @ 30 fps, MJPEG/passthrough`
    pub current: String,
    pub controls: usize,
}

impl From<&StreamInfo> for StreamSummary {
    fn from(stream: &StreamInfo) -> Self {
        let values = &stream.values;
        Self {
            name: stream.name.clone(),
            stream_path: stream.stream_path.clone(),
            driver: stream.driver.clone(),
            backend: stream.backend.clone(),
            default_resolution: stream.default_resolution().map(|r| r.to_string()),
            codecs: stream.codec.iter().map(ToString::to_string).collect(),
            current: format!(
                "{} @ {} fps, {}/{}",
                values.resolution, values.fps, values.codec, values.encoding
            ),
            controls: stream.controls.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlRow {
    pub name: String,
    pub kind: ControlKind,
    pub writable: bool,
    pub range: Option<String>,
    /// Value from the stream's applied settings, falling back to the control's own.
    pub applied: Option<String>,
    pub label: Option<String>,
}

impl ControlRow {
    pub fn new(control: &StreamControl, applied: Option<&ControlValue>) -> Self {
        let applied = applied.or(control.value.as_ref());
        let label = applied
            .and_then(|current| control.label_for(current))
            .map(str::to_string);
        let range = match control.kind {
            ControlKind::Int => Some(format!(
                "{}..={} step {}",
                control.min, control.max, control.step
            )),
            ControlKind::Bool | ControlKind::Menu => None,
        };
        Self {
            name: control.name.clone(),
            kind: control.kind,
            writable: control.writable,
            range,
            applied: applied.map(ToString::to_string),
            label,
        }
    }
}

/// One row per declared control, in declaration order.
pub fn control_rows(stream: &StreamInfo) -> Vec<ControlRow> {
    stream
        .controls
        .iter()
        .map(|control| ControlRow::new(control, stream.values.applied(&control.name)))
        .collect()
}
