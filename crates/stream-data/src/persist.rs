//! Loading and saving stream stores.

use crate::coerce::Coerce;
use crate::error::{Error, Result, SchemaError};
use crate::stream_info::StreamInfo;
use crate::tree::streams_as_tree;
use serde_yaml::Value;
use std::{fs, path::Path};
use tracing::{debug, warn};

/// Build streams from an already parsed tree.
///
/// The tree must be a sequence of stream mappings; a null tree (empty
/// document) yields no streams.
pub fn streams_from_tree(tree: Value) -> Result<Vec<StreamInfo>> {
    let items = match tree {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(items) => items,
        _ => return Err(SchemaError::NotASequence.into()),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            StreamInfo::from_value(item).map_err(|err| {
                warn!(index, error = %err, "stream entry rejected");
                Error::from(err)
            })
        })
        .collect()
}

/// Parse YAML text into streams.
pub fn from_yaml_str(text: &str) -> Result<Vec<StreamInfo>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let tree: Value = serde_yaml::from_str(text)?;
    streams_from_tree(tree)
}

/// Emit streams as YAML text.
pub fn to_yaml_string(streams: &[StreamInfo]) -> Result<String> {
    Ok(serde_yaml::to_string(&streams_as_tree(streams))?)
}

/// Load every stream stored in the YAML file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<StreamInfo>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Storage {
        path: path.to_path_buf(),
        source,
    })?;
    let streams = from_yaml_str(&text)?;
    debug!(path = %path.display(), streams = streams.len(), "loaded stream store");
    Ok(streams)
}

/// Write `streams` to `path` as YAML, replacing any existing content.
pub fn save(streams: &[StreamInfo], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let text = to_yaml_string(streams)?;
    let storage = |source| Error::Storage {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(storage)?;
    }
    fs::write(path, text).map_err(storage)?;
    debug!(path = %path.display(), streams = streams.len(), "saved stream store");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORE: &str = r#"
- name: Dummy Camera
  stream_path: /dev/video0
  driver: uvcvideo
  codec: [MJPEG]
  controls:
    - {type: menu, name: Power Line Frequency, value: 2}
  resolutions: [[640, 480]]
  max_fps: 30
  values: {resolution: [640, 480], fps: 30, controls: {Power Line Frequency: 2}, codec: MJPEG}
"#;

    #[test]
    fn test_from_yaml_str() {
        let streams = from_yaml_str(STORE).unwrap();
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].name, "Dummy Camera");
    }

    #[test]
    fn test_empty_document_has_no_streams() {
        assert!(from_yaml_str("").unwrap().is_empty());
        assert!(from_yaml_str("[]").unwrap().is_empty());
    }

    #[test]
    fn test_top_level_must_be_a_sequence() {
        let err = from_yaml_str("name: Dummy Camera").unwrap_err();
        assert!(matches!(err, Error::Schema(SchemaError::NotASequence)));
    }

    #[test]
    fn test_malformed_text_is_a_format_error() {
        let err = from_yaml_str("- name: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_string_round_trip() {
        let streams = from_yaml_str(STORE).unwrap();
        let text = to_yaml_string(&streams).unwrap();
        assert!(text.contains("Dummy Camera"));
        assert_eq!(from_yaml_str(&text).unwrap(), streams);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("streams.yml");
        let streams = from_yaml_str(STORE).unwrap();
        save(&streams, &path).unwrap();
        assert_eq!(load(&path).unwrap(), streams);
    }

    #[test]
    fn test_missing_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yml");
        match load(&path).unwrap_err() {
            Error::Storage { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
