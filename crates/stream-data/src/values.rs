use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;

/// Frame size in pixels, stored as a `[width, height]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub(crate) fn from_tree(value: &Value) -> Result<Self, String> {
        let items = value
            .as_sequence()
            .ok_or_else(|| "expected a [width, height] pair".to_string())?;
        if items.len() != 2 {
            return Err(format!(
                "expected a [width, height] pair, got {} elements",
                items.len()
            ));
        }
        let dim = |v: &Value| {
            v.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| format!("{v:?} is not a valid dimension"))
        };
        Ok(Self::new(dim(&items[0])?, dim(&items[1])?))
    }
}

impl From<[u32; 2]> for Resolution {
    fn from([width, height]: [u32; 2]) -> Self {
        Self { width, height }
    }
}

impl From<Resolution> for [u32; 2] {
    fn from(r: Resolution) -> Self {
        [r.width, r.height]
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Scalar applied to (or offered by) a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ControlValue {
    pub(crate) fn from_tree(value: &Value) -> Result<Self, String> {
        match value {
            Value::Bool(b) => Ok(ControlValue::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(ControlValue::Int)
                .or_else(|| n.as_f64().map(ControlValue::Float))
                .ok_or_else(|| format!("{n} is not representable")),
            Value::String(s) => Ok(ControlValue::Text(s.clone())),
            other => Err(format!("expected a scalar, got {other:?}")),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ControlValue::Int(i) => Some(*i),
            ControlValue::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ControlValue::Int(i) => Some(*i as f64),
            ControlValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ControlValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for ControlValue {
    fn from(v: bool) -> Self {
        ControlValue::Bool(v)
    }
}

impl From<i64> for ControlValue {
    fn from(v: i64) -> Self {
        ControlValue::Int(v)
    }
}

impl From<i32> for ControlValue {
    fn from(v: i32) -> Self {
        ControlValue::Int(i64::from(v))
    }
}

impl From<f64> for ControlValue {
    fn from(v: f64) -> Self {
        ControlValue::Float(v)
    }
}

impl From<&str> for ControlValue {
    fn from(v: &str) -> Self {
        ControlValue::Text(v.to_string())
    }
}

impl PartialEq<i64> for ControlValue {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, ControlValue::Int(i) if i == other)
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlValue::Bool(b) => write!(f, "{b}"),
            ControlValue::Int(i) => write!(f, "{i}"),
            ControlValue::Float(x) => write!(f, "{x}"),
            ControlValue::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_from_tree() {
        let value: Value = serde_yaml::from_str("[1280, 720]").unwrap();
        assert_eq!(Resolution::from_tree(&value).unwrap(), Resolution::new(1280, 720));
    }

    #[test]
    fn test_resolution_rejects_wrong_arity() {
        let value: Value = serde_yaml::from_str("[1280, 720, 3]").unwrap();
        assert!(Resolution::from_tree(&value).is_err());
        let value: Value = serde_yaml::from_str("[1280]").unwrap();
        assert!(Resolution::from_tree(&value).is_err());
        let value: Value = serde_yaml::from_str("[-1, 720]").unwrap();
        assert!(Resolution::from_tree(&value).is_err());
    }

    #[test]
    fn test_control_value_keeps_scalar_kind() {
        let parse = |s: &str| ControlValue::from_tree(&serde_yaml::from_str(s).unwrap()).unwrap();
        assert_eq!(parse("2"), ControlValue::Int(2));
        assert_eq!(parse("2.5"), ControlValue::Float(2.5));
        assert_eq!(parse("true"), ControlValue::Bool(true));
        assert_eq!(parse("auto"), ControlValue::Text("auto".into()));
        assert!(ControlValue::from_tree(&serde_yaml::from_str("[1]").unwrap()).is_err());
    }

    #[test]
    fn test_control_value_compares_with_integers() {
        assert_eq!(ControlValue::Int(2), 2);
        assert_ne!(ControlValue::Float(2.0), 2);
        assert_eq!(ControlValue::Bool(true).as_i64(), Some(1));
    }

    #[test]
    fn test_resolution_display() {
        assert_eq!(Resolution::new(640, 480).to_string(), "640x480");
    }
}
