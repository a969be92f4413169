//! Promotion of loosely-typed tree values into typed entities.
//!
//! Every construction funnels through [`Coerce::coerce`]. Already-typed input
//! takes the `Raw::Typed` path and is returned untouched, so coercing a
//! coerced value again is a no-op.

use crate::domain::{self, Codec, ControlKind, Domain, Encoding};
use crate::error::SchemaError;
use serde_yaml::{Mapping, Value};

/// Input that is either already typed or still a raw tree value.
#[derive(Debug, Clone, PartialEq)]
pub enum Raw<T> {
    Typed(T),
    Value(Value),
}

impl<T> From<T> for Raw<T> {
    fn from(typed: T) -> Self {
        Raw::Typed(typed)
    }
}

pub trait Coerce: Sized {
    /// Build `Self` from a raw tree value.
    fn from_value(value: Value) -> Result<Self, SchemaError>;

    fn coerce(input: Raw<Self>) -> Result<Self, SchemaError> {
        match input {
            Raw::Typed(typed) => Ok(typed),
            Raw::Value(value) => Self::from_value(value),
        }
    }
}

fn domain_from_value<T: Domain>(value: Value) -> Result<T, SchemaError> {
    match value {
        Value::String(s) => domain::resolve(&s),
        other => Err(SchemaError::UnknownVariant {
            domain: T::NAME,
            value: describe(&other),
        }),
    }
}

impl Coerce for ControlKind {
    fn from_value(value: Value) -> Result<Self, SchemaError> {
        domain_from_value(value)
    }
}

impl Coerce for Encoding {
    fn from_value(value: Value) -> Result<Self, SchemaError> {
        domain_from_value(value)
    }
}

impl Coerce for Codec {
    fn from_value(value: Value) -> Result<Self, SchemaError> {
        domain_from_value(value)
    }
}

/// Null, `false`, zero, empty strings and empty collections.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Sequence(s) => s.is_empty(),
        Value::Mapping(m) => m.is_empty(),
        Value::Tagged(_) => false,
    }
}

/// Coerce an optional field, falling back to the default when absent or falsy.
pub fn coerce_or_default<T: Coerce + Default>(input: Option<Raw<T>>) -> Result<T, SchemaError> {
    match input {
        None => Ok(T::default()),
        Some(Raw::Value(value)) if is_falsy(&value) => Ok(T::default()),
        Some(raw) => T::coerce(raw),
    }
}

/// Coerce each element, keeping order and length.
pub fn coerce_all<T: Coerce>(items: Vec<Raw<T>>) -> Result<Vec<T>, SchemaError> {
    items.into_iter().map(T::coerce).collect()
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}

/// Field-by-field reader over one entity mapping.
///
/// Construction rejects keys that are not in `known`; every accessor removes
/// the key it reads.
pub(crate) struct Fields {
    entity: &'static str,
    map: Mapping,
}

impl Fields {
    pub(crate) fn open(
        entity: &'static str,
        known: &[&str],
        value: Value,
    ) -> Result<Self, SchemaError> {
        let map = match value {
            Value::Mapping(map) => map,
            _ => return Err(SchemaError::NotAMapping { entity }),
        };
        for key in map.keys() {
            match key.as_str() {
                Some(name) if known.contains(&name) => {}
                _ => {
                    return Err(SchemaError::UnknownField {
                        entity,
                        field: describe(key),
                    })
                }
            }
        }
        Ok(Self { entity, map })
    }

    /// Accept `alias` as an alternative spelling of `field`.
    pub(crate) fn alias(&mut self, field: &'static str, alias: &'static str) -> Result<(), SchemaError> {
        if let Some(value) = self.map.remove(alias) {
            if self.map.contains_key(field) {
                return Err(SchemaError::InvalidField {
                    entity: self.entity,
                    field: field.to_string(),
                    reason: format!("both '{field}' and '{alias}' are set"),
                });
            }
            self.map.insert(Value::from(field), value);
        }
        Ok(())
    }

    fn take(&mut self, field: &str) -> Option<Value> {
        self.map.remove(field).filter(|v| !v.is_null())
    }

    fn missing(&self, field: &'static str) -> SchemaError {
        SchemaError::MissingField {
            entity: self.entity,
            field,
        }
    }

    fn invalid(&self, field: &str, reason: impl Into<String>) -> SchemaError {
        SchemaError::InvalidField {
            entity: self.entity,
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    fn convert<T>(
        &self,
        field: &str,
        value: &Value,
        convert: impl FnOnce(&Value) -> Result<T, String>,
    ) -> Result<T, SchemaError> {
        convert(value).map_err(|reason| self.invalid(field, reason))
    }

    /// A required leaf value.
    pub(crate) fn required<T>(
        &mut self,
        field: &'static str,
        convert: impl FnOnce(&Value) -> Result<T, String>,
    ) -> Result<T, SchemaError> {
        let value = self.take(field).ok_or_else(|| self.missing(field))?;
        self.convert(field, &value, convert)
    }

    /// An optional leaf value; absent and null both yield `None`.
    pub(crate) fn optional<T>(
        &mut self,
        field: &'static str,
        convert: impl FnOnce(&Value) -> Result<T, String>,
    ) -> Result<Option<T>, SchemaError> {
        match self.take(field) {
            Some(value) => self.convert(field, &value, convert).map(Some),
            None => Ok(None),
        }
    }

    /// A sequence of leaf values; absent yields an empty list.
    pub(crate) fn list<T>(
        &mut self,
        field: &'static str,
        convert: impl Fn(&Value) -> Result<T, String>,
    ) -> Result<Vec<T>, SchemaError> {
        let items = self.sequence(field, false)?;
        self.convert_items(field, &items, convert)
    }

    /// A sequence of leaf values that must be present, possibly empty.
    pub(crate) fn required_list<T>(
        &mut self,
        field: &'static str,
        convert: impl Fn(&Value) -> Result<T, String>,
    ) -> Result<Vec<T>, SchemaError> {
        let items = self.sequence(field, true)?;
        self.convert_items(field, &items, convert)
    }

    fn convert_items<T>(
        &self,
        field: &str,
        items: &[Value],
        convert: impl Fn(&Value) -> Result<T, String>,
    ) -> Result<Vec<T>, SchemaError> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                convert(item).map_err(|reason| self.invalid(field, format!("item {i}: {reason}")))
            })
            .collect()
    }

    /// A required enum member. Falsy values count as missing.
    pub(crate) fn member<T: Coerce>(&mut self, field: &'static str) -> Result<T, SchemaError> {
        match self.map.remove(field) {
            Some(value) if !is_falsy(&value) => T::from_value(value),
            _ => Err(self.missing(field)),
        }
    }

    /// An enum member with a default. Falsy values select the default.
    pub(crate) fn member_or_default<T: Coerce + Default>(
        &mut self,
        field: &'static str,
    ) -> Result<T, SchemaError> {
        coerce_or_default(self.map.remove(field).map(Raw::Value))
    }

    /// A nested entity.
    pub(crate) fn entity<T: Coerce>(&mut self, field: &'static str) -> Result<T, SchemaError> {
        let value = self.take(field).ok_or_else(|| self.missing(field))?;
        T::from_value(value)
    }

    /// A sequence of enum members or nested entities; absent yields an empty list.
    pub(crate) fn entities<T: Coerce>(&mut self, field: &'static str) -> Result<Vec<T>, SchemaError> {
        let items = self.sequence(field, false)?;
        coerce_all(items.into_iter().map(Raw::Value).collect())
    }

    /// Like [`Fields::entities`] but the field must be present.
    pub(crate) fn required_entities<T: Coerce>(
        &mut self,
        field: &'static str,
    ) -> Result<Vec<T>, SchemaError> {
        let items = self.sequence(field, true)?;
        coerce_all(items.into_iter().map(Raw::Value).collect())
    }

    /// A required mapping from string keys to leaf values.
    pub(crate) fn table<T>(
        &mut self,
        field: &'static str,
        convert: impl Fn(&Value) -> Result<T, String>,
    ) -> Result<Vec<(String, T)>, SchemaError> {
        let map = match self.take(field) {
            None => return Err(self.missing(field)),
            Some(Value::Mapping(map)) => map,
            Some(other) => return Err(self.invalid(field, format!("expected a mapping, got {}", describe(&other)))),
        };
        map.into_iter()
            .map(|(key, value)| {
                let key = match key {
                    Value::String(s) => s,
                    other => return Err(self.invalid(field, format!("key {} is not a string", describe(&other)))),
                };
                let value = convert(&value).map_err(|reason| self.invalid(field, format!("{key}: {reason}")))?;
                Ok((key, value))
            })
            .collect()
    }

    fn sequence(&mut self, field: &'static str, required: bool) -> Result<Vec<Value>, SchemaError> {
        match self.take(field) {
            None if required => Err(self.missing(field)),
            None => Ok(Vec::new()),
            Some(Value::Sequence(items)) => Ok(items),
            Some(other) => Err(self.invalid(field, format!("expected a sequence, got {}", describe(&other)))),
        }
    }
}

pub(crate) fn string(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(format!("expected a string, got {}", describe(other))),
    }
}

pub(crate) fn float(value: &Value) -> Result<f64, String> {
    value
        .as_f64()
        .ok_or_else(|| format!("expected a number, got {}", describe(value)))
}

pub(crate) fn integer(value: &Value) -> Result<i64, String> {
    value
        .as_i64()
        .ok_or_else(|| format!("expected an integer, got {}", describe(value)))
}

pub(crate) fn boolean(value: &Value) -> Result<bool, String> {
    value
        .as_bool()
        .ok_or_else(|| format!("expected a boolean, got {}", describe(value)))
}
