use crate::coerce::{self, Coerce, Fields, Raw};
use crate::domain::ControlKind;
use crate::error::SchemaError;
use crate::values::ControlValue;
use serde_yaml::Value;

/// A configurable knob exposed by a device.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamControl {
    pub kind: ControlKind,
    /// Identifying key; consumers look controls up by name.
    pub name: String,
    pub writable: bool,
    pub min: f64,
    pub max: f64,
    pub step: i64,
    pub value: Option<ControlValue>,
    /// `(label, value)` pairs, only meaningful for menu controls.
    pub options: Vec<(String, ControlValue)>,
}

impl StreamControl {
    pub(crate) const ENTITY: &'static str = "StreamControl";
    /// Textual field names, in emission order. `kind` is written as `type`.
    pub const FIELDS: &'static [&'static str] = &[
        "type", "name", "writable", "min", "max", "step", "value", "options",
    ];

    /// A control with every optional field at its default.
    pub fn new(kind: ControlKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            writable: false,
            min: 0.0,
            max: 0.0,
            step: 1,
            value: None,
            options: Vec::new(),
        }
    }

    /// Like [`StreamControl::new`] but with a kind that may still be raw.
    pub fn with_raw_kind(kind: Raw<ControlKind>, name: impl Into<String>) -> Result<Self, SchemaError> {
        let kind = match kind {
            Raw::Value(value) if coerce::is_falsy(&value) => {
                return Err(SchemaError::MissingField {
                    entity: Self::ENTITY,
                    field: "type",
                })
            }
            raw => ControlKind::coerce(raw)?,
        };
        Ok(Self::new(kind, name))
    }

    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    pub fn range(mut self, min: f64, max: f64, step: i64) -> Self {
        self.min = min;
        self.max = max;
        self.step = step;
        self
    }

    pub fn value(mut self, value: impl Into<ControlValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn option(mut self, label: impl Into<String>, value: impl Into<ControlValue>) -> Self {
        self.options.push((label.into(), value.into()));
        self
    }

    /// Label of the menu option matching the current value.
    pub fn selected_label(&self) -> Option<&str> {
        self.label_for(self.value.as_ref()?)
    }

    /// Label of the menu option offering `value`.
    pub fn label_for(&self, value: &ControlValue) -> Option<&str> {
        self.options
            .iter()
            .find(|(_, option)| option == value)
            .map(|(label, _)| label.as_str())
    }
}

fn menu_option(value: &Value) -> Result<(String, ControlValue), String> {
    match value.as_sequence().map(Vec::as_slice) {
        Some([label, value]) => Ok((coerce::string(label)?, ControlValue::from_tree(value)?)),
        _ => Err("expected a [label, value] pair".to_string()),
    }
}

impl Coerce for StreamControl {
    fn from_value(value: Value) -> Result<Self, SchemaError> {
        let mut known = Self::FIELDS.to_vec();
        known.push("kind");
        let mut fields = Fields::open(Self::ENTITY, &known, value)?;
        fields.alias("type", "kind")?;

        Ok(Self {
            kind: fields.member("type")?,
            name: fields.required("name", coerce::string)?,
            writable: fields.optional("writable", coerce::boolean)?.unwrap_or(false),
            min: fields.optional("min", coerce::float)?.unwrap_or(0.0),
            max: fields.optional("max", coerce::float)?.unwrap_or(0.0),
            step: fields.optional("step", coerce::integer)?.unwrap_or(1),
            value: fields.optional("value", ControlValue::from_tree)?,
            options: fields.list("options", menu_option)?,
        })
    }
}
