//! Static schema model.
//!
//! A [`Schema`] is a named, ordered list of [`FieldDefinition`]s. Schemas are declared
//! as `static` items and never change after provisioning, so every type here is
//! `Copy` and constructible in `const` context.
//!
//! # Example
//!
//! ```ignore
//! use lexstore_core::schema::{FieldDefinition, Schema};
//!
//! pub static NOTE: Schema = Schema::new("Note", &[
//!     FieldDefinition::string("title").required(),
//!     FieldDefinition::array("tags"),
//!     FieldDefinition::integer("priority").min(0).max(5),
//! ]);
//! ```

use serde_json::Value;
use std::fmt;

/// Attribute size used for string fields that do not declare a `max_length`.
pub const DEFAULT_STRING_SIZE: usize = 255;

/// Capacity of the string attribute backing an `arrayOfString` field.
pub const ARRAY_CAPACITY: usize = 10_000;

/// The primitive type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Integer,
    Float,
    /// A sequence of strings, stored by the backend as JSON text.
    ArrayOfString,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrimitiveType::String => "string",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Float => "float",
            PrimitiveType::ArrayOfString => "arrayOfString",
        })
    }
}

/// A default value for a field. The variant must match the field's primitive type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    String(&'static str),
    Integer(i64),
    Float(f64),
    Array(&'static [&'static str]),
}

impl DefaultValue {
    /// Returns the application-facing JSON form of this default.
    pub fn to_json(&self) -> Value {
        match self {
            DefaultValue::String(s) => Value::from(*s),
            DefaultValue::Integer(i) => Value::from(*i),
            DefaultValue::Float(f) => Value::from(*f),
            DefaultValue::Array(items) => Value::from(items.to_vec()),
        }
    }
}

/// Numeric bound of an integer or float field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Integer(i64),
    Float(f64),
}

impl Bound {
    pub fn to_json(&self) -> Value {
        match self {
            Bound::Integer(i) => Value::from(*i),
            Bound::Float(f) => Value::from(*f),
        }
    }
}

/// One attribute of a schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub primitive_type: PrimitiveType,
    pub required: bool,
    pub default: Option<DefaultValue>,
    /// Only meaningful for [`PrimitiveType::String`].
    pub max_length: Option<usize>,
    /// Only meaningful for numeric types.
    pub min: Option<Bound>,
    /// Only meaningful for numeric types.
    pub max: Option<Bound>,
}

impl FieldDefinition {
    const fn new(name: &'static str, primitive_type: PrimitiveType) -> Self {
        Self {
            name,
            primitive_type,
            required: false,
            default: None,
            max_length: None,
            min: None,
            max: None,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, PrimitiveType::String)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, PrimitiveType::Integer)
    }

    pub const fn float(name: &'static str) -> Self {
        Self::new(name, PrimitiveType::Float)
    }

    pub const fn array(name: &'static str) -> Self {
        Self::new(name, PrimitiveType::ArrayOfString)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub const fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the lower bound. Float fields take the bound as a float.
    pub const fn min(mut self, min: i64) -> Self {
        self.min = Some(self.bound(min));
        self
    }

    /// Sets the upper bound. Float fields take the bound as a float.
    pub const fn max(mut self, max: i64) -> Self {
        self.max = Some(self.bound(max));
        self
    }

    const fn bound(&self, value: i64) -> Bound {
        match self.primitive_type {
            PrimitiveType::Float => Bound::Float(value as f64),
            _ => Bound::Integer(value),
        }
    }

    /// Size of the backend string attribute for this field, `None` for numeric fields.
    pub fn capacity(&self) -> Option<usize> {
        match self.primitive_type {
            PrimitiveType::String => Some(self.max_length.unwrap_or(DEFAULT_STRING_SIZE)),
            PrimitiveType::ArrayOfString => Some(ARRAY_CAPACITY),
            PrimitiveType::Integer | PrimitiveType::Float => None,
        }
    }

    pub fn is_array(&self) -> bool {
        self.primitive_type == PrimitiveType::ArrayOfString
    }
}

/// A named, ordered sequence of field definitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldDefinition],
}

impl Schema {
    pub const fn new(name: &'static str, fields: &'static [FieldDefinition]) -> Self {
        Self { name, fields }
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterates over the array-typed fields.
    pub fn array_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.is_array())
    }

    /// Field names that occur more than once. Empty for a well-formed schema.
    pub fn duplicate_fields(&self) -> Vec<&'static str> {
        let mut seen = Vec::with_capacity(self.fields.len());
        let mut duplicates = Vec::new();

        for field in self.fields {
            if seen.contains(&field.name) {
                if !duplicates.contains(&field.name) {
                    duplicates.push(field.name);
                }
            } else {
                seen.push(field.name);
            }
        }

        duplicates
    }
}
