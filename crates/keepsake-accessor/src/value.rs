//! Dynamic field values and their typed views
//!
//! A foreign component reports its state as [`FieldValue`]s. Framework code never
//! works with those directly: it names a Rust type implementing [`FieldType`] and the
//! accessor converts, failing with a type mismatch instead of coercing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to an engine object held in a field (button, text mesh, audio clip, prefab)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Engine type of the object
    pub type_name: String,
    /// Object name as reported by the host
    pub name: String,
}

impl ObjectRef {
    /// Create a new object reference
    #[inline]
    #[must_use]
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

/// Value currently stored in a foreign slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Unset reference
    Null,
    /// Integer of any width
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean flag
    Bool(bool),
    /// String
    Str(String),
    /// Engine object
    Object(ObjectRef),
    /// List or array
    Seq(Vec<FieldValue>),
}

impl FieldValue {
    /// Short label of the runtime shape, used in mismatch diagnostics
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
            Self::Object(_) => "object",
            Self::Seq(_) => "sequence",
        }
    }

    /// Whether the value is `Null`
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Declared type of a slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Integer
    Int,
    /// Floating point
    Float,
    /// Boolean
    Bool,
    /// String
    Str,
    /// Engine object reference
    Object,
    /// Sequence of the given element type
    Seq(Box<ValueType>),
}

impl ValueType {
    /// Sequence type with the given element type
    #[inline]
    #[must_use]
    pub fn seq(element: ValueType) -> Self {
        Self::Seq(Box::new(element))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Bool => f.write_str("bool"),
            Self::Str => f.write_str("string"),
            Self::Object => f.write_str("object"),
            Self::Seq(inner) => write!(f, "seq<{inner}>"),
        }
    }
}

/// Rust types that can be read out of a foreign slot
///
/// # Contract
/// - `from_value(&v.into_value())` returns the original value
/// - `from_value` returns `None` whenever the runtime shape differs from `value_type()`
pub trait FieldType: Sized + Clone + fmt::Debug {
    /// Declared slot type this Rust type binds to
    fn value_type() -> ValueType;

    /// Convert from the dynamic representation
    fn from_value(value: &FieldValue) -> Option<Self>;

    /// Convert into the dynamic representation
    fn into_value(self) -> FieldValue;
}

impl FieldType for i64 {
    fn value_type() -> ValueType {
        ValueType::Int
    }

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Int(self)
    }
}

impl FieldType for i32 {
    fn value_type() -> ValueType {
        ValueType::Int
    }

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Int(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Int(i64::from(self))
    }
}

impl FieldType for f64 {
    fn value_type() -> ValueType {
        ValueType::Float
    }

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Float(self)
    }
}

impl FieldType for bool {
    fn value_type() -> ValueType {
        ValueType::Bool
    }

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Bool(self)
    }
}

impl FieldType for String {
    fn value_type() -> ValueType {
        ValueType::Str
    }

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Str(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Str(self)
    }
}

impl FieldType for ObjectRef {
    fn value_type() -> ValueType {
        ValueType::Object
    }

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Object(v) => Some(v.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Object(self)
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn value_type() -> ValueType {
        ValueType::seq(T::value_type())
    }

    fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Seq(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }

    fn into_value(self) -> FieldValue {
        FieldValue::Seq(self.into_iter().map(FieldType::into_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_sequence_type_display() {
        assert_eq!(Vec::<Vec<i64>>::value_type().to_string(), "seq<seq<int>>");
        assert_eq!(String::value_type().to_string(), "string");
    }

    #[test]
    fn seq_conversion_rejects_mixed_elements() {
        let mixed = FieldValue::Seq(vec![FieldValue::Int(1), FieldValue::Str("x".into())]);
        assert_eq!(Vec::<i64>::from_value(&mixed), None);
    }

    #[test]
    fn i32_rejects_out_of_range_int() {
        assert_eq!(i32::from_value(&FieldValue::Int(i64::MAX)), None);
        assert_eq!(i32::from_value(&FieldValue::Int(-7)), Some(-7));
    }

    #[test]
    fn value_roundtrips_through_dynamic_form() {
        let original = vec![ObjectRef::new("AudioClip", "a"), ObjectRef::new("AudioClip", "b")];
        let dynamic = original.clone().into_value();
        assert_eq!(Vec::<ObjectRef>::from_value(&dynamic), Some(original));
    }
}
