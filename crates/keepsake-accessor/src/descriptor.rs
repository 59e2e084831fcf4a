//! Field descriptors
//!
//! A [`FieldDescriptor`] is static knowledge about one puzzle type: the slot name,
//! where it lives, its shape and its visibility. Resolving it against a live
//! component produces an [`Accessor`].

use crate::accessor::Accessor;
use crate::component::ComponentHandle;
use crate::error::AccessError;
use crate::value::{FieldType, ValueType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a slot lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Storage {
    /// Per-instance field
    Instance,
    /// Field shared by every instance of the component type
    Static,
}

/// Declared container shape of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// Single value (which may itself hold a sequence)
    Scalar,
    /// Growable list
    List,
    /// Fixed array
    Array,
}

/// Declared visibility of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Visibility {
    /// Private/internal field
    #[default]
    NonPublic,
    /// Public field
    Public,
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance => f.write_str("instance"),
            Self::Static => f.write_str("static"),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.write_str("field"),
            Self::List => f.write_str("list"),
            Self::Array => f.write_str("array"),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPublic => f.write_str("non-public"),
            Self::Public => f.write_str("public"),
        }
    }
}

/// What a host reports about a slot without reading its value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInfo {
    /// Declared visibility
    pub visibility: Visibility,
    /// Declared container shape
    pub shape: Shape,
    /// Declared value type (a `Seq` for lists and arrays)
    pub value_type: ValueType,
}

/// Names a typed slot on a foreign component
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    name: String,
    storage: Storage,
    shape: Shape,
    visibility: Visibility,
}

impl FieldDescriptor {
    fn with_layout(name: impl Into<String>, storage: Storage, shape: Shape) -> Self {
        Self {
            name: name.into(),
            storage,
            shape,
            visibility: Visibility::NonPublic,
        }
    }

    /// Non-public instance field
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::with_layout(name, Storage::Instance, Shape::Scalar)
    }

    /// Non-public instance list
    #[must_use]
    pub fn list(name: impl Into<String>) -> Self {
        Self::with_layout(name, Storage::Instance, Shape::List)
    }

    /// Non-public instance array
    #[must_use]
    pub fn array(name: impl Into<String>) -> Self {
        Self::with_layout(name, Storage::Instance, Shape::Array)
    }

    /// Non-public static field
    #[must_use]
    pub fn static_field(name: impl Into<String>) -> Self {
        Self::with_layout(name, Storage::Static, Shape::Scalar)
    }

    /// Mark the slot as public
    #[inline]
    #[must_use]
    pub fn public(mut self) -> Self {
        self.visibility = Visibility::Public;
        self
    }

    /// Slot name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slot storage
    #[inline]
    #[must_use]
    pub fn storage(&self) -> Storage {
        self.storage
    }

    /// Requested shape
    #[inline]
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Requested visibility
    #[inline]
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Layout without the name, e.g. `non-public static field`
    #[must_use]
    pub fn layout(&self) -> String {
        format!("{} {} {}", self.visibility, self.storage, self.shape)
    }

    /// Bind this descriptor to a live component
    ///
    /// # Errors
    /// - `FieldNotFound` if no slot with this name, storage and visibility exists
    /// - `TypeMismatch` if the slot's shape (for lists/arrays) or declared type
    ///   differs from `T`
    pub fn resolve<T: FieldType>(
        &self,
        handle: &ComponentHandle,
    ) -> Result<Accessor<T>, AccessError> {
        let not_found = || AccessError::FieldNotFound {
            component: handle.type_name().to_string(),
            field: self.name.clone(),
            expected: self.layout(),
        };

        let info = handle
            .describe(&self.name, self.storage)
            .ok_or_else(not_found)?;

        if info.visibility != self.visibility {
            return Err(not_found());
        }

        let expected_type = T::value_type();
        let shape_ok = self.shape == Shape::Scalar || info.shape == self.shape;
        if !shape_ok || info.value_type != expected_type {
            return Err(AccessError::TypeMismatch {
                component: handle.type_name().to_string(),
                field: self.name.clone(),
                expected: format!("{} of {}", self.shape, expected_type),
                found: format!("{} of {}", info.shape, info.value_type),
            });
        }

        Ok(Accessor::bind(handle.clone(), self.clone()))
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} '{}'",
            self.visibility, self.storage, self.shape, self.name
        )
    }
}
