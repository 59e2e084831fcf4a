//! Resolved accessors and read constraints
//!
//! An [`Accessor<T>`] re-reads its slot on every call; values can change between
//! reads. Constraints are applied on each read and a violation never yields a
//! partially valid value.

use crate::component::{ComponentHandle, Interaction};
use crate::descriptor::FieldDescriptor;
use crate::error::AccessError;
use crate::value::{FieldType, ObjectRef};
use std::fmt::{self, Display};
use std::marker::PhantomData;

type ElementCheck<'a, E> = Box<dyn Fn(&E) -> Option<String> + 'a>;
type WholeCheck<'a, E> = Box<dyn Fn(&[E]) -> Option<String> + 'a>;

/// Constraints applied to a sequence read
///
/// Checks run in order: expected length, whole-sequence validator, element validator.
/// Validators return `Some(message)` to reject.
pub struct SeqCheck<'a, E> {
    expected_len: Option<usize>,
    whole: Option<WholeCheck<'a, E>>,
    element: Option<ElementCheck<'a, E>>,
}

impl<'a, E> SeqCheck<'a, E> {
    /// No constraints
    #[must_use]
    pub fn new() -> Self {
        Self {
            expected_len: None,
            whole: None,
            element: None,
        }
    }

    /// Require an exact length
    #[inline]
    #[must_use]
    pub fn len(mut self, expected: usize) -> Self {
        self.expected_len = Some(expected);
        self
    }

    /// Validate every element
    #[must_use]
    pub fn each(mut self, validator: impl Fn(&E) -> Option<String> + 'a) -> Self {
        self.element = Some(Box::new(validator));
        self
    }

    /// Validate the sequence as a whole
    #[must_use]
    pub fn all(mut self, validator: impl Fn(&[E]) -> Option<String> + 'a) -> Self {
        self.whole = Some(Box::new(validator));
        self
    }

    /// Expected length, if any
    #[inline]
    #[must_use]
    pub fn expected_len(&self) -> Option<usize> {
        self.expected_len
    }

    fn check(&self, values: &[E]) -> Result<(), Violation> {
        if let Some(expected) = self.expected_len {
            if values.len() != expected {
                return Err(Violation::Length {
                    expected,
                    actual: values.len(),
                });
            }
        }
        if let Some(message) = self.whole.as_ref().and_then(|v| v(values)) {
            return Err(Violation::Contract(message));
        }
        if let Some(validator) = &self.element {
            for (index, value) in values.iter().enumerate() {
                if let Some(message) = validator(value) {
                    return Err(Violation::Contract(format!("element {index}: {message}")));
                }
            }
        }
        Ok(())
    }
}

impl<'a, E> SeqCheck<'a, E>
where
    E: PartialOrd + Display + 'a,
{
    /// Require every element to lie in `min..=max`
    #[must_use]
    pub fn each_in_range(self, min: E, max: E) -> Self {
        self.each(move |value| range_message(value, &min, &max))
    }
}

impl<E> Default for SeqCheck<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for SeqCheck<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeqCheck")
            .field("expected_len", &self.expected_len)
            .field("whole", &self.whole.is_some())
            .field("element", &self.element.is_some())
            .finish()
    }
}

enum Violation {
    Length { expected: usize, actual: usize },
    Contract(String),
}

fn range_message<T: PartialOrd + Display>(value: &T, min: &T, max: &T) -> Option<String> {
    if value < min || value > max {
        Some(format!("expected range {min}–{max}, got {value}"))
    } else {
        None
    }
}

/// Validated read binding between a descriptor and a live component
pub struct Accessor<T> {
    handle: ComponentHandle,
    descriptor: FieldDescriptor,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
            descriptor: self.descriptor.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("component", &self.handle.type_name())
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

impl<T: FieldType> Accessor<T> {
    pub(crate) fn bind(handle: ComponentHandle, descriptor: FieldDescriptor) -> Self {
        Self {
            handle,
            descriptor,
            _marker: PhantomData,
        }
    }

    /// Descriptor this accessor was resolved from
    #[inline]
    #[must_use]
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Component this accessor reads from
    #[inline]
    #[must_use]
    pub fn component(&self) -> &ComponentHandle {
        &self.handle
    }

    fn out_of_contract(&self, message: String) -> AccessError {
        AccessError::ValueOutOfContract {
            component: self.handle.type_name().to_string(),
            field: self.descriptor.name().to_string(),
            message,
        }
    }

    /// Read the current value
    ///
    /// # Errors
    /// - `FieldNotFound` if the slot disappeared since resolution
    /// - `ValueOutOfContract` if the slot is null
    /// - `TypeMismatch` if the runtime value does not convert to `T`
    pub fn get(&self) -> Result<T, AccessError> {
        let raw = self
            .handle
            .read(self.descriptor.name(), self.descriptor.storage())
            .ok_or_else(|| AccessError::FieldNotFound {
                component: self.handle.type_name().to_string(),
                field: self.descriptor.name().to_string(),
                expected: self.descriptor.layout(),
            })?;

        if raw.is_null() {
            return Err(self.out_of_contract("value is null".to_string()));
        }

        T::from_value(&raw).ok_or_else(|| AccessError::TypeMismatch {
            component: self.handle.type_name().to_string(),
            field: self.descriptor.name().to_string(),
            expected: T::value_type().to_string(),
            found: raw.label().to_string(),
        })
    }

    /// Read the current value and validate it
    ///
    /// # Errors
    /// As [`get`](Self::get), plus `ValueOutOfContract` with the validator's message
    pub fn get_checked(
        &self,
        validator: impl FnOnce(&T) -> Option<String>,
    ) -> Result<T, AccessError> {
        let value = self.get()?;
        match validator(&value) {
            Some(message) => Err(self.out_of_contract(message)),
            None => Ok(value),
        }
    }
}

impl<T> Accessor<T>
where
    T: FieldType + PartialOrd + Display,
{
    /// Read the current value and require it to lie in `min..=max`
    ///
    /// # Errors
    /// As [`get`](Self::get), plus `ValueOutOfContract` if out of bounds
    pub fn get_in_range(&self, min: T, max: T) -> Result<T, AccessError> {
        let value = self.get()?;
        match range_message(&value, &min, &max) {
            Some(message) => Err(self.out_of_contract(message)),
            None => Ok(value),
        }
    }
}

impl<E: FieldType> Accessor<Vec<E>> {
    /// Read the sequence and apply `check`
    ///
    /// # Errors
    /// As [`get`](Accessor::get), plus `ShapeViolation` on a length mismatch and
    /// `ValueOutOfContract` when a validator rejects
    pub fn get_with(&self, check: &SeqCheck<'_, E>) -> Result<Vec<E>, AccessError> {
        let values = self.get()?;
        match check.check(&values) {
            Ok(()) => Ok(values),
            Err(Violation::Length { expected, actual }) => Err(AccessError::ShapeViolation {
                component: self.handle.type_name().to_string(),
                field: self.descriptor.name().to_string(),
                expected,
                actual,
            }),
            Err(Violation::Contract(message)) => Err(self.out_of_contract(message)),
        }
    }

    /// Read the sequence and require an exact length
    ///
    /// # Errors
    /// As [`get_with`](Self::get_with)
    pub fn get_len(&self, expected: usize) -> Result<Vec<E>, AccessError> {
        self.get_with(&SeqCheck::new().len(expected))
    }
}

impl Accessor<ObjectRef> {
    /// Perform a whitelisted interaction on the object held by this slot
    ///
    /// The slot is read first so that a null or retyped slot fails like any read.
    ///
    /// # Errors
    /// Any read error, or `InteractionRejected` from the host
    pub fn interact(&self, interaction: &Interaction) -> Result<ObjectRef, AccessError> {
        let object = self.get()?;
        self.handle.interact(self.descriptor.name(), interaction)?;
        Ok(object)
    }
}
