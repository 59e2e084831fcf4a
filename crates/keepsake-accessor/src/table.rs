//! In-memory registration table of typed slots
//!
//! [`MemoryComponent`] is the reference host binding: the host registers each slot
//! with its declared layout once, then updates values as the puzzle runs. It also
//! counts reads and records interactions so harnesses can observe what a task did.

use crate::component::{ComponentHandle, ForeignComponent, Interaction};
use crate::descriptor::{Shape, SlotInfo, Storage, Visibility};
use crate::error::AccessError;
use crate::value::{FieldType, FieldValue};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Engine type accepted by [`Interaction::Neutralize`]
pub const SELECTABLE_TYPE: &str = "KMSelectable";
/// Engine type accepted by [`Interaction::SetText`]
pub const TEXT_MESH_TYPE: &str = "TextMesh";

#[derive(Debug, Clone)]
struct Slot {
    info: SlotInfo,
    value: FieldValue,
}

impl Slot {
    fn typed<T: FieldType>(visibility: Visibility, shape: Shape, value: T) -> Self {
        Self {
            info: SlotInfo {
                visibility,
                shape,
                value_type: T::value_type(),
            },
            value: value.into_value(),
        }
    }
}

/// Static slots shared by every instance of one component type
#[derive(Debug, Default)]
pub struct StaticFields {
    slots: RwLock<BTreeMap<String, Slot>>,
}

impl StaticFields {
    /// Create an empty, shareable static table
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a static scalar slot
    pub fn insert<T: FieldType>(&self, name: impl Into<String>, visibility: Visibility, value: T) {
        self.slots
            .write()
            .insert(name.into(), Slot::typed(visibility, Shape::Scalar, value));
    }
}

/// Foreign component backed by an in-memory slot table
#[derive(Debug)]
pub struct MemoryComponent {
    type_name: String,
    fields: RwLock<BTreeMap<String, Slot>>,
    statics: Arc<StaticFields>,
    reads: Mutex<BTreeMap<String, usize>>,
    interactions: Mutex<Vec<(String, Interaction)>>,
}

impl MemoryComponent {
    /// Create a component with no slots
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: RwLock::new(BTreeMap::new()),
            statics: Arc::new(StaticFields::default()),
            reads: Mutex::new(BTreeMap::new()),
            interactions: Mutex::new(Vec::new()),
        }
    }

    /// Share a static table with other instances of the same type
    #[must_use]
    pub fn with_statics(mut self, statics: Arc<StaticFields>) -> Self {
        self.statics = statics;
        self
    }

    fn with_slot(mut self, name: impl Into<String>, slot: Slot) -> Self {
        self.fields.get_mut().insert(name.into(), slot);
        self
    }

    /// Register a non-public scalar slot
    #[must_use]
    pub fn with_field<T: FieldType>(self, name: impl Into<String>, value: T) -> Self {
        self.with_slot(name, Slot::typed(Visibility::NonPublic, Shape::Scalar, value))
    }

    /// Register a public scalar slot
    #[must_use]
    pub fn with_public_field<T: FieldType>(self, name: impl Into<String>, value: T) -> Self {
        self.with_slot(name, Slot::typed(Visibility::Public, Shape::Scalar, value))
    }

    /// Register a non-public list slot
    #[must_use]
    pub fn with_list<E: FieldType>(self, name: impl Into<String>, values: Vec<E>) -> Self {
        self.with_slot(name, Slot::typed(Visibility::NonPublic, Shape::List, values))
    }

    /// Register a public list slot
    #[must_use]
    pub fn with_public_list<E: FieldType>(self, name: impl Into<String>, values: Vec<E>) -> Self {
        self.with_slot(name, Slot::typed(Visibility::Public, Shape::List, values))
    }

    /// Register a non-public array slot
    #[must_use]
    pub fn with_array<E: FieldType>(self, name: impl Into<String>, values: Vec<E>) -> Self {
        self.with_slot(name, Slot::typed(Visibility::NonPublic, Shape::Array, values))
    }

    /// Register a public array slot
    #[must_use]
    pub fn with_public_array<E: FieldType>(self, name: impl Into<String>, values: Vec<E>) -> Self {
        self.with_slot(name, Slot::typed(Visibility::Public, Shape::Array, values))
    }

    /// Register a slot with an explicit layout and raw value
    #[must_use]
    pub fn with_raw(self, name: impl Into<String>, info: SlotInfo, value: FieldValue) -> Self {
        self.with_slot(name, Slot { info, value })
    }

    /// Wrap into a shareable handle
    #[must_use]
    pub fn into_handle(self) -> ComponentHandle {
        Arc::new(self)
    }

    /// Update an existing instance slot, keeping its declared layout
    ///
    /// Returns `false` if the slot does not exist.
    pub fn set<T: FieldType>(&self, name: &str, value: T) -> bool {
        self.set_raw(name, value.into_value())
    }

    /// Update an existing instance slot with an arbitrary value
    ///
    /// The declared layout is not checked; this is how a misbehaving component is
    /// simulated. Returns `false` if the slot does not exist.
    pub fn set_raw(&self, name: &str, value: FieldValue) -> bool {
        match self.fields.write().get_mut(name) {
            Some(slot) => {
                slot.value = value;
                true
            }
            None => false,
        }
    }

    /// Current raw value of an instance slot
    #[must_use]
    pub fn peek(&self, name: &str) -> Option<FieldValue> {
        self.fields.read().get(name).map(|slot| slot.value.clone())
    }

    /// Number of times the framework read a slot
    #[must_use]
    pub fn read_count(&self, name: &str) -> usize {
        self.reads.lock().get(name).copied().unwrap_or(0)
    }

    /// Interactions performed so far, in order
    #[must_use]
    pub fn interactions(&self) -> Vec<(String, Interaction)> {
        self.interactions.lock().clone()
    }

    fn lookup(&self, name: &str, storage: Storage) -> Option<Slot> {
        match storage {
            Storage::Instance => self.fields.read().get(name).cloned(),
            Storage::Static => self.statics.slots.read().get(name).cloned(),
        }
    }

    fn rejected(&self, field: &str, reason: impl Into<String>) -> AccessError {
        AccessError::InteractionRejected {
            component: self.type_name.clone(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl ForeignComponent for MemoryComponent {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn describe(&self, name: &str, storage: Storage) -> Option<SlotInfo> {
        self.lookup(name, storage).map(|slot| slot.info)
    }

    fn read(&self, name: &str, storage: Storage) -> Option<FieldValue> {
        let slot = self.lookup(name, storage)?;
        *self.reads.lock().entry(name.to_string()).or_insert(0) += 1;
        Some(slot.value)
    }

    fn interact(&self, name: &str, interaction: &Interaction) -> Result<(), AccessError> {
        let slot = self
            .lookup(name, Storage::Instance)
            .ok_or_else(|| self.rejected(name, "no such slot"))?;

        let FieldValue::Object(object) = &slot.value else {
            return Err(self.rejected(name, format!("slot holds {}", slot.value.label())));
        };

        let required = match interaction {
            Interaction::Neutralize => SELECTABLE_TYPE,
            Interaction::SetText(_) => TEXT_MESH_TYPE,
        };
        if object.type_name != required {
            return Err(self.rejected(
                name,
                format!("expected {required}, found {}", object.type_name),
            ));
        }

        self.interactions
            .lock()
            .push((name.to_string(), interaction.clone()));
        Ok(())
    }
}
