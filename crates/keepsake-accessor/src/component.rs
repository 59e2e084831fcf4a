//! Host binding for foreign components

use crate::descriptor::{SlotInfo, Storage};
use crate::error::AccessError;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Whitelisted, cosmetic interactions the framework may perform on a solved component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    /// Rebind a selectable so pressing it gives feedback but has no effect
    Neutralize,
    /// Replace the text shown by a text mesh
    SetText(String),
}

/// A running puzzle instance as seen through the host binding
///
/// Implementations expose a table of typed slots. The framework only reads through
/// [`read`](Self::read) and only writes through [`interact`](Self::interact).
pub trait ForeignComponent: Send + Sync + fmt::Debug {
    /// Component type name (e.g. `IceCreamModule`)
    fn type_name(&self) -> &str;

    /// Declared layout of a slot, or `None` if it does not exist
    fn describe(&self, name: &str, storage: Storage) -> Option<SlotInfo>;

    /// Current value of a slot, or `None` if it does not exist
    fn read(&self, name: &str, storage: Storage) -> Option<FieldValue>;

    /// Perform a whitelisted interaction on the object held in an instance slot
    ///
    /// # Errors
    /// Returns `InteractionRejected` if the slot does not hold an object the
    /// interaction applies to
    fn interact(&self, name: &str, interaction: &Interaction) -> Result<(), AccessError>;
}

/// Shared handle to a foreign component; lifetime is owned by the host
pub type ComponentHandle = Arc<dyn ForeignComponent>;
