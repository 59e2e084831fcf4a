//! Keepsake Accessor Layer
//!
//! Typed, validated read access to state exposed by foreign puzzle components.
//!
//! # Overview
//!
//! Puzzle components are written by third parties and expose their state only as
//! named slots. This crate never trusts that state:
//! - **[`FieldDescriptor`]**: names a slot (instance/static, scalar/list/array, visibility)
//! - **[`Accessor<T>`]**: a resolved binding that re-reads and re-validates on every `get`
//! - **[`SeqCheck`]**: length, element-wise and whole-sequence constraints
//! - **[`MemoryComponent`]**: an in-memory registration table implementing [`ForeignComponent`]
//!
//! # Example
//!
//! ```rust
//! use keepsake_accessor::{FieldDescriptor, MemoryComponent, SeqCheck};
//!
//! let component = MemoryComponent::new("IceCreamModule")
//!     .with_field("CurrentStage", 0_i64)
//!     .with_array("Solution", vec![1_i64, 4, 2])
//!     .into_handle();
//!
//! let stage = FieldDescriptor::field("CurrentStage").resolve::<i64>(&component).unwrap();
//! assert_eq!(stage.get_in_range(0, 3).unwrap(), 0);
//!
//! let solution = FieldDescriptor::array("Solution").resolve::<Vec<i64>>(&component).unwrap();
//! let check = SeqCheck::new().len(3).each_in_range(0, 4);
//! assert_eq!(solution.get_with(&check).unwrap(), vec![1, 4, 2]);
//! ```

#![warn(missing_docs)]

pub mod accessor;
pub mod component;
pub mod descriptor;
pub mod error;
pub mod table;
pub mod value;

// Re-exports
pub use accessor::{Accessor, SeqCheck};
pub use component::{ComponentHandle, ForeignComponent, Interaction};
pub use descriptor::{FieldDescriptor, Shape, SlotInfo, Storage, Visibility};
pub use error::AccessError;
pub use table::{MemoryComponent, StaticFields};
pub use value::{FieldType, FieldValue, ObjectRef, ValueType};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for reading foreign component state
    pub use crate::{
        AccessError, Accessor, ComponentHandle, FieldDescriptor, FieldType, FieldValue,
        ForeignComponent, Interaction, ObjectRef, SeqCheck,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
