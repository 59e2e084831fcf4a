//! Harvest definitions for supported puzzles
//!
//! One definition per puzzle type. Most are [`StagedHarvest`] definitions run by the
//! generic staged driver; [`Interpunct`] overwrites its display between stages and is
//! observed continuously instead.
//!
//! [`StagedHarvest`]: keepsake_kernel::StagedHarvest

mod ice_cream;
mod identification_crisis;
mod identity_parade;
mod impostor;
mod infinite_loop;
mod ingredients;
mod inner_connections;
mod interpunct;
mod ipa;
mod iphone;

pub use ice_cream::{IceCream, IceCreamFields, ServedCustomer};
pub use identification_crisis::{IdentificationCrisis, IdentificationCrisisFields};
pub use identity_parade::{IdentityParade, IdentityParadeFields};
pub use impostor::{Impostor, ImpostorFields};
pub use infinite_loop::{InfiniteLoop, InfiniteLoopFields};
pub use ingredients::{Ingredients, IngredientsFields};
pub use inner_connections::{InnerConnections, InnerConnectionsFields};
pub use interpunct::{Interpunct, InterpunctFields};
pub use ipa::{Ipa, IpaFields};
pub use iphone::{IPhone, IPhoneFields};

use keepsake_kernel::HarvestError;

/// Largest valid index into a table of `len` entries; `-1` when the table is empty
pub(crate) fn last_index(len: usize) -> i64 {
    i64::try_from(len).map_or(i64::MAX, |n| n - 1)
}

/// Entry `index` of a name table
pub(crate) fn name_at(names: &[String], index: i64, table: &str) -> Result<String, HarvestError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| names.get(i))
        .cloned()
        .ok_or_else(|| {
            HarvestError::Abandoned(format!(
                "{table} index {index} outside 0–{}",
                last_index(names.len())
            ))
        })
}
