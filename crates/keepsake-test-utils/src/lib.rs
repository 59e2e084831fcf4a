//! Testing utilities for the Keepsake workspace
//!
//! Helpers for putting a single module on a simulated host.

#![allow(missing_docs)]

use keepsake_accessor::MemoryComponent;
use keepsake_kernel::test_harness::SimulatedHost;
use keepsake_kernel::ModuleRecord;
use keepsake_question::ModuleId;
use std::sync::Arc;

/// Host with one module, id `#1`
pub fn single_module(
    module_type: &str,
    display_name: &str,
    component: MemoryComponent,
) -> (Arc<SimulatedHost>, ModuleRecord) {
    let host = SimulatedHost::new();
    let record = host.add_module(ModuleId(1), module_type, display_name, component);
    (host, record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_module_is_registered_as_first() {
        let (host, record) = single_module("blank", "Blank", MemoryComponent::new("Blank"));
        assert_eq!(record.id, ModuleId(1));
        assert_eq!(host.module_ids(), vec![ModuleId(1)]);
        assert!(host.component(ModuleId(1)).is_some());
    }
}
