//! The Impostor

use super::{last_index, name_at};
use keepsake_kernel::prelude::*;

/// Harvest definition for The Impostor
#[derive(Debug, Clone, Copy, Default)]
pub struct Impostor;

/// Bound fields of an Impostor component
#[derive(Debug)]
pub struct ImpostorFields {
    prefabs: Accessor<Vec<ObjectRef>>,
    chosen: Accessor<i64>,
}

impl StagedHarvest for Impostor {
    type Fields = ImpostorFields;
    type Snapshot = ();

    fn module_type(&self) -> &'static str {
        "impostor"
    }

    fn component_type(&self) -> &'static str {
        "impostorScript"
    }

    fn bind(
        &self,
        component: &ComponentHandle,
        _ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError> {
        Ok(ImpostorFields {
            prefabs: FieldDescriptor::array("Prefabs").public().resolve(component)?,
            chosen: FieldDescriptor::field("chosenMod").resolve(component)?,
        })
    }

    fn finalize(
        &self,
        fields: Self::Fields,
        _snapshots: Vec<()>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError> {
        let names: Vec<String> = fields
            .prefabs
            .get()?
            .into_iter()
            .map(|prefab| prefab.name)
            .collect();
        let chosen = fields.chosen.get_in_range(0, last_index(names.len()))?;
        let disguise = name_at(&names, chosen, "prefab")?;

        ctx.add_question(
            QuestionBuilder::new(QuestionKind::ImpostorDisguise)
                .correct(disguise)
                .preferred_wrong(names),
        )
    }
}
