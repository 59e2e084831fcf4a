//! Infinite Loop

use keepsake_kernel::prelude::*;

/// Harvest definition for Infinite Loop
#[derive(Debug, Clone, Copy, Default)]
pub struct InfiniteLoop;

/// Bound fields of an Infinite Loop component
#[derive(Debug)]
pub struct InfiniteLoopFields {
    selected_word: Accessor<String>,
}

impl StagedHarvest for InfiniteLoop {
    type Fields = InfiniteLoopFields;
    type Snapshot = ();

    fn module_type(&self) -> &'static str {
        "infiniteLoop"
    }

    fn component_type(&self) -> &'static str {
        "InfiniteLoop"
    }

    fn bind(
        &self,
        component: &ComponentHandle,
        _ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError> {
        Ok(InfiniteLoopFields {
            selected_word: FieldDescriptor::field("SelectedWord").resolve(component)?,
        })
    }

    fn finalize(
        &self,
        fields: Self::Fields,
        _snapshots: Vec<()>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError> {
        let word = fields.selected_word.get()?;
        ctx.add_question(QuestionBuilder::new(QuestionKind::InfiniteLoopSelectedWord).correct(word))
    }
}
