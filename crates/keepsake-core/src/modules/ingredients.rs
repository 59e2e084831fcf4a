//! Ingredients
//!
//! The initial ingredient list is only available before the module is worked on;
//! whatever is left in the current list after the solve was never used.

use keepsake_kernel::prelude::*;

/// Harvest definition for Ingredients
#[derive(Debug, Clone, Copy, Default)]
pub struct Ingredients;

/// Bound fields of an Ingredients component
#[derive(Debug)]
pub struct IngredientsFields {
    initial: Vec<String>,
    current: Accessor<Vec<String>>,
}

impl StagedHarvest for Ingredients {
    type Fields = IngredientsFields;
    type Snapshot = ();

    fn module_type(&self) -> &'static str {
        "ingredients"
    }

    fn component_type(&self) -> &'static str {
        "IngredientsScript"
    }

    fn bind(
        &self,
        component: &ComponentHandle,
        _ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError> {
        let initial = FieldDescriptor::field("InitialIngredientsList")
            .resolve::<Vec<String>>(component)?
            .get()?;
        Ok(IngredientsFields {
            initial,
            current: FieldDescriptor::field("CurrentIngredientsList").resolve(component)?,
        })
    }

    fn finalize(
        &self,
        fields: Self::Fields,
        _snapshots: Vec<()>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError> {
        let unused = fields.current.get()?;
        let used: Vec<String> = fields
            .initial
            .into_iter()
            .filter(|ingredient| !unused.contains(ingredient))
            .collect();

        ctx.add_questions([
            QuestionBuilder::new(QuestionKind::IngredientsIngredients)
                .correct_answers(used.iter().cloned())
                .preferred_wrong(unused.iter().cloned()),
            QuestionBuilder::new(QuestionKind::IngredientsNonIngredients)
                .correct_answers(unused.iter().cloned())
                .preferred_wrong(used.iter().cloned()),
        ])
    }
}
