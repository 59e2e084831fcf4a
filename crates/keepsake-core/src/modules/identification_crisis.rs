//! Identification Crisis

use super::{last_index, name_at};
use keepsake_kernel::prelude::*;

const ROUNDS: usize = 3;

/// Harvest definition for Identification Crisis
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentificationCrisis;

/// Bound fields of an Identification Crisis component
#[derive(Debug)]
pub struct IdentificationCrisisFields {
    shapes: Accessor<Vec<i64>>,
    datasets: Accessor<Vec<i64>>,
    shape_names: Accessor<Vec<String>>,
}

impl StagedHarvest for IdentificationCrisis {
    type Fields = IdentificationCrisisFields;
    type Snapshot = ();

    fn module_type(&self) -> &'static str {
        "identificationCrisis"
    }

    fn component_type(&self) -> &'static str {
        "identificationCrisis"
    }

    fn bind(
        &self,
        component: &ComponentHandle,
        _ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError> {
        Ok(IdentificationCrisisFields {
            shapes: FieldDescriptor::array("shapesUsed").resolve(component)?,
            datasets: FieldDescriptor::array("datasetsUsed").resolve(component)?,
            shape_names: FieldDescriptor::static_field("shapeNames").resolve(component)?,
        })
    }

    fn finalize(
        &self,
        fields: Self::Fields,
        _snapshots: Vec<()>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError> {
        let shape_names = fields.shape_names.get()?;
        let dataset_names = ctx.answers(QuestionKind::IdentificationCrisisDataset);

        let shapes = fields.shapes.get_with(
            &SeqCheck::new()
                .len(ROUNDS)
                .each_in_range(0, last_index(shape_names.len())),
        )?;
        let datasets = fields.datasets.get_with(
            &SeqCheck::new()
                .len(ROUNDS)
                .each_in_range(0, last_index(dataset_names.len())),
        )?;

        let mut questions = Vec::with_capacity(ROUNDS * 2);
        for ((shape, dataset), n) in shapes.iter().zip(&datasets).zip(1_u32..) {
            questions.push(
                QuestionBuilder::new(QuestionKind::IdentificationCrisisShape)
                    .format_arg(ordinal(n))
                    .correct(name_at(&shape_names, *shape, "shape")?)
                    .preferred_wrong(shape_names.iter().cloned()),
            );
            questions.push(
                QuestionBuilder::new(QuestionKind::IdentificationCrisisDataset)
                    .format_arg(ordinal(n))
                    .correct(name_at(&dataset_names, *dataset, "dataset")?),
            );
        }
        ctx.add_questions(questions)
    }
}
