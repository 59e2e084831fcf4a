//! Interpunct
//!
//! The display symbol is replaced on every stage and again after a strike, so the
//! component is sampled on every pass and the last symbol seen in each stage wins.

use keepsake_kernel::prelude::*;

const STAGES: u32 = 3;

/// Harvest definition for Interpunct
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpunct;

/// Bound fields of an Interpunct component
#[derive(Debug)]
pub struct InterpunctFields {
    display: Accessor<String>,
    stage: Accessor<i64>,
}

impl ContinuousHarvest for Interpunct {
    type Fields = InterpunctFields;
    type Sample = String;

    fn module_type(&self) -> &'static str {
        "interpunct"
    }

    fn component_type(&self) -> &'static str {
        "InterpunctScript"
    }

    fn phase_count(&self) -> u32 {
        STAGES
    }

    fn bind(
        &self,
        component: &ComponentHandle,
        _ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError> {
        Ok(InterpunctFields {
            display: FieldDescriptor::field("displaySymbol").resolve(component)?,
            stage: FieldDescriptor::field("stage").resolve(component)?,
        })
    }

    fn phase(&self, fields: &Self::Fields) -> Result<u32, HarvestError> {
        // stages are numbered 1–3
        let stage = fields.stage.get_in_range(1, i64::from(STAGES))?;
        u32::try_from(stage).map_err(|_| HarvestError::Definition(format!("stage {stage}")))
    }

    fn sample(&self, fields: &Self::Fields) -> Result<Self::Sample, HarvestError> {
        Ok(fields.display.get()?)
    }

    fn finalize(
        &self,
        _fields: Self::Fields,
        samples: Vec<Option<String>>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError> {
        let questions = samples
            .into_iter()
            .zip(1_u32..)
            .map(|(symbol, n)| {
                let symbol = symbol.ok_or_else(|| HarvestError::MissingObservation {
                    what: format!("stage {n}"),
                })?;
                Ok(QuestionBuilder::new(QuestionKind::InterpunctDisplay)
                    .format_arg(ordinal(n))
                    .correct(symbol))
            })
            .collect::<Result<Vec<_>, HarvestError>>()?;
        ctx.add_questions(questions)
    }
}
