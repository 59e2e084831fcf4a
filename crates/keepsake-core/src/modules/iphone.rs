//! The iPhone

use keepsake_kernel::prelude::*;

const PIN_LENGTH: usize = 4;

/// Harvest definition for The iPhone
#[derive(Debug, Clone, Copy, Default)]
pub struct IPhone;

/// PIN read when the module starts
#[derive(Debug)]
pub struct IPhoneFields {
    digits: Vec<String>,
}

impl StagedHarvest for IPhone {
    type Fields = IPhoneFields;
    type Snapshot = ();

    fn module_type(&self) -> &'static str {
        "iPhone"
    }

    fn component_type(&self) -> &'static str {
        "iPhoneScript"
    }

    fn bind(
        &self,
        component: &ComponentHandle,
        _ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError> {
        let digits = FieldDescriptor::list("pinDigits")
            .public()
            .resolve::<Vec<String>>(component)?
            .get_len(PIN_LENGTH)?;
        Ok(IPhoneFields { digits })
    }

    fn finalize(
        &self,
        fields: Self::Fields,
        _snapshots: Vec<()>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError> {
        let digits = &fields.digits;
        let questions = digits.iter().enumerate().zip(1_u32..).map(|((i, digit), n)| {
            let others = digits
                .iter()
                .enumerate()
                .filter(move |(j, _)| *j != i)
                .map(|(_, other)| other.clone());
            QuestionBuilder::new(QuestionKind::IPhoneDigits)
                .format_arg(ordinal(n))
                .correct(digit.clone())
                .preferred_wrong(others)
        });
        ctx.add_questions(questions.collect::<Vec<_>>())
    }
}
