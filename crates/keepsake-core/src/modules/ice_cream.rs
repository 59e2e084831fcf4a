//! Ice Cream
//!
//! Three customers in turn, each offered five flavours. The component keeps every
//! stage's offer in `FlavorOptions` and advances `CurrentStage` once a customer is
//! served, so each stage is captured as soon as the index moves past it.

use super::{last_index, name_at};
use keepsake_kernel::prelude::*;

const STAGES: u32 = 3;
const OFFERED: usize = 5;

/// Harvest definition for Ice Cream
#[derive(Debug, Clone, Copy, Default)]
pub struct IceCream;

/// Bound fields of an Ice Cream component
#[derive(Debug)]
pub struct IceCreamFields {
    stage: Accessor<i64>,
    customers: Accessor<Vec<i64>>,
    solution: Accessor<Vec<i64>>,
    options: Accessor<Vec<Vec<i64>>>,
    flavours: Vec<String>,
    customer_names: Vec<String>,
}

/// What one customer was offered and bought
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedCustomer {
    offered: Vec<String>,
    sold: String,
    customer: String,
}

impl StagedHarvest for IceCream {
    type Fields = IceCreamFields;
    type Snapshot = ServedCustomer;

    fn module_type(&self) -> &'static str {
        "iceCreamModule"
    }

    fn component_type(&self) -> &'static str {
        "IceCreamModule"
    }

    fn waits_for_activation(&self) -> bool {
        true
    }

    fn stage_count(&self) -> u32 {
        STAGES
    }

    fn bind(
        &self,
        component: &ComponentHandle,
        ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError> {
        Ok(IceCreamFields {
            stage: FieldDescriptor::field("CurrentStage").resolve(component)?,
            customers: FieldDescriptor::array("CustomerNamesSolution").resolve(component)?,
            solution: FieldDescriptor::array("Solution").resolve(component)?,
            options: FieldDescriptor::array("FlavorOptions").resolve(component)?,
            flavours: ctx.answers(QuestionKind::IceCreamFlavour),
            customer_names: ctx.answers(QuestionKind::IceCreamCustomer),
        })
    }

    fn stage_index(&self, fields: &Self::Fields) -> Result<i64, HarvestError> {
        Ok(fields.stage.get()?)
    }

    fn snapshot(
        &self,
        fields: &Self::Fields,
        stage: u32,
        _ctx: &HarvestContext,
    ) -> Result<Self::Snapshot, HarvestError> {
        let max_flavour = last_index(fields.flavours.len());
        let max_customer = last_index(fields.customer_names.len());
        let stages = STAGES as usize;

        let options = fields.options.get_with(
            &SeqCheck::new().len(stages).each(|offer: &Vec<i64>| {
                if offer.len() != OFFERED {
                    Some(format!("expected length {OFFERED}"))
                } else if offer.iter().any(|f| *f < 0 || *f > max_flavour) {
                    Some(format!("expected range 0–{max_flavour}"))
                } else {
                    None
                }
            }),
        )?;
        let solution = fields
            .solution
            .get_with(&SeqCheck::new().len(stages).each_in_range(0, max_flavour))?;
        let customers = fields
            .customers
            .get_with(&SeqCheck::new().len(stages).each_in_range(0, max_customer))?;

        let i = stage as usize;
        let offer = &options[i];
        let sold = usize::try_from(solution[i])
            .ok()
            .and_then(|pick| offer.get(pick))
            .copied()
            .ok_or_else(|| {
                HarvestError::Abandoned(format!(
                    "IceCreamModule.Solution: stage {stage} sold option {} of {OFFERED}",
                    solution[i]
                ))
            })?;

        Ok(ServedCustomer {
            offered: offer
                .iter()
                .map(|f| name_at(&fields.flavours, *f, "flavour"))
                .collect::<Result<_, _>>()?,
            sold: name_at(&fields.flavours, sold, "flavour")?,
            customer: name_at(&fields.customer_names, customers[i], "customer")?,
        })
    }

    fn finalize(
        &self,
        fields: Self::Fields,
        snapshots: Vec<Self::Snapshot>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError> {
        let served: Vec<String> = snapshots.iter().map(|s| s.customer.clone()).collect();
        let mut questions = Vec::new();

        for (snapshot, n) in snapshots.iter().zip(1_u32..) {
            questions.push(
                QuestionBuilder::new(QuestionKind::IceCreamFlavour)
                    .format_arg("was on offer, but not sold,")
                    .format_arg(ordinal(n))
                    .correct_answers(
                        snapshot
                            .offered
                            .iter()
                            .filter(|f| **f != snapshot.sold)
                            .cloned(),
                    ),
            );
            questions.push(
                QuestionBuilder::new(QuestionKind::IceCreamFlavour)
                    .format_arg("was not on offer")
                    .format_arg(ordinal(n))
                    .correct_answers(
                        fields
                            .flavours
                            .iter()
                            .filter(|f| !snapshot.offered.contains(*f))
                            .cloned(),
                    ),
            );
            if n != STAGES {
                questions.push(
                    QuestionBuilder::new(QuestionKind::IceCreamCustomer)
                        .format_arg(ordinal(n))
                        .correct(snapshot.customer.clone())
                        .preferred_wrong(served.clone()),
                );
            }
        }

        ctx.add_questions(questions)
    }
}
