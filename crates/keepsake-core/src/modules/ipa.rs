//! IPA
//!
//! Answers are audio clips. Only the first `cap` clips are in play on a given bomb,
//! which bounds the answer pool.

use super::{last_index, name_at};
use keepsake_kernel::prelude::*;

const CLIPS: usize = 71;
const CAPS: [i64; 2] = [44, 71];

/// Harvest definition for IPA
#[derive(Debug, Clone, Copy, Default)]
pub struct Ipa;

/// Bound fields of an IPA component
#[derive(Debug)]
pub struct IpaFields {
    sounds: Accessor<Vec<ObjectRef>>,
    cap: Accessor<i64>,
    present: Accessor<i64>,
}

impl StagedHarvest for Ipa {
    type Fields = IpaFields;
    type Snapshot = ();

    fn module_type(&self) -> &'static str {
        "ipa"
    }

    fn component_type(&self) -> &'static str {
        "ipa"
    }

    fn bind(
        &self,
        component: &ComponentHandle,
        _ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError> {
        Ok(IpaFields {
            sounds: FieldDescriptor::array("sounds").public().resolve(component)?,
            cap: FieldDescriptor::field("cap").resolve(component)?,
            present: FieldDescriptor::field("soundPresent").resolve(component)?,
        })
    }

    fn finalize(
        &self,
        fields: Self::Fields,
        _snapshots: Vec<()>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError> {
        let sounds: Vec<String> = fields
            .sounds
            .get_len(CLIPS)?
            .into_iter()
            .map(|clip| clip.name)
            .collect();
        let cap = fields.cap.get_checked(|cap| {
            (!CAPS.contains(cap)).then(|| format!("Unknown cap value {cap} (expected 44 or 71)"))
        })?;
        let present = fields.present.get_in_range(0, last_index(sounds.len()))?;

        let in_play = usize::try_from(cap).unwrap_or(CLIPS);
        ctx.add_question(
            QuestionBuilder::new(QuestionKind::IpaSound)
                .correct(name_at(&sounds, present, "sound")?)
                .all_answers(sounds.into_iter().take(in_play)),
        )
    }
}
