//! Inner Connections

use super::{last_index, name_at};
use keepsake_kernel::prelude::*;

/// Harvest definition for Inner Connections
#[derive(Debug, Clone, Copy, Default)]
pub struct InnerConnections;

/// Values read when the module starts
#[derive(Debug)]
pub struct InnerConnectionsFields {
    morse_number: i64,
    led_colour: String,
}

impl StagedHarvest for InnerConnections {
    type Fields = InnerConnectionsFields;
    type Snapshot = ();

    fn module_type(&self) -> &'static str {
        "innerConnections"
    }

    fn component_type(&self) -> &'static str {
        "InnerConnectionsScript"
    }

    fn bind(
        &self,
        component: &ComponentHandle,
        ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError> {
        let colours = ctx.answers(QuestionKind::InnerConnectionsLed);
        let morse_number = FieldDescriptor::field("morseNumber")
            .resolve::<i64>(component)?
            .get()?;
        let colour = FieldDescriptor::field("rndLEDColour")
            .resolve::<i64>(component)?
            .get_in_range(0, last_index(colours.len()))?;

        Ok(InnerConnectionsFields {
            morse_number,
            led_colour: name_at(&colours, colour, "LED colour")?,
        })
    }

    fn finalize(
        &self,
        fields: Self::Fields,
        _snapshots: Vec<()>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError> {
        ctx.add_questions([
            QuestionBuilder::new(QuestionKind::InnerConnectionsLed).correct(fields.led_colour),
            QuestionBuilder::new(QuestionKind::InnerConnectionsMorse)
                .correct(fields.morse_number.to_string()),
        ])
    }
}
