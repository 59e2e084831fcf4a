//! Identity Parade
//!
//! Once solved, every button is neutralised and the four labels spell out a
//! completion message so the module can no longer be operated.

use keepsake_kernel::prelude::*;

const BUTTONS: [&str; 9] = [
    "hairLeft",
    "hairRight",
    "buildLeft",
    "buildRight",
    "attireLeft",
    "attireRight",
    "suspectLeft",
    "suspectRight",
    "convictBut",
];

const LABELS: [(&str, &str); 4] = [
    ("hairText", "Identity"),
    ("buildText", "Parade"),
    ("attireText", "has been"),
    ("suspectText", "solved"),
];

const ENTRIES: usize = 3;

/// Harvest definition for Identity Parade
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityParade;

/// Bound fields of an Identity Parade component
#[derive(Debug)]
pub struct IdentityParadeFields {
    buttons: Vec<Accessor<ObjectRef>>,
    labels: Vec<(Accessor<ObjectRef>, &'static str)>,
    hairs: Accessor<Vec<String>>,
    builds: Accessor<Vec<String>>,
    attires: Accessor<Vec<String>>,
}

impl IdentityParade {
    fn listed(
        kind: QuestionKind,
        entries: &[String],
        ctx: &HarvestContext,
    ) -> [QuestionBuilder; 2] {
        let unlisted = ctx
            .answers(kind)
            .into_iter()
            .filter(|value| !entries.contains(value));
        [
            QuestionBuilder::new(kind)
                .format_arg("was")
                .correct_answers(entries.iter().cloned()),
            QuestionBuilder::new(kind)
                .format_arg("was not")
                .correct_answers(unlisted),
        ]
    }
}

impl StagedHarvest for IdentityParade {
    type Fields = IdentityParadeFields;
    type Snapshot = ();

    fn module_type(&self) -> &'static str {
        "identityParade"
    }

    fn component_type(&self) -> &'static str {
        "identityParadeScript"
    }

    fn bind(
        &self,
        component: &ComponentHandle,
        _ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError> {
        let buttons: Vec<Accessor<ObjectRef>> = BUTTONS
            .iter()
            .map(|name| FieldDescriptor::field(*name).public().resolve(component))
            .collect::<Result<_, _>>()?;
        let labels: Vec<(Accessor<ObjectRef>, &'static str)> = LABELS
            .iter()
            .map(|(name, text)| {
                FieldDescriptor::field(*name)
                    .public()
                    .resolve(component)
                    .map(|label| (label, *text))
            })
            .collect::<Result<_, _>>()?;

        Ok(IdentityParadeFields {
            buttons,
            labels,
            hairs: FieldDescriptor::list("hairEntries").resolve(component)?,
            builds: FieldDescriptor::list("buildEntries").resolve(component)?,
            attires: FieldDescriptor::list("attireEntries").resolve(component)?,
        })
    }

    fn finalize(
        &self,
        fields: Self::Fields,
        _snapshots: Vec<()>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError> {
        for button in &fields.buttons {
            button.interact(&Interaction::Neutralize)?;
        }
        for (label, text) in &fields.labels {
            label.interact(&Interaction::SetText((*text).to_string()))?;
        }

        let hairs = fields.hairs.get_len(ENTRIES)?;
        let builds = fields.builds.get_len(ENTRIES)?;
        let attires = fields.attires.get_len(ENTRIES)?;

        let mut questions = Vec::with_capacity(6);
        questions.extend(Self::listed(QuestionKind::IdentityParadeHairColors, &hairs, ctx));
        questions.extend(Self::listed(QuestionKind::IdentityParadeBuilds, &builds, ctx));
        questions.extend(Self::listed(QuestionKind::IdentityParadeAttires, &attires, ctx));
        ctx.add_questions(questions)
    }
}
