//! Continuous observation for components that overwrite their state between stages

use crate::context::HarvestContext;
use crate::error::HarvestError;
use crate::state_machine::HarvestPhase;
use crate::wait::next_tick;
use keepsake_accessor::ComponentHandle;
use keepsake_question::QuestionBatch;
use std::rc::Rc;
use tracing::debug;

/// Harvest that samples the component on every pass until it is solved
///
/// The component reports a 1-based phase. A sample is committed whenever the phase
/// changes and again whenever a strike happened since the previous pass, so the
/// last committed sample of each phase is the one the solver actually saw.
pub trait ContinuousHarvest: 'static {
    /// Resolved accessors
    type Fields: 'static;
    /// Value committed per phase
    type Sample: Clone + 'static;

    /// Module type identifier this definition handles
    fn module_type(&self) -> &'static str;

    /// Component type to resolve on the module
    fn component_type(&self) -> &'static str;

    /// Number of distinguishable phases
    fn phase_count(&self) -> u32;

    /// Resolve accessors on the component
    ///
    /// # Errors
    /// Any resolution error
    fn bind(
        &self,
        component: &ComponentHandle,
        ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError>;

    /// Current phase, validated to lie in `1..=phase_count()`
    ///
    /// # Errors
    /// Any read or bounds error
    fn phase(&self, fields: &Self::Fields) -> Result<u32, HarvestError>;

    /// Read the value to commit for the current phase
    ///
    /// # Errors
    /// Any read error
    fn sample(&self, fields: &Self::Fields) -> Result<Self::Sample, HarvestError>;

    /// Queue questions from the committed samples, indexed by phase minus one
    ///
    /// # Errors
    /// Any construction error, or `MissingObservation` for a phase never seen
    fn finalize(
        &self,
        fields: Self::Fields,
        samples: Vec<Option<Self::Sample>>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError>;
}

/// Run a continuous definition to completion
///
/// # Errors
/// The first error raised by the definition, or a phase outside
/// `1..=phase_count()`
pub async fn drive_continuous<H: ContinuousHarvest>(
    definition: Rc<H>,
    mut ctx: HarvestContext,
) -> Result<QuestionBatch, HarvestError> {
    let component = ctx.component(definition.component_type())?;
    let fields = definition.bind(&component, &ctx)?;
    let mut strikes = ctx.strike_watch();

    let phase_count = definition.phase_count();
    let mut samples: Vec<Option<H::Sample>> =
        vec![None; usize::try_from(phase_count).unwrap_or(0)];
    let mut current = 0;
    let mut reported = 0;

    while !ctx.is_solved() {
        next_tick().await;

        let next = definition.phase(&fields)?;
        let struck = strikes.take();
        if next == current && !struck {
            continue;
        }

        let slot = usize::try_from(next)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| samples.get_mut(index))
            .ok_or_else(|| {
                HarvestError::Definition(format!(
                    "{} reported phase {next} outside 1..={phase_count}",
                    definition.module_type()
                ))
            })?;
        *slot = Some(definition.sample(&fields)?);
        debug!(module = %ctx.module(), phase = next, struck, "sample committed");

        if next > reported {
            ctx.enter(HarvestPhase::Observing { stage: next })?;
            reported = next;
        }
        current = next;
    }

    ctx.enter(HarvestPhase::Finalizing)?;
    definition.finalize(fields, samples, &mut ctx)?;
    ctx.finish()
}
