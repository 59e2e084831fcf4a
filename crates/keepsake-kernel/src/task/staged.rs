//! Declarative staged harvests

use crate::context::HarvestContext;
use crate::error::HarvestError;
use crate::state_machine::HarvestPhase;
use keepsake_accessor::ComponentHandle;
use keepsake_question::QuestionBatch;
use std::rc::Rc;

/// Declarative description of a harvest that observes a fixed number of stages
///
/// The generic driver runs it as:
/// 1. resolve the component and [`bind`](Self::bind) its fields (start-of-game reads
///    may happen here)
/// 2. wait for the readiness gate if [`waits_for_activation`](Self::waits_for_activation)
/// 3. for each stage `i`, poll [`stage_index`](Self::stage_index) until it differs
///    from `i`, abandoning if it ever decreases, then take a [`snapshot`](Self::snapshot)
/// 4. wait for the solve, then [`finalize`](Self::finalize) with every snapshot
pub trait StagedHarvest: 'static {
    /// Resolved accessors plus anything read at start
    type Fields: 'static;
    /// State captured at the end of one stage
    type Snapshot: 'static;

    /// Module type identifier this definition handles
    fn module_type(&self) -> &'static str;

    /// Component type to resolve on the module
    fn component_type(&self) -> &'static str;

    /// Whether to wait for the readiness gate before observing
    fn waits_for_activation(&self) -> bool {
        false
    }

    /// Number of stages to observe; zero reads only after the solve
    fn stage_count(&self) -> u32 {
        0
    }

    /// Resolve accessors on the component
    ///
    /// # Errors
    /// Any resolution or read error
    fn bind(
        &self,
        component: &ComponentHandle,
        ctx: &HarvestContext,
    ) -> Result<Self::Fields, HarvestError>;

    /// Current stage index reported by the component
    ///
    /// # Errors
    /// Any read error
    fn stage_index(&self, _fields: &Self::Fields) -> Result<i64, HarvestError> {
        Err(HarvestError::Definition(format!(
            "{} observes stages but does not read a stage index",
            self.module_type()
        )))
    }

    /// Capture the state of `stage` once the component has moved past it
    ///
    /// # Errors
    /// Any read or validation error
    fn snapshot(
        &self,
        _fields: &Self::Fields,
        stage: u32,
        _ctx: &HarvestContext,
    ) -> Result<Self::Snapshot, HarvestError> {
        Err(HarvestError::Definition(format!(
            "{} has no snapshot for stage {stage}",
            self.module_type()
        )))
    }

    /// Read post-solve state, perform cosmetic interactions and queue questions
    ///
    /// # Errors
    /// Any read, interaction or construction error
    fn finalize(
        &self,
        fields: Self::Fields,
        snapshots: Vec<Self::Snapshot>,
        ctx: &mut HarvestContext,
    ) -> Result<(), HarvestError>;
}

/// Run a staged definition to completion
///
/// # Errors
/// The first error raised by the definition, a stage regression, or an illegal
/// phase change
pub async fn drive_staged<H: StagedHarvest>(
    definition: Rc<H>,
    mut ctx: HarvestContext,
) -> Result<QuestionBatch, HarvestError> {
    let component = ctx.component(definition.component_type())?;
    let fields = definition.bind(&component, &ctx)?;

    if definition.waits_for_activation() {
        ctx.enter(HarvestPhase::AwaitingActivation)?;
        ctx.wait_for_activation().await;
    }

    let stage_count = definition.stage_count();
    let mut snapshots = Vec::with_capacity(usize::try_from(stage_count).unwrap_or(0));
    let mut high_water = i64::MIN;

    for stage in 0..stage_count {
        ctx.enter(HarvestPhase::Observing { stage })?;
        let expected = i64::from(stage);

        ctx.poll_until(|| {
            let observed = definition.stage_index(&fields)?;
            // The stage being observed counts as reached even before it is read.
            let floor = high_water.max(expected);
            if observed < floor {
                return Err(HarvestError::StageRegression {
                    from: floor,
                    to: observed,
                });
            }
            high_water = observed;
            Ok(observed != expected)
        })
        .await?;

        snapshots.push(definition.snapshot(&fields, stage, &ctx)?);
    }

    ctx.enter(HarvestPhase::AwaitingSolve)?;
    ctx.wait_for_solve().await;

    ctx.enter(HarvestPhase::Finalizing)?;
    definition.finalize(fields, snapshots, &mut ctx)?;
    ctx.finish()
}
