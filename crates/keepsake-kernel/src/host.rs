//! Host integration points
//!
//! The host owns the puzzle components and their lifecycle events. The kernel sees
//! a [`Host`] for component lookup and the readiness gate, and a pair of watch
//! channels per module for the solve and strike events.

use keepsake_accessor::ComponentHandle;
use keepsake_question::ModuleId;
use tokio::sync::watch;

/// Host services available to every task
pub trait Host: Send + Sync {
    /// Global readiness gate, polled before a task's first reads
    fn is_activated(&self) -> bool;

    /// Component of `type_name` on `module`, if the module carries one
    fn find_component(&self, module: ModuleId, type_name: &str) -> Option<ComponentHandle>;
}

/// Host-side ends of a module's lifecycle events
#[derive(Debug)]
pub struct SignalSource {
    solved: watch::Sender<bool>,
    strikes: watch::Sender<u32>,
}

impl SignalSource {
    /// Fire the solve event; later calls have no further effect
    pub fn solve(&self) {
        self.solved.send_if_modified(|solved| !std::mem::replace(solved, true));
    }

    /// Record a strike
    pub fn strike(&self) {
        self.strikes.send_modify(|count| *count = count.saturating_add(1));
    }

    /// Whether the solve event has fired
    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self.solved.borrow()
    }
}

/// Kernel-side ends of a module's lifecycle events
#[derive(Debug, Clone)]
pub struct ModuleSignals {
    solved: watch::Receiver<bool>,
    strikes: watch::Receiver<u32>,
}

impl ModuleSignals {
    /// Whether the module has been solved
    #[must_use]
    pub fn is_solved(&self) -> bool {
        *self.solved.borrow()
    }

    /// Subscribe to strikes recorded from now on
    #[must_use]
    pub fn strike_watch(&self) -> StrikeWatch {
        let mut strikes = self.strikes.clone();
        strikes.borrow_and_update();
        StrikeWatch { strikes }
    }
}

/// Create the two ends of a module's lifecycle events
#[must_use]
pub fn signal_pair() -> (SignalSource, ModuleSignals) {
    let (solved_tx, solved_rx) = watch::channel(false);
    let (strikes_tx, strikes_rx) = watch::channel(0);
    (
        SignalSource {
            solved: solved_tx,
            strikes: strikes_tx,
        },
        ModuleSignals {
            solved: solved_rx,
            strikes: strikes_rx,
        },
    )
}

/// Edge-triggered strike subscription
#[derive(Debug)]
pub struct StrikeWatch {
    strikes: watch::Receiver<u32>,
}

impl StrikeWatch {
    /// Whether a strike happened since the last call, clearing the flag
    pub fn take(&mut self) -> bool {
        match self.strikes.has_changed() {
            Ok(true) => {
                self.strikes.borrow_and_update();
                true
            }
            _ => false,
        }
    }
}

/// A module discovered on the bomb
#[derive(Debug, Clone)]
pub struct ModuleRecord {
    /// Host-assigned identity
    pub id: ModuleId,
    /// Module type identifier used to look up the harvest task
    pub module_type: String,
    /// Name shown to the player
    pub display_name: String,
    /// Lifecycle events
    pub signals: ModuleSignals,
}
