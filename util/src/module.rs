//! Cyclic module interface
//!
//! A module is constructed with its defaults, initialised once against the session it
//! archives into, then processed once per tick by the executable's main loop.
//!
//! Some modules depend on data which arrives after initialisation, trajectory control for
//! example can only run once its sample feed has loaded. Such modules override
//! [`State::is_ready`]. Processing a module which isn't ready still succeeds: the missing data
//! is flagged in the status report and the outputs hold their previous values.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::session::Session;

// ---------------------------------------------------------------------------
// TYPES
// ---------------------------------------------------------------------------

/// Result of one cycle of a module's processing.
pub type ProcResult<S> = Result<
    (<S as State>::OutputData, <S as State>::StatusReport),
    <S as State>::ProcError
>;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A cyclically processed module.
pub trait State {
    /// Passed to `init`, usually the name of the parameter file.
    type InitData;
    type InitError;

    type InputData;
    type OutputData;

    /// Per-cycle flags describing anomalies which aren't errors.
    type StatusReport;
    type ProcError;

    /// Load parameters and create archives in the session.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>;

    /// Process one cycle.
    fn proc(&mut self, input_data: &Self::InputData) -> ProcResult<Self>;

    /// Returns true once everything the module needs in order to make progress is available.
    fn is_ready(&self) -> bool {
        true
    }
}
