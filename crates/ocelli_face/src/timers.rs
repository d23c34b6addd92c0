//! Timer payloads scheduled on the engine's virtual clock

/// What a fired timer asks the engine to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceTimer {
    /// Periodic dispatch of the next queued command
    Dispatch,
    Blink,
    LookAround,
    /// End of a timed pause inside a command job
    JobWait,
}
