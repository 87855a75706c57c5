// Event types sent from job worker tasks back to the controller

use crate::models::JobHandle;

/// A state update produced by a spawned worker.
///
/// `epoch` is the controller epoch the worker was spawned under. The
/// controller drops any event whose epoch is no longer current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEvent {
    pub epoch: u64,
    pub kind: JobEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEventKind {
    /// The backend accepted the request
    JobCreated(JobHandle),
    /// A step checkpoint was reached, remotely or in the demo simulation
    Progress(u8),
    /// The backend finished and the result was fetched
    Completed(String),
    /// The backend reported a failed generation
    Failed,
    /// The backend could not be used; switching to the local simulation
    FellBackToDemo,
    /// The local simulation finished
    DemoCompleted,
}
