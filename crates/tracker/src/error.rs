use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("mint tracker task has stopped")]
    TaskStopped,
}
