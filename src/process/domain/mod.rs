//! Domain model for tracked process orchestration.

mod error;
mod ids;
mod instance;
mod state;
mod status;
mod track;

pub use error::{ParseProcessStateError, ProcessDomainError};
pub use ids::{ProcessId, TrackId};
pub use instance::{ProcessDefinition, ProcessInstance, ProcessTask};
pub use state::ProcessState;
pub use status::{BlueGreenStatus, BlueGreenStatusView, TaskStatusView, task_status_to_string};
pub use track::{BgTrack, Namespace, OperationName, PersistedTrackData, TrackKey};
