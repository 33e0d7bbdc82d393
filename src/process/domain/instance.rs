//! Process definitions and the instances the orchestrator runs for them.

use super::{ProcessDomainError, ProcessId, ProcessState};
use serde::{Deserialize, Serialize};

/// What to run: an operation name, its JSON parameters and ordered tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    name: String,
    parameters: serde_json::Value,
    tasks: Vec<String>,
}

impl ProcessDefinition {
    /// Creates a definition with no parameters and no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessDomainError::EmptyDefinitionName`] when the name is
    /// blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ProcessDomainError> {
        let normalized = name.into().trim().to_owned();
        if normalized.is_empty() {
            return Err(ProcessDomainError::EmptyDefinitionName);
        }
        Ok(Self {
            name: normalized,
            parameters: serde_json::Value::Null,
            tasks: Vec::new(),
        })
    }

    /// Attaches JSON parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = parameters;
        self
    }

    /// Appends a task to the ordered task list.
    #[must_use]
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.tasks.push(task.into());
        self
    }

    /// Returns the definition name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the JSON parameters.
    #[must_use]
    pub const fn parameters(&self) -> &serde_json::Value {
        &self.parameters
    }

    /// Returns the ordered task names.
    #[must_use]
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }
}

/// One step of a process instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTask {
    name: String,
    state: ProcessState,
}

impl ProcessTask {
    /// Creates a task in the given state.
    #[must_use]
    pub fn new(name: impl Into<String>, state: ProcessState) -> Self {
        Self {
            name: name.into(),
            state,
        }
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task state.
    #[must_use]
    pub const fn state(&self) -> ProcessState {
        self.state
    }
}

/// A running (or finished) execution of a [`ProcessDefinition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInstance {
    id: ProcessId,
    definition: ProcessDefinition,
    state: ProcessState,
    tasks: Vec<ProcessTask>,
}

impl ProcessInstance {
    /// Creates a not-yet-started instance with one pending task per
    /// definition task.
    #[must_use]
    pub fn new(id: ProcessId, definition: ProcessDefinition) -> Self {
        let tasks = definition
            .tasks()
            .iter()
            .map(|name| ProcessTask::new(name.clone(), ProcessState::NotStarted))
            .collect();
        Self {
            id,
            definition,
            state: ProcessState::NotStarted,
            tasks,
        }
    }

    /// Returns the instance identifier.
    #[must_use]
    pub const fn id(&self) -> &ProcessId {
        &self.id
    }

    /// Returns the definition this instance runs.
    #[must_use]
    pub const fn definition(&self) -> &ProcessDefinition {
        &self.definition
    }

    /// Returns the instance state.
    #[must_use]
    pub const fn state(&self) -> ProcessState {
        self.state
    }

    /// Returns the ordered tasks.
    #[must_use]
    pub fn tasks(&self) -> &[ProcessTask] {
        &self.tasks
    }

    /// Moves the instance to `target` and updates task states to match.
    ///
    /// Entering `InProgress` resets failed or terminated tasks and activates
    /// the first pending one. `Completed` completes every task, while
    /// `Failed` and `Terminated` are applied to the active task only.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessDomainError::InvalidTransition`] when the lifecycle
    /// does not allow the move.
    pub fn transition_to(&mut self, target: ProcessState) -> Result<(), ProcessDomainError> {
        if !self.state.can_transition_to(target) {
            return Err(ProcessDomainError::InvalidTransition {
                from: self.state,
                to: target,
            });
        }

        match target {
            ProcessState::InProgress => {
                for task in &mut self.tasks {
                    if matches!(task.state, ProcessState::Failed | ProcessState::Terminated) {
                        task.state = ProcessState::NotStarted;
                    }
                }
                self.activate_next_task();
            }
            ProcessState::Completed => {
                for task in &mut self.tasks {
                    task.state = ProcessState::Completed;
                }
            }
            ProcessState::Failed | ProcessState::Terminated => {
                for task in &mut self.tasks {
                    if task.state == ProcessState::InProgress {
                        task.state = target;
                    }
                }
            }
            ProcessState::NotStarted => {}
        }

        self.state = target;
        Ok(())
    }

    /// Completes the active task and activates the next one; completes the
    /// instance when no task is left.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessDomainError::InvalidTransition`] when the instance is
    /// not in progress.
    pub fn advance(&mut self) -> Result<(), ProcessDomainError> {
        if self.state != ProcessState::InProgress {
            return Err(ProcessDomainError::InvalidTransition {
                from: self.state,
                to: ProcessState::Completed,
            });
        }

        if let Some(active) = self
            .tasks
            .iter_mut()
            .find(|task| task.state == ProcessState::InProgress)
        {
            active.state = ProcessState::Completed;
        }

        if !self.activate_next_task() {
            self.transition_to(ProcessState::Completed)?;
        }
        Ok(())
    }

    fn activate_next_task(&mut self) -> bool {
        if self
            .tasks
            .iter()
            .any(|task| task.state == ProcessState::InProgress)
        {
            return true;
        }
        let Some(next) = self
            .tasks
            .iter_mut()
            .find(|task| task.state == ProcessState::NotStarted)
        else {
            return false;
        };
        next.state = ProcessState::InProgress;
        true
    }
}
