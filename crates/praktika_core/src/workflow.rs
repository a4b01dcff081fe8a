//! crates/praktika_core/src/workflow.rs
//!
//! The multi-step submission workflow: a finite-state machine over a set of
//! declarative step definitions, producing a single API write.
//!
//! Used by registration, internship applications, and internship posting;
//! the steps themselves live in [`crate::forms`]. The machine never touches
//! the network — callers feed it a sender and it reports the outcome.

use std::collections::BTreeMap;
use std::future::Future;

use tracing::debug;

use crate::domain::{FieldValue, SubmissionPayload};
use crate::ports::PortResult;

//=========================================================================================
// Step and Field Definitions
//=========================================================================================

/// How a field's entered text is interpreted and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Non-empty values must contain `@`.
    Email,
    /// Non-empty values must be at least `min_len` characters.
    Password { min_len: usize },
    /// Must equal the named field; never included in the payload.
    Confirmation { of: &'static str },
    /// Non-empty values must parse as an integer; submitted as a number.
    Integer,
    /// Split into trimmed, non-empty entries on submission.
    List,
}

/// When a field must be non-empty.
///
/// Role-conditional requirements are expressed against the value of another
/// field, so a whole form stays a single data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Optional,
    Required,
    RequiredWhen {
        field: &'static str,
        is_any_of: &'static [&'static str],
    },
    RequiredUnless {
        field: &'static str,
        is: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub requirement: Requirement,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy)]
pub struct StepSpec {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

//=========================================================================================
// Workflow States and Errors
//=========================================================================================

/// The machine's state. Steps are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    /// Collecting input; `error` is the inline message for the current step.
    Editing { step: usize, error: Option<String> },
    /// Re-checking every step before submission.
    Validating,
    /// The API write is in flight; submit controls must be disabled.
    Submitting,
    /// Terminal. Field values have been cleared.
    Succeeded,
    /// The API write failed; [`SubmissionWorkflow::resume`] returns to
    /// editing with every entered value intact.
    Failed { message: String },
}

/// A step failed client-side validation; nothing was sent.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmitError {
    /// Not on the final editing step, or a submission is already in flight.
    #[error("submission cannot start from the current state")]
    NotReady,
    /// Client-side validation failed; the machine is back in editing.
    #[error("{0}")]
    Invalid(String),
    /// The API rejected the write; the machine is in `Failed`.
    #[error("{0}")]
    Rejected(String),
}

//=========================================================================================
// The Workflow Machine
//=========================================================================================

/// An in-progress submission (registration, application, or posting).
///
/// Owned by the hosting form instance and discarded after a terminal state.
pub struct SubmissionWorkflow {
    steps: &'static [StepSpec],
    values: BTreeMap<String, String>,
    context: Vec<(String, FieldValue)>,
    state: WorkflowState,
}

impl SubmissionWorkflow {
    pub fn new(steps: &'static [StepSpec]) -> Self {
        debug_assert!(!steps.is_empty());
        Self {
            steps,
            values: BTreeMap::new(),
            context: Vec::new(),
            state: WorkflowState::Editing {
                step: 1,
                error: None,
            },
        }
    }

    /// Appends a caller-supplied field to the final payload, e.g. the
    /// ownership ids taken from the current identity.
    pub fn with_context(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.context.push((name.into(), value));
        self
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// The 1-based step currently being edited, if any.
    pub fn current_step(&self) -> Option<usize> {
        match self.state {
            WorkflowState::Editing { step, .. } => Some(step),
            _ => None,
        }
    }

    /// The inline validation/failure message for the current step.
    pub fn inline_error(&self) -> Option<&str> {
        match &self.state {
            WorkflowState::Editing { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, WorkflowState::Submitting)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Records a field value. Entering data clears the inline error.
    ///
    /// Ignored outside of editing.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        let WorkflowState::Editing { step, .. } = self.state else {
            debug!(name, "ignoring field edit outside editing state");
            return;
        };
        self.values.insert(name.to_string(), value.into());
        self.state = WorkflowState::Editing { step, error: None };
    }

    /// Advances to the next step if the current one validates.
    ///
    /// On failure the state stays at the same step with the inline error
    /// set. A no-op on the final step and outside of editing.
    pub fn next(&mut self) -> Result<(), ValidationError> {
        let WorkflowState::Editing { step, .. } = self.state else {
            return Ok(());
        };
        if step >= self.steps.len() {
            return Ok(());
        }
        match self.validate_step(step) {
            Ok(()) => {
                self.state = WorkflowState::Editing {
                    step: step + 1,
                    error: None,
                };
                Ok(())
            }
            Err(message) => {
                self.state = WorkflowState::Editing {
                    step,
                    error: Some(message.clone()),
                };
                Err(ValidationError(message))
            }
        }
    }

    /// Steps back unconditionally; the step being left is not re-validated.
    pub fn prev(&mut self) {
        if let WorkflowState::Editing { step, .. } = self.state {
            if step > 1 {
                self.state = WorkflowState::Editing {
                    step: step - 1,
                    error: None,
                };
            }
        }
    }

    /// Validates every step and, if all pass, enters `Submitting` and yields
    /// the payload exactly once.
    ///
    /// Refuses unless the machine is editing the final step — in particular
    /// while a submission is already in flight, so a double-triggered submit
    /// produces a single outbound call.
    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, SubmitError> {
        let WorkflowState::Editing { step, .. } = self.state else {
            return Err(SubmitError::NotReady);
        };
        if step != self.steps.len() {
            return Err(SubmitError::NotReady);
        }

        self.state = WorkflowState::Validating;
        for index in 1..=self.steps.len() {
            if let Err(message) = self.validate_step(index) {
                self.state = WorkflowState::Editing {
                    step: self.steps.len(),
                    error: Some(message.clone()),
                };
                return Err(SubmitError::Invalid(message));
            }
        }

        let payload = self.build_payload();
        self.state = WorkflowState::Submitting;
        Ok(payload)
    }

    /// Applies the API outcome of the in-flight submission.
    ///
    /// Success is terminal and clears the draft; failure keeps every entered
    /// value. A completion arriving in any other state is a stale response
    /// and is discarded.
    pub fn complete(&mut self, outcome: Result<(), String>) {
        if !matches!(self.state, WorkflowState::Submitting) {
            debug!("discarding stale submission outcome");
            return;
        }
        match outcome {
            Ok(()) => {
                self.values.clear();
                self.state = WorkflowState::Succeeded;
            }
            Err(message) => {
                self.state = WorkflowState::Failed { message };
            }
        }
    }

    /// Returns from `Failed` to editing the final step, all values intact,
    /// with the failure message shown inline.
    pub fn resume(&mut self) {
        if let WorkflowState::Failed { message } = &self.state {
            let message = message.clone();
            self.state = WorkflowState::Editing {
                step: self.steps.len(),
                error: Some(message),
            };
        }
    }

    /// Validates, sends through `send`, and applies the outcome in one call.
    pub async fn submit_with<F, Fut>(&mut self, send: F) -> Result<(), SubmitError>
    where
        F: FnOnce(SubmissionPayload) -> Fut,
        Fut: Future<Output = PortResult<()>>,
    {
        let payload = self.begin_submit()?;
        match send(payload).await {
            Ok(()) => {
                self.complete(Ok(()));
                Ok(())
            }
            Err(err) => {
                let message = err.user_message();
                self.complete(Err(message.clone()));
                Err(SubmitError::Rejected(message))
            }
        }
    }

    //-------------------------------------------------------------------------------------
    // Validation and payload building
    //-------------------------------------------------------------------------------------

    fn is_required(&self, field: &FieldSpec) -> bool {
        match field.requirement {
            Requirement::Optional => false,
            Requirement::Required => true,
            Requirement::RequiredWhen { field: other, is_any_of } => {
                let value = self.values.get(other).map(String::as_str).unwrap_or("");
                is_any_of.contains(&value)
            }
            Requirement::RequiredUnless { field: other, is } => {
                self.values.get(other).map(String::as_str).unwrap_or("") != is
            }
        }
    }

    fn validate_step(&self, index: usize) -> Result<(), String> {
        let step = &self.steps[index - 1];
        for field in step.fields {
            let value = self.values.get(field.name).map(String::as_str).unwrap_or("");
            if value.is_empty() {
                if self.is_required(field) {
                    return Err(format!("{} is required", field.label));
                }
                continue;
            }
            match field.kind {
                FieldKind::Email => {
                    if !value.contains('@') {
                        return Err("Please enter a valid email address".to_string());
                    }
                }
                FieldKind::Password { min_len } => {
                    if value.chars().count() < min_len {
                        return Err(format!(
                            "Password must be at least {min_len} characters long"
                        ));
                    }
                }
                FieldKind::Confirmation { of } => {
                    if Some(value) != self.values.get(of).map(String::as_str) {
                        return Err("Passwords do not match".to_string());
                    }
                }
                FieldKind::Integer => {
                    if value.parse::<i64>().is_err() {
                        return Err(format!("{} must be a number", field.label));
                    }
                }
                FieldKind::Text | FieldKind::List => {}
            }
        }
        Ok(())
    }

    fn build_payload(&self) -> SubmissionPayload {
        let mut payload = SubmissionPayload::default();
        for step in self.steps {
            for field in step.fields {
                let Some(raw) = self.values.get(field.name) else {
                    continue;
                };
                if raw.is_empty() {
                    continue;
                }
                let value = match field.kind {
                    // Confirmation fields never leave the client.
                    FieldKind::Confirmation { .. } => continue,
                    FieldKind::Integer => match raw.parse::<i64>() {
                        Ok(number) => FieldValue::Number(number),
                        Err(_) => continue,
                    },
                    FieldKind::List => FieldValue::List(split_list(raw)),
                    FieldKind::Text | FieldKind::Email | FieldKind::Password { .. } => {
                        FieldValue::Text(raw.clone())
                    }
                };
                payload.push(field.name, value);
            }
        }
        for (name, value) in &self.context {
            payload.push(name.clone(), value.clone());
        }
        payload
    }
}

/// Splits delimited text into trimmed, non-empty entries, preserving order.
///
/// Newlines take precedence; a single-line value falls back to commas.
fn split_list(raw: &str) -> Vec<String> {
    let separator = if raw.contains('\n') { '\n' } else { ',' };
    raw.split(separator)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
