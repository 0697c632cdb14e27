//! Three-step intake wizard state.
//!
//! DESIGN
//! ======
//! State is updated immutably: [`WizardState::apply`] takes an edit and
//! returns a new state, leaving the old one untouched. The owner swaps in
//! the result. A rejected edit returns an error and the owner keeps the
//! state it had.
//!
//! The measurement unit is form-wide. Changing it rescales every space's
//! ceiling height and sketch measurements in one edit.

use canvas::engine::Completion;
use canvas::history::CanvasSnapshot;
use canvas::units::Unit;
use time::Date;
use tracing::debug;

use crate::space::{Attachment, Space, SpaceId, SpaceKind};
use crate::verify::normalize_email;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Contact,
    Spaces,
    Schedule,
}

impl Step {
    #[must_use]
    pub fn next(self) -> Option<Step> {
        match self {
            Self::Contact => Some(Self::Spaces),
            Self::Spaces => Some(Self::Schedule),
            Self::Schedule => None,
        }
    }

    #[must_use]
    pub fn prev(self) -> Option<Step> {
        match self {
            Self::Contact => None,
            Self::Spaces => Some(Self::Contact),
            Self::Schedule => Some(Self::Spaces),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Requested consultation slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    pub date: Date,
    /// Time-of-day slot as offered by the form, e.g. `"10:00"`.
    pub slot: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid email")]
    InvalidEmail,
    #[error("email not verified")]
    EmailNotVerified,
    #[error("at least one space is required")]
    NoSpaces,
    #[error("space {0} has no name")]
    UnnamedSpace(SpaceId),
    #[error("no meeting scheduled")]
    NoMeeting,
    #[error("unknown space {0}")]
    UnknownSpace(SpaceId),
    #[error("already on the last step")]
    NoNextStep,
    #[error("already on the first step")]
    NoPreviousStep,
}

/// One user edit to the form.
#[derive(Debug, Clone)]
pub enum FormEdit {
    SetContact(Contact),
    /// The contact email passed OTP verification.
    MarkVerified,
    AddSpace { name: String, kind: SpaceKind },
    RenameSpace { id: SpaceId, name: String },
    RetypeSpace { id: SpaceId, kind: SpaceKind },
    RemoveSpace(SpaceId),
    /// Make a space the one shown on the canvas.
    SelectSpace(SpaceId),
    SetCeilingHeight { id: SpaceId, value: String },
    /// Store the canvas output for a space.
    SetSketch { id: SpaceId, completion: Completion, snapshot: CanvasSnapshot },
    AddAttachment { id: SpaceId, attachment: Attachment },
    RemoveAttachment { id: SpaceId, attachment_id: uuid::Uuid },
    SetUnit(Unit),
    SetMeeting(Meeting),
    SetNotes(String),
    /// Validate the current step and move to the next one.
    Advance,
    Back,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WizardState {
    pub step: Step,
    pub contact: Contact,
    pub email_verified: bool,
    pub unit: Unit,
    pub spaces: Vec<Space>,
    /// Space currently shown on the canvas.
    pub active_space: Option<SpaceId>,
    pub meeting: Option<Meeting>,
    pub notes: String,
}

impl WizardState {
    #[must_use]
    pub fn new(unit: Unit) -> Self {
        Self { unit, ..Self::default() }
    }

    /// Apply `edit` and return the resulting state.
    ///
    /// # Errors
    ///
    /// Returns a [`WizardError`] when the edit names an unknown space or,
    /// for [`FormEdit::Advance`], when the current step doesn't validate.
    pub fn apply(&self, edit: FormEdit) -> Result<WizardState, WizardError> {
        let mut next = self.clone();
        match edit {
            FormEdit::SetContact(contact) => {
                if normalize_email(&contact.email) != normalize_email(&next.contact.email) {
                    next.email_verified = false;
                }
                next.contact = contact;
            }
            FormEdit::MarkVerified => next.email_verified = true,
            FormEdit::AddSpace { name, kind } => {
                let space = Space::new(name, kind, next.unit);
                next.active_space = Some(space.id);
                next.spaces.push(space);
            }
            FormEdit::RenameSpace { id, name } => next.space_mut(id)?.name = name,
            FormEdit::RetypeSpace { id, kind } => next.space_mut(id)?.kind = kind,
            FormEdit::RemoveSpace(id) => {
                let idx = next.space_index(id)?;
                next.spaces.remove(idx);
                if next.active_space == Some(id) {
                    next.active_space = next.spaces.first().map(|s| s.id);
                }
            }
            FormEdit::SelectSpace(id) => {
                next.space_index(id)?;
                next.active_space = Some(id);
            }
            FormEdit::SetCeilingHeight { id, value } => next.space_mut(id)?.ceiling_height = value,
            FormEdit::SetSketch { id, completion, snapshot } => {
                let space = next.space_mut(id)?;
                space.sketch = Some(completion);
                space.sketch_snapshot = Some(snapshot);
            }
            FormEdit::AddAttachment { id, attachment } => next.space_mut(id)?.attachments.push(attachment),
            FormEdit::RemoveAttachment { id, attachment_id } => {
                next.space_mut(id)?
                    .attachments
                    .retain(|a| a.id != attachment_id);
            }
            FormEdit::SetUnit(unit) => {
                let from = next.unit;
                for space in &mut next.spaces {
                    space.convert_units(from, unit);
                }
                next.unit = unit;
            }
            FormEdit::SetMeeting(meeting) => next.meeting = Some(meeting),
            FormEdit::SetNotes(notes) => next.notes = notes,
            FormEdit::Advance => {
                let to = next.step.next().ok_or(WizardError::NoNextStep)?;
                next.validate_step(next.step)?;
                debug!(from = ?next.step, ?to, "wizard advanced");
                next.step = to;
            }
            FormEdit::Back => next.step = next.step.prev().ok_or(WizardError::NoPreviousStep)?,
        }
        Ok(next)
    }

    /// Check the fields a step requires before the user may leave it.
    ///
    /// # Errors
    ///
    /// Returns the first failing requirement.
    pub fn validate_step(&self, step: Step) -> Result<(), WizardError> {
        match step {
            Step::Contact => {
                if self.contact.name.trim().is_empty() {
                    return Err(WizardError::MissingField("name"));
                }
                if self.contact.phone.trim().is_empty() {
                    return Err(WizardError::MissingField("phone"));
                }
                normalize_email(&self.contact.email).ok_or(WizardError::InvalidEmail)?;
                if !self.email_verified {
                    return Err(WizardError::EmailNotVerified);
                }
            }
            Step::Spaces => {
                if self.spaces.is_empty() {
                    return Err(WizardError::NoSpaces);
                }
                if let Some(space) = self.spaces.iter().find(|s| s.name.trim().is_empty()) {
                    return Err(WizardError::UnnamedSpace(space.id));
                }
            }
            Step::Schedule => {
                if self.meeting.is_none() {
                    return Err(WizardError::NoMeeting);
                }
            }
        }
        Ok(())
    }

    /// Validate every step, as required before submission.
    ///
    /// # Errors
    ///
    /// Returns the first failing requirement in step order.
    pub fn validate_all(&self) -> Result<(), WizardError> {
        self.validate_step(Step::Contact)?;
        self.validate_step(Step::Spaces)?;
        self.validate_step(Step::Schedule)
    }

    #[must_use]
    pub fn space(&self, id: SpaceId) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id == id)
    }

    /// Snapshot to restore when the canvas switches to the active space.
    #[must_use]
    pub fn active_snapshot(&self) -> Option<&CanvasSnapshot> {
        self.active_space
            .and_then(|id| self.space(id))
            .and_then(|s| s.sketch_snapshot.as_ref())
    }

    fn space_index(&self, id: SpaceId) -> Result<usize, WizardError> {
        self.spaces
            .iter()
            .position(|s| s.id == id)
            .ok_or(WizardError::UnknownSpace(id))
    }

    fn space_mut(&mut self, id: SpaceId) -> Result<&mut Space, WizardError> {
        let idx = self.space_index(id)?;
        Ok(&mut self.spaces[idx])
    }
}

#[cfg(test)]
#[path = "wizard_test.rs"]
mod tests;
