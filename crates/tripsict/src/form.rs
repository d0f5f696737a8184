//! Form state machine shared by the trip and flight views.

use crate::record::EntityId;

/// Whether the entry form is shown, and for which purpose.
///
/// Transitions:
///
/// | from          | toggle     | begin edit  | cancel / submit |
/// |---------------|------------|-------------|-----------------|
/// | `Closed`      | `Creating` | `Editing`   | `Closed`        |
/// | `Creating`    | `Closed`   | `Editing`   | `Closed`        |
/// | `Editing(id)` | `Closed`   | `Editing`   | `Closed`        |
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    /// The form is hidden.
    #[default]
    Closed,
    /// The form is open for a new record.
    Creating,
    /// The form is open for the record with this id.
    Editing(EntityId),
}

impl FormState {
    /// Flip the form open or closed. Closing while editing drops the edit target.
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Closed => Self::Creating,
            Self::Creating | Self::Editing(_) => Self::Closed,
        };
    }

    /// Open the form for an existing record.
    pub fn begin_edit(&mut self, id: EntityId) {
        *self = Self::Editing(id);
    }

    /// Close the form, dropping any edit target.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Whether the form is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// The current edit target, if any.
    #[must_use]
    pub fn edit_target(&self) -> Option<&EntityId> {
        match self {
            Self::Editing(id) => Some(id),
            _ => None,
        }
    }
}
