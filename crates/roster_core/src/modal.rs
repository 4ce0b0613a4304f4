//! Create/edit dialog state.

use serde::Serialize;
use shared::domain::{UserId, UserRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Edit,
}

/// The dialog is either hidden or showing exactly one form. The edit form
/// carries its own copy of the record it was opened with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "seed", rename_all = "snake_case")]
pub enum ModalState {
    #[default]
    Hidden,
    Create,
    Edit(UserRecord),
}

impl ModalState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn mode(&self) -> Option<FormMode> {
        match self {
            Self::Hidden => None,
            Self::Create => Some(FormMode::Create),
            Self::Edit(_) => Some(FormMode::Edit),
        }
    }

    pub fn seed(&self) -> Option<&UserRecord> {
        match self {
            Self::Edit(seed) => Some(seed),
            Self::Hidden | Self::Create => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormModalController {
    state: ModalState,
}

impl FormModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn open_create(&mut self) {
        self.state = ModalState::Create;
    }

    pub fn open_edit(&mut self, record: &UserRecord) {
        self.state = ModalState::Edit(record.clone());
    }

    /// Follows a local record that was given a new id while being edited.
    pub fn rekey_seed(&mut self, from: UserId, to: UserId) {
        if let ModalState::Edit(seed) = &mut self.state {
            if seed.id == from {
                seed.id = to;
            }
        }
    }

    pub fn close(&mut self) {
        self.state = ModalState::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        UserRecord {
            id: UserId(3),
            first_name: "Emma".to_string(),
            last_name: "Wong".to_string(),
            username: None,
            email: "emma.wong@reqres.in".to_string(),
            image: "https://reqres.in/img/faces/3-image.jpg".to_string(),
        }
    }

    #[test]
    fn starts_hidden() {
        let modal = FormModalController::new();
        assert!(!modal.state().is_visible());
        assert_eq!(modal.state().mode(), None);
        assert_eq!(modal.state().seed(), None);
    }

    #[test]
    fn every_state_can_reach_every_other() {
        let mut modal = FormModalController::new();
        modal.open_create();
        assert_eq!(modal.state().mode(), Some(FormMode::Create));

        modal.open_edit(&record());
        assert_eq!(modal.state().mode(), Some(FormMode::Edit));

        modal.open_create();
        assert_eq!(modal.state(), &ModalState::Create);

        modal.close();
        modal.close();
        assert_eq!(modal.state(), &ModalState::Hidden);
    }

    #[test]
    fn rekey_only_touches_a_matching_edit_seed() {
        let mut modal = FormModalController::new();
        modal.open_edit(&record());

        modal.rekey_seed(UserId(99), UserId(100));
        assert_eq!(modal.state().seed().map(|s| s.id), Some(UserId(3)));

        modal.rekey_seed(UserId(3), UserId(9));
        assert_eq!(modal.state().seed().map(|s| s.id), Some(UserId(9)));

        modal.open_create();
        modal.rekey_seed(UserId(9), UserId(10));
        assert_eq!(modal.state(), &ModalState::Create);
    }

    #[test]
    fn edit_seed_is_a_snapshot() {
        let mut original = record();
        let mut modal = FormModalController::new();
        modal.open_edit(&original);

        original.first_name = "Changed".to_string();
        original.email = "changed@example.test".to_string();

        let seed = modal.state().seed().expect("edit seed");
        assert_eq!(seed.first_name, "Emma");
        assert_eq!(seed.email, "emma.wong@reqres.in");
    }
}
