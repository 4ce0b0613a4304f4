//! User-initiated actions routed to the roster controller.

use shared::{
    domain::{UserDraft, UserId},
    error::RosterError,
};

use crate::controller::RosterController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterAction {
    ChangePage(u32),
    Refresh,
    OpenCreateForm,
    SubmitCreate(UserDraft),
    OpenEditForm(UserId),
    SubmitEdit(UserId, UserDraft),
    DeleteUser(UserId),
    CloseForm,
}

impl RosterAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChangePage(_) => "change_page",
            Self::Refresh => "refresh",
            Self::OpenCreateForm => "open_create_form",
            Self::SubmitCreate(_) => "submit_create",
            Self::OpenEditForm(_) => "open_edit_form",
            Self::SubmitEdit(..) => "submit_edit",
            Self::DeleteUser(_) => "delete_user",
            Self::CloseForm => "close_form",
        }
    }
}

impl RosterController {
    pub async fn dispatch(&mut self, action: RosterAction) -> Result<(), RosterError> {
        tracing::debug!(action = action.name(), "dispatching roster action");

        match action {
            RosterAction::ChangePage(page) => self.change_page(page).await,
            RosterAction::Refresh => {
                self.refresh().await;
                Ok(())
            }
            RosterAction::OpenCreateForm => {
                self.open_create_form();
                Ok(())
            }
            RosterAction::SubmitCreate(draft) => {
                self.create_user(draft);
                Ok(())
            }
            RosterAction::OpenEditForm(id) => self.begin_edit(id),
            RosterAction::SubmitEdit(id, draft) => self.save_edit(id, draft).map(|_| ()),
            RosterAction::DeleteUser(id) => self.delete_user(id),
            RosterAction::CloseForm => {
                self.close_form();
                Ok(())
            }
        }
    }
}
