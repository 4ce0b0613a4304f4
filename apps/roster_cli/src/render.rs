//! Plain-text rendering of roster views.

use std::fmt::Write as _;

use roster_core::{FormMode, RosterView};

pub fn render_view(view: &RosterView) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:>5}  {:<24} {:<14} {:<32} image",
        "id", "name", "username", "email"
    );
    for user in &view.window {
        let _ = writeln!(
            out,
            "{:>5}  {:<24} {:<14} {:<32} {}",
            user.id.0,
            user.full_name(),
            user.username.as_deref().unwrap_or("-"),
            user.email,
            user.image
        );
    }
    if view.window.is_empty() {
        let _ = writeln!(out, "  (no users on this page)");
    }

    let _ = write!(out, "page {} of {}", view.current_page, view.page_count);
    if view.loading {
        let _ = write!(out, " (loading)");
    }
    let _ = writeln!(out);

    match (view.modal.mode(), view.modal.seed()) {
        (Some(FormMode::Create), _) => {
            let _ = writeln!(out, "[add user form open] add <first> <last> <email> [username]");
        }
        (Some(FormMode::Edit), Some(seed)) => {
            let _ = writeln!(
                out,
                "[edit user {} form open] {} {} {} {}",
                seed.id,
                seed.first_name,
                seed.last_name,
                seed.email,
                seed.username.as_deref().unwrap_or("-")
            );
        }
        _ => {}
    }

    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "! {}", notice.message);
    }
    out
}

#[cfg(test)]
mod tests {
    use roster_core::ModalState;
    use shared::domain::{UserId, UserRecord};

    use super::*;

    #[test]
    fn renders_rows_page_and_form() {
        let user = UserRecord {
            id: UserId(1),
            first_name: "George".to_string(),
            last_name: "Bluth".to_string(),
            username: None,
            email: "george.bluth@reqres.in".to_string(),
            image: "https://reqres.in/img/faces/1-image.jpg".to_string(),
        };
        let view = RosterView {
            window: vec![user.clone()],
            current_page: 1,
            page_count: 2,
            modal: ModalState::Edit(user),
            notice: None,
            loading: false,
        };

        let out = render_view(&view);
        assert!(out.contains("George Bluth"));
        assert!(out.contains("page 1 of 2"));
        assert!(out.contains("[edit user 1 form open]"));
    }

    #[test]
    fn empty_window_says_so() {
        let out = render_view(&RosterView::default());
        assert!(out.contains("(no users on this page)"));
    }
}
