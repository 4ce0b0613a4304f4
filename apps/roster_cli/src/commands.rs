//! Parsing of typed command lines into roster actions.

use anyhow::{anyhow, bail, Context, Result};
use roster_core::{ModalState, RosterAction};
use shared::domain::{UserDraft, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(RosterAction),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  page <n>                           load page n
  refresh                            re-fetch the current page
  new                                open the create form
  add <first> <last> <email> [user]  create a local user
  edit <id>                          open the edit form for a user
  save <first> <last> <email> [user] save the open edit form ('-' keeps a field)
  cancel                             close the form
  delete <id>                        delete a user locally
  show | help | quit";

pub fn parse_command(line: &str, modal: &ModalState) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Show);
    };
    let args: Vec<&str> = words.collect();

    let command = match verb {
        "page" | "p" => Command::Action(RosterAction::ChangePage(parse_number(&args, "page")?)),
        "refresh" | "r" => Command::Action(RosterAction::Refresh),
        "new" => Command::Action(RosterAction::OpenCreateForm),
        "add" => {
            let draft = draft_from_args(&args, UserDraft::default())?;
            Command::Action(RosterAction::SubmitCreate(draft))
        }
        "edit" | "e" => {
            Command::Action(RosterAction::OpenEditForm(UserId(parse_number(&args, "id")?)))
        }
        "save" => {
            let Some(seed) = modal.seed() else {
                bail!("no edit form is open; use 'edit <id>' first");
            };
            let draft = draft_from_args(&args, UserDraft::from(seed))?;
            Command::Action(RosterAction::SubmitEdit(seed.id, draft))
        }
        "cancel" | "close" => Command::Action(RosterAction::CloseForm),
        "delete" | "rm" => {
            Command::Action(RosterAction::DeleteUser(UserId(parse_number(&args, "id")?)))
        }
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(command)
}

fn parse_number<T: std::str::FromStr>(args: &[&str], what: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args.first().ok_or_else(|| anyhow!("missing {what}"))?;
    raw.parse::<T>()
        .with_context(|| format!("invalid {what} '{raw}'"))
}

fn draft_from_args(args: &[&str], base: UserDraft) -> Result<UserDraft> {
    if args.len() < 3 || args.len() > 4 {
        bail!("expected <first> <last> <email> [username]");
    }

    let keep = |arg: &str, current: String| {
        if arg == "-" {
            current
        } else {
            arg.to_string()
        }
    };

    Ok(UserDraft {
        first_name: keep(args[0], base.first_name),
        last_name: keep(args[1], base.last_name),
        email: keep(args[2], base.email),
        username: match args.get(3) {
            Some(&"-") | None => base.username,
            Some(username) => Some(username.to_string()),
        },
    })
}
