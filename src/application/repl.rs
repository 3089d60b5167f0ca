#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;

use std::io;

use anyhow::bail;
use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Select;
use tokio::task;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatAction;
use crate::domain::models::Message;
use crate::domain::models::Render;
use crate::domain::models::Session;
use crate::domain::models::SlashCommand;
use crate::domain::services::help_text;
use crate::domain::services::ChatView;
use crate::domain::services::GenerationClient;
use crate::domain::services::SessionStore;

/// A line of user input, resolved to what the chat loop should do with it.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Help,
    ListSessions,
    PickSession,
    History,
    Action(ChatAction),
}

fn required_index(command: &SlashCommand, usage: &str) -> Result<usize> {
    match command.index_arg() {
        Some(index) => return Ok(index),
        None => bail!(format!("Usage: {usage}")),
    }
}

pub fn parse_line(line: &str) -> Result<ReplCommand> {
    let command = match SlashCommand::parse(line) {
        Some(command) => command,
        None => return Ok(ReplCommand::Action(ChatAction::Submit(line.to_string()))),
    };

    if command.is_quit() {
        return Ok(ReplCommand::Quit);
    }
    if command.is_help() {
        return Ok(ReplCommand::Help);
    }
    if command.is_new_session() {
        return Ok(ReplCommand::Action(ChatAction::NewSession));
    }
    if command.is_list_sessions() {
        return Ok(ReplCommand::ListSessions);
    }
    if command.is_history() {
        return Ok(ReplCommand::History);
    }
    if command.is_switch_session() {
        if command.args.is_empty() {
            return Ok(ReplCommand::PickSession);
        }
        let index = required_index(&command, "/switch [SESSION_NUMBER]")?;
        return Ok(ReplCommand::Action(ChatAction::SwitchSession(index)));
    }
    if command.is_delete_session() {
        let index = required_index(&command, "/delete [SESSION_NUMBER]")?;
        return Ok(ReplCommand::Action(ChatAction::DeleteSession(index)));
    }
    if command.is_edit_message() {
        let index = required_index(&command, "/edit [MESSAGE_NUMBER]")?;
        return Ok(ReplCommand::Action(ChatAction::Edit(index)));
    }
    if command.is_delete_message() {
        let index = required_index(&command, "/remove [MESSAGE_NUMBER]")?;
        return Ok(ReplCommand::Action(ChatAction::DeleteMessage(index)));
    }

    return Ok(ReplCommand::Action(ChatAction::Submit(line.to_string())));
}

pub fn format_exchange(username: &str, message: &Message, error: Option<&str>) -> String {
    let mut lines = vec![
        format!("{}: {}", Paint::cyan(username).bold(), message.query),
        format!("{}: {}", Paint::green("Coach").bold(), message.response),
    ];
    if let Some(error) = error {
        lines.push(Paint::red(format!("Error: {error}")).to_string());
    }

    return lines.join("\n");
}

pub fn format_sessions(store: &SessionStore) -> String {
    return store
        .sessions()
        .iter()
        .enumerate()
        .map(|(index, session)| {
            let marker = if index == store.active_index() { "*" } else { " " };
            return format!(
                "{marker} {}. {} ({} messages)",
                index + 1,
                session.title(index),
                session.messages.len()
            );
        })
        .collect::<Vec<String>>()
        .join("\n");
}

pub fn format_history(username: &str, session: &Session) -> String {
    if session.messages.is_empty() {
        return "No messages yet. Ask your coach anything!".to_string();
    }

    return session
        .messages
        .iter()
        .enumerate()
        .map(|(index, message)| {
            let mut header = format!("[{}]", index + 1);
            if message.is_edited() {
                header = format!("{header} (edited)");
            }
            return format!("{header}\n{}", format_exchange(username, message, None));
        })
        .collect::<Vec<String>>()
        .join("\n\n");
}

/// Header plus the full message history of the active session.
pub fn format_session_view(username: &str, store: &SessionStore) -> String {
    let active = store.active_index();
    let header = Paint::yellow(format!("Session: {}", store.active().title(active)));

    return format!("{header}\n{}", format_history(username, store.active()));
}

/// The edit prompt only takes a replacement question, never a command.
pub fn check_edited_query(text: &str) -> Result<()> {
    if SlashCommand::parse(text).is_some() {
        bail!("Commands can't be used while editing, enter the new question");
    }

    return Ok(());
}

/// End of input or an interrupt at the prompt means the user is done.
pub fn is_input_closed(err: &dialoguer::Error) -> bool {
    match err {
        dialoguer::Error::IO(io_err) => {
            return matches!(
                io_err.kind(),
                io::ErrorKind::UnexpectedEof
                    | io::ErrorKind::Interrupted
                    | io::ErrorKind::NotConnected
                    | io::ErrorKind::BrokenPipe
            );
        }
    }
}

/// Returns `None` once input is closed.
async fn read_line(prompt: String, initial_text: Option<String>) -> Result<Option<String>> {
    let res = task::spawn_blocking(move || {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(text) = initial_text {
            input = input.with_initial_text(text);
        }
        return input.interact_text();
    })
    .await?;

    match res {
        Ok(line) => return Ok(Some(line)),
        Err(err) if is_input_closed(&err) => {
            tracing::debug!(error = ?err, "input closed");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    }
}

async fn pick_session(store: &SessionStore) -> Result<Option<usize>> {
    let titles = store
        .sessions()
        .iter()
        .enumerate()
        .map(|(index, session)| return session.title(index))
        .collect::<Vec<String>>();
    let active = store.active_index();

    let res = task::spawn_blocking(move || {
        return Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Which session would you like to switch to?")
            .default(active)
            .items(&titles)
            .interact_opt();
    })
    .await?;

    match res {
        Ok(selected) => return Ok(selected),
        Err(err) if is_input_closed(&err) => return Ok(None),
        Err(err) => return Err(err.into()),
    }
}

pub struct Repl {}

impl Repl {
    /// Runs the interactive chat loop until the user quits. Errors from a
    /// single action are printed and the loop continues.
    pub async fn start(client: GenerationClient) -> Result<()> {
        let username = Config::get(ConfigKey::Username);
        let mut view = ChatView::default();

        println!(
            "{}",
            Paint::green("Hi! I'm your fitness and nutrition coach. Type /help for commands.")
        );

        loop {
            let line = match read_line(username.to_string(), None).await? {
                Some(line) => line,
                None => break,
            };

            let command = match parse_line(&line) {
                Ok(command) => command,
                Err(err) => {
                    eprintln!("{}", Paint::red(err));
                    continue;
                }
            };

            let action = match command {
                ReplCommand::Quit => break,
                ReplCommand::Help => {
                    println!("{}", help_text());
                    continue;
                }
                ReplCommand::ListSessions => {
                    println!("{}", format_sessions(view.store()));
                    continue;
                }
                ReplCommand::History => {
                    println!("{}", format_history(&username, view.store().active()));
                    continue;
                }
                ReplCommand::PickSession => match pick_session(view.store()).await? {
                    Some(index) => ChatAction::SwitchSession(index),
                    None => continue,
                },
                ReplCommand::Action(action) => action,
            };

            if let Err(err) = Repl::run_action(&mut view, action, &client, &username).await {
                eprintln!("{}", Paint::red(err));
            }
        }

        return Ok(());
    }

    async fn run_action(
        view: &mut ChatView,
        action: ChatAction,
        client: &GenerationClient,
        username: &str,
    ) -> Result<()> {
        let mut render = view.handle(action, client).await?;

        loop {
            match render {
                Render::Noop => return Ok(()),
                Render::History => {
                    println!("{}", format_session_view(username, view.store()));
                    return Ok(());
                }
                Render::Exchange { message, error } => {
                    println!("{}", format_exchange(username, &message, error.as_deref()));
                    return Ok(());
                }
                Render::EditPrompt { index, query } => {
                    let prompt = format!("Edit message {}", index + 1);
                    // Keep asking until a non-empty question is saved.
                    loop {
                        let edited =
                            match read_line(prompt.to_string(), Some(query.to_string())).await? {
                                Some(edited) => edited,
                                None => return Ok(()),
                            };
                        if let Err(err) = check_edited_query(&edited) {
                            eprintln!("{}", Paint::red(err));
                            continue;
                        }
                        match view.handle(ChatAction::Save(edited), client).await {
                            Ok(next) => {
                                render = next;
                                break;
                            }
                            Err(err) => eprintln!("{}", Paint::red(err)),
                        }
                    }
                }
            }
        }
    }
}
