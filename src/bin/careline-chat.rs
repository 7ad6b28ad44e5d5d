//! Interactive chat application for the CarePay loan assistant.
//!
//! This binary provides a REPL interface for chatting with the hosted
//! healthcare-loan agent, with OTP login, session history, and bureau
//! decision summaries.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! careline-chat
//!
//! # Point at a different deployment
//! careline-chat --base-url http://localhost:8000/api/
//!
//! # Log in non-interactively up to the OTP prompt
//! careline-chat --phone 9876543210
//!
//! # Disable colors (useful for piping output)
//! careline-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/new` - Start a fresh conversation
//! - `/resume <id>` - Resume a recorded session
//! - `/history` - List recorded sessions
//! - `/status` - Show progress and session state
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use careline::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, help_text, parse_command,
};
use careline::{AgentClient, CredentialStore, HistoryStore};

/// Main entry point for the careline-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("careline-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    std::fs::create_dir_all(&config.state_dir)?;
    let mut credentials = CredentialStore::open(config.credentials_path())?;
    let mut history = HistoryStore::open(config.history_path())?;

    let client = AgentClient::with_options(
        credentials.token().map(str::to_string),
        Some(config.base_url.clone()),
        Some(config.timeout),
    )?;
    let mut session = ChatSession::new(client);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    // An in-flight request cannot be cancelled; swallow Ctrl+C so it does
    // not kill the process mid-request. At the prompt, rustyline reports it
    // as ReadlineError::Interrupted.
    ctrlc::set_handler(|| {})?;

    println!("CarePay loan assistant ({})", config.base_url);
    println!("Type /help for commands, /quit to exit\n");

    if !credentials.is_authenticated() {
        if let Err(err) = login(
            &mut rl,
            &mut session,
            &mut credentials,
            &mut renderer,
            config.phone_number.as_deref(),
        )
        .await
        {
            renderer.print_error(&format!("Login failed: {err}"));
            renderer.print_info("You can retry with /login.");
        }
    }

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::New => {
                            session.reset();
                            renderer.print_info("Started a new conversation.");
                        }
                        ChatCommand::Resume(session_id) => {
                            match session.resume(&session_id).await {
                                Ok(()) => {
                                    renderer
                                        .print_info(&format!("Resumed session {session_id}."));
                                    if !history.contains(&session_id) {
                                        if let Err(err) = history.record(&session_id) {
                                            renderer.print_error(&format!(
                                                "Failed to update history: {err}"
                                            ));
                                        }
                                    }
                                }
                                Err(err) => {
                                    renderer.print_error(&format!(
                                        "Could not resume {session_id}: {err}"
                                    ));
                                }
                            }
                        }
                        ChatCommand::History => {
                            renderer.print_history(history.entries());
                        }
                        ChatCommand::Delete(session_id) => {
                            match history.delete(&session_id) {
                                Ok(true) => {
                                    renderer.print_info(&format!("Deleted {session_id}."));
                                    if session.clear_if_active(&session_id) {
                                        renderer.print_info("Started a new conversation.");
                                    }
                                }
                                Ok(false) => {
                                    renderer.print_info(&format!(
                                        "No recorded session {session_id}."
                                    ));
                                }
                                Err(err) => {
                                    renderer
                                        .print_error(&format!("Failed to delete: {err}"));
                                }
                            }
                        }
                        ChatCommand::Status => {
                            print_status(&session, &credentials, &mut renderer);
                        }
                        ChatCommand::Login => {
                            if let Err(err) = login(
                                &mut rl,
                                &mut session,
                                &mut credentials,
                                &mut renderer,
                                config.phone_number.as_deref(),
                            )
                            .await
                            {
                                renderer.print_error(&format!("Login failed: {err}"));
                            }
                        }
                        ChatCommand::Logout => {
                            if let Err(err) = credentials.logout() {
                                renderer.print_error(&format!("Logout failed: {err}"));
                            } else {
                                session.api_mut().set_token(None);
                                renderer.print_info("Logged out.");
                            }
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                if !credentials.is_authenticated() {
                    renderer.print_info("Please /login before chatting.");
                    continue;
                }

                // Regular message - send to the agent
                let started_fresh = session.session_id().is_none();
                match session.send(line).await {
                    Ok(reply) => {
                        let reply = reply.clone();
                        renderer.print_message(&reply);
                        renderer.print_progress(session.progress());

                        if let Some(session_id) = session.session_id() {
                            let session_id = session_id.to_string();
                            if let Err(err) = record_session(
                                &mut history,
                                &mut credentials,
                                &mut renderer,
                                &session_id,
                                line,
                                started_fresh,
                            ) {
                                renderer
                                    .print_error(&format!("Failed to update history: {err}"));
                            }
                        }
                    }
                    Err(_) => {
                        // The session appended a user-visible error entry.
                        if let Some(entry) = session.messages().last() {
                            let entry = entry.clone();
                            renderer.print_message(&entry);
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

/// Runs the OTP login flow and stores the resulting credentials.
async fn login(
    rl: &mut DefaultEditor,
    session: &mut ChatSession<AgentClient>,
    credentials: &mut CredentialStore,
    renderer: &mut PlainTextRenderer,
    preset_phone: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let phone = match preset_phone {
        Some(phone) => phone.to_string(),
        None => rl.readline("Phone number: ")?.trim().to_string(),
    };

    session.api_mut().send_otp(&phone).await?;
    renderer.print_info("OTP sent.");

    let otp = rl.readline("OTP: ")?.trim().to_string();
    let verified = session.api_mut().verify_otp(&phone, &otp).await?;
    credentials.login(&verified)?;
    session.api_mut().set_token(Some(verified.token.clone()));
    renderer.print_info(&format!("Logged in as {}.", verified.phone_number));
    Ok(())
}

/// Records a freshly created session in history and advances the
/// re-authentication counter.
fn record_session(
    history: &mut HistoryStore,
    credentials: &mut CredentialStore,
    renderer: &mut PlainTextRenderer,
    session_id: &str,
    first_message: &str,
    started_fresh: bool,
) -> careline::Result<()> {
    if !history.contains(session_id) {
        history.record(session_id)?;
        if started_fresh && credentials.note_new_chat()? {
            renderer.print_info(
                "You've started several new conversations; please /login again soon.",
            );
        }
    }
    history.set_preview(session_id, first_message)?;
    Ok(())
}

fn print_status(
    session: &ChatSession<AgentClient>,
    credentials: &CredentialStore,
    renderer: &mut PlainTextRenderer,
) {
    let snapshot = session.snapshot();
    println!("    Session:");
    match snapshot.session_id.as_deref() {
        Some(id) => println!("      Id: {id}"),
        None => println!("      Id: (not started)"),
    }
    println!("      Messages: {}", snapshot.message_count);
    println!(
        "      Decision: {}",
        if snapshot.decided { "received" } else { "pending" }
    );
    if snapshot.connection_error {
        println!("      Connection: degraded");
    }
    match credentials.credentials() {
        Some(creds) => println!("      Logged in as: {}", creds.phone_number),
        None => println!("      Logged in as: (nobody)"),
    }
    renderer.print_progress(snapshot.progress);
}
