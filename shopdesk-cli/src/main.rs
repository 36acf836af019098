mod args;
mod commands;

use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use secrecy::SecretString;
use shopdesk_agent::{CustomerServiceAgent, ToolRegistry};
use shopdesk_core::Role;
use shopdesk_llm::{BackendSelector, GroqBackendFactory};
use shopdesk_session::{InMemorySessionStore, SessionStore};
use shopdesk_tools::{default_tools, ShopData};
use tracing_subscriber::EnvFilter;

use crate::args::Args;
use crate::commands::{parse, Command, HELP};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.verbose);

    let factory = GroqBackendFactory::new(args.api_key.clone().map(SecretString::new))
        .with_base_url(args.base_url.clone());
    let selector = BackendSelector::initialize(Arc::new(factory), args.selection_plan())
        .await
        .context("no language model backend could be started")?;

    let data = ShopData::seeded();
    let tools = ToolRegistry::builder()
        .register_all(default_tools(
            &data,
            args.weather_api_key.clone().map(SecretString::new),
        ))
        .build()?;
    let sessions = Arc::new(InMemorySessionStore::new());

    let mut builder = CustomerServiceAgent::builder()
        .selector(Arc::new(selector))
        .tools(Arc::new(tools))
        .sessions(sessions.clone())
        .config(args.agent_config());
    if let Some(session_id) = &args.session_id {
        builder = builder.session_id(session_id.clone());
    }
    let mut agent = builder.build()?;
    tracing::info!(
        session_id = agent.session_id(),
        backend = %agent.active_backend().identifier,
        tools = agent.tools().len(),
        "agent ready"
    );

    if let Some(customer_id) = &args.customer_id {
        sessions.set_customer_id(agent.session_id(), customer_id).await?;
    }
    if let Some(email) = &args.customer_email {
        sessions.set_customer_email(agent.session_id(), email).await?;
    }

    if let Some(message) = &args.message {
        println!("{}", agent.process_message(message, None).await);
        return Ok(());
    }

    repl(&mut agent, sessions.as_ref()).await
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn repl(
    agent: &mut CustomerServiceAgent,
    sessions: &InMemorySessionStore,
) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!(
        "shopdesk customer service (model: {}). Type /help for commands.",
        agent.active_backend().identifier
    );

    loop {
        let line = match editor.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if !line.trim().is_empty() {
            editor.add_history_entry(line.trim())?;
        }

        let session_id = agent.session_id().to_string();
        match parse(&line) {
            Command::Empty => {}
            Command::Message(text) => {
                let reply = agent.process_message(&text, None).await;
                println!("assistant> {reply}\n");
            }
            Command::Help => println!("{HELP}"),
            Command::Reset => {
                agent.reset_conversation();
                println!("Conversation cleared.");
            }
            Command::History => {
                let history = agent.conversation_history();
                if history.is_empty() {
                    println!("No messages yet.");
                }
                for turn in history {
                    let who = match turn.role {
                        Role::User => "you",
                        Role::Assistant => "assistant",
                    };
                    println!("{who}> {}", turn.content);
                }
            }
            Command::Models => {
                let active = agent.active_backend().identifier;
                for model in agent.available_models() {
                    let marker = if model == active { '*' } else { ' ' };
                    println!("{marker} {model}");
                }
            }
            Command::Model(model) => {
                if agent.switch_backend(&model).await {
                    println!("Switched to {model}.");
                } else {
                    println!(
                        "Could not switch to {model}; still using {}.",
                        agent.active_backend().identifier
                    );
                }
            }
            Command::Login(customer_id) => {
                sessions.set_customer_id(&session_id, &customer_id).await?;
                println!("Logged in as {customer_id}.");
            }
            Command::Email(email) => {
                sessions.set_customer_email(&session_id, &email).await?;
                println!("Email set to {email}.");
            }
            Command::Logout => {
                sessions.clear(&session_id).await;
                println!("Customer details cleared.");
            }
            Command::Context => {
                let context = sessions.context(&session_id).await;
                if context.is_empty() {
                    println!("No customer details for this session.");
                } else {
                    println!("{}", context.render());
                }
            }
            Command::Quit => break,
            Command::MissingArgument(usage) => println!("Usage: {usage}"),
            Command::Unknown(name) => println!("Unknown command /{name}. Type /help."),
        }
    }

    Ok(())
}
