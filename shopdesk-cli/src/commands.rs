//! Slash commands understood by the interactive prompt.

pub const HELP: &str = "\
Commands:
  /help               show this help
  /reset              forget the conversation so far
  /history            print the conversation so far
  /models             list models you can switch to
  /model <id>         switch the active model
  /login <customer>   attach a customer id to this session
  /email <address>    attach a customer email to this session
  /logout             drop the session's customer details
  /context            show the session's customer details
  /quit               leave
Anything else is sent to the assistant.";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Empty,
    Message(String),
    Help,
    Reset,
    History,
    Models,
    Model(String),
    Login(String),
    Email(String),
    Logout,
    Context,
    Quit,
    MissingArgument(&'static str),
    Unknown(String),
}

pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Message(line.to_string());
    };

    let (name, argument) = match rest.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (rest, ""),
    };
    let with_argument = |usage: &'static str, build: fn(String) -> Command| {
        if argument.is_empty() {
            Command::MissingArgument(usage)
        } else {
            build(argument.to_string())
        }
    };

    match name {
        "help" | "?" => Command::Help,
        "reset" | "clear" => Command::Reset,
        "history" => Command::History,
        "models" => Command::Models,
        "model" => with_argument("/model <id>", Command::Model),
        "login" => with_argument("/login <customer_id>", Command::Login),
        "email" => with_argument("/email <address>", Command::Email),
        "logout" => Command::Logout,
        "context" => Command::Context,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}
