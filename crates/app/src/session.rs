//! REPL session state: the transcript the front end owns and re-sends on
//! every call, the selected service mode, and command parsing.

use anyhow::{anyhow, Result};
use shared::{ChatTurn, ResponseEnvelope, ServiceMode};
use std::path::PathBuf;

pub const GREETING: &str = "Hello! I'm PandaNexus, your advanced AI assistant. I can help you with coding, creative tasks, answer questions, generate images, and much more. What would you like to explore today?";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Send(String),
    /// `None` shows the current mode and the choices.
    Mode(Option<ServiceMode>),
    Fix(String),
    Image(PathBuf),
    File(PathBuf),
    Clear,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Command::Send(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let require = |what: &str| {
        if arg.is_empty() {
            Err(anyhow!("usage: /{} <{}>", name, what))
        } else {
            Ok(arg.to_string())
        }
    };

    match name {
        "mode" if arg.is_empty() => Ok(Command::Mode(None)),
        "mode" => Ok(Command::Mode(Some(arg.parse()?))),
        "fix" => Ok(Command::Fix(require("text")?)),
        "image" => Ok(Command::Image(PathBuf::from(require("path")?))),
        "file" => Ok(Command::File(PathBuf::from(require("path")?))),
        "clear" => Ok(Command::Clear),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(anyhow!("unknown command /{} (try /help)", other)),
    }
}

pub fn help_text() -> String {
    let mut out = String::from(
        "Commands:\n\
         \x20 /mode [name]   show or switch service mode\n\
         \x20 /fix <text>    correct spelling and grammar\n\
         \x20 /image <path>  send an image for analysis\n\
         \x20 /file <path>   add a text file to the conversation\n\
         \x20 /clear         start a new conversation\n\
         \x20 /quit          exit\n\nModes:\n",
    );
    for mode in ServiceMode::ALL {
        out.push_str(&format!("  {:<10} {}\n", mode.as_str(), mode.description()));
    }
    out
}

pub struct ChatSession {
    transcript: Vec<ChatTurn>,
    pub mode: ServiceMode,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            transcript: vec![ChatTurn::assistant(GREETING)],
            mode: ServiceMode::Auto,
        }
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.transcript.push(turn);
    }

    /// Record the assistant reply; generated or echoed images stay attached
    /// to the turn so later calls see them.
    pub fn record(&mut self, envelope: &ResponseEnvelope) {
        let mut turn = ChatTurn::assistant(envelope.content.clone());
        turn.image = envelope.image_url.clone();
        self.transcript.push(turn);
    }

    pub fn clear(&mut self) {
        *self = Self {
            mode: self.mode,
            ..Self::new()
        };
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
