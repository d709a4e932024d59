//! Line-oriented console host
//!
//! Reads invocations from stdin and forwards them to the engine the way a
//! game server forwards chat commands.

use herald_core::commands::CommandEngine;
use herald_core::sender::{CommandSender, PlayerSender, SharedSender};
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use uuid::Uuid;

/// A player typing at the local console
pub struct ConsolePlayer {
    name: String,
    unique_id: Uuid,
    permissions: HashSet<String>,
}

impl ConsolePlayer {
    pub fn new(name: impl Into<String>, permissions: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.into(),
            unique_id: Uuid::new_v4(),
            permissions: permissions.into_iter().collect(),
        }
    }
}

impl CommandSender for ConsolePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> String {
        self.unique_id.to_string()
    }

    fn send_message(&self, message: &str) {
        let mut out = io::stdout().lock();
        for line in message.lines() {
            let _ = writeln!(out, "[to {}] {line}", self.name);
        }
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    fn as_interactive(&self) -> Option<&dyn PlayerSender> {
        Some(self as &dyn PlayerSender)
    }
}

impl PlayerSender for ConsolePlayer {
    fn unique_id(&self) -> Uuid {
        self.unique_id
    }
}

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Quit,
    /// `complete` with no root: list the routed roots
    Roots,
    /// `complete <root> [args..]`; a trailing space adds an empty partial
    Complete { root: String, args: Vec<String> },
    Command { root: String, args: Vec<String> },
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);

        let mut tokens = trimmed.split_whitespace();
        let Some(first) = tokens.next() else {
            return Self::Empty;
        };

        match first {
            "quit" | "exit" => Self::Quit,
            "complete" => {
                let rest = trimmed["complete".len()..].trim_start();
                let rest = rest.strip_prefix('/').unwrap_or(rest);
                let mut words: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
                if words.is_empty() {
                    return Self::Roots;
                }
                if rest.ends_with(char::is_whitespace) {
                    words.push(String::new());
                }
                let root = words.remove(0);
                Self::Complete { root, args: words }
            }
            root => Self::Command {
                root: root.to_string(),
                args: tokens.map(str::to_string).collect(),
            },
        }
    }
}

/// Run the read-eval loop until EOF or `quit`
pub fn run(engine: &CommandEngine, sender: SharedSender) -> io::Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();

    println!(
        "Herald console as '{}' ({}). Type `complete` to list roots, `quit` to leave.",
        sender.name(),
        sender.kind()
    );

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match Input::parse(&line) {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Roots => {
                let roots: Vec<String> = engine
                    .registry()
                    .roots()
                    .into_iter()
                    .filter(|(root, _)| engine.registry().is_routable(root))
                    .map(|(root, _)| root)
                    .collect();
                println!("{}", roots.join(" "));
            }
            Input::Complete { root, args } => {
                let suggestions = engine.complete(sender.as_ref(), &root, &args);
                if suggestions.is_empty() {
                    println!("(no suggestions)");
                } else {
                    println!("{}", suggestions.join(" "));
                }
            }
            Input::Command { root, args } => {
                if !engine.execute(Arc::clone(&sender), &root, &args) {
                    println!("Unknown command. Type `complete` to list the available roots.");
                }
            }
        }
    }

    Ok(())
}
