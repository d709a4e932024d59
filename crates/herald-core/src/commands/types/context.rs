//! Invocation context for context-wrapped handlers

use std::str::FromStr;

use crate::error::ArgumentError;
use crate::sender::CommandSender;

/// Sender, label and remaining args of one invocation
///
/// The accessors are conveniences only; there is no flag or quoting parser.
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    sender: &'a dyn CommandSender,
    label: &'a str,
    args: &'a [String],
}

impl<'a> CommandContext<'a> {
    pub fn new(sender: &'a dyn CommandSender, label: &'a str, args: &'a [String]) -> Self {
        Self {
            sender,
            label,
            args,
        }
    }

    pub fn sender(&self) -> &'a dyn CommandSender {
        self.sender
    }

    /// The root label as typed by the sender
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// Arguments left after the matched command path
    pub fn args(&self) -> &'a [String] {
        self.args
    }

    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn arg_or(&self, index: usize, default: &'a str) -> &'a str {
        self.arg(index).unwrap_or(default)
    }

    pub fn require_arg(&self, index: usize) -> Result<&'a str, ArgumentError> {
        self.arg(index).ok_or(ArgumentError::Missing { index })
    }

    /// Parse one argument with [`FromStr`]
    pub fn parse_arg<T: FromStr>(&self, index: usize) -> Result<T, ArgumentError> {
        let value = self.require_arg(index)?;
        value.parse().map_err(|_| ArgumentError::Invalid {
            index,
            value: value.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }

    /// Arguments from `index` on, joined with single spaces
    pub fn joined_from(&self, index: usize) -> String {
        self.args.get(index..).unwrap_or_default().join(" ")
    }

    pub fn is_interactive(&self) -> bool {
        self.sender.as_interactive().is_some()
    }

    pub fn reply(&self, message: impl AsRef<str>) {
        self.sender.send_message(message.as_ref());
    }
}
