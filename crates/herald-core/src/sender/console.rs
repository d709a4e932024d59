//! Console sender writing to a text sink

use parking_lot::Mutex;
use std::io::{self, Write};
use uuid::Uuid;

use super::CommandSender;

/// The host console: generic kind, every permission granted
pub struct ConsoleSender {
    name: String,
    id: Uuid,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSender {
    /// Console writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Console writing to an arbitrary sink
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            name: "console".to_string(),
            id: Uuid::new_v4(),
            out: Mutex::new(Box::new(writer)),
        }
    }

    /// Override the display name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for ConsoleSender {
    fn default() -> Self {
        Self::stdout()
    }
}

impl CommandSender for ConsoleSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> String {
        format!("{}:{}", self.name, self.id)
    }

    fn send_message(&self, message: &str) {
        let mut out = self.out.lock();
        // A closed console has nobody left to tell.
        let _ = writeln!(out, "{message}");
        let _ = out.flush();
    }

    fn has_permission(&self, _permission: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sender::SenderKind;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_writes_lines() {
        let buffer = SharedBuffer::default();
        let console = ConsoleSender::with_writer(buffer.clone());

        console.send_message("hello");
        console.send_message("world");

        let written = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert_eq!(written, "hello\nworld\n");
    }

    #[test]
    fn test_console_is_generic_and_privileged() {
        let console = ConsoleSender::with_writer(io::sink()).named("rcon");
        assert_eq!(console.name(), "rcon");
        assert_eq!(console.kind(), SenderKind::Generic);
        assert!(console.as_interactive().is_none());
        assert!(console.has_permission("anything.at.all"));
    }

    #[test]
    fn test_consoles_with_same_name_have_distinct_ids() {
        let first = ConsoleSender::with_writer(io::sink());
        let second = ConsoleSender::with_writer(io::sink());
        assert_eq!(first.name(), second.name());
        assert_ne!(first.id(), second.id());
        assert!(first.id().starts_with("console:"));
    }
}
