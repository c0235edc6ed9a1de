use parley_types::Message;

/// Append-only ordered log of the chat messages shown to the user.
///
/// Scoped to one client session; nothing is persisted across restarts.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.entries.push(message);
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
