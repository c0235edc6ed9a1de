use parley_types::Message;

/// Rendering collaborator for the transcript.
///
/// The chat client never touches a concrete output surface; it hands every
/// appended entry to a view. Tests substitute an in-memory fake.
pub trait TranscriptView: Send {
    /// Render an appended entry, keeping the newest entry visible.
    fn append(&mut self, message: &Message);

    /// Reset the input collaborator after a submission. Terminal views
    /// consume the submitted line by nature, so the default is a no-op.
    fn clear_input(&mut self) {}
}
