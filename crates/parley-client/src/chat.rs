use std::sync::Arc;

use colored::Colorize;
use tokio::sync::Mutex;

use parley_types::{AskRequest, Message, NO_REPLY_PLACEHOLDER, SERVER_ERROR_PLACEHOLDER};

use crate::transcript::Transcript;
use crate::transport::ReplyTransport;
use crate::view::TranscriptView;

/// The chat client: owns the transcript and runs the send/receive cycle.
///
/// Cloning is cheap and clones share the same transcript and view, so
/// overlapping invocations of [`ChatClient::send_message`] are allowed.
/// The transcript lock is never held across the transport await, which
/// means replies land in completion order, not invocation order. That is
/// an accepted property of the exchange, not a defect.
#[derive(Clone)]
pub struct ChatClient {
    transport: Arc<dyn ReplyTransport>,
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    transcript: Transcript,
    view: Box<dyn TranscriptView>,
}

impl ChatClient {
    pub fn new(transport: Arc<dyn ReplyTransport>, view: Box<dyn TranscriptView>) -> Self {
        Self {
            transport,
            inner: Arc::new(Mutex::new(Inner {
                transcript: Transcript::new(),
                view,
            })),
        }
    }

    /// Run one send/receive cycle for the given input.
    ///
    /// Whitespace-only input is discarded without touching the transcript
    /// or the network. Otherwise the user entry is appended and rendered
    /// before the request goes out, and exactly one bot entry follows:
    /// the service's reply, or a placeholder when the reply is missing or
    /// the exchange fails. Failures are absorbed here and never reach the
    /// caller.
    pub async fn send_message(&self, input: &str) {
        let text = input.trim();
        if text.is_empty() {
            return;
        }

        let outgoing = Message::user(text);
        {
            let mut inner = self.inner.lock().await;
            inner.transcript.push(outgoing.clone());
            inner.view.append(&outgoing);
            inner.view.clear_input();
        }

        let request = AskRequest {
            message: text.to_string(),
        };

        let incoming = match self.transport.exchange(&request).await {
            Ok(envelope) => match envelope.reply {
                Some(reply) => Message::bot(reply),
                None => Message::bot(NO_REPLY_PLACEHOLDER),
            },
            Err(err) => {
                eprintln!("{} Reply exchange failed: {:#}", "❌".bright_red(), err);
                Message::bot(SERVER_ERROR_PLACEHOLDER)
            }
        };

        let mut inner = self.inner.lock().await;
        inner.transcript.push(incoming.clone());
        inner.view.append(&incoming);
    }

    /// Snapshot of the transcript so far.
    pub async fn transcript(&self) -> Vec<Message> {
        self.inner.lock().await.transcript.entries().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::{mpsc, oneshot};

    use parley_types::{ReplyEnvelope, Role};

    /// In-memory stand-in for the rendering collaborator. Clones share
    /// state so tests can inspect what the client rendered.
    #[derive(Clone, Default)]
    struct RecordingView {
        state: Arc<StdMutex<ViewState>>,
    }

    #[derive(Default)]
    struct ViewState {
        appended: Vec<Message>,
        input_clears: usize,
    }

    impl RecordingView {
        fn appended(&self) -> Vec<Message> {
            self.state.lock().unwrap().appended.clone()
        }

        fn input_clears(&self) -> usize {
            self.state.lock().unwrap().input_clears
        }
    }

    impl TranscriptView for RecordingView {
        fn append(&mut self, message: &Message) {
            self.state.lock().unwrap().appended.push(message.clone());
        }

        fn clear_input(&mut self) {
            self.state.lock().unwrap().input_clears += 1;
        }
    }

    /// Transport that replays a scripted sequence of results and records
    /// every request it sees.
    struct ScriptedTransport {
        results: Mutex<VecDeque<Result<ReplyEnvelope>>>,
        requests: Mutex<Vec<AskRequest>>,
    }

    impl ScriptedTransport {
        fn new(results: Vec<Result<ReplyEnvelope>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn replying(reply: &str) -> Self {
            Self::new(vec![Ok(ReplyEnvelope {
                reply: Some(reply.to_string()),
            })])
        }

        async fn requests(&self) -> Vec<AskRequest> {
            self.requests.lock().await.clone()
        }
    }

    #[async_trait]
    impl ReplyTransport for ScriptedTransport {
        async fn exchange(&self, request: &AskRequest) -> Result<ReplyEnvelope> {
            self.requests.lock().await.push(request.clone());
            self.results
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| Ok(ReplyEnvelope::default()))
        }
    }

    /// Transport whose completions are controlled by the test: signals
    /// when an exchange starts and blocks until the matching gate fires.
    struct GatedTransport {
        entered: mpsc::UnboundedSender<String>,
        gates: Mutex<VecDeque<oneshot::Receiver<Result<ReplyEnvelope>>>>,
    }

    impl GatedTransport {
        fn new(
            gate_count: usize,
        ) -> (
            Self,
            mpsc::UnboundedReceiver<String>,
            Vec<oneshot::Sender<Result<ReplyEnvelope>>>,
        ) {
            let (entered_tx, entered_rx) = mpsc::unbounded_channel();
            let mut senders = Vec::new();
            let mut receivers = VecDeque::new();
            for _ in 0..gate_count {
                let (tx, rx) = oneshot::channel();
                senders.push(tx);
                receivers.push_back(rx);
            }
            (
                Self {
                    entered: entered_tx,
                    gates: Mutex::new(receivers),
                },
                entered_rx,
                senders,
            )
        }
    }

    #[async_trait]
    impl ReplyTransport for GatedTransport {
        async fn exchange(&self, request: &AskRequest) -> Result<ReplyEnvelope> {
            let gate = self
                .gates
                .lock()
                .await
                .pop_front()
                .expect("unexpected exchange");
            let _ = self.entered.send(request.message.clone());
            gate.await.expect("gate dropped")
        }
    }

    fn client_with(
        transport: Arc<ScriptedTransport>,
    ) -> (ChatClient, RecordingView, Arc<ScriptedTransport>) {
        let view = RecordingView::default();
        let client = ChatClient::new(transport.clone(), Box::new(view.clone()));
        (client, view, transport)
    }

    #[tokio::test]
    async fn whitespace_input_is_a_no_op() {
        for input in ["", "   ", "\t", " \n "] {
            let (client, view, transport) =
                client_with(Arc::new(ScriptedTransport::replying("unused")));

            client.send_message(input).await;

            assert_eq!(client.transcript().await, vec![]);
            assert_eq!(view.appended(), vec![]);
            assert!(transport.requests().await.is_empty());
        }
    }

    #[tokio::test]
    async fn input_is_trimmed_before_anything_else() {
        let (client, _view, transport) =
            client_with(Arc::new(ScriptedTransport::replying("Hi there")));

        client.send_message("  Hello  ").await;

        let transcript = client.transcript().await;
        assert_eq!(transcript[0], Message::user("Hello"));
        assert_eq!(
            transport.requests().await,
            vec![AskRequest {
                message: "Hello".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn successful_exchange_appends_user_then_bot() {
        let (client, view, _transport) =
            client_with(Arc::new(ScriptedTransport::replying("Hi there")));

        client.send_message("Hello").await;

        let expected = vec![Message::user("Hello"), Message::bot("Hi there")];
        assert_eq!(client.transcript().await, expected);
        assert_eq!(view.appended(), expected);
        assert_eq!(view.input_clears(), 1);
    }

    #[tokio::test]
    async fn missing_reply_renders_no_reply_placeholder() {
        let (client, _view, _transport) = client_with(Arc::new(ScriptedTransport::new(vec![Ok(
            ReplyEnvelope::default(),
        )])));

        client.send_message("Test").await;

        assert_eq!(
            client.transcript().await,
            vec![Message::user("Test"), Message::bot(NO_REPLY_PLACEHOLDER)]
        );
    }

    #[tokio::test]
    async fn transport_failure_renders_server_error_placeholder() {
        let (client, view, _transport) = client_with(Arc::new(ScriptedTransport::new(vec![Err(
            anyhow::anyhow!("connection refused"),
        )])));

        client.send_message("Test").await;

        assert_eq!(
            client.transcript().await,
            vec![Message::user("Test"), Message::bot(SERVER_ERROR_PLACEHOLDER)]
        );
        // The failure is absorbed, and the bot entry was still rendered
        assert_eq!(view.appended().len(), 2);
    }

    #[tokio::test]
    async fn exactly_one_bot_entry_per_invocation() {
        let (client, _view, _transport) = client_with(Arc::new(ScriptedTransport::new(vec![
            Ok(ReplyEnvelope {
                reply: Some("one".to_string()),
            }),
            Err(anyhow::anyhow!("down")),
            Ok(ReplyEnvelope::default()),
        ])));

        client.send_message("a").await;
        client.send_message("b").await;
        client.send_message("c").await;

        let transcript = client.transcript().await;
        assert_eq!(transcript.len(), 6);
        let bot_entries: Vec<_> = transcript
            .iter()
            .filter(|m| m.role == Role::Bot)
            .collect();
        assert_eq!(bot_entries.len(), 3);
    }

    #[tokio::test]
    async fn user_entry_is_rendered_before_the_request_is_issued() {
        let (transport, mut entered, mut gates) = GatedTransport::new(1);
        let view = RecordingView::default();
        let client = ChatClient::new(Arc::new(transport), Box::new(view.clone()));

        let task = {
            let client = client.clone();
            tokio::spawn(async move { client.send_message("Hello").await })
        };

        // The transport has been entered but not resolved: the user entry
        // must already be visible and the input already cleared.
        entered.recv().await.unwrap();
        assert_eq!(client.transcript().await, vec![Message::user("Hello")]);
        assert_eq!(view.appended(), vec![Message::user("Hello")]);
        assert_eq!(view.input_clears(), 1);

        gates
            .remove(0)
            .send(Ok(ReplyEnvelope {
                reply: Some("Hi there".to_string()),
            }))
            .unwrap();
        task.await.unwrap();

        assert_eq!(
            client.transcript().await,
            vec![Message::user("Hello"), Message::bot("Hi there")]
        );
    }

    #[tokio::test]
    async fn overlapping_sends_append_replies_in_completion_order() {
        let (transport, mut entered, mut gates) = GatedTransport::new(2);
        let client = ChatClient::new(Arc::new(transport), Box::new(RecordingView::default()));

        let first = {
            let client = client.clone();
            tokio::spawn(async move { client.send_message("first").await })
        };
        entered.recv().await.unwrap();
        let second = {
            let client = client.clone();
            tokio::spawn(async move { client.send_message("second").await })
        };
        entered.recv().await.unwrap();

        // Resolve the second exchange before the first
        gates
            .remove(1)
            .send(Ok(ReplyEnvelope {
                reply: Some("reply to second".to_string()),
            }))
            .unwrap();
        second.await.unwrap();
        gates
            .remove(0)
            .send(Ok(ReplyEnvelope {
                reply: Some("reply to first".to_string()),
            }))
            .unwrap();
        first.await.unwrap();

        assert_eq!(
            client.transcript().await,
            vec![
                Message::user("first"),
                Message::user("second"),
                Message::bot("reply to second"),
                Message::bot("reply to first"),
            ]
        );
    }
}
