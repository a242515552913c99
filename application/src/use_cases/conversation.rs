//! Conversation session use case.
//!
//! Drives one request/response cycle per user message:
//!
//! 1. Append the user turn (visible to observers immediately)
//! 2. Mark the session busy
//! 3. Translate the full history into a [`CompletionRequest`]
//! 4. Call the [`CompletionClient`] once
//! 5. Append the reply, a placeholder, or an error description
//! 6. Clear busy on every exit path
//!
//! Remote failures never escape [`ConversationSession::send_message`]; they
//! become ordinary assistant turns.

use crate::ports::completion::{CompletionClient, GatewayError};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, EventKind};
use crate::store::{History, MessageStore, StatusFlag};
use chatbot_domain::{CompletionRequest, Model, Turn, preview};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Assistant content used when the model returns no usable text.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response received";

/// Prefix of every assistant turn describing a failed request.
pub const ERROR_PREFIX: &str = "Error: ";

/// Description used when a failure carries none of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// How a message's request settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The model returned text.
    Answered,
    /// The model returned no usable text; the placeholder was appended.
    Empty,
    /// The request failed; an error description was appended.
    Failed,
}

/// The assistant turn appended for one message, with how it came about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub turn: Turn,
    pub outcome: ReplyOutcome,
}

impl Reply {
    pub fn is_failure(&self) -> bool {
        self.outcome == ReplyOutcome::Failed
    }
}

/// Content of the assistant turn recorded for a failed request.
pub fn error_turn_content(error: &GatewayError) -> String {
    format!(
        "{}{}",
        ERROR_PREFIX,
        error
            .description()
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
    )
}

/// One conversation with a fixed model.
///
/// Overlapping `send_message` calls are neither queued nor rejected: their
/// user turns are appended in call order and their replies in settlement
/// order. Callers that need strict user/assistant pairing await each call
/// before issuing the next.
pub struct ConversationSession {
    client: Arc<dyn CompletionClient>,
    model: Model,
    store: MessageStore,
    status: StatusFlag,
    conversation_logger: Option<Arc<dyn ConversationLogger>>,
}

impl ConversationSession {
    pub fn new(client: Arc<dyn CompletionClient>, model: Model) -> Self {
        Self {
            client,
            model,
            store: MessageStore::new(),
            status: StatusFlag::new(),
            conversation_logger: None,
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = Some(logger);
        self
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Current turn log.
    pub fn history(&self) -> History {
        self.store.snapshot()
    }

    pub fn subscribe_history(&self) -> watch::Receiver<History> {
        self.store.subscribe()
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    pub fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.status.subscribe()
    }

    /// Send a user message and integrate the model's answer.
    ///
    /// Blank input is ignored and returns `None` without touching history
    /// or the busy flag. Otherwise returns the assistant turn that was
    /// appended.
    pub async fn send_message(&self, text: &str) -> Option<Reply> {
        let user_turn = match Turn::try_user(text) {
            Ok(turn) => turn,
            Err(_) => {
                debug!("Ignoring blank message");
                return None;
            }
        };

        let history = self.store.append(user_turn);
        let _busy = self.status.enter();

        info!(
            "Sending message ({} turns in history): {}",
            history.len(),
            preview(text, 80)
        );
        self.record(
            EventKind::UserMessage,
            serde_json::json!({
                "model": self.model.to_string(),
                "turn": history.len(),
                "text": text,
            }),
        );

        let request = CompletionRequest::from_history(self.model.clone(), &history);
        let (content, outcome) = self.complete(request).await;

        let turn = Turn::assistant(content);
        self.store.append(turn.clone());

        Some(Reply { turn, outcome })
    }

    fn record(&self, kind: EventKind, payload: serde_json::Value) {
        if let Some(logger) = &self.conversation_logger {
            logger.log(ConversationEvent::new(kind, payload));
        }
    }

    // Single error boundary around the transport call.
    async fn complete(&self, request: CompletionRequest) -> (String, ReplyOutcome) {
        let started = Instant::now();
        let message_count = request.messages.len();

        match self.client.complete(request).await {
            Ok(response) => {
                let elapsed_ms = elapsed_millis(started.elapsed());
                match response.first_content() {
                    Some(content) => {
                        info!(
                            "Completion from {} in {}ms ({} bytes)",
                            self.model,
                            elapsed_ms,
                            content.len()
                        );
                        self.record(
                            EventKind::AssistantResponse,
                            serde_json::json!({
                                "model": self.model.to_string(),
                                "messages_sent": message_count,
                                "elapsed_ms": elapsed_ms,
                                "bytes": content.len(),
                                "text": content,
                            }),
                        );
                        (content.to_string(), ReplyOutcome::Answered)
                    }
                    None => {
                        warn!(
                            "Completion from {} carried no content ({} choices)",
                            self.model,
                            response.choices.len()
                        );
                        self.record(
                            EventKind::AssistantResponse,
                            serde_json::json!({
                                "model": self.model.to_string(),
                                "messages_sent": message_count,
                                "elapsed_ms": elapsed_ms,
                                "bytes": 0,
                                "text": null,
                            }),
                        );
                        (NO_RESPONSE_PLACEHOLDER.to_string(), ReplyOutcome::Empty)
                    }
                }
            }
            Err(error) => {
                warn!("Completion from {} failed: {}", self.model, error);
                self.record(
                    EventKind::CompletionError,
                    serde_json::json!({
                        "model": self.model.to_string(),
                        "messages_sent": message_count,
                        "error": error.to_string(),
                    }),
                );
                (error_turn_content(&error), ReplyOutcome::Failed)
            }
        }
    }
}

fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chatbot_domain::{ChatRole, CompletionResponse, Speaker};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::{Notify, mpsc, oneshot};

    // ==================== Test Mocks ====================

    struct MockClient {
        responses: Mutex<VecDeque<Result<CompletionResponse, GatewayError>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockClient {
        fn new(responses: Vec<Result<CompletionResponse, GatewayError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn replying(texts: &[&str]) -> Self {
            Self::new(
                texts
                    .iter()
                    .map(|t| Ok(CompletionResponse::from_text(*t)))
                    .collect(),
            )
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for MockClient {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, GatewayError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
        }
    }

    /// Holds every call until released, announcing each arrival.
    struct GatedClient {
        arrived: mpsc::UnboundedSender<()>,
        gates: Mutex<VecDeque<oneshot::Receiver<CompletionResponse>>>,
    }

    #[async_trait]
    impl CompletionClient for GatedClient {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, GatewayError> {
            let gate = self.gates.lock().unwrap().pop_front();
            let _ = self.arrived.send(());
            match gate {
                Some(gate) => gate.await.map_err(|_| GatewayError::Other(String::new())),
                None => Err(GatewayError::Other("No gate".to_string())),
            }
        }
    }

    /// Never completes, for cancellation tests.
    struct HangingClient {
        entered: Notify,
    }

    #[async_trait]
    impl CompletionClient for HangingClient {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, GatewayError> {
            self.entered.notify_one();
            std::future::pending::<Result<CompletionResponse, GatewayError>>().await
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(EventKind, serde_json::Value)>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.kind, event.payload));
        }
    }

    fn session_with(client: Arc<dyn CompletionClient>) -> ConversationSession {
        ConversationSession::new(client, Model::default())
    }

    fn contents(history: &History) -> Vec<(Speaker, String)> {
        history
            .iter()
            .map(|t| (t.speaker(), t.content().to_string()))
            .collect()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_successful_reply_is_appended() {
        let client = Arc::new(MockClient::replying(&["Hi there!"]));
        let session = session_with(client.clone());

        let reply = session.send_message("Hello").await.unwrap();

        assert_eq!(reply.outcome, ReplyOutcome::Answered);
        assert_eq!(reply.turn.content(), "Hi there!");
        assert_eq!(
            contents(&session.history()),
            vec![
                (Speaker::User, "Hello".to_string()),
                (Speaker::Assistant, "Hi there!".to_string()),
            ]
        );
        assert!(!session.is_busy());
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_input_is_noop() {
        let client = Arc::new(MockClient::replying(&["unused"]));
        let session = session_with(client.clone());
        let mut busy_rx = session.subscribe_busy();

        for blank in ["", "   ", "\n\t", " \r\n "] {
            assert!(session.send_message(blank).await.is_none());
        }

        assert!(session.history().is_empty());
        assert!(!session.is_busy());
        assert!(!busy_rx.has_changed().unwrap());
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_becomes_unknown_error_turn() {
        let client = Arc::new(MockClient::new(vec![Err(GatewayError::Timeout)]));
        let session = session_with(client);

        let reply = session.send_message("Ping").await.unwrap();

        assert!(reply.is_failure());
        assert_eq!(
            contents(&session.history()),
            vec![
                (Speaker::User, "Ping".to_string()),
                (
                    Speaker::Assistant,
                    "Error: Unknown error occurred".to_string()
                ),
            ]
        );
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_described_error_uses_its_description() {
        let client = Arc::new(MockClient::new(vec![Err(GatewayError::Authentication(
            "invalid api key".to_string(),
        ))]));
        let session = session_with(client);

        let reply = session.send_message("Ping").await.unwrap();

        assert_eq!(
            reply.turn.content(),
            "Error: Authentication failed: invalid api key"
        );
        assert_eq!(reply.turn.speaker(), Speaker::Assistant);
    }

    #[tokio::test]
    async fn test_missing_content_uses_placeholder() {
        let client = Arc::new(MockClient::new(vec![
            Ok(CompletionResponse::from_content(None)),
            Ok(CompletionResponse::default()),
        ]));
        let session = session_with(client);

        let first = session.send_message("one").await.unwrap();
        let second = session.send_message("two").await.unwrap();

        assert_eq!(first.outcome, ReplyOutcome::Empty);
        assert_eq!(first.turn.content(), "No response received");
        assert_eq!(second.outcome, ReplyOutcome::Empty);
        assert_eq!(second.turn.content(), "No response received");
        assert_eq!(session.history().len(), 4);
    }

    #[tokio::test]
    async fn test_sequential_messages_alternate_and_resend_history() {
        let client = Arc::new(MockClient::replying(&["r1", "r2", "r3"]));
        let session = session_with(client.clone());

        for text in ["m1", "m2", "m3"] {
            session.send_message(text).await.unwrap();
        }

        let history = session.history();
        assert_eq!(history.len(), 6);
        for (i, turn) in history.iter().enumerate() {
            let expected = if i % 2 == 0 {
                Speaker::User
            } else {
                Speaker::Assistant
            };
            assert_eq!(turn.speaker(), expected);
        }
        let texts: Vec<_> = history.iter().map(|t| t.content()).collect();
        assert_eq!(texts, vec!["m1", "r1", "m2", "r2", "m3", "r3"]);
        assert!(
            history
                .windows(2)
                .all(|w| w[0].created_at() <= w[1].created_at())
        );

        // Every request carries the whole history so far, ending in the new user turn
        let requests = client.requests();
        let sizes: Vec<_> = requests.iter().map(|r| r.messages.len()).collect();
        assert_eq!(sizes, vec![1, 3, 5]);
        let last = &requests[2];
        assert_eq!(last.model, Model::default());
        assert_eq!(last.messages[3].role, ChatRole::Assistant);
        assert_eq!(last.messages[3].content, "r2");
        assert_eq!(last.messages[4].role, ChatRole::User);
        assert_eq!(last.messages[4].content, "m3");
    }

    #[tokio::test]
    async fn test_error_turns_are_resent_as_assistant_messages() {
        let client = Arc::new(MockClient::new(vec![
            Err(GatewayError::Timeout),
            Ok(CompletionResponse::from_text("back online")),
        ]));
        let session = session_with(client.clone());

        session.send_message("first").await.unwrap();
        session.send_message("second").await.unwrap();

        let second_request = &client.requests()[1];
        assert_eq!(second_request.messages[1].role, ChatRole::Assistant);
        assert_eq!(
            second_request.messages[1].content,
            "Error: Unknown error occurred"
        );
    }

    #[tokio::test]
    async fn test_busy_while_request_outstanding() {
        let (arrived_tx, mut arrived_rx) = mpsc::unbounded_channel();
        let (release, gate) = oneshot::channel();
        let client = Arc::new(GatedClient {
            arrived: arrived_tx,
            gates: Mutex::new(VecDeque::from(vec![gate])),
        });
        let session = Arc::new(session_with(client));

        let task = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.send_message("Hello").await })
        };

        arrived_rx.recv().await.unwrap();
        assert!(session.is_busy());
        assert_eq!(
            contents(&session.history()),
            vec![(Speaker::User, "Hello".to_string())]
        );

        release
            .send(CompletionResponse::from_text("Hi there!"))
            .unwrap();
        let reply = task.await.unwrap().unwrap();

        assert_eq!(reply.turn.content(), "Hi there!");
        assert!(!session.is_busy());
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn test_overlapping_calls_interleave_in_settlement_order() {
        let (arrived_tx, mut arrived_rx) = mpsc::unbounded_channel();
        let (release_first, first_gate) = oneshot::channel();
        let (release_second, second_gate) = oneshot::channel();
        let client = Arc::new(GatedClient {
            arrived: arrived_tx,
            gates: Mutex::new(VecDeque::from(vec![first_gate, second_gate])),
        });
        let session = Arc::new(session_with(client));

        let first = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.send_message("first").await })
        };
        arrived_rx.recv().await.unwrap();
        let second = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.send_message("second").await })
        };
        arrived_rx.recv().await.unwrap();

        release_second
            .send(CompletionResponse::from_text("answer to second"))
            .unwrap();
        second.await.unwrap().unwrap();
        assert!(session.is_busy(), "first request is still outstanding");

        release_first
            .send(CompletionResponse::from_text("answer to first"))
            .unwrap();
        first.await.unwrap().unwrap();
        assert!(!session.is_busy());

        let texts: Vec<_> = session
            .history()
            .iter()
            .map(|t| t.content().to_string())
            .collect();
        assert_eq!(
            texts,
            vec!["first", "second", "answer to second", "answer to first"]
        );
    }

    #[tokio::test]
    async fn test_cancelled_call_clears_busy_without_partial_turn() {
        let client = Arc::new(HangingClient {
            entered: Notify::new(),
        });
        let session = session_with(client.clone());

        let result = tokio::time::timeout(Duration::from_millis(50), async {
            tokio::join!(session.send_message("stuck"), async {
                client.entered.notified().await;
                assert!(session.is_busy());
            })
        })
        .await;

        assert!(result.is_err());
        assert!(!session.is_busy());
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_history_subscribers_see_user_turn_before_reply() {
        let client = Arc::new(MockClient::replying(&["pong"]));
        let session = session_with(client);
        let mut history_rx = session.subscribe_history();

        session.send_message("ping").await.unwrap();

        assert!(history_rx.has_changed().unwrap());
        assert_eq!(history_rx.borrow_and_update().len(), 2);
    }

    #[tokio::test]
    async fn test_transcript_events_are_logged() {
        let logger = Arc::new(RecordingLogger::default());
        let client = Arc::new(MockClient::new(vec![
            Ok(CompletionResponse::from_text("Hi there!")),
            Err(GatewayError::Connection("refused".to_string())),
        ]));
        let session = session_with(client).with_conversation_logger(logger.clone());

        session.send_message("Hello").await.unwrap();
        session.send_message("Again").await.unwrap();
        session.send_message("   ").await;

        let events = logger.events.lock().unwrap();
        let types: Vec<_> = events.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            types,
            vec![
                EventKind::UserMessage,
                EventKind::AssistantResponse,
                EventKind::UserMessage,
                EventKind::CompletionError
            ]
        );
        assert_eq!(events[1].1["text"], "Hi there!");
        assert_eq!(events[3].1["error"], "Connection error: refused");
    }

    #[test]
    fn test_elapsed_millis_saturates() {
        assert_eq!(elapsed_millis(Duration::from_millis(1500)), 1500);
        assert_eq!(elapsed_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_error_turn_content() {
        assert_eq!(
            error_turn_content(&GatewayError::Timeout),
            "Error: Unknown error occurred"
        );
        assert_eq!(
            error_turn_content(&GatewayError::RateLimited("slow down".to_string())),
            "Error: Rate limited: slow down"
        );
    }
}
