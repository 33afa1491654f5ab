//! Conversation log
//!
//! Append-only transcript of chat messages. Each user message schedules an
//! independent bot reply on the tokio runtime after a fixed delay. Replies are
//! never deduplicated or coalesced, and land strictly by completion time.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

/// Sender of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Message typed by the user
    User,
    /// Synthesized reply
    Bot,
}

impl Sender {
    /// Convert the sender to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for the message
    pub id: String,
    /// Message text as entered
    pub text: String,
    /// Who sent it
    pub sender: Sender,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(text: String, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// Synthesizes the bot's reply text
pub trait Responder: Send + Sync {
    /// Produce a reply for the agent and ability selected when the user sent
    fn respond(&self, agent_name: Option<&str>, ability: Option<&str>) -> String;
}

impl<F> Responder for F
where
    F: Fn(Option<&str>, Option<&str>) -> String + Send + Sync,
{
    fn respond(&self, agent_name: Option<&str>, ability: Option<&str>) -> String {
        self(agent_name, ability)
    }
}

/// Fixed-template responder
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateResponder;

impl Responder for TemplateResponder {
    fn respond(&self, agent_name: Option<&str>, ability: Option<&str>) -> String {
        format!(
            "This is a response from {} about {}",
            agent_name.unwrap_or("the bot"),
            ability.unwrap_or("general topics")
        )
    }
}

/// Callback invoked after a reply lands
pub type ChangeNotifier = Arc<dyn Fn() + Send + Sync>;

/// Handle to a scheduled reply
///
/// Dropping the handle leaves the reply scheduled.
#[derive(Debug)]
pub struct PendingReply {
    task: JoinHandle<()>,
}

impl PendingReply {
    /// Cancel the reply if it has not landed yet
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Whether the reply task has completed (or was cancelled)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the reply to land
    ///
    /// Returns false if the reply was cancelled.
    pub async fn join(self) -> bool {
        self.task.await.is_ok()
    }
}

/// Append-only message log with a pluggable responder
pub struct ConversationLog {
    messages: Arc<Mutex<Vec<Message>>>,
    responder: Arc<dyn Responder>,
    reply_delay: Duration,
    runtime: Handle,
    notifier: Option<ChangeNotifier>,
}

impl fmt::Debug for ConversationLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationLog")
            .field("messages", &self.len())
            .field("reply_delay", &self.reply_delay)
            .finish_non_exhaustive()
    }
}

impl ConversationLog {
    /// Create an empty log using the template responder
    pub fn new(runtime: Handle, reply_delay: Duration) -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(TemplateResponder),
            reply_delay,
            runtime,
            notifier: None,
        }
    }

    /// Replace the responder
    pub fn with_responder<R: Responder + 'static>(mut self, responder: R) -> Self {
        self.responder = Arc::new(responder);
        self
    }

    /// Register a callback fired after each reply is appended
    pub fn set_notifier(&mut self, notifier: ChangeNotifier) {
        self.notifier = Some(notifier);
    }

    /// Configured reply delay
    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Append a message; blank text is rejected and the log left untouched
    pub fn append(&self, text: &str, sender: Sender) -> Result<Message, AppError> {
        append_to(&self.messages, text, sender)
    }

    /// Append a user message and schedule the bot's reply
    ///
    /// The agent name and ability are captured now, not when the reply lands.
    pub fn send(
        &self,
        text: &str,
        agent_name: Option<&str>,
        ability: Option<&str>,
    ) -> Result<PendingReply, AppError> {
        let message = self.append(text, Sender::User)?;
        info!(
            message_id = %message.id,
            agent = agent_name.unwrap_or("-"),
            ability = ability.unwrap_or("-"),
            "User message sent"
        );

        let messages = Arc::clone(&self.messages);
        let responder = Arc::clone(&self.responder);
        let notifier = self.notifier.clone();
        let delay = self.reply_delay;
        let agent_name = agent_name.map(str::to_string);
        let ability = ability.map(str::to_string);

        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let text = responder.respond(agent_name.as_deref(), ability.as_deref());
            match append_to(&messages, &text, Sender::Bot) {
                Ok(reply) => debug!(message_id = %reply.id, "Bot reply appended"),
                Err(e) => debug!(error = %e, "Responder produced an empty reply"),
            }
            if let Some(notify) = notifier {
                notify();
            }
        });

        Ok(PendingReply { task })
    }

    /// Messages in append order
    pub fn history(&self) -> Vec<Message> {
        lock(&self.messages).clone()
    }

    /// Number of messages in the log
    pub fn len(&self) -> usize {
        lock(&self.messages).len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock(messages: &Mutex<Vec<Message>>) -> MutexGuard<'_, Vec<Message>> {
    // Appends are single pushes, so a poisoned log is still consistent
    messages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn append_to(messages: &Mutex<Vec<Message>>, text: &str, sender: Sender) -> Result<Message, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::EmptyMessage);
    }
    let message = Message::new(text.to_string(), sender);
    lock(messages).push(message.clone());
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DELAY: Duration = Duration::from_millis(1000);

    fn log() -> ConversationLog {
        ConversationLog::new(Handle::current(), DELAY)
    }

    async fn wait_past_delay() {
        tokio::time::sleep(DELAY + Duration::from_millis(1)).await;
    }

    #[test]
    fn test_template_responder() {
        let r = TemplateResponder;
        assert_eq!(
            r.respond(None, None),
            "This is a response from the bot about general topics"
        );
        assert_eq!(
            r.respond(Some("Nova"), Some("Travel Planning")),
            "This is a response from Nova about Travel Planning"
        );
    }

    #[test]
    fn test_sender_serialization() {
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
        assert_eq!(Sender::User.as_str(), "user");
    }

    #[tokio::test]
    async fn test_append_rejects_blank_text() {
        let log = log();
        assert!(matches!(log.append("", Sender::User), Err(AppError::EmptyMessage)));
        assert!(matches!(log.append("  \n\t", Sender::User), Err(AppError::EmptyMessage)));
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_append_keeps_order_and_text() {
        let log = log();
        let first = log.append(" hello ", Sender::User).unwrap();
        log.append("hi there", Sender::Bot).unwrap();

        let history = log.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], first);
        assert_eq!(history[0].text, " hello ");
        assert_eq!(history[1].sender, Sender::Bot);
        assert_ne!(history[0].id, history[1].id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_schedules_reply_after_delay() {
        let log = log();
        log.send("hello", Some("Mark"), Some("Event Planning")).unwrap();

        tokio::time::sleep(DELAY / 2).await;
        assert_eq!(log.len(), 1);

        wait_past_delay().await;
        let history = log.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].sender, Sender::Bot);
        assert_eq!(history[1].text, "This is a response from Mark about Event Planning");
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_send_schedules_nothing() {
        let log = log();
        assert!(log.send("   ", None, None).is_err());
        wait_past_delay().await;
        assert!(log.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_send_gets_its_own_reply() {
        let log = log();
        log.send("one", None, None).unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        log.send("two", None, None).unwrap();

        wait_past_delay().await;
        let senders: Vec<Sender> = log.history().iter().map(|m| m.sender).collect();
        assert_eq!(senders, vec![Sender::User, Sender::User, Sender::Bot, Sender::Bot]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_reply() {
        let log = log();
        let pending = log.send("hello", None, None).unwrap();
        pending.cancel();

        assert!(!pending.join().await);
        wait_past_delay().await;
        assert_eq!(log.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_still_replies() {
        let log = log();
        let pending = log.send("hello", None, None).unwrap();
        assert!(!pending.is_finished());
        drop(pending);
        wait_past_delay().await;
        assert_eq!(log.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_responder_and_notifier() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut log = log().with_responder(|agent: Option<&str>, _: Option<&str>| {
            format!("echo from {}", agent.unwrap_or("nobody"))
        });
        log.set_notifier(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let pending = log.send("ping", Some("Luna"), None).unwrap();
        assert!(pending.join().await);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(log.history()[1].text, "echo from Luna");
    }
}
