//! The menu/chat state machine.
//!
//! One logical session per client: the `pending` flag enforces a single
//! outstanding completion request, and every path through `submit` clears
//! it before returning — no failure leaves the session stuck or the
//! transcript half-appended.

use std::sync::Arc;

use tracing::{debug, info, warn};

use atlas_core::completion::{CompletionClient, CompletionRequest, PromptMessage};
use atlas_core::{Domain, Message, Transcript};
use atlas_knowledge::GroundingSet;

use crate::prompt;

/// The two states of a client session.
pub enum SessionState {
    /// No domain selected, no transcript.
    Menu,
    /// An active conversation in one domain.
    Chat(ChatSession),
}

/// An active conversation: domain, transcript, in-flight flag.
pub struct ChatSession {
    domain: Domain,
    transcript: Transcript,
    pending: bool,
}

impl ChatSession {
    fn new(domain: Domain) -> Self {
        Self {
            domain,
            transcript: Transcript::with_greeting(domain.greeting()),
            pending: false,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Why a submit was rejected before any external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The question was empty or whitespace-only.
    EmptyQuestion,
    /// A request is already in flight for this session.
    RequestPending,
    /// The session is in the menu, not in a chat.
    NoActiveChat,
}

/// What happened to a submitted question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected before any external call; the transcript was not touched.
    Rejected(RejectReason),
    /// The completion service answered; the answer is in the transcript.
    Answered(String),
    /// The external call failed; the fixed failure text is in the transcript.
    Failed(String),
}

/// Drives one conversation session through domain selection, grounded
/// question submission, and return to the menu.
pub struct Orchestrator {
    state: SessionState,
    groundings: Arc<GroundingSet>,
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl Orchestrator {
    pub fn new(
        groundings: Arc<GroundingSet>,
        client: Arc<dyn CompletionClient>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            state: SessionState::Menu,
            groundings,
            client,
            model: model.into(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The active chat session, if any.
    pub fn session(&self) -> Option<&ChatSession> {
        match &self.state {
            SessionState::Chat(session) => Some(session),
            SessionState::Menu => None,
        }
    }

    /// Select a domain from the menu, synthesizing the greeting.
    ///
    /// Only defined from the menu; selecting during a chat is a no-op
    /// (switch domains with `back` then `select`). Returns whether the
    /// transition happened.
    pub fn select(&mut self, domain: Domain) -> bool {
        match self.state {
            SessionState::Menu => {
                info!(%domain, "Domain selected");
                self.state = SessionState::Chat(ChatSession::new(domain));
                true
            }
            SessionState::Chat(_) => {
                debug!(%domain, "Ignoring select during an active chat");
                false
            }
        }
    }

    /// Return to the menu, discarding domain and transcript unconditionally.
    pub fn back(&mut self) {
        self.state = SessionState::Menu;
    }

    /// Submit a question in the active chat.
    ///
    /// Appends the user message, builds the grounded request (system
    /// instruction with injected context, replayed history minus the
    /// greeting, then the question), and appends the answer — or the fixed
    /// failure text — once the call settles. `pending` is set for the
    /// duration of the call and always cleared.
    pub async fn submit(&mut self, question: &str) -> SubmitOutcome {
        let question = question.trim();

        let SessionState::Chat(session) = &mut self.state else {
            return SubmitOutcome::Rejected(RejectReason::NoActiveChat);
        };
        if question.is_empty() {
            return SubmitOutcome::Rejected(RejectReason::EmptyQuestion);
        }
        if session.pending {
            return SubmitOutcome::Rejected(RejectReason::RequestPending);
        }

        let request = match self.groundings.for_domain(session.domain) {
            Some(grounding) => {
                let context = grounding.context_for(question);
                let system = prompt::grounding_instruction(&context);

                let mut messages = Vec::with_capacity(session.transcript.len() + 1);
                messages.push(PromptMessage::system(system));
                messages.extend(session.transcript.replayable().iter().map(PromptMessage::from));
                messages.push(PromptMessage::user(question));

                Some(CompletionRequest {
                    model: self.model.clone(),
                    messages,
                })
            }
            None => {
                warn!(domain = %session.domain, "No grounding handler registered");
                None
            }
        };

        session.transcript.push(Message::user(question));

        let Some(request) = request else {
            // Internal wiring gap, surfaced exactly like an external failure.
            session
                .transcript
                .push(Message::assistant(prompt::GENERIC_FAILURE_TEXT));
            return SubmitOutcome::Failed(prompt::GENERIC_FAILURE_TEXT.to_string());
        };

        session.pending = true;
        let result = self.client.complete(request).await;

        match result {
            Ok(answer) => {
                session.transcript.push(Message::assistant(&answer));
                session.pending = false;
                SubmitOutcome::Answered(answer)
            }
            Err(error) => {
                warn!(%error, "Completion call failed");
                session
                    .transcript
                    .push(Message::assistant(prompt::GENERIC_FAILURE_TEXT));
                session.pending = false;
                SubmitOutcome::Failed(prompt::GENERIC_FAILURE_TEXT.to_string())
            }
        }
    }

    #[cfg(test)]
    fn force_pending(&mut self) {
        if let SessionState::Chat(session) = &mut self.state {
            session.pending = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_completion::SequentialMockClient;
    use atlas_core::completion::PromptRole;
    use atlas_core::error::CompletionError;
    use atlas_core::message::Role;

    fn orchestrator(client: Arc<SequentialMockClient>) -> Orchestrator {
        let groundings = Arc::new(GroundingSet::embedded().unwrap());
        Orchestrator::new(groundings, client, "mock-model")
    }

    #[test]
    fn starts_in_menu() {
        let orch = orchestrator(Arc::new(SequentialMockClient::new(vec![])));
        assert!(matches!(orch.state(), SessionState::Menu));
        assert!(orch.session().is_none());
    }

    #[test]
    fn select_synthesizes_one_greeting() {
        let mut orch = orchestrator(Arc::new(SequentialMockClient::new(vec![])));
        assert!(orch.select(Domain::WorkingTime));

        let session = orch.session().unwrap();
        assert_eq!(session.domain(), Domain::WorkingTime);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(
            session.transcript().messages()[0].content,
            Domain::WorkingTime.greeting()
        );
        assert!(!session.is_pending());
    }

    #[test]
    fn select_during_chat_is_a_no_op() {
        let mut orch = orchestrator(Arc::new(SequentialMockClient::new(vec![])));
        orch.select(Domain::WorkingTime);
        assert!(!orch.select(Domain::Training));
        assert_eq!(orch.session().unwrap().domain(), Domain::WorkingTime);
    }

    #[tokio::test]
    async fn submit_appends_user_then_answer() {
        let client = Arc::new(SequentialMockClient::single_text("Vous avez 20 jours ARTT."));
        let mut orch = orchestrator(client.clone());
        orch.select(Domain::WorkingTime);

        let outcome = orch.submit("Combien de jours ARTT ai-je ?").await;
        assert_eq!(
            outcome,
            SubmitOutcome::Answered("Vous avez 20 jours ARTT.".into())
        );

        let transcript = orch.session().unwrap().transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[1].role, Role::User);
        assert_eq!(transcript.messages()[2].role, Role::Assistant);
        assert_eq!(transcript.messages()[2].content, "Vous avez 20 jours ARTT.");
        assert!(!orch.session().unwrap().is_pending());
    }

    #[tokio::test]
    async fn request_is_system_history_then_question() {
        let client = Arc::new(SequentialMockClient::new(vec![
            Ok("Première réponse.".into()),
            Ok("Seconde réponse.".into()),
        ]));
        let mut orch = orchestrator(client.clone());
        orch.select(Domain::WorkingTime);

        orch.submit("Combien de jours ARTT ai-je ?").await;
        orch.submit("Et pour un temps partiel ?").await;

        let requests = client.requests();
        assert_eq!(requests.len(), 2);

        let second = &requests[1];
        assert_eq!(second.model, "mock-model");
        // system instruction with injected context
        assert_eq!(second.messages[0].role, PromptRole::System);
        assert!(second.messages[0].content.contains("DOCUMENTATION PERTINENTE"));
        assert!(second.messages[0].content.contains(prompt::REFUSAL_SENTENCE));
        // history minus greeting, then the new question
        assert_eq!(second.messages[1].role, PromptRole::User);
        assert_eq!(second.messages[1].content, "Combien de jours ARTT ai-je ?");
        assert_eq!(second.messages[2].role, PromptRole::Assistant);
        assert_eq!(second.messages[2].content, "Première réponse.");
        assert_eq!(second.messages[3].role, PromptRole::User);
        assert_eq!(second.messages[3].content, "Et pour un temps partiel ?");
        assert_eq!(second.messages.len(), 4);
    }

    #[tokio::test]
    async fn greeting_is_never_replayed() {
        let client = Arc::new(SequentialMockClient::single_text("Réponse."));
        let mut orch = orchestrator(client.clone());
        orch.select(Domain::Training);

        orch.submit("Comment utiliser mon CPF ?").await;

        let greeting = Domain::Training.greeting();
        for message in &client.requests()[0].messages {
            assert_ne!(message.content, greeting);
        }
    }

    #[tokio::test]
    async fn ranked_context_is_injected_for_working_time() {
        let client = Arc::new(SequentialMockClient::single_text("Réponse."));
        let mut orch = orchestrator(client.clone());
        orch.select(Domain::WorkingTime);

        orch.submit("Combien de jours ARTT ai-je ?").await;

        let system = &client.requests()[0].messages[0].content;
        assert!(system.contains("Source: ARTT et réduction du temps de travail"));
    }

    #[tokio::test]
    async fn whole_document_is_injected_for_remote_work() {
        let client = Arc::new(SequentialMockClient::single_text("Réponse."));
        let mut orch = orchestrator(client.clone());
        orch.select(Domain::RemoteWork);

        orch.submit("Quels jours sont autorisés ?").await;

        let system = &client.requests()[0].messages[0].content;
        assert!(system.contains("CHARTE DU TÉLÉTRAVAIL"));
    }

    #[tokio::test]
    async fn empty_question_never_mutates_transcript() {
        let client = Arc::new(SequentialMockClient::new(vec![]));
        let mut orch = orchestrator(client.clone());
        orch.select(Domain::WorkingTime);

        for question in ["", "   ", "\t\n"] {
            let outcome = orch.submit(question).await;
            assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::EmptyQuestion));
        }
        assert_eq!(orch.session().unwrap().transcript().len(), 1);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn submit_while_pending_never_mutates_transcript() {
        let client = Arc::new(SequentialMockClient::new(vec![]));
        let mut orch = orchestrator(client.clone());
        orch.select(Domain::WorkingTime);
        orch.force_pending();

        let outcome = orch.submit("Une question valide").await;
        assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::RequestPending));
        assert_eq!(orch.session().unwrap().transcript().len(), 1);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn submit_from_menu_is_rejected() {
        let client = Arc::new(SequentialMockClient::new(vec![]));
        let mut orch = orchestrator(client.clone());

        let outcome = orch.submit("Une question").await;
        assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::NoActiveChat));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn external_failure_appends_exactly_two_messages() {
        let client = Arc::new(SequentialMockClient::failing(CompletionError::Api {
            status_code: 500,
            message: "Internal Server Error".into(),
        }));
        let mut orch = orchestrator(client.clone());
        orch.select(Domain::WorkingTime);

        let before = orch.session().unwrap().transcript().len();
        let outcome = orch.submit("Combien de jours ARTT ai-je ?").await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed(prompt::GENERIC_FAILURE_TEXT.into())
        );
        let session = orch.session().unwrap();
        assert_eq!(session.transcript().len(), before + 2);
        assert_eq!(
            session.transcript().last().unwrap().content,
            prompt::GENERIC_FAILURE_TEXT
        );
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn conversation_continues_after_a_failure() {
        let client = Arc::new(SequentialMockClient::new(vec![
            Err(CompletionError::Network("timeout".into())),
            Ok("Réponse après reprise.".into()),
        ]));
        let mut orch = orchestrator(client.clone());
        orch.select(Domain::WorkingTime);

        orch.submit("Première question").await;
        let outcome = orch.submit("Seconde question").await;

        assert_eq!(outcome, SubmitOutcome::Answered("Réponse après reprise.".into()));
        assert_eq!(orch.session().unwrap().transcript().len(), 5);
    }

    #[tokio::test]
    async fn back_then_select_resets_to_one_greeting() {
        let client = Arc::new(SequentialMockClient::single_text("Réponse."));
        let mut orch = orchestrator(client.clone());
        orch.select(Domain::WorkingTime);
        orch.submit("Combien de jours ARTT ai-je ?").await;
        assert_eq!(orch.session().unwrap().transcript().len(), 3);

        orch.back();
        assert!(matches!(orch.state(), SessionState::Menu));

        orch.select(Domain::RemoteWork);
        let session = orch.session().unwrap();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(
            session.transcript().messages()[0].content,
            Domain::RemoteWork.greeting()
        );
    }
}
