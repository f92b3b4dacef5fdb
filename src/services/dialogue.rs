use std::sync::Arc;

use crate::models::dialogue::{DONE_NOTICE, RESTART_NOTICE};
use crate::models::{
    AppointmentDraft, DialogueEvent, DialogueState, Effect, ListenOptions, Polarity,
    RecognitionResult, Session, SlotValue, Turn, TurnSnapshot,
};
use crate::services::grammar::Grammar;
use crate::services::matcher::UtteranceMatcher;

/// Turn controller for the booking dialogue.
///
/// Every event goes through [`DialogueController::handle`], which returns the
/// side effects the caller must carry out. The controller never performs I/O;
/// at most one speak or listen is requested per event.
pub struct DialogueController {
    state: DialogueState,
    session: Option<Session>,
    matcher: UtteranceMatcher,
    listen: ListenOptions,
}

impl DialogueController {
    pub fn new(grammar: Arc<Grammar>, listen: ListenOptions) -> Self {
        Self {
            state: DialogueState::Preparing,
            session: None,
            matcher: UtteranceMatcher::new(grammar),
            listen,
        }
    }

    /// Effects to run before the first event: prepare the speech backend.
    pub fn boot(&self) -> Vec<Effect> {
        vec![Effect::Prepare]
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn draft(&self) -> Option<&AppointmentDraft> {
        self.session.as_ref().map(|s| &s.draft)
    }

    pub fn snapshot(&self) -> TurnSnapshot {
        self.state.into()
    }

    pub fn handle(&mut self, event: DialogueEvent) -> Vec<Effect> {
        let before = self.state;
        let (next, effects) = self.transition(before, event);
        if next != before {
            tracing::debug!(from = ?before, to = ?next, "dialogue transition");
        }
        self.state = next;
        effects
    }

    fn transition(
        &mut self,
        state: DialogueState,
        event: DialogueEvent,
    ) -> (DialogueState, Vec<Effect>) {
        match (state, event) {
            (DialogueState::Preparing, DialogueEvent::Ready) => (DialogueState::Idle, vec![]),

            (DialogueState::Idle | DialogueState::Done, DialogueEvent::Start) => {
                let session = Session::new();
                tracing::info!(session = %session.id, "booking attempt started");
                self.session = Some(session);
                self.prompt(Turn::Greeting)
            }

            (DialogueState::Prompting(turn), DialogueEvent::SpeakComplete) => (
                DialogueState::Listening(turn),
                vec![Effect::Listen(self.listen)],
            ),

            (DialogueState::Reprompting(turn), DialogueEvent::SpeakComplete) => self.prompt(turn),

            (DialogueState::Listening(turn), DialogueEvent::Recognised(result)) => {
                self.answer(turn, &result)
            }

            (DialogueState::Done, DialogueEvent::SpeakComplete) => (DialogueState::Done, vec![]),

            (state, event) => {
                tracing::debug!(state = state.name(), event = event.as_str(), "event ignored");
                (state, vec![])
            }
        }
    }

    fn prompt(&mut self, turn: Turn) -> (DialogueState, Vec<Effect>) {
        let text = turn.prompt(self.draft_mut());
        (DialogueState::Prompting(turn), vec![Effect::Speak(text)])
    }

    fn answer(&mut self, turn: Turn, result: &RecognitionResult) -> (DialogueState, Vec<Effect>) {
        let heard = result.best();
        let outcome = self.matcher.classify(heard, turn.expected_kind());

        tracing::info!(turn = turn.as_str(), heard = %heard, matched = outcome.is_ok(), "answer received");

        match (turn, outcome) {
            (Turn::Greeting, Ok(SlotValue::Response(Polarity::Positive))) => {
                self.prompt(Turn::AskPerson)
            }

            (Turn::AskPerson, Ok(SlotValue::Person(person))) => {
                self.draft_mut().person = Some(person);
                self.prompt(Turn::AskDay)
            }

            (Turn::AskDay, Ok(SlotValue::Day(day))) => {
                self.draft_mut().day = Some(day);
                self.prompt(Turn::AskAllDay)
            }

            (Turn::AskAllDay, Ok(SlotValue::Response(Polarity::Positive))) => {
                self.draft_mut().is_all_day = Some(true);
                self.prompt(Turn::ConfirmAllDay)
            }

            (Turn::AskAllDay, Ok(SlotValue::Response(Polarity::Negative))) => {
                self.draft_mut().is_all_day = Some(false);
                self.prompt(Turn::AskTime)
            }

            (Turn::AskTime, Ok(SlotValue::Time(time))) => {
                self.draft_mut().time = Some(time);
                self.prompt(Turn::ConfirmTimed)
            }

            (
                Turn::ConfirmTimed | Turn::ConfirmAllDay,
                Ok(SlotValue::Response(Polarity::Positive)),
            ) => self.book(),

            (
                Turn::ConfirmTimed | Turn::ConfirmAllDay,
                Ok(SlotValue::Response(Polarity::Negative)),
            ) => self.restart(),

            (turn, outcome) => {
                if let Err(e) = &outcome {
                    tracing::info!(turn = turn.as_str(), reason = %e, "re-asking");
                }
                if let Some(session) = self.session.as_mut() {
                    session.corrections += 1;
                }
                (
                    DialogueState::Reprompting(turn),
                    vec![Effect::Speak(turn.correction(heard))],
                )
            }
        }
    }

    fn book(&mut self) -> (DialogueState, Vec<Effect>) {
        let appointment = self.draft().and_then(AppointmentDraft::complete);

        match appointment {
            Some(appointment) => {
                if let Some(session) = self.session.take() {
                    tracing::info!(
                        session = %session.id,
                        appointment = %appointment.id,
                        corrections = session.corrections,
                        "appointment booked: {}",
                        appointment.summary()
                    );
                }
                (
                    DialogueState::Done,
                    vec![
                        Effect::Book(appointment),
                        Effect::Speak(DONE_NOTICE.to_string()),
                    ],
                )
            }
            None => {
                tracing::warn!("confirmation reached with an incomplete draft, starting over");
                self.restart()
            }
        }
    }

    fn restart(&mut self) -> (DialogueState, Vec<Effect>) {
        *self.draft_mut() = AppointmentDraft::default();
        (
            DialogueState::Reprompting(Turn::AskPerson),
            vec![Effect::Speak(RESTART_NOTICE.to_string())],
        )
    }

    fn draft_mut(&mut self) -> &mut AppointmentDraft {
        &mut self.session.get_or_insert_with(Session::new).draft
    }
}
