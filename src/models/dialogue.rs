use chrono::{DateTime, Utc};
use serde::Serialize;

use super::appointment::{Appointment, AppointmentDraft};
use super::slot::SlotKind;
use super::speech::{ListenOptions, RecognitionResult};

/// One question of the booking dialogue.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Turn {
    Greeting,
    AskPerson,
    AskDay,
    AskAllDay,
    AskTime,
    ConfirmTimed,
    ConfirmAllDay,
}

impl Turn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Turn::Greeting => "Greeting",
            Turn::AskPerson => "AskPerson",
            Turn::AskDay => "AskDay",
            Turn::AskAllDay => "AskAllDay",
            Turn::AskTime => "AskTime",
            Turn::ConfirmTimed => "ConfirmTimed",
            Turn::ConfirmAllDay => "ConfirmAllDay",
        }
    }

    pub fn expected_kind(&self) -> SlotKind {
        match self {
            Turn::AskPerson => SlotKind::Person,
            Turn::AskDay => SlotKind::Day,
            Turn::AskTime => SlotKind::Time,
            Turn::Greeting | Turn::AskAllDay | Turn::ConfirmTimed | Turn::ConfirmAllDay => {
                SlotKind::Response
            }
        }
    }

    pub fn prompt(&self, draft: &AppointmentDraft) -> String {
        let person = draft.person.as_deref().unwrap_or_default();
        let day = draft.day.as_deref().unwrap_or_default();
        match self {
            Turn::Greeting => "Hi! Let's create an appointment. Shall we?".to_string(),
            Turn::AskPerson => "Who are you meeting with?".to_string(),
            Turn::AskDay => "On which day is your meeting?".to_string(),
            Turn::AskAllDay => {
                "Will it take the whole day? Answer with yes or no please.".to_string()
            }
            Turn::AskTime => "What time is your meeting?".to_string(),
            Turn::ConfirmTimed => format!(
                "Do you want to create an appointment with {person} on {day} at {}?",
                draft.time.as_deref().unwrap_or_default()
            ),
            Turn::ConfirmAllDay => {
                format!("Do you want to create an appointment with {person} on {day} for the whole day?")
            }
        }
    }

    /// Spoken after an answer the turn cannot accept.
    pub fn correction(&self, heard: &str) -> String {
        let (what, hint) = match self {
            Turn::Greeting => ("an expected answer", "please say yes."),
            Turn::AskPerson => ("a name", "please try again with a name."),
            Turn::AskDay => ("a day", "please try again with a day."),
            Turn::AskTime => ("a time", "please try again with a time, like 10 or 11."),
            Turn::AskAllDay | Turn::ConfirmTimed | Turn::ConfirmAllDay => {
                ("an expected answer", "please try again with yes or no.")
            }
        };

        if heard.trim().is_empty() {
            format!("I didn't hear anything, {hint}")
        } else {
            format!("You just said: {heard}. And it is not {what} in the grammar, {hint}")
        }
    }
}

pub const RESTART_NOTICE: &str = "I see. Let's do it over again.";
pub const DONE_NOTICE: &str = "Your appointment has been created!";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Prompt,
    Listen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    /// Waiting for the speech backend to report ready.
    Preparing,
    Idle,
    Prompting(Turn),
    Listening(Turn),
    /// A correction or restart notice is being spoken; the turn's prompt follows.
    Reprompting(Turn),
    Done,
}

impl DialogueState {
    pub fn turn(&self) -> Option<Turn> {
        match self {
            DialogueState::Prompting(t)
            | DialogueState::Listening(t)
            | DialogueState::Reprompting(t) => Some(*t),
            _ => None,
        }
    }

    pub fn phase(&self) -> Option<Phase> {
        match self {
            DialogueState::Prompting(_) | DialogueState::Reprompting(_) => Some(Phase::Prompt),
            DialogueState::Listening(_) => Some(Phase::Listen),
            _ => None,
        }
    }

    /// Name shown to the UI.
    pub fn name(&self) -> &'static str {
        match self {
            DialogueState::Preparing => "Preparing",
            DialogueState::Idle => "Idle",
            DialogueState::Done => "Done",
            DialogueState::Prompting(t)
            | DialogueState::Listening(t)
            | DialogueState::Reprompting(t) => t.as_str(),
        }
    }

    /// True while a booking attempt is in progress.
    pub fn is_active(&self) -> bool {
        self.turn().is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogueEvent {
    Ready,
    Start,
    SpeakComplete,
    Recognised(RecognitionResult),
}

impl DialogueEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogueEvent::Ready => "ready",
            DialogueEvent::Start => "start",
            DialogueEvent::SpeakComplete => "speak_complete",
            DialogueEvent::Recognised(_) => "recognised",
        }
    }
}

/// Side effect requested by the controller, carried out by the session runner.
#[derive(Debug, Clone)]
pub enum Effect {
    Prepare,
    Speak(String),
    Listen(ListenOptions),
    Book(Appointment),
}

/// One booking attempt.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub draft: AppointmentDraft,
    pub started_at: DateTime<Utc>,
    pub corrections: u32,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            draft: AppointmentDraft::default(),
            started_at: Utc::now(),
            corrections: 0,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TurnSnapshot {
    pub turn: &'static str,
    pub phase: Option<Phase>,
}

impl From<DialogueState> for TurnSnapshot {
    fn from(state: DialogueState) -> Self {
        Self {
            turn: state.name(),
            phase: state.phase(),
        }
    }
}

/// Published to UI subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum SessionEvent {
    TurnChanged { turn: &'static str, phase: Option<Phase> },
    Spoke { text: String },
    Heard { utterance: String },
    Booked { appointment: Appointment },
    Failed { error: String },
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::TurnChanged { .. } => "turn_changed",
            SessionEvent::Spoke { .. } => "spoke",
            SessionEvent::Heard { .. } => "heard",
            SessionEvent::Booked { .. } => "booked",
            SessionEvent::Failed { .. } => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_prompts_summarize_draft() {
        let draft = AppointmentDraft {
            person: Some("Vladislav Maraev".to_string()),
            day: Some("Monday".to_string()),
            is_all_day: Some(false),
            time: Some("10:00".to_string()),
        };
        assert_eq!(
            Turn::ConfirmTimed.prompt(&draft),
            "Do you want to create an appointment with Vladislav Maraev on Monday at 10:00?"
        );
        assert_eq!(
            Turn::ConfirmAllDay.prompt(&draft),
            "Do you want to create an appointment with Vladislav Maraev on Monday for the whole day?"
        );
    }

    #[test]
    fn test_correction_echoes_utterance() {
        assert_eq!(
            Turn::AskDay.correction("banana"),
            "You just said: banana. And it is not a day in the grammar, please try again with a day."
        );
        assert_eq!(
            Turn::AskPerson.correction(""),
            "I didn't hear anything, please try again with a name."
        );
    }

    #[test]
    fn test_state_name_and_phase() {
        assert_eq!(DialogueState::Listening(Turn::AskTime).name(), "AskTime");
        assert_eq!(
            DialogueState::Reprompting(Turn::AskDay).phase(),
            Some(Phase::Prompt)
        );
        assert_eq!(DialogueState::Done.phase(), None);
        assert!(!DialogueState::Idle.is_active());
        assert!(DialogueState::Prompting(Turn::Greeting).is_active());
    }
}
