pub mod appointment;
pub mod dialogue;
pub mod slot;
pub mod speech;

pub use appointment::{Appointment, AppointmentDraft, Schedule};
pub use dialogue::{
    DialogueEvent, DialogueState, Effect, Phase, Session, SessionEvent, Turn, TurnSnapshot,
};
pub use slot::{Polarity, SlotKind, SlotValue};
pub use speech::{Hypothesis, ListenOptions, RecognitionResult, SpeechSettings};
