use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use tokio::sync::{broadcast, mpsc, watch};

use crate::models::{
    Appointment, DialogueEvent, Effect, SessionEvent, SpeechSettings, TurnSnapshot,
};
use crate::services::dialogue::DialogueController;
use crate::services::speech::SpeechAdapter;

/// Start/restart signal from the UI.
#[derive(Debug, Clone, Copy)]
pub struct StartTrigger;

/// Drives a [`DialogueController`] against a speech backend.
///
/// Effects are carried out one at a time; the completion of a speak or listen
/// is fed back before anything else happens. Start triggers that arrive while a
/// booking attempt is running, or before its final effects have run, are dropped.
pub struct SessionRunner {
    controller: DialogueController,
    speech: Arc<dyn SpeechAdapter>,
    settings: SpeechSettings,
    turn_tx: watch::Sender<TurnSnapshot>,
    events_tx: broadcast::Sender<SessionEvent>,
    appointments: Arc<Mutex<Vec<Appointment>>>,
}

impl SessionRunner {
    pub fn new(
        controller: DialogueController,
        speech: Arc<dyn SpeechAdapter>,
        settings: SpeechSettings,
        turn_tx: watch::Sender<TurnSnapshot>,
        events_tx: broadcast::Sender<SessionEvent>,
        appointments: Arc<Mutex<Vec<Appointment>>>,
    ) -> Self {
        Self {
            controller,
            speech,
            settings,
            turn_tx,
            events_tx,
            appointments,
        }
    }

    /// Runs until the trigger channel closes or the speech backend fails.
    pub async fn run(mut self, mut triggers: mpsc::Receiver<StartTrigger>) -> anyhow::Result<()> {
        let mut pending: VecDeque<Effect> = self.controller.boot().into();
        self.publish_turn();

        loop {
            while let Ok(StartTrigger) = triggers.try_recv() {
                if self.is_busy(&pending) {
                    tracing::debug!(
                        state = self.controller.state().name(),
                        "start trigger dropped, dialogue busy"
                    );
                    continue;
                }
                self.dispatch(DialogueEvent::Start, &mut pending);
            }

            let Some(effect) = pending.pop_front() else {
                match triggers.recv().await {
                    Some(StartTrigger) => {
                        self.dispatch(DialogueEvent::Start, &mut pending);
                        continue;
                    }
                    None => {
                        tracing::info!("trigger channel closed, stopping session runner");
                        return Ok(());
                    }
                }
            };

            match self.execute(effect).await {
                Ok(Some(event)) => self.dispatch(event, &mut pending),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(error = %e, state = self.controller.state().name(), "speech backend failed");
                    self.publish(SessionEvent::Failed {
                        error: format!("{e:#}"),
                    });
                    return Err(e);
                }
            }
        }
    }

    /// A booking attempt is running or the effects of the last event are
    /// still queued (e.g. the success notice after the final confirmation).
    fn is_busy(&self, pending: &VecDeque<Effect>) -> bool {
        !pending.is_empty() || self.controller.state().is_active()
    }

    fn dispatch(&mut self, event: DialogueEvent, pending: &mut VecDeque<Effect>) {
        pending.extend(self.controller.handle(event));
        self.publish_turn();
    }

    async fn execute(&mut self, effect: Effect) -> anyhow::Result<Option<DialogueEvent>> {
        match effect {
            Effect::Prepare => {
                self.speech
                    .prepare(&self.settings)
                    .await
                    .context("failed to prepare speech backend")?;
                Ok(Some(DialogueEvent::Ready))
            }
            Effect::Speak(text) => {
                self.publish(SessionEvent::Spoke { text: text.clone() });
                self.speech.speak(&text).await.context("speak failed")?;
                Ok(Some(DialogueEvent::SpeakComplete))
            }
            Effect::Listen(options) => {
                let result = self.speech.listen(&options).await.context("listen failed")?;
                self.publish(SessionEvent::Heard {
                    utterance: result.best().to_string(),
                });
                Ok(Some(DialogueEvent::Recognised(result)))
            }
            Effect::Book(appointment) => {
                match self.appointments.lock() {
                    Ok(mut book) => book.push(appointment.clone()),
                    Err(e) => tracing::error!(error = %e, "appointment book poisoned"),
                }
                self.publish(SessionEvent::Booked { appointment });
                Ok(None)
            }
        }
    }

    fn publish_turn(&self) {
        let snapshot = self.controller.snapshot();
        let changed = self.turn_tx.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            *current = snapshot.clone();
            true
        });
        if changed {
            self.publish(SessionEvent::TurnChanged {
                turn: snapshot.turn,
                phase: snapshot.phase,
            });
        }
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.events_tx.send(event);
    }
}
