use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, mpsc, watch};

use crate::config::AppConfig;
use crate::models::{Appointment, SessionEvent, TurnSnapshot};
use crate::services::dialogue::DialogueController;
use crate::services::grammar::Grammar;
use crate::services::session::{SessionRunner, StartTrigger};
use crate::services::speech::SpeechAdapter;

pub struct AppState {
    pub config: AppConfig,
    pub triggers: mpsc::Sender<StartTrigger>,
    pub turn_rx: watch::Receiver<TurnSnapshot>,
    pub events_tx: broadcast::Sender<SessionEvent>,
    pub appointments: Arc<Mutex<Vec<Appointment>>>,
}

impl AppState {
    /// Wires the channels shared between the HTTP layer and the session runner.
    /// The caller spawns `runner.run(triggers)`.
    pub fn with_runner(
        config: AppConfig,
        speech: Arc<dyn SpeechAdapter>,
        grammar: Arc<Grammar>,
    ) -> (Arc<Self>, SessionRunner, mpsc::Receiver<StartTrigger>) {
        let controller = DialogueController::new(grammar, config.listen_options());
        let (trigger_tx, trigger_rx) = mpsc::channel(16);
        let (turn_tx, turn_rx) = watch::channel(controller.snapshot());
        let (events_tx, _) = broadcast::channel(256);
        let appointments = Arc::new(Mutex::new(Vec::new()));

        let runner = SessionRunner::new(
            controller,
            speech,
            config.speech_settings(),
            turn_tx,
            events_tx.clone(),
            Arc::clone(&appointments),
        );

        let state = Arc::new(AppState {
            config,
            triggers: trigger_tx,
            turn_rx,
            events_tx,
            appointments,
        });

        (state, runner, trigger_rx)
    }
}
