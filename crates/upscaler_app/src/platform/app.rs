use std::sync::{mpsc, Arc};

use eframe::egui;
use engine_logging::{engine_debug, engine_info, engine_warn, LogDestination};
use log::LevelFilter;
use thiserror::Error;
use upscaler_core::{update, AppState, AppViewModel, Msg, Phase};
use upscaler_engine::{EngineError, Enhancer, LanczosEnhancer};

use super::dialogs;
use super::effects::{EffectRunner, Inbox, Waker};
use super::settings::{load_settings, Settings};
use super::ui;
use super::ui::render::UiAction;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to initialise enhancement engine: {0}")]
    Engine(#[from] EngineError),
    #[error("window error: {0}")]
    Ui(#[from] eframe::Error),
}

pub fn run_app() -> Result<(), AppError> {
    let working_dir = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let loaded = load_settings(&working_dir);
    let settings = loaded.as_ref().cloned().unwrap_or_default();

    engine_logging::initialize(
        LogDestination::from_flag(settings.log_to_file),
        LevelFilter::Info,
    );
    if let Err(err) = &loaded {
        engine_warn!("{}; using default settings", err);
    }
    engine_info!("Starting upscaler with {:?}", settings);

    // Loaded once for the whole process; every job shares it.
    let enhancer: Arc<dyn Enhancer> = Arc::new(LanczosEnhancer::load(&settings.engine())?);

    eframe::run_native(
        ui::constants::WINDOW_TITLE,
        ui::layout::native_options(),
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let waker: Waker = Arc::new(move || ctx.request_repaint());
            Ok(Box::new(UpscalerApp::new(Dispatcher::new(
                &settings, enhancer, waker,
            ))))
        }),
    )?;

    engine_info!("Window closed");
    Ok(())
}

/// Owns the orchestrator state. Lives on the UI thread; other threads only
/// reach it through the inbox.
pub(crate) struct Dispatcher {
    state: AppState,
    view: AppViewModel,
    msg_rx: mpsc::Receiver<Msg>,
    inbox: Inbox,
    effects: EffectRunner,
}

impl Dispatcher {
    pub fn new(settings: &Settings, enhancer: Arc<dyn Enhancer>, waker: Waker) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        let inbox = Inbox::new(msg_tx, waker);
        let effects = EffectRunner::new(enhancer, &settings.engine(), inbox.clone());
        let state = AppState::with_settings(settings.orchestrator());
        let view = state.view();
        Self {
            state,
            view,
            msg_rx,
            inbox,
            effects,
        }
    }

    pub fn view(&self) -> &AppViewModel {
        &self.view
    }

    pub fn send(&self, msg: Msg) {
        self.inbox.send(msg);
    }

    /// Applies every queued message in arrival order. Returns whether the
    /// view changed.
    pub fn process_pending_messages(&mut self) -> bool {
        let inbox: Vec<Msg> = self.msg_rx.try_iter().collect();
        let mut changed = false;
        for msg in inbox {
            changed |= self.dispatch_msg(msg);
        }
        changed
    }

    /// Sends the running job down the normal cancel path. Returns whether a
    /// job was running.
    pub fn cancel_running(&mut self) -> bool {
        if self.state.phase() != Phase::Running {
            return false;
        }
        self.dispatch_msg(Msg::CancelRequested);
        true
    }

    fn dispatch_msg(&mut self, msg: Msg) -> bool {
        match &msg {
            Msg::JobStatus { .. } => {}
            other => engine_debug!("Dispatch {:?}", other),
        }
        let was_start = msg == Msg::StartClicked;
        let phase_before = self.state.phase();

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if was_start && phase_before != Phase::Idle {
            engine_info!("Start ignored: a job is already {:?}", phase_before);
        }
        let was_dirty = state.consume_dirty();
        if was_dirty {
            self.view = state.view();
        }
        self.state = state;
        self.effects.enqueue(effects);
        was_dirty
    }
}

struct UpscalerApp {
    dispatcher: Dispatcher,
}

impl UpscalerApp {
    fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    fn handle_action(&self, action: UiAction) {
        match action {
            UiAction::ChooseInput => {
                if let Some(path) = dialogs::choose_input_file() {
                    self.dispatcher.send(Msg::InputSelected(path));
                }
            }
            UiAction::ChooseOutput => {
                if let Some(path) = dialogs::choose_output_file() {
                    self.dispatcher.send(Msg::OutputSelected(path));
                }
            }
            UiAction::Start => self.dispatcher.send(Msg::StartClicked),
        }
    }
}

impl eframe::App for UpscalerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.dispatcher.process_pending_messages();

        if ctx.input(|input| input.key_pressed(egui::Key::Escape)) {
            self.dispatcher.send(Msg::CancelRequested);
        }

        let actions = egui::CentralPanel::default()
            .show(ctx, |panel| ui::render::render(panel, self.dispatcher.view()))
            .inner;
        for action in actions {
            self.handle_action(action);
        }
    }
}

impl Drop for UpscalerApp {
    fn drop(&mut self) {
        if self.dispatcher.cancel_running() {
            engine_warn!("Window closed while a job was running; cancelled it");
        }
    }
}
