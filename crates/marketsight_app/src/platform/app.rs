use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use engine_logging::{engine_error, engine_info, LogDestination, DEFAULT_LOG_FILE};
use log::LevelFilter;
use marketsight_core::{update, AppState, Msg, UploadCandidate};
use marketsight_engine::{
    ApiConfig, ApiError, ClientSettings, ReqwestJobsApi, API_URL_ENV, DEFAULT_API_URL,
};

use super::effects::EffectRunner;
use super::ui::{self, render::UiIntent};

pub fn run_app() -> eframe::Result<()> {
    engine_logging::initialize(
        LevelFilter::Info,
        LogDestination::Both(PathBuf::from(DEFAULT_LOG_FILE)),
    );

    let config = match ApiConfig::from_build_env() {
        Ok(config) => config,
        Err(err) => {
            engine_error!(
                "Invalid {} at build time ({}); using {}",
                API_URL_ENV,
                err,
                DEFAULT_API_URL
            );
            ApiConfig::default()
        }
    };
    engine_info!("Backend API at {}", config.base_url());

    let creator: eframe::AppCreator<'static> = Box::new(move |cc| {
        ui::layout::apply_visuals(&cc.egui_ctx);
        let app = DashboardApp::new(cc.egui_ctx.clone(), config)?;
        Ok(Box::new(app))
    });
    eframe::run_native(
        ui::constants::WINDOW_TITLE,
        ui::layout::native_options(),
        creator,
    )
}

struct DashboardApp {
    state: AppState,
    msg_rx: mpsc::Receiver<Msg>,
    effects: EffectRunner,
}

impl DashboardApp {
    fn new(ctx: eframe::egui::Context, config: ApiConfig) -> Result<Self, ApiError> {
        let api = ReqwestJobsApi::new(config, ClientSettings::default())?;
        let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
        let effects = EffectRunner::new(Arc::new(api), msg_tx, move || ctx.request_repaint());

        let mut app = Self {
            state: AppState::new(),
            msg_rx,
            effects,
        };
        app.dispatch_msg(Msg::Mounted);
        Ok(app)
    }

    fn process_pending_messages(&mut self) {
        let inbox: Vec<Msg> = self.msg_rx.try_iter().collect();
        for msg in inbox {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.enqueue(effects);
    }

    fn handle_intent(&mut self, intent: UiIntent) {
        let msg = match intent {
            UiIntent::ChooseFile => {
                let picked = rfd::FileDialog::new()
                    .add_filter(
                        ui::constants::CSV_FILTER_NAME,
                        ui::constants::CSV_EXTENSIONS,
                    )
                    .pick_file()
                    .map(UploadCandidate::from_path);
                Msg::FileSelected(picked)
            }
            UiIntent::Submit => Msg::SubmitClicked,
        };
        self.dispatch_msg(msg);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending_messages();

        // This frame renders everything applied so far.
        self.state.consume_dirty();
        let view = self.state.view();
        for intent in ui::render::render(ctx, &view) {
            self.handle_intent(intent);
        }

        if self.state.consume_dirty() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.dispatch_msg(Msg::Unmounted);
    }
}
