// Agent Chat GUI - Main Entry Point
// Native Rust GUI combining an agent picker, a chat transcript and a topic panel

mod ui;

use agent_chat_gui::config::Config;
use agent_chat_gui::state::{AppState, Catalog, ConversationLog};
use anyhow::Context;
use eframe::egui;
use std::sync::Arc;
use tracing::{info, warn};
use ui::{render_app_layout, UiState};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    let catalog = load_catalog(&config);
    info!("Catalog ready with {} agents", catalog.list_agents().len());

    // Reply timers run here; the UI thread never blocks on them
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Agent Chat")
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    let reply_delay = config.reply_delay();
    eframe::run_native(
        "Agent Chat",
        options,
        Box::new(move |cc| {
            let mut conversation = ConversationLog::new(runtime.handle().clone(), reply_delay);
            let ctx = cc.egui_ctx.clone();
            conversation.set_notifier(Arc::new(move || ctx.request_repaint()));

            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Box::new(AgentChatApp::new(runtime, AppState::new(catalog, conversation)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Application exited with error: {}", e))
}

/// Load the configured catalog, falling back to the built-in sample data
fn load_catalog(config: &Config) -> Catalog {
    let Some(path) = &config.catalog.path else {
        return Catalog::builtin();
    };
    match Catalog::load_from_file(path) {
        Ok(catalog) => {
            info!("Loaded catalog from {}", path.display());
            catalog
        }
        Err(e) => {
            warn!("Failed to load catalog from {}: {}", path.display(), e);
            Catalog::builtin()
        }
    }
}

/// Main application struct
/// Owns the view-state core and the runtime its reply timers run on
struct AgentChatApp {
    /// Kept alive for pending replies
    _runtime: tokio::runtime::Runtime,
    /// Catalog, selection and conversation
    state: AppState,
    /// Composer draft
    ui_state: UiState,
}

impl AgentChatApp {
    fn new(runtime: tokio::runtime::Runtime, state: AppState) -> Self {
        Self {
            _runtime: runtime,
            state,
            ui_state: UiState::default(),
        }
    }
}

impl eframe::App for AgentChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        render_app_layout(ctx, &mut self.state, &mut self.ui_state);
    }
}
