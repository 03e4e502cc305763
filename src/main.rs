//! PC Stats - desktop window
//!
//! A small fixed-size window showing processor, graphics and memory readings,
//! refreshed by the background sampler about once per second.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use pcstats_lib::core::Config;
use pcstats_lib::display::{self, DisplaySurface, Labels};
use pcstats_lib::elevation::{self, Elevation};
use pcstats_lib::hardware::{self, Computer};
use pcstats_lib::i18n::I18n;
use pcstats_lib::sampler::Sampler;
use std::collections::HashMap;
use std::sync::Arc;
use tauri::{Emitter, Manager, RunEvent, WindowEvent};
use tokio::sync::Mutex;

/// Application state shared across all Tauri commands
pub struct TauriState {
    pub config: std::sync::Mutex<Config>,
    pub sampler: Arc<Mutex<Sampler>>,
    pub i18n: Arc<I18n>,
}

/// Forwards rendered labels to the web view
struct WebviewSurface {
    app: tauri::AppHandle,
}

impl DisplaySurface for WebviewSurface {
    fn render(&mut self, labels: &Labels) {
        if let Err(e) = self.app.emit("snapshot", labels) {
            log::warn!("Failed to emit snapshot: {}", e);
        }
    }
}

// Tauri commands exposed to the frontend

/// Labels for the latest published snapshot
#[tauri::command]
async fn get_labels(state: tauri::State<'_, TauriState>) -> Result<Labels, String> {
    let snapshot = state.sampler.lock().await.latest();
    Ok(Labels::render(&snapshot, &state.i18n))
}

#[tauri::command]
async fn get_translations(state: tauri::State<'_, TauriState>) -> Result<HashMap<String, String>, String> {
    Ok(state.i18n.get_all())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting PC Stats v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    if elevation::ensure_elevated(config.general.run_as_admin) == Elevation::Relaunched {
        return;
    }

    let i18n = Arc::new(I18n::new(&config.general.language));
    let provider = Computer::open(&config.sensors);
    let sampler = Sampler::new(Box::new(provider), hardware::default_instrumentation());
    let snapshots = sampler.subscribe();

    let state = TauriState {
        config: std::sync::Mutex::new(config),
        sampler: Arc::new(Mutex::new(sampler)),
        i18n,
    };

    let app = tauri::Builder::default()
        .manage(state)
        .invoke_handler(tauri::generate_handler![
            get_labels,
            get_translations,
        ])
        .setup(move |app| {
            let state = app.state::<TauriState>();
            restore_window_position(app.handle(), &state);

            let sampler = Arc::clone(&state.sampler);
            tauri::async_runtime::spawn(async move {
                if let Err(e) = sampler.lock().await.start() {
                    log::error!("Failed to start sampler: {}", e);
                }
            });

            let handle = app.handle().clone();
            let i18n = Arc::clone(&state.i18n);
            tauri::async_runtime::spawn(async move {
                let mut surface = WebviewSurface { app: handle };
                display::drive(snapshots, &i18n, &mut surface).await;
            });

            Ok(())
        })
        .on_window_event(|window, event| {
            if let WindowEvent::CloseRequested { .. } = event {
                save_window_position(window);
            }
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app, event| {
        if let RunEvent::Exit = event {
            let sampler = Arc::clone(&app.state::<TauriState>().sampler);
            tauri::async_runtime::block_on(async move {
                if let Err(e) = sampler.lock().await.shutdown().await {
                    log::error!("Failed to stop sampler: {}", e);
                }
            });
        }
    });
}

fn restore_window_position(app: &tauri::AppHandle, state: &TauriState) {
    let Ok(config) = state.config.lock() else {
        return;
    };
    if !config.window.remember_position {
        return;
    }
    let (Some(x), Some(y)) = (config.window.x, config.window.y) else {
        return;
    };

    if let Some(window) = app.get_webview_window("main") {
        if let Err(e) = window.set_position(tauri::LogicalPosition::new(x, y)) {
            log::warn!("Failed to restore window position: {}", e);
        }
    }
}

fn save_window_position(window: &tauri::Window) {
    let state = window.state::<TauriState>();
    let Ok(mut config) = state.config.lock() else {
        return;
    };
    if !config.window.remember_position {
        return;
    }

    let position = match (window.outer_position(), window.scale_factor()) {
        (Ok(position), Ok(scale)) => position.to_logical::<f64>(scale),
        _ => return,
    };
    config.window.x = Some(position.x);
    config.window.y = Some(position.y);

    if let Err(e) = config.save() {
        log::warn!("Failed to save window position: {}", e);
    }
}
