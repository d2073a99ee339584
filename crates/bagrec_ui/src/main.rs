//! Smart Bag Recorder - Main entry point
//!
//! Handles application-level logging initialization, configuration
//! loading, topic discovery, and application launch. Passing `--profile`
//! (or `-p`) opens the profile chooser directly instead of waiting for a
//! button press.

use std::env;
use std::sync::{Arc, Mutex};

use relm4::RelmApp;

use bagrec_core::config::{default_config_path, ConfigManager};
use bagrec_core::logging::init_tracing;
use bagrec_core::topics::TopicSource;

mod app;
mod components;
mod windows;

use app::{App, AppInit};

fn main() {
    // Load configuration first (needed for the log level)
    let config_path = default_config_path();
    let mut config_manager = ConfigManager::new(&config_path);

    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    init_tracing(&config_manager.settings().logging.level);

    tracing::info!("Smart Bag Recorder starting");
    tracing::info!("Config: {}", config_path.display());
    tracing::info!("Core version: {}", bagrec_core::version());

    if let Err(e) = config_manager.ensure_dirs_exist() {
        tracing::error!("Failed to create directories: {}", e);
    }

    // Topic discovery runs once at construction; failures yield an empty
    // selectable set.
    let topics = TopicSource::new(&config_manager.settings().recorder.topic_tool).fetch();
    tracing::info!("discovered {} recordable topics", topics.len());

    let open_profile = env::args()
        .skip(1)
        .any(|arg| arg == "--profile" || arg == "-p");

    let config = Arc::new(Mutex::new(config_manager));

    // Our flags are not for GTK; run the app with an empty argument list.
    let app = RelmApp::new("io.github.bagrec").with_args(Vec::new());
    app.run::<App>(AppInit {
        config,
        topics,
        open_profile,
    });
}
