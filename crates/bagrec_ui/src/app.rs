//! Main application window.
//!
//! Layout matches the original tool: topic list on the left; recording
//! settings, save-mode selection, and the profile/record actions on the
//! right. All business state lives here or in the core; the widgets only
//! report events and render the model.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use gtk4::prelude::*;
use relm4::prelude::*;

use bagrec_core::command::RecordCommandBuilder;
use bagrec_core::config::{ConfigManager, ConfigSection};
use bagrec_core::models::{LimitField, OutputMode, RecordCommand, RecordingConfig, SessionStatus};
use bagrec_core::profile::{self, DEFAULT_PROFILE_FILENAME};
use bagrec_core::session::RecordingSession;

use crate::components::{TopicList, TopicListInit, TopicListOutput};
use crate::windows::{
    AdvancedOptions, AdvancedSettingsDialog, AdvancedSettingsOutput, RecordingMsg,
    RecordingOutput, RecordingWindow,
};

/// Fallback bag path when the file chooser is cancelled.
const DEFAULT_BAG_FILE: &str = "./example.bag";

/// Initialization data for the App component.
pub struct AppInit {
    pub config: Arc<Mutex<ConfigManager>>,
    pub topics: Vec<String>,
    /// Open the profile chooser immediately (`--profile` flag).
    pub open_profile: bool,
}

/// Where the recorder output goes, as selected in the save-mode frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    CurrentDirectory,
    Prefix,
    ExplicitFile,
}

/// All possible messages the application can receive.
#[derive(Debug)]
pub enum AppMsg {
    // Topic selection
    TopicToggled(usize, bool),

    // Settings frame
    SuppressOutputToggled(bool),
    Bz2Toggled(bool),
    TcpNoDelayToggled(bool),
    SplitToggled(bool),
    SizeToggled(bool),
    SizeChanged(String),
    DurationToggled(bool),
    DurationChanged(String),
    OpenAdvancedSettings,
    AdvancedSettingsClosed(AdvancedOptions),

    // Save mode frame
    SaveModeChanged(SaveMode),
    PrefixChanged(String),
    BrowseBagFile,
    BagFileChosen(Option<PathBuf>),

    // Profile / record actions
    SaveProfile,
    ProfileSaveTarget(Option<PathBuf>),
    LoadProfile,
    ProfileChosen(Option<PathBuf>),
    Record,

    // Recording window
    PollRequested,
    StopRecording,
}

/// Main application state.
pub struct App {
    config: Arc<Mutex<ConfigManager>>,
    session: RecordingSession,

    topics: Vec<String>,
    selected: Vec<bool>,

    // Settings frame state
    suppress_output: bool,
    bz2: bool,
    tcp_nodelay: bool,
    split: bool,
    size_enabled: bool,
    size_value: String,
    duration_enabled: bool,
    duration_value: String,
    advanced: AdvancedOptions,

    // Save mode frame state
    save_mode: SaveMode,
    prefix_value: String,
    bag_file: String,

    // A command built for saving, held while the file chooser is open
    pending_save: Option<RecordCommand>,

    // Child components
    topic_list: Controller<TopicList>,
    advanced_dialog: Option<Controller<AdvancedSettingsDialog>>,
    recording_window: Option<Controller<RecordingWindow>>,
}

impl App {
    fn is_recording(&self) -> bool {
        self.session.is_recording()
    }

    /// Snapshot current UI state into an immutable configuration.
    fn build_config(&self) -> RecordingConfig {
        fn limit(enabled: bool, value: &str) -> LimitField {
            LimitField {
                enabled,
                value: value.to_string(),
            }
        }

        let topics = self
            .topics
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(topic, _)| topic.clone())
            .collect();

        RecordingConfig {
            suppress_output: self.suppress_output,
            bz2: self.bz2,
            lz4: self.advanced.lz4,
            tcp_nodelay: self.tcp_nodelay,
            udp: self.advanced.udp,
            split: self.split,
            publish_on_start: self.advanced.publish_on_start,
            repeat_latched: self.advanced.repeat_latched,
            max_size_mb: limit(self.size_enabled, &self.size_value),
            max_duration: limit(self.duration_enabled, &self.duration_value),
            max_splits: limit(self.advanced.max_splits_enabled, &self.advanced.max_splits),
            buffer_size_mb: limit(self.advanced.buffer_size_enabled, &self.advanced.buffer_size),
            chunk_size_kb: limit(self.advanced.chunk_size_enabled, &self.advanced.chunk_size),
            message_limit: limit(self.advanced.limit_enabled, &self.advanced.limit),
            node_filter: limit(self.advanced.node_enabled, &self.advanced.node),
            output: match self.save_mode {
                SaveMode::CurrentDirectory => OutputMode::CurrentDirectory,
                SaveMode::Prefix => OutputMode::PrefixPath(self.prefix_value.clone()),
                SaveMode::ExplicitFile => OutputMode::ExplicitFile(PathBuf::from(&self.bag_file)),
            },
            topics,
        }
    }

    /// Build a command from current state, or `None` when no topics are
    /// selected (a no-op, not an error).
    fn build_command(&self) -> Option<RecordCommand> {
        let config = self.build_config();
        let program = {
            let cfg = self.config.lock().unwrap();
            cfg.settings().recorder.program.clone()
        };
        RecordCommandBuilder::new(&config, &program).build()
    }

    fn start_recording(&mut self, command: &RecordCommand, sender: &ComponentSender<Self>) {
        let poll_interval = {
            let cfg = self.config.lock().unwrap();
            cfg.settings().recorder.poll_interval_secs
        };

        let window = RecordingWindow::builder().launch(poll_interval).forward(
            sender.input_sender(),
            |msg| match msg {
                RecordingOutput::PollRequested => AppMsg::PollRequested,
                RecordingOutput::StopRequested => AppMsg::StopRecording,
            },
        );
        window.widget().present();

        if let Err(err) = self.session.start(command) {
            tracing::error!("failed to start recording: {err}");
            window.emit(RecordingMsg::Failure(err.to_string()));
        }

        self.recording_window = Some(window);
    }

    fn close_recording_window(&mut self) {
        if let Some(window) = self.recording_window.take() {
            window.widget().destroy();
        }
    }

    /// Make sure the profile directory exists before a chooser opens in it.
    fn ensure_profile_dir(&self) -> PathBuf {
        let dir = {
            let cfg = self.config.lock().unwrap();
            cfg.profile_dir()
        };
        if let Err(err) = std::fs::create_dir_all(&dir) {
            tracing::warn!("could not create profile directory {}: {err}", dir.display());
        }
        dir
    }
}

#[relm4::component(pub)]
impl Component for App {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();
    type CommandOutput = ();

    view! {
        gtk4::ApplicationWindow {
            set_title: Some("SmartBagRec"),
            set_default_width: 960,
            set_default_height: 540,

            gtk4::Box {
                set_orientation: gtk4::Orientation::Horizontal,
                set_margin_all: 8,
                set_spacing: 8,

                // === Topic list ===
                gtk4::Frame {
                    set_label: Some("recording topics"),

                    model.topic_list.widget().clone(),
                },

                gtk4::Box {
                    set_orientation: gtk4::Orientation::Vertical,
                    set_spacing: 8,
                    set_hexpand: true,

                    // === Recording settings ===
                    gtk4::Frame {
                        set_label: Some("settings for recording"),

                        gtk4::Box {
                            set_orientation: gtk4::Orientation::Vertical,
                            set_margin_all: 8,
                            set_spacing: 4,

                            gtk4::CheckButton {
                                set_label: Some("suppress console output"),
                                connect_toggled[sender] => move |btn| {
                                    sender.input(AppMsg::SuppressOutputToggled(btn.is_active()));
                                },
                            },

                            gtk4::CheckButton {
                                set_label: Some("use BZ2 compression"),
                                connect_toggled[sender] => move |btn| {
                                    sender.input(AppMsg::Bz2Toggled(btn.is_active()));
                                },
                            },

                            gtk4::CheckButton {
                                set_label: Some("use the TCP_NODELAY transport hint when subscribing to topics"),
                                connect_toggled[sender] => move |btn| {
                                    sender.input(AppMsg::TcpNoDelayToggled(btn.is_active()));
                                },
                            },

                            gtk4::CheckButton {
                                set_label: Some("split the bag when maximum size or duration is reached"),
                                connect_toggled[sender] => move |btn| {
                                    sender.input(AppMsg::SplitToggled(btn.is_active()));
                                },
                            },

                            gtk4::Box {
                                set_orientation: gtk4::Orientation::Horizontal,
                                set_spacing: 8,

                                gtk4::CheckButton {
                                    set_label: Some("record a bag of maximum size SIZE MB (Default: infinite)"),
                                    connect_toggled[sender] => move |btn| {
                                        sender.input(AppMsg::SizeToggled(btn.is_active()));
                                    },
                                },

                                gtk4::Entry {
                                    set_hexpand: true,
                                    set_valign: gtk4::Align::Center,
                                    connect_changed[sender] => move |entry| {
                                        sender.input(AppMsg::SizeChanged(entry.text().to_string()));
                                    },
                                },
                            },

                            gtk4::Box {
                                set_orientation: gtk4::Orientation::Horizontal,
                                set_spacing: 8,

                                gtk4::CheckButton {
                                    set_label: Some("record a bag of maximum duration DURATION in seconds,\nunless 'm', or 'h' is appended"),
                                    connect_toggled[sender] => move |btn| {
                                        sender.input(AppMsg::DurationToggled(btn.is_active()));
                                    },
                                },

                                gtk4::Entry {
                                    set_hexpand: true,
                                    set_valign: gtk4::Align::Center,
                                    connect_changed[sender] => move |entry| {
                                        sender.input(AppMsg::DurationChanged(entry.text().to_string()));
                                    },
                                },
                            },

                            gtk4::Button {
                                set_label: "advanced settings",
                                set_halign: gtk4::Align::End,
                                connect_clicked => AppMsg::OpenAdvancedSettings,
                            },
                        },
                    },

                    // === Save mode ===
                    gtk4::Frame {
                        set_label: Some("select save mode"),

                        gtk4::Box {
                            set_orientation: gtk4::Orientation::Vertical,
                            set_margin_all: 8,
                            set_spacing: 4,

                            gtk4::Box {
                                set_orientation: gtk4::Orientation::Horizontal,
                                set_spacing: 8,

                                #[name = "mode_current"]
                                gtk4::CheckButton {
                                    set_label: Some("save to current dir"),
                                    set_active: true,
                                    connect_toggled[sender] => move |btn| {
                                        if btn.is_active() {
                                            sender.input(AppMsg::SaveModeChanged(SaveMode::CurrentDirectory));
                                        }
                                    },
                                },

                                gtk4::Label {
                                    set_label: &std::env::current_dir()
                                        .map(|p| p.display().to_string())
                                        .unwrap_or_default(),
                                    set_xalign: 0.0,
                                },
                            },

                            gtk4::Box {
                                set_orientation: gtk4::Orientation::Horizontal,
                                set_spacing: 8,

                                gtk4::CheckButton {
                                    set_label: Some("set prefix"),
                                    set_group: Some(&mode_current),
                                    connect_toggled[sender] => move |btn| {
                                        if btn.is_active() {
                                            sender.input(AppMsg::SaveModeChanged(SaveMode::Prefix));
                                        }
                                    },
                                },

                                gtk4::Entry {
                                    set_hexpand: true,
                                    set_valign: gtk4::Align::Center,
                                    #[watch]
                                    set_sensitive: model.save_mode == SaveMode::Prefix,
                                    connect_changed[sender] => move |entry| {
                                        sender.input(AppMsg::PrefixChanged(entry.text().to_string()));
                                    },
                                },
                            },

                            gtk4::Box {
                                set_orientation: gtk4::Orientation::Horizontal,
                                set_spacing: 8,

                                gtk4::CheckButton {
                                    set_label: Some("set file path"),
                                    set_group: Some(&mode_current),
                                    connect_toggled[sender] => move |btn| {
                                        if btn.is_active() {
                                            sender.input(AppMsg::SaveModeChanged(SaveMode::ExplicitFile));
                                        }
                                    },
                                },

                                gtk4::Label {
                                    set_hexpand: true,
                                    #[watch]
                                    set_label: &model.bag_file,
                                    set_xalign: 0.0,
                                },

                                gtk4::Button {
                                    set_label: "browse",
                                    #[watch]
                                    set_sensitive: model.save_mode == SaveMode::ExplicitFile,
                                    connect_clicked => AppMsg::BrowseBagFile,
                                },
                            },
                        },
                    },

                    // === Profile / record actions ===
                    gtk4::Box {
                        set_orientation: gtk4::Orientation::Vertical,
                        set_spacing: 8,

                        gtk4::Button {
                            set_label: "save as profile",
                            connect_clicked => AppMsg::SaveProfile,
                        },

                        gtk4::Button {
                            set_label: "load from profile",
                            #[watch]
                            set_sensitive: !model.is_recording(),
                            connect_clicked => AppMsg::LoadProfile,
                        },

                        gtk4::Button {
                            set_label: "record",
                            add_css_class: "suggested-action",
                            #[watch]
                            set_sensitive: !model.is_recording(),
                            connect_clicked => AppMsg::Record,
                        },
                    },
                },
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let topic_list = TopicList::builder()
            .launch(TopicListInit {
                topics: init.topics.clone(),
            })
            .forward(sender.input_sender(), |msg| match msg {
                TopicListOutput::TopicToggled(index, active) => {
                    AppMsg::TopicToggled(index, active)
                }
            });

        let bag_file = {
            let cfg = init.config.lock().unwrap();
            cfg.settings().paths.last_bag_file.clone()
        };

        let selected = vec![false; init.topics.len()];

        let model = App {
            config: init.config,
            session: RecordingSession::new(),
            topics: init.topics,
            selected,
            suppress_output: false,
            bz2: false,
            tcp_nodelay: false,
            split: false,
            size_enabled: false,
            size_value: String::new(),
            duration_enabled: false,
            duration_value: String::new(),
            advanced: AdvancedOptions::default(),
            save_mode: SaveMode::CurrentDirectory,
            prefix_value: String::new(),
            bag_file,
            pending_save: None,
            topic_list,
            advanced_dialog: None,
            recording_window: None,
        };

        let widgets = view_output!();

        if init.open_profile {
            sender.input(AppMsg::LoadProfile);
        }

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _root: &Self::Root) {
        match msg {
            AppMsg::TopicToggled(index, active) => {
                if let Some(slot) = self.selected.get_mut(index) {
                    *slot = active;
                }
            }

            AppMsg::SuppressOutputToggled(v) => self.suppress_output = v,
            AppMsg::Bz2Toggled(v) => self.bz2 = v,
            AppMsg::TcpNoDelayToggled(v) => self.tcp_nodelay = v,
            AppMsg::SplitToggled(v) => self.split = v,
            AppMsg::SizeToggled(v) => self.size_enabled = v,
            AppMsg::SizeChanged(v) => self.size_value = v,
            AppMsg::DurationToggled(v) => self.duration_enabled = v,
            AppMsg::DurationChanged(v) => self.duration_value = v,

            AppMsg::OpenAdvancedSettings => {
                if self.advanced_dialog.is_some() {
                    return;
                }
                let dialog = AdvancedSettingsDialog::builder()
                    .launch(self.advanced.clone())
                    .forward(sender.input_sender(), |msg| match msg {
                        AdvancedSettingsOutput::Closed(options) => {
                            AppMsg::AdvancedSettingsClosed(options)
                        }
                    });
                dialog.widget().present();
                self.advanced_dialog = Some(dialog);
            }

            AppMsg::AdvancedSettingsClosed(options) => {
                self.advanced = options;
                self.advanced_dialog = None;
            }

            AppMsg::SaveModeChanged(mode) => self.save_mode = mode,
            AppMsg::PrefixChanged(v) => self.prefix_value = v,

            AppMsg::BrowseBagFile => {
                let sender = sender.clone();
                relm4::spawn_local(async move {
                    let dialog = gtk4::FileDialog::builder()
                        .title("Select bag file")
                        .initial_name("example.bag")
                        .modal(true)
                        .build();

                    match dialog.save_future(None::<&gtk4::Window>).await {
                        Ok(file) => sender.input(AppMsg::BagFileChosen(file.path())),
                        // User cancelled
                        Err(_) => sender.input(AppMsg::BagFileChosen(None)),
                    }
                });
            }

            AppMsg::BagFileChosen(path) => {
                self.bag_file = match path {
                    Some(path) => path.display().to_string(),
                    // Cancelled chooser falls back to the fixed default.
                    None => DEFAULT_BAG_FILE.to_string(),
                };

                // Remember the choice across runs.
                let mut cfg = self.config.lock().unwrap();
                cfg.settings_mut().paths.last_bag_file = self.bag_file.clone();
                if let Err(err) = cfg.update_section(ConfigSection::Paths) {
                    tracing::warn!("could not persist bag file path: {err}");
                }
            }

            AppMsg::SaveProfile => {
                let Some(command) = self.build_command() else {
                    tracing::info!("no topics selected; nothing to save");
                    return;
                };
                self.pending_save = Some(command);

                let dir = self.ensure_profile_dir();
                let sender = sender.clone();
                relm4::spawn_local(async move {
                    let dialog = gtk4::FileDialog::builder()
                        .title("Save profile")
                        .initial_folder(&gtk4::gio::File::for_path(&dir))
                        .initial_name(DEFAULT_PROFILE_FILENAME)
                        .modal(true)
                        .build();

                    match dialog.save_future(None::<&gtk4::Window>).await {
                        Ok(file) => sender.input(AppMsg::ProfileSaveTarget(file.path())),
                        Err(_) => sender.input(AppMsg::ProfileSaveTarget(None)),
                    }
                });
            }

            AppMsg::ProfileSaveTarget(path) => {
                let Some(command) = self.pending_save.take() else {
                    return;
                };
                let Some(path) = path else {
                    return;
                };
                if let Err(err) = profile::save_profile(&command, &path) {
                    tracing::error!("failed to save profile: {err}");
                }
            }

            AppMsg::LoadProfile => {
                if self.is_recording() {
                    return;
                }

                let dir = self.ensure_profile_dir();
                let sender = sender.clone();
                relm4::spawn_local(async move {
                    let dialog = gtk4::FileDialog::builder()
                        .title("Load profile")
                        .initial_folder(&gtk4::gio::File::for_path(&dir))
                        .modal(true)
                        .build();

                    match dialog.open_future(None::<&gtk4::Window>).await {
                        Ok(file) => sender.input(AppMsg::ProfileChosen(file.path())),
                        Err(_) => sender.input(AppMsg::ProfileChosen(None)),
                    }
                });
            }

            AppMsg::ProfileChosen(path) => {
                let Some(path) = path else {
                    return;
                };

                let program = {
                    let cfg = self.config.lock().unwrap();
                    cfg.settings().recorder.program.clone()
                };

                match profile::load_profile(&path, &program) {
                    Ok(command) => self.start_recording(&command, &sender),
                    Err(err) if err.is_rejection() => {
                        tracing::warn!("profile rejected: {err}");
                    }
                    Err(err) => {
                        tracing::error!("failed to load profile: {err}");
                    }
                }
            }

            AppMsg::Record => {
                if self.is_recording() {
                    return;
                }

                match self.build_command() {
                    Some(command) => self.start_recording(&command, &sender),
                    None => tracing::info!("no topics selected; nothing to record"),
                }
            }

            AppMsg::PollRequested => match self.session.poll() {
                SessionStatus::Recording { elapsed_secs } => {
                    if let Some(window) = &self.recording_window {
                        window.emit(RecordingMsg::Elapsed(elapsed_secs));
                    }
                }
                SessionStatus::Stopped => self.close_recording_window(),
                SessionStatus::Failed { detail } => {
                    if let Some(window) = &self.recording_window {
                        window.emit(RecordingMsg::Failure(detail));
                    }
                }
                SessionStatus::Idle => {}
            },

            AppMsg::StopRecording => {
                self.session.stop();
                self.close_recording_window();
            }
        }
    }
}
