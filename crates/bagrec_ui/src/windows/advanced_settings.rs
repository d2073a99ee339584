//! Advanced recording settings dialog.
//!
//! Edits the options that do not fit the main settings frame. The dialog
//! is launched from the stored `AdvancedOptions` and hands the edited
//! state back through a typed output when it closes, so the main window
//! stays the single owner of configuration state.

use gtk4::glib;
use gtk4::prelude::*;
use relm4::prelude::*;

/// The advanced option set, owned by the main window between edits.
#[derive(Debug, Clone, Default)]
pub struct AdvancedOptions {
    /// `-p`: publish a message when the record begins
    pub publish_on_start: bool,
    /// `--lz4` compression
    pub lz4: bool,
    /// `--udp` transport hint
    pub udp: bool,
    /// `--repeat-latched`
    pub repeat_latched: bool,

    pub max_splits_enabled: bool,
    pub max_splits: String,
    pub buffer_size_enabled: bool,
    pub buffer_size: String,
    pub chunk_size_enabled: bool,
    pub chunk_size: String,
    pub limit_enabled: bool,
    pub limit: String,
    pub node_enabled: bool,
    pub node: String,
}

/// Messages for the advanced settings dialog
#[derive(Debug)]
pub enum AdvancedSettingsMsg {
    PublishToggled(bool),
    Lz4Toggled(bool),
    UdpToggled(bool),
    RepeatLatchedToggled(bool),
    MaxSplitsToggled(bool),
    MaxSplitsChanged(String),
    BufferSizeToggled(bool),
    BufferSizeChanged(String),
    ChunkSizeToggled(bool),
    ChunkSizeChanged(String),
    LimitToggled(bool),
    LimitChanged(String),
    NodeToggled(bool),
    NodeChanged(String),
    /// Window close requested; hand the edited state back
    Close,
}

/// Output sent to the main window
#[derive(Debug)]
pub enum AdvancedSettingsOutput {
    Closed(AdvancedOptions),
}

/// Dialog component model
pub struct AdvancedSettingsDialog {
    options: AdvancedOptions,
}

#[relm4::component(pub)]
impl Component for AdvancedSettingsDialog {
    type Init = AdvancedOptions;
    type Input = AdvancedSettingsMsg;
    type Output = AdvancedSettingsOutput;
    type CommandOutput = ();

    view! {
        gtk4::Window {
            set_title: Some("advanced settings"),
            set_modal: true,
            set_resizable: false,

            connect_close_request[sender] => move |_| {
                sender.input(AdvancedSettingsMsg::Close);
                glib::Propagation::Stop
            },

            gtk4::Box {
                set_orientation: gtk4::Orientation::Vertical,
                set_margin_all: 12,
                set_spacing: 4,

                gtk4::CheckButton {
                    set_label: Some("publish a msg when the record begin"),
                    set_active: model.options.publish_on_start,
                    connect_toggled[sender] => move |btn| {
                        sender.input(AdvancedSettingsMsg::PublishToggled(btn.is_active()));
                    },
                },

                gtk4::CheckButton {
                    set_label: Some("use LZ4 compression"),
                    set_active: model.options.lz4,
                    connect_toggled[sender] => move |btn| {
                        sender.input(AdvancedSettingsMsg::Lz4Toggled(btn.is_active()));
                    },
                },

                gtk4::CheckButton {
                    set_label: Some("use the UDP transport hint when subscribing to topics"),
                    set_active: model.options.udp,
                    connect_toggled[sender] => move |btn| {
                        sender.input(AdvancedSettingsMsg::UdpToggled(btn.is_active()));
                    },
                },

                gtk4::CheckButton {
                    set_label: Some("repeat latched msgs at the start of each new bag file"),
                    set_active: model.options.repeat_latched,
                    connect_toggled[sender] => move |btn| {
                        sender.input(AdvancedSettingsMsg::RepeatLatchedToggled(btn.is_active()));
                    },
                },

                gtk4::Box {
                    set_orientation: gtk4::Orientation::Horizontal,
                    set_spacing: 8,

                    gtk4::CheckButton {
                        set_label: Some(
                            "keep a maximum of N bag files,\n\
                             when reaching the maximum erase the oldest one\n\
                             to keep a constant number of files",
                        ),
                        set_active: model.options.max_splits_enabled,
                        connect_toggled[sender] => move |btn| {
                            sender.input(AdvancedSettingsMsg::MaxSplitsToggled(btn.is_active()));
                        },
                    },

                    gtk4::Entry {
                        set_hexpand: true,
                        set_text: &model.options.max_splits,
                        set_valign: gtk4::Align::Center,
                        connect_changed[sender] => move |entry| {
                            sender.input(AdvancedSettingsMsg::MaxSplitsChanged(entry.text().to_string()));
                        },
                    },
                },

                gtk4::Box {
                    set_orientation: gtk4::Orientation::Horizontal,
                    set_spacing: 8,

                    gtk4::CheckButton {
                        set_label: Some("use an internal buffer of size SIZE MB\n(Default: 256, 0 = infinite)"),
                        set_active: model.options.buffer_size_enabled,
                        connect_toggled[sender] => move |btn| {
                            sender.input(AdvancedSettingsMsg::BufferSizeToggled(btn.is_active()));
                        },
                    },

                    gtk4::Entry {
                        set_hexpand: true,
                        set_text: &model.options.buffer_size,
                        set_valign: gtk4::Align::Center,
                        connect_changed[sender] => move |entry| {
                            sender.input(AdvancedSettingsMsg::BufferSizeChanged(entry.text().to_string()));
                        },
                    },
                },

                gtk4::Box {
                    set_orientation: gtk4::Orientation::Horizontal,
                    set_spacing: 8,

                    gtk4::CheckButton {
                        set_label: Some("record to chunks of SIZE KB (Default: 768) (advanced)"),
                        set_active: model.options.chunk_size_enabled,
                        connect_toggled[sender] => move |btn| {
                            sender.input(AdvancedSettingsMsg::ChunkSizeToggled(btn.is_active()));
                        },
                    },

                    gtk4::Entry {
                        set_hexpand: true,
                        set_text: &model.options.chunk_size,
                        set_valign: gtk4::Align::Center,
                        connect_changed[sender] => move |entry| {
                            sender.input(AdvancedSettingsMsg::ChunkSizeChanged(entry.text().to_string()));
                        },
                    },
                },

                gtk4::Box {
                    set_orientation: gtk4::Orientation::Horizontal,
                    set_spacing: 8,

                    gtk4::CheckButton {
                        set_label: Some("only record NUM messages on each topic"),
                        set_active: model.options.limit_enabled,
                        connect_toggled[sender] => move |btn| {
                            sender.input(AdvancedSettingsMsg::LimitToggled(btn.is_active()));
                        },
                    },

                    gtk4::Entry {
                        set_hexpand: true,
                        set_text: &model.options.limit,
                        set_valign: gtk4::Align::Center,
                        connect_changed[sender] => move |entry| {
                            sender.input(AdvancedSettingsMsg::LimitChanged(entry.text().to_string()));
                        },
                    },
                },

                gtk4::Box {
                    set_orientation: gtk4::Orientation::Horizontal,
                    set_spacing: 8,

                    gtk4::CheckButton {
                        set_label: Some("record all topics subscribed to by a specific node"),
                        set_active: model.options.node_enabled,
                        connect_toggled[sender] => move |btn| {
                            sender.input(AdvancedSettingsMsg::NodeToggled(btn.is_active()));
                        },
                    },

                    gtk4::Entry {
                        set_hexpand: true,
                        set_text: &model.options.node,
                        set_valign: gtk4::Align::Center,
                        connect_changed[sender] => move |entry| {
                            sender.input(AdvancedSettingsMsg::NodeChanged(entry.text().to_string()));
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
        let model = AdvancedSettingsDialog { options: init };
        let widgets = view_output!();
        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, root: &Self::Root) {
        match msg {
            AdvancedSettingsMsg::PublishToggled(v) => self.options.publish_on_start = v,
            AdvancedSettingsMsg::Lz4Toggled(v) => self.options.lz4 = v,
            AdvancedSettingsMsg::UdpToggled(v) => self.options.udp = v,
            AdvancedSettingsMsg::RepeatLatchedToggled(v) => self.options.repeat_latched = v,
            AdvancedSettingsMsg::MaxSplitsToggled(v) => self.options.max_splits_enabled = v,
            AdvancedSettingsMsg::MaxSplitsChanged(v) => self.options.max_splits = v,
            AdvancedSettingsMsg::BufferSizeToggled(v) => self.options.buffer_size_enabled = v,
            AdvancedSettingsMsg::BufferSizeChanged(v) => self.options.buffer_size = v,
            AdvancedSettingsMsg::ChunkSizeToggled(v) => self.options.chunk_size_enabled = v,
            AdvancedSettingsMsg::ChunkSizeChanged(v) => self.options.chunk_size = v,
            AdvancedSettingsMsg::LimitToggled(v) => self.options.limit_enabled = v,
            AdvancedSettingsMsg::LimitChanged(v) => self.options.limit = v,
            AdvancedSettingsMsg::NodeToggled(v) => self.options.node_enabled = v,
            AdvancedSettingsMsg::NodeChanged(v) => self.options.node = v,
            AdvancedSettingsMsg::Close => {
                let _ = sender.output(AdvancedSettingsOutput::Closed(self.options.clone()));
                root.destroy();
            }
        }
    }
}
