//! Recording status window.
//!
//! Shows the elapsed time while a recording runs and owns the one-second
//! tick loop that drives session polling. Each tick asks the main window
//! to poll; the main window answers with the observed status. Ticks are
//! delivered as ordinary messages, so polls are strictly sequential and
//! never overlap. Closing the window stops the recording.

use std::time::Duration;

use gtk4::glib;
use gtk4::prelude::*;
use relm4::prelude::*;

/// Messages for the recording window
#[derive(Debug)]
pub enum RecordingMsg {
    /// Internal one-second tick from the timer loop
    Tick,
    /// Main window reports the recording is still running
    Elapsed(u64),
    /// Main window reports the recording failed; show the detail
    Failure(String),
    /// User asked to close the window
    CloseRequested,
}

/// Output sent to the main window
#[derive(Debug)]
pub enum RecordingOutput {
    /// Poll the session now
    PollRequested,
    /// Stop the recording (window is being closed)
    StopRequested,
}

/// Recording window model
pub struct RecordingWindow {
    label_text: String,
    failed: bool,
}

fn recording_text(elapsed_secs: u64) -> String {
    format!(
        "Recording bag file...\n\
         Close this window to stop recording.\n\n\
         ({:02}:{:02})",
        elapsed_secs / 60,
        elapsed_secs % 60
    )
}

#[relm4::component(pub)]
impl Component for RecordingWindow {
    /// Poll interval in seconds
    type Init = u64;
    type Input = RecordingMsg;
    type Output = RecordingOutput;
    type CommandOutput = RecordingMsg;

    view! {
        gtk4::Window {
            set_title: Some("recording"),
            set_modal: true,
            set_resizable: false,

            connect_close_request[sender] => move |_| {
                sender.input(RecordingMsg::CloseRequested);
                glib::Propagation::Stop
            },

            gtk4::Box {
                set_orientation: gtk4::Orientation::Vertical,
                set_margin_all: 16,

                gtk4::Label {
                    #[watch]
                    set_label: &model.label_text,
                    set_justify: gtk4::Justification::Center,
                },
            },
        }
    }

    fn init(
        poll_interval_secs: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = RecordingWindow {
            label_text: recording_text(0),
            failed: false,
        };

        let widgets = view_output!();

        // Tick loop; ends when the window (and its receiver) is gone.
        sender.spawn_command(move |cmd_sender| loop {
            std::thread::sleep(Duration::from_secs(poll_interval_secs.max(1)));
            if cmd_sender.send(RecordingMsg::Tick).is_err() {
                break;
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _root: &Self::Root) {
        match msg {
            RecordingMsg::Tick => {
                // Nothing left to poll once the failure text is up.
                if !self.failed {
                    let _ = sender.output(RecordingOutput::PollRequested);
                }
            }
            RecordingMsg::Elapsed(elapsed_secs) => {
                self.label_text = recording_text(elapsed_secs);
            }
            RecordingMsg::Failure(detail) => {
                self.failed = true;
                self.label_text = format!(
                    "Something went wrong during recording.\nCauses may be:\n\n{detail}"
                );
            }
            RecordingMsg::CloseRequested => {
                let _ = sender.output(RecordingOutput::StopRequested);
            }
        }
    }

    fn update_cmd(
        &mut self,
        msg: Self::CommandOutput,
        sender: ComponentSender<Self>,
        _root: &Self::Root,
    ) {
        // Forward command outputs as regular inputs
        sender.input(msg);
    }
}
