//! Topic selection list with reset / select-all controls.
//!
//! Selection state is mirrored to the parent through `TopicToggled`
//! outputs so the parent can snapshot it when a command is built.

use gtk4::prelude::*;
use relm4::prelude::*;

/// Input message for the TopicList component
#[derive(Debug)]
pub enum TopicListMsg {
    /// A topic check button changed state
    Toggled(usize, bool),
    /// "select all" clicked
    SelectAll,
    /// "reset" clicked
    Reset,
}

/// Output message sent to parent
#[derive(Debug)]
pub enum TopicListOutput {
    /// Topic at index changed selection state
    TopicToggled(usize, bool),
}

/// Initialization parameters
pub struct TopicListInit {
    /// Discovered topic names, in display order
    pub topics: Vec<String>,
}

/// Topic list component model
pub struct TopicList {
    buttons: Vec<gtk4::CheckButton>,
}

#[relm4::component(pub)]
impl Component for TopicList {
    type Init = TopicListInit;
    type Input = TopicListMsg;
    type Output = TopicListOutput;
    type CommandOutput = ();

    view! {
        gtk4::Box {
            set_orientation: gtk4::Orientation::Vertical,
            set_spacing: 8,
            set_margin_all: 8,

            gtk4::ScrolledWindow {
                set_vexpand: true,
                set_min_content_width: 280,

                #[name = "topic_box"]
                gtk4::Box {
                    set_orientation: gtk4::Orientation::Vertical,
                },
            },

            gtk4::Box {
                set_orientation: gtk4::Orientation::Horizontal,
                set_spacing: 8,
                set_halign: gtk4::Align::Center,

                gtk4::Button {
                    set_label: "reset",
                    connect_clicked => TopicListMsg::Reset,
                },

                gtk4::Button {
                    set_label: "select all",
                    connect_clicked => TopicListMsg::SelectAll,
                },
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let mut model = TopicList {
            buttons: Vec::new(),
        };

        let widgets = view_output!();

        for (index, topic) in init.topics.iter().enumerate() {
            let button = gtk4::CheckButton::with_label(topic);
            let sender_clone = sender.clone();
            button.connect_toggled(move |btn| {
                sender_clone.input(TopicListMsg::Toggled(index, btn.is_active()));
            });
            widgets.topic_box.append(&button);
            model.buttons.push(button);
        }

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>, _root: &Self::Root) {
        match msg {
            TopicListMsg::Toggled(index, active) => {
                let _ = sender.output(TopicListOutput::TopicToggled(index, active));
            }
            TopicListMsg::SelectAll => {
                for button in &self.buttons {
                    button.set_active(true);
                }
            }
            TopicListMsg::Reset => {
                for button in &self.buttons {
                    button.set_active(false);
                }
            }
        }
    }
}
