//! Secondary windows and dialogs.

pub mod advanced_settings;
pub mod recording;

pub use advanced_settings::{
    AdvancedOptions, AdvancedSettingsDialog, AdvancedSettingsMsg, AdvancedSettingsOutput,
};
pub use recording::{RecordingMsg, RecordingOutput, RecordingWindow};
