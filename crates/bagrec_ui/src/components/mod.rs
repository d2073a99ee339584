//! Reusable UI components.

pub mod topic_list;

pub use topic_list::{TopicList, TopicListInit, TopicListMsg, TopicListOutput};
