//! Reusable UI components

mod control_panel;
mod input_bar;
mod message_list;

pub use control_panel::ControlPanel;
pub use input_bar::InputBar;
pub use message_list::MessageList;
