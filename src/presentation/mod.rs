//! Maps a classification to a control layout

pub mod layout;
pub mod loader;

pub use layout::{confirmation, select_layout, Layout, LayoutId};
pub use loader::{BuiltinLayouts, ControlGroup, ControlIds, LayoutLoader, LayoutTemplate};
