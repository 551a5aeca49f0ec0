//! UI rendering modules.

mod dialog;
mod layout;
mod list;
mod preview;
mod status;

pub use layout::draw;
