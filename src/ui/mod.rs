//! UI modules for the OASIS-H map page.
//!
//! The UI is split into distinct panels:
//! - Top bar: Brand, section labels, and 3D map status
//! - Right panel: Bangkok overlay selector and legend
//! - Central pane: 3D map area and location details
//! - Status toast: Navigation progress message

mod bangkok_map;
pub mod colors;
mod map_pane;
mod status_toast;
mod top_bar;

pub use bangkok_map::render_bangkok_panel;
pub use map_pane::render_map_pane;
pub use status_toast::render_status_toast;
pub use top_bar::render_top_bar;
