//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: Header and footer
//! - `modals`: Confirmation dialog
//! - `panels`: Composer, history and response panels
//! - `styling`: Color schemes and the theme palette

mod components;
mod modals;
mod panels;
mod styling;

pub use components::{render_footer, render_header};
pub use modals::render_clear_history_modal;
pub use panels::{render_composer_panel, render_history_panel, render_response_panel};
