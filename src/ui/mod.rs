pub mod layout;

mod browse;
mod form;
mod notice;
mod play;

pub use browse::draw_browse;
pub use form::draw_form;
pub use layout::{calculate_browse_chunks, calculate_view_chunks, centered_rect};
pub use notice::{draw_delete_confirmation, draw_notice};
pub use play::draw_play;
