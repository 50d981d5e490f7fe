mod app_events;
mod app_render;
mod app_state;
mod list_widget;
mod textarea_host;

pub use app_state::{App, CellController, DEFAULT_ROWS};
pub use list_widget::ListWidget;
pub use textarea_host::TextareaHost;
