//! Windows implementation: GDI capture, cursor, DPI and monitor queries.

mod cursor;
mod display;
mod dpi;
mod gdi;

pub use cursor::cursor_position;
pub use display::{displays, primary_display, virtual_screen};
pub use dpi::declare_dpi_awareness;
pub use gdi::capture_pixel;
