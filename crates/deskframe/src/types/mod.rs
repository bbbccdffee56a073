/*! Core types for deskframe.

Regenerate TypeScript types: `cargo test -p deskframe export_bindings`
*/

#![allow(missing_docs)]

mod error;
mod event;
mod geometry;
mod icon;
mod ids;
mod layout;
mod window;

pub use error::{DeskframeError, DeskframeResult};
pub use event::Event;
pub use geometry::{Bounds, Point, Size};
pub use icon::DesktopIconRecord;
pub use ids::{ProcessId, WindowId};
pub use layout::Layout;
pub use window::WindowRecord;
