/*!
Deskframe - window layouts for macOS

Capture where every window (and optionally every desktop icon) sits, save it
under a name, and put everything back later. Also tiles the visible windows
into preset grids.

```ignore
use deskframe::{Deskframe, Event};
use deskframe::grid::{GridPlacement, RowBand};

let deskframe = Deskframe::new()?;

// Capture and persist
let layout = deskframe.capture_current_layout("Work", true);
let index = deskframe.save_layout(layout)?;

// Restore on a worker thread; events bracket the run
let mut events = deskframe.subscribe();
let report = deskframe.restore_saved(index)?.join();

// Tile the three frontmost windows along the bottom third
deskframe.apply_grid(&GridPlacement::band(3, RowBand::Lower));
```
*/

mod config;
mod core;
mod types;

pub mod grid;
pub mod icons;
pub mod platform;
pub mod restore;
pub mod snapshot;
pub mod store;

pub use types::*;

pub use crate::config::Config;
pub use crate::core::{Deskframe, DeskframeBuilder, RestoreHandle};
