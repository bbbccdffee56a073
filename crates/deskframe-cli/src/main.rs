//! `deskframe` command-line front end.
//!
//! Set `RUST_LOG=deskframe=debug` to see what a capture or restore is doing.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use deskframe::grid::{GridPlacement, RowBand};
use deskframe::store::FilePreferences;
use deskframe::{Deskframe, Layout};

#[derive(Parser, Debug)]
#[command(name = "deskframe")]
#[command(about = "Save and restore macOS window layouts")]
#[command(version)]
struct Args {
  /// Directory holding saved layouts (default: per-user application support)
  #[arg(long, global = true)]
  store_dir: Option<PathBuf>,

  /// Longest wait for launched apps to open a window, in milliseconds
  #[arg(long, global = true)]
  settle_ms: Option<u64>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List saved layouts
  List,
  /// Capture the current screen and save it
  Save {
    name: String,
    /// Also record desktop icon positions
    #[arg(long)]
    icons: bool,
  },
  /// Restore a saved layout by name or index
  Apply {
    layout: String,
    /// Print the full restore report as JSON
    #[arg(long)]
    wait: bool,
  },
  /// Delete the saved layout at an index
  Delete { index: usize },
  /// Tile visible windows into a grid
  Grid {
    count: usize,
    /// Arrange as a single row in this third of the screen
    #[arg(long, value_enum)]
    band: Option<Band>,
    /// Rows added to the base grid
    #[arg(long, default_value_t = 0)]
    extra_rows: usize,
  },
  /// Print the visible windows as JSON
  Windows,
  /// Print the desktop icons as JSON
  Icons,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Band {
  Upper,
  Middle,
  Lower,
}

impl From<Band> for RowBand {
  fn from(band: Band) -> Self {
    match band {
      Band::Upper => Self::Upper,
      Band::Middle => Self::Middle,
      Band::Lower => Self::Lower,
    }
  }
}

fn build(args: &Args) -> Result<Deskframe> {
  let mut builder = Deskframe::builder();
  if let Some(dir) = &args.store_dir {
    builder = builder.preferences(Arc::new(FilePreferences::new(dir)));
  }
  if let Some(ms) = args.settle_ms {
    builder = builder.settle_timeout(Duration::from_millis(ms));
  }
  builder.build().context("Failed to open the layout store")
}

/// A saved layout by exact name, falling back to an index.
fn resolve_layout(deskframe: &Deskframe, key: &str) -> Result<(usize, Layout)> {
  if let Some(found) = deskframe.find_layout(key) {
    return Ok(found);
  }
  let Ok(index) = key.parse::<usize>() else {
    bail!("No saved layout named '{key}'");
  };
  let layout = deskframe
    .layout(index)
    .with_context(|| format!("No saved layout at index {index}"))?;
  Ok((index, layout))
}

fn list(deskframe: &Deskframe) {
  let layouts = deskframe.layouts();
  if layouts.is_empty() {
    println!("No saved layouts");
    return;
  }
  for (index, layout) in layouts.iter().enumerate() {
    let icons = layout.icons_to_restore().len();
    println!(
      "{index:>3}  {:<24} {} windows, {icons} icons, saved {}",
      layout.name,
      layout.windows.len(),
      layout.created_at.format("%Y-%m-%d %H:%M")
    );
  }
}

fn apply(deskframe: &Deskframe, key: &str, wait: bool) -> Result<()> {
  if !deskframe.has_accessibility_permissions() {
    log::warn!("Accessibility access is not granted; windows cannot be moved");
  }
  let (index, layout) = resolve_layout(deskframe, key)?;
  let name = layout.name.clone();
  let report = deskframe
    .restore_saved(index)?
    .join()
    .context("Restore worker panicked")?;

  if wait {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    println!(
      "Restored '{name}': {} moved, {} skipped",
      report.moved, report.skipped
    );
  }
  Ok(())
}

fn main() -> Result<()> {
  env_logger::init();
  let args = Args::parse();
  let deskframe = build(&args)?;

  match args.command {
    Command::List => list(&deskframe),
    Command::Save { name, icons } => {
      let layout = deskframe.capture_current_layout(&name, icons);
      let windows = layout.windows.len();
      let index = deskframe.save_layout(layout)?;
      println!("Saved '{name}' at index {index} ({windows} windows)");
    }
    Command::Apply { layout, wait } => apply(&deskframe, &layout, wait)?,
    Command::Delete { index } => {
      let removed = deskframe.delete_layout(index)?;
      println!("Deleted '{}'", removed.name);
    }
    Command::Grid {
      count,
      band,
      extra_rows,
    } => {
      let placement = match band {
        Some(band) => GridPlacement::band(count, band.into()),
        None => GridPlacement::grid(count).with_extra_rows(extra_rows),
      };
      let moved = deskframe.apply_grid(&placement);
      println!("Arranged {moved} windows");
    }
    Command::Windows => println!("{}", serde_json::to_string_pretty(&deskframe.windows())?),
    Command::Icons => println!("{}", serde_json::to_string_pretty(&deskframe.desktop_icons())?),
  }
  Ok(())
}
