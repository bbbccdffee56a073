/*!
Finder preferences: desktop icon positions stored in `com.apple.finder.plist`.

Finder keeps positions under one of two paths, depending on OS version:

- `DesktopViewSettings → StandardViewSettings → IconViewSettings → IconPositions`
- `DesktopViewSettings → IconViewSettings → IconPositions`

Each entry maps a file name to a dictionary with `x`/`y` (sometimes `X`/`Y`),
stored as integers or reals. Anything unexpected is skipped rather than
treated as an error.
*/

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]

use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufWriter, Write};
use std::path::Path;

use plist::{Dictionary, Value};

use crate::types::{DeskframeResult, DesktopIconRecord, Point};

const DESKTOP_VIEW_SETTINGS: &str = "DesktopViewSettings";
const STANDARD_VIEW_SETTINGS: &str = "StandardViewSettings";
const ICON_VIEW_SETTINGS: &str = "IconViewSettings";
const ICON_POSITIONS: &str = "IconPositions";

/// Icon positions decoded from Finder's preferences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinderIconPositions {
  positions: BTreeMap<String, Point>,
}

impl FinderIconPositions {
  /// Read and parse the property list at `path` (binary or XML).
  pub fn read(path: &Path) -> DeskframeResult<Self> {
    let root = Value::from_file(path)?;
    Ok(Self::parse(&root))
  }

  /// Parse a decoded property list. Missing paths yield an empty set.
  pub fn parse(root: &Value) -> Self {
    let positions = icon_positions(root)
      .map(|entries| {
        entries
          .iter()
          .filter_map(|(name, entry)| Some((name.clone(), entry_point(entry)?)))
          .collect()
      })
      .unwrap_or_default();
    Self { positions }
  }

  /// Number of positioned entries.
  pub fn len(&self) -> usize {
    self.positions.len()
  }

  /// Whether no entry has a position.
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  /// Saved position of `name`.
  pub fn get(&self, name: &str) -> Option<Point> {
    self.positions.get(name).copied()
  }

  /// Records for entries whose name is in `known_names`.
  pub fn known(&self, known_names: &BTreeSet<String>) -> Vec<DesktopIconRecord> {
    self
      .positions
      .iter()
      .filter(|(name, _)| known_names.contains(*name))
      .map(|(name, point)| DesktopIconRecord::new(name.clone(), *point))
      .collect()
  }
}

fn child<'a>(dict: &'a Dictionary, key: &str) -> Option<&'a Dictionary> {
  dict.get(key)?.as_dictionary()
}

/// The `IconPositions` dictionary, trying the nested path first.
fn icon_positions(root: &Value) -> Option<&Dictionary> {
  let desktop = child(root.as_dictionary()?, DESKTOP_VIEW_SETTINGS)?;
  let nested = child(desktop, STANDARD_VIEW_SETTINGS)
    .and_then(|standard| child(standard, ICON_VIEW_SETTINGS))
    .and_then(|icon_view| child(icon_view, ICON_POSITIONS));
  nested.or_else(|| child(child(desktop, ICON_VIEW_SETTINGS)?, ICON_POSITIONS))
}

fn number(value: &Value) -> Option<f64> {
  match value {
    Value::Real(real) => Some(*real),
    Value::Integer(integer) => integer
      .as_signed()
      .map(|i| i as f64)
      .or_else(|| integer.as_unsigned().map(|u| u as f64)),
    _ => None,
  }
}

fn coordinate(entry: &Dictionary, lower: &str, upper: &str) -> Option<f64> {
  entry.get(lower).or_else(|| entry.get(upper)).and_then(number)
}

fn entry_point(entry: &Value) -> Option<Point> {
  let entry = entry.as_dictionary()?;
  Some(Point::new(
    coordinate(entry, "x", "X")?,
    coordinate(entry, "y", "Y")?,
  ))
}

/// Get or create the dictionary at `key`.
fn child_mut<'a>(dict: &'a mut Dictionary, key: &str) -> Option<&'a mut Dictionary> {
  if !matches!(dict.get(key), Some(Value::Dictionary(_))) {
    dict.insert(key.to_string(), Value::Dictionary(Dictionary::new()));
  }
  dict.get_mut(key)?.as_dictionary_mut()
}

/// Mutable `IconPositions`, following whichever layout the file already uses
/// and creating the short path when neither exists.
fn icon_positions_mut(root: &mut Dictionary) -> Option<&mut Dictionary> {
  let desktop = child_mut(root, DESKTOP_VIEW_SETTINGS)?;
  let has_nested = child(desktop, STANDARD_VIEW_SETTINGS)
    .and_then(|standard| child(standard, ICON_VIEW_SETTINGS))
    .is_some_and(|icon_view| icon_view.get(ICON_POSITIONS).is_some());
  let icon_view = if has_nested {
    child_mut(child_mut(desktop, STANDARD_VIEW_SETTINGS)?, ICON_VIEW_SETTINGS)?
  } else {
    child_mut(desktop, ICON_VIEW_SETTINGS)?
  };
  child_mut(icon_view, ICON_POSITIONS)
}

/// Merge `icons` into a decoded preferences tree. Existing per-entry keys other
/// than the coordinates are preserved.
pub(crate) fn merge_icon_positions(root: &mut Value, icons: &[DesktopIconRecord]) {
  if root.as_dictionary().is_none() {
    *root = Value::Dictionary(Dictionary::new());
  }
  let Some(positions) = root.as_dictionary_mut().and_then(icon_positions_mut) else {
    return;
  };
  for icon in icons {
    let entry = child_mut(positions, &icon.name);
    if let Some(entry) = entry {
      entry.remove("X");
      entry.remove("Y");
      entry.insert("x".to_string(), Value::from(icon.position.x.round() as i64));
      entry.insert("y".to_string(), Value::from(icon.position.y.round() as i64));
    }
  }
}

/// Rewrite `IconPositions` in the preferences file at `path`, in binary
/// format. A missing file is created.
pub fn write_icon_positions(path: &Path, icons: &[DesktopIconRecord]) -> DeskframeResult<()> {
  let mut root = if path.exists() {
    Value::from_file(path)?
  } else {
    Value::Dictionary(Dictionary::new())
  };
  merge_icon_positions(&mut root, icons);

  let dir = path.parent().unwrap_or_else(|| Path::new("."));
  let file = tempfile::NamedTempFile::new_in(dir)?;
  {
    let mut writer = BufWriter::new(file.as_file());
    root.to_writer_binary(&mut writer)?;
    writer.flush()?;
  }
  file.persist(path).map_err(|e| e.error)?;
  Ok(())
}
