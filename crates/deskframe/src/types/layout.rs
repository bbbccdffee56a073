/*! Named layouts: the persisted unit of the layout store. */

use super::{DesktopIconRecord, WindowRecord};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A named snapshot of window positions, optionally with desktop icon
/// positions.
///
/// `desktop_icons` is `Some` only when `include_desktop_icons` is set and at
/// least one icon was captured; `Layout::new` enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Layout {
  pub name: String,
  pub windows: Vec<WindowRecord>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub desktop_icons: Option<Vec<DesktopIconRecord>>,
  pub include_desktop_icons: bool,
  #[serde(with = "reference_date")]
  #[ts(type = "number")]
  pub created_at: DateTime<Utc>,
}

impl Layout {
  /// Build a layout stamped with the current time.
  pub fn new(
    name: impl Into<String>,
    windows: Vec<WindowRecord>,
    desktop_icons: Vec<DesktopIconRecord>,
    include_desktop_icons: bool,
  ) -> Self {
    Self::with_timestamp(
      name,
      windows,
      desktop_icons,
      include_desktop_icons,
      Utc::now().trunc_subsecs(3),
    )
  }

  pub fn with_timestamp(
    name: impl Into<String>,
    windows: Vec<WindowRecord>,
    desktop_icons: Vec<DesktopIconRecord>,
    include_desktop_icons: bool,
    created_at: DateTime<Utc>,
  ) -> Self {
    let desktop_icons = (include_desktop_icons && !desktop_icons.is_empty()).then_some(desktop_icons);
    Self {
      name: name.into(),
      windows,
      desktop_icons,
      include_desktop_icons,
      created_at,
    }
  }

  /// Icons to put back on restore (empty unless icons were captured).
  pub fn icons_to_restore(&self) -> &[DesktopIconRecord] {
    match (&self.desktop_icons, self.include_desktop_icons) {
      (Some(icons), true) => icons,
      _ => &[],
    }
  }
}

/// Dates as floating seconds since 2001-01-01T00:00:00Z, the platform's
/// default date encoding.
pub(crate) mod reference_date {
  #![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

  use chrono::{DateTime, Utc};
  use serde::{de, Deserialize, Deserializer, Serializer};

  /// Unix timestamp of the reference date.
  pub(crate) const REFERENCE_UNIX_SECONDS: i64 = 978_307_200;

  pub(crate) fn to_seconds(date: &DateTime<Utc>) -> f64 {
    (date.timestamp() - REFERENCE_UNIX_SECONDS) as f64 + f64::from(date.timestamp_subsec_nanos()) / 1e9
  }

  /// Decodes to microsecond precision; finer digits are f64 noise at this
  /// magnitude.
  pub(crate) fn from_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
      return None;
    }
    let whole = seconds.floor();
    let mut secs = whole as i64 + REFERENCE_UNIX_SECONDS;
    let mut micros = ((seconds - whole) * 1e6).round() as u32;
    if micros >= 1_000_000 {
      secs += 1;
      micros -= 1_000_000;
    }
    DateTime::from_timestamp(secs, micros * 1_000)
  }

  pub(crate) fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(to_seconds(date))
  }

  pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let seconds = f64::deserialize(deserializer)?;
    from_seconds(seconds).ok_or_else(|| de::Error::custom(format!("date out of range: {seconds}")))
  }
}
