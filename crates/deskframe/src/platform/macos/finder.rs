/*! Finder scripting and restart, via the system command-line tools. */

use std::path::Path;
use std::process::Command;

use crate::types::{DeskframeError, DeskframeResult};

const OSASCRIPT: &str = "/usr/bin/osascript";
const KILLALL: &str = "/usr/bin/killall";

pub(super) fn scripting_available() -> bool {
  Path::new(OSASCRIPT).exists()
}

pub(super) fn run_script(script: &str) -> DeskframeResult<()> {
  let output = Command::new(OSASCRIPT).args(["-e", script]).output()?;
  if output.status.success() {
    Ok(())
  } else {
    Err(DeskframeError::Script(
      String::from_utf8_lossy(&output.stderr).trim().to_string(),
    ))
  }
}

pub(super) fn restart_finder() -> DeskframeResult<()> {
  let status = Command::new(KILLALL).arg("Finder").status()?;
  if status.success() {
    Ok(())
  } else {
    Err(DeskframeError::Script(format!("killall Finder exited with {status}")))
  }
}
