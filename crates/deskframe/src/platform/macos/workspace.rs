/*! `NSWorkspace` access: running applications and launching. */

#![allow(unsafe_code)]
#![allow(clippy::cast_sign_loss)]

use block2::RcBlock;
use objc2_app_kit::{NSRunningApplication, NSWorkspace, NSWorkspaceOpenConfiguration};
use objc2_foundation::{NSError, NSString};

use crate::platform::RunningApplication;
use crate::types::{DeskframeError, DeskframeResult, ProcessId};

pub(super) fn running_applications() -> Vec<RunningApplication> {
  objc2::rc::autoreleasepool(|_pool| {
    let workspace = NSWorkspace::sharedWorkspace();
    workspace
      .runningApplications()
      .iter()
      .filter(|app| app.processIdentifier() > 0)
      .map(|app| RunningApplication {
        bundle_id: app.bundleIdentifier().map(|s| s.to_string()),
        pid: ProcessId(app.processIdentifier() as u32),
        localized_name: app.localizedName().map(|s| s.to_string()),
      })
      .collect()
  })
}

/// Issue an open request. Completion (success or failure) is only logged.
pub(super) fn launch_application(bundle_id: &str, activate: bool) -> DeskframeResult<()> {
  objc2::rc::autoreleasepool(|_pool| {
    let workspace = NSWorkspace::sharedWorkspace();
    let identifier = NSString::from_str(bundle_id);
    let Some(url) = workspace.URLForApplicationWithBundleIdentifier(&identifier) else {
      return Err(DeskframeError::LaunchFailed {
        bundle_id: bundle_id.to_string(),
        reason: "no application registered for bundle identifier".to_string(),
      });
    };

    let configuration = unsafe { NSWorkspaceOpenConfiguration::configuration() };
    unsafe { configuration.setActivates(activate) };

    let owned_id = bundle_id.to_string();
    let completion = RcBlock::new(move |app: *mut NSRunningApplication, error: *mut NSError| {
      if let Some(error) = unsafe { error.as_ref() } {
        log::warn!(
          "Launching {owned_id} failed: {}",
          error.localizedDescription()
        );
      } else if let Some(app) = unsafe { app.as_ref() } {
        log::debug!("Launched {owned_id} (pid {})", app.processIdentifier());
      }
    });

    unsafe {
      workspace.openApplicationAtURL_configuration_completionHandler(
        &url,
        &configuration,
        Some(&completion),
      );
    }
    Ok(())
  })
}
