/*! Platform layer: the OS collaborators deskframe drives.

`CurrentPlatform` is the implementation for the target OS. On anything other
than macOS it is `UnsupportedPlatform`, which reports no windows and refuses
writes, so the rest of the crate still builds and tests everywhere.
*/

mod traits;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(not(target_os = "macos"))]
mod unsupported;

#[cfg(test)]
pub(crate) mod fake;

pub use traits::{Platform, PlatformHandle, RunningApplication, WindowAttribute, WindowInfo};

#[cfg(target_os = "macos")]
pub use macos::{ElementHandle, MacPlatform};
#[cfg(not(target_os = "macos"))]
pub use unsupported::{UnsupportedHandle, UnsupportedPlatform};

/// Platform implementation for the compilation target.
#[cfg(target_os = "macos")]
pub type CurrentPlatform = MacPlatform;
/// Platform implementation for the compilation target.
#[cfg(not(target_os = "macos"))]
pub type CurrentPlatform = UnsupportedPlatform;
