//! Install MaxLaunchpad from its release disk image, keep it registered as a
//! login item, and remove it again.

pub mod bundle;
pub mod config;
pub mod error;
pub mod fetch;
pub mod host;
pub mod lifecycle;
pub mod login_item;
pub mod mount;
pub mod outcome;
pub mod system;

pub use config::Config;
pub use error::InstallError;
pub use host::{Host, MacosVersion};
pub use lifecycle::Installer;
pub use outcome::{Outcome, Report};
