//! Model package assembly.
//!
//! ```text
//! DownloadCoordinator
//!   ├─ ArtifactResolver   (job + model name -> manifest path)
//!   ├─ BundlePlanner      (engine type + path -> ordered entries)
//!   └─ Archiver           (entries -> <output dir>/<model file>.zip)
//! ```
//!
//! Every failure is reported once, as a `Report` carrying a stable code.

pub mod archiver;
pub mod cancel;
pub mod coordinator;
pub mod error;
pub mod planner;
pub mod report;
pub mod resolver;

pub use archiver::Archiver;
pub use cancel::CancelFlag;
pub use coordinator::DownloadCoordinator;
pub use error::{PackagingError, PackagingResult};
pub use planner::{BundleEntry, BundlePlanner, BundleSpec};
pub use report::Report;
pub use resolver::ArtifactResolver;
