//! postedit Core Library
//!
//! Everything needed to go from an edit notification to a toolchain profile:
//! - Decode the notification and resolve the edited file
//! - Drop generated and vendored paths
//! - Find the nearest project root
//! - Select the language and probe for its tools
//!
//! Every step either yields its value or a [`Skip`], which ends the
//! invocation as a silent success.

pub mod error;
pub mod event;
pub mod exclude;
pub mod fakes;
pub mod fs;
pub mod probe;
pub mod profile;
pub mod root;
pub mod settings;
pub mod skip;
pub mod target;
pub mod telemetry;

pub use error::{PostEditError, Result};
pub use event::EditEvent;
pub use exclude::{ExclusionFilter, DEFAULT_EXCLUDES};
pub use fs::{OsFs, ProjectFs};
pub use probe::{first_available, Candidate, Tool, ToolFamily};
pub use profile::{Language, RunnerVariant, ToolchainProfile};
pub use root::{locate, Marker, ProjectRoot};
pub use settings::{AmbiguousPolicy, Settings};
pub use skip::{Skip, Step};
pub use target::{absolutize, resolve, ResolvedTarget};
pub use telemetry::init_tracing;
