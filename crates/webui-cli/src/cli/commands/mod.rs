//! CLI command handlers, one file per subcommand.

mod completions;
mod fingerprint;
mod provision;
mod status;
mod url;

pub use completions::run_completions;
pub use fingerprint::run_fingerprint;
pub use provision::{format_rate, run_provision};
pub use status::{run_status, StatusReport};
pub use url::run_url;
