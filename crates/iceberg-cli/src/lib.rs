pub mod app;
pub mod cli;
pub mod report;

pub use app::{run, CliError};
pub use cli::{Args, OutputFormat};
pub use report::{render_text, write_report, Report};
