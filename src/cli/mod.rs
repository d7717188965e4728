mod args;
mod output;
mod run;

pub use args::{Cli, Commands, ConfigSubcommands, DEFAULT_QUERY, OutputFormat};
pub use output::{RunReport, UsageReport};
pub use run::execute;
