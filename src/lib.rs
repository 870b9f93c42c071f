// cargo watch -x 'fmt' -x 'run -- named --out test_config.xml --size-mb 1'

pub mod cli;
pub mod emitter;
pub mod error;
pub mod generate;
pub mod logging;
pub mod models;
pub mod output;

use cli::{Cli, Command};
pub use error::{GenError, Result};
pub use generate::Summary;

/// Run the generator selected on the command line.
pub fn run(cli: &Cli) -> Result<Summary> {
    match &cli.command {
        Command::Named(args) => generate::named::generate(&args.options(cli.max_entries)?),
        Command::Massive(args) => generate::massive::generate(&args.options(cli.max_entries)),
        Command::Template(args) => generate::template::generate(&args.options(cli.max_entries)?),
    }
}
