mod commands;
mod terminal;

use commands::{CommandLine, discover};
use terminal::{logging, print};
use tracing::error;

#[tokio::main]
async fn main() {
    let commands = CommandLine::parse_args();
    logging::init(commands.log_level());

    let cfg = commands.to_config();

    print::header("getting ready for discovery");
    if let Err(e) = discover::discover(&cfg, &commands.output()).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}
