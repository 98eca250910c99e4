use clap::Parser;

use stw_daily::cli::Cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = Cli::parse().into_config();
    if let Err(e) = stw_daily::run(&cfg) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
