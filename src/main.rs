use clap::Parser;
use log::error;

use scholar_desk::cli::{self, Cli, Commands};
use scholar_desk::config::Config;
use scholar_desk::server;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let outcome = match &cli.command {
        Some(Commands::Serve) | None => actix_web::rt::System::new()
            .block_on(server::run(config))
            .map_err(anyhow::Error::from),
        Some(Commands::Validate { image }) => cli::handle_validate(image),
        Some(Commands::Ocr { image }) => cli::handle_ocr(&config, image),
        Some(Commands::Theme { action }) => cli::handle_theme(&config, action),
    };

    if let Err(e) = outcome {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
