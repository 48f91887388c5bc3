use std::io;

use tracing::{error, info};

use linkwatch::{App, Config, FileWatchService};

fn main() {
    let config = match Config::load_with_env("linkwatch.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load linkwatch.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = linkwatch::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        linkwatch::logging::init_console_only(&config.logging.level);
    }

    info!(
        "linkwatch starting (links: {}, articles: {})",
        config.storage.links_file, config.storage.articles_file
    );

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    let service = match FileWatchService::from_config(&config) {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to initialize: {}", e);
            eprintln!("Failed to initialize: {e}");
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut app = App::new(service, stdin.lock(), io::stdout(), config.display.page_size);
    if let Err(e) = runtime.block_on(app.run()) {
        error!("Terminal session ended with an error: {}", e);
        eprintln!("{e}");
        std::process::exit(1);
    }

    info!("linkwatch exiting");
}
