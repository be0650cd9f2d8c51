use clap::Parser;
use tracing_subscriber::EnvFilter;

use phishguard::cli::{self, Cli, Commands};
use phishguard::config;
use phishguard::errors::PhishGuardError;
use phishguard::presenter::ViewState;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.with_ansi(!cli.no_color).init();
    }

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let result = match cli.command {
        Commands::Url(args) => cli::scan::handle_url(args).await,
        Commands::Qr(args) => cli::scan::handle_qr(args).await,
        Commands::Validate(args) => handle_validate(args).await.map(|()| ViewState::Idle),
    };

    match result {
        Ok(view) => {
            let code = cli::scan::exit_code_for(&view);
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), PhishGuardError> {
    let config = config::parse_config(&args.config).await?;
    let endpoints = config.service.unwrap_or_default().resolve();
    println!("Configuration is valid: {}", args.config.display());
    println!("  URL endpoint: {}", endpoints.url_endpoint());
    println!("  QR endpoint:  {}", endpoints.qr_endpoint());
    Ok(())
}
