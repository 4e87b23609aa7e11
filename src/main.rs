use clap::Parser;
use docsite::app::{handle_fatal_error, init_logging, AppConfig};
use docsite::cli::{execute_command, Cli};
use docsite::config::DocsiteConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let mut app = match AppConfig::new(verbose) {
        Ok(app) => app,
        Err(e) => handle_fatal_error(e, verbose),
    };
    if let Some(dir) = cli.command.site_dir() {
        let dir = app.working_dir.join(dir);
        app = app.with_working_dir(dir);
    }

    let config = DocsiteConfig::load(&app.working_dir, cli.config.as_deref());
    let log_filter = config.as_ref().ok().and_then(|c| c.log_level.clone());
    let app = app.with_log_filter(log_filter);
    init_logging(&app);

    let config = match config {
        Ok(config) => config,
        Err(e) => handle_fatal_error(e.into(), verbose),
    };

    tokio::select! {
        result = execute_command(cli, &app, config) => {
            if let Err(e) = result {
                handle_fatal_error(e, verbose);
            }
        }
        Ok(()) = tokio::signal::ctrl_c() => {
            println!("\nOperation cancelled by user");
            std::process::exit(1);
        }
    }
}
