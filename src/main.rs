use autoemail::{cli, config, error, files, http, session, spinner};
use autoemail_common::view::html::page_html;
use autoemail_common::{
    extract_results, CategoryFilter, CurrentResultView, Error as CommonError, SubmissionController,
    SubmissionRequest,
};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use http::HttpTransport;
use spinner::SpinnerIndicator;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load()?;

    match cli.command {
        Commands::Submit { text, files, json, html } => {
            let endpoint = config.resolve_endpoint(cli.endpoint.as_deref());
            info!(%endpoint, "送信先");

            let blobs = files::load_files(&files)?;
            let request = SubmissionRequest::new(text, blobs);

            let mut controller = build_controller(&config, endpoint)?;
            let outcome = match controller.submit(request).await {
                Ok(outcome) => outcome,
                Err(CommonError::Transport(e)) => {
                    eprint!("{}", controller.session().render_current());
                    return Err(CommonError::Transport(e).into());
                }
                Err(e) => return Err(e.into()),
            };

            if json {
                let value = serde_json::json!({
                    "current": outcome.current,
                    "history": outcome.history,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print!("{}", outcome.current);
            }

            if let Some(path) = html {
                std::fs::write(&path, page_html("AutoEmail", &outcome.current, &outcome.history))?;
                println!("✔ HTML gravado: {}", path.display());
            }
        }

        Commands::Normalize { input, filter, json } => {
            let content = std::fs::read_to_string(&input)?;
            let raw = extract_results(&content);

            let mut view = CurrentResultView::new();
            view.set_results(&raw);
            let render = match filter {
                Some(filter) => view.set_filter(CategoryFilter::parse(&filter)),
                None => view.render(),
            };

            if json {
                let items: Vec<_> = view.displayed().map(|(_, item)| item).collect();
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                print!("{}", render);
            }
        }

        Commands::Session => {
            let endpoint = config.resolve_endpoint(cli.endpoint.as_deref());
            println!("Endpoint: {}", endpoint);
            let mut controller = build_controller(&config, endpoint)?;
            session::run_interactive(&mut controller).await?;
        }

        Commands::Config { set_endpoint, set_overlap, show } => {
            let mut changed = false;
            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                changed = true;
            }
            if let Some(policy) = set_overlap {
                config.overlap_policy = policy;
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定ファイル: {}", Config::config_path()?.display());
                println!("Endpoint: {}", config.endpoint);
                println!("Overlap policy: {}", config.overlap_policy);
            }
        }
    }

    Ok(())
}

fn build_controller(config: &Config, endpoint: String) -> Result<SubmissionController<HttpTransport>> {
    let transport = HttpTransport::new(endpoint)?;
    let indicator = Arc::new(SpinnerIndicator::new("Processando..."));
    Ok(SubmissionController::new(transport, config.overlap_policy, indicator))
}
