use clap::Parser;
use dotenvy::dotenv;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use upload_release_asset::config::{ActionInputs, GithubConfig};
use upload_release_asset::infrastructure::github;
use upload_release_asset::services::output::{ActionOutput, GithubActionsOutput};

#[derive(Parser, Debug)]
#[command(author, version, about = "Upload files as assets of a GitHub release", long_about = None)]
struct Args {
    #[command(flatten)]
    inputs: ActionInputs,

    /// Token for the GitHub API (default: $GITHUB_TOKEN)
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    let args = Args::parse();

    // stdout is reserved for workflow commands
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "upload_release_asset=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = GithubActionsOutput::from_env();

    let request = match args.inputs.or_default_repository().into_request() {
        Ok(request) => request,
        Err(e) => {
            error!("❌ {}", e);
            output.set_failed(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let mut config = GithubConfig::from_env();
    if let Some(token) = args.github_token.filter(|t| !t.is_empty()) {
        config.token = Some(token);
    }

    let client = match github::setup_client(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("❌ {:#}", e);
            output.set_failed(&format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };

    info!(
        "🚀 Uploading '{}' to {}/{} release {}",
        request.asset_path, request.owner, request.repo, request.release_id
    );

    match upload_release_asset::run(&request, client, &output).await {
        Ok(uploaded) => {
            info!("✅ Done: {}", uploaded.to_output_value());
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}
