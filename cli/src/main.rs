mod http;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use feed::api::DEFAULT_API_URL;
use feed::{ApiConfig, AvatarIcon, FeedController, FeedError, LocalStore, Rating, Testimonial};
use tracing_subscriber::EnvFilter;

use crate::http::ReqwestTestimonialApi;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{}", .0.user_message())]
    Feed(#[from] FeedError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported image type for {0}; use png, jpg, gif, webp or svg")]
    NotAnImage(PathBuf),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "testimonials", about = "Read and post portfolio testimonials")]
struct Cli {
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[arg(long, env = "TESTIMONIALS_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every testimonial, newest first as the service orders them.
    List,
    /// Validate and post a testimonial the way the site widget does.
    Submit(SubmitArgs),
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    feedback: String,

    #[arg(long, default_value = "happy", value_parser = parse_rating)]
    rating: Rating,

    #[arg(long, value_parser = parse_avatar, conflicts_with = "image")]
    avatar: Option<AvatarIcon>,

    #[arg(long, help = "Picture to embed as the avatar (max 2MB once encoded)")]
    image: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ApiConfig::new(&cli.api_url);
    let api = ReqwestTestimonialApi::new(&config, Duration::from_secs(cli.timeout_secs))?;
    tracing::debug!(url = api.url(), "testimonial service");
    let controller = FeedController::new(api, LocalStore::new());

    match cli.command {
        Command::List => run_list(&controller).await,
        Command::Submit(args) => run_submit(&controller, args).await,
    }
}

type CliController = FeedController<ReqwestTestimonialApi, LocalStore>;

async fn run_list(controller: &CliController) -> Result<(), CliError> {
    controller.load_initial().await?;
    let items = controller.store().snapshot().items;
    print_json(&items)
}

async fn run_submit(controller: &CliController, args: SubmitArgs) -> Result<(), CliError> {
    controller.set_name(args.name);
    controller.set_feedback(args.feedback);
    controller.select_rating(args.rating);
    if let Some(icon) = args.avatar {
        controller.select_avatar(icon);
    }
    if let Some(path) = args.image {
        let mime = mime_for_path(&path).ok_or_else(|| CliError::NotAnImage(path.clone()))?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| CliError::Io { path: path.clone(), source })?;
        controller.upload_image(mime, bytes).await;
    }

    controller.submit().await?;
    let created: Option<Testimonial> = controller.store().snapshot().items.into_iter().next();
    print_json(&created)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_rating(raw: &str) -> Result<Rating, String> {
    Rating::parse(raw).ok_or_else(|| format!("unknown rating `{raw}`; expected happy, neutral or sad"))
}

fn parse_avatar(raw: &str) -> Result<AvatarIcon, String> {
    AvatarIcon::parse(raw).ok_or_else(|| format!("unknown avatar `{raw}`; expected avatar1..avatar6"))
}

fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
