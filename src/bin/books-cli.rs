use anyhow::{Context, Result};
use books_client::{
    AnnotationsListOptions, Client, DEFAULT_BASE_URL, Response, ShelvesListOptions,
    VolumesListOptions,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Parser)]
#[command(
    name = "books-cli",
    version,
    about = "Small CLI for listing Google Books library data"
)]
struct Cli {
    /// Base URL for the API.
    #[arg(long, env = "BOOKS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// OAuth2 access token sent as a bearer credential.
    #[arg(long, env = "BOOKS_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Prefix for the User-Agent header.
    #[arg(long)]
    user_agent: Option<String>,

    /// Emit compact JSON instead of pretty-printed output.
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the user's bookshelves.
    Shelves(CommonArgs),
    /// List the volumes on one bookshelf.
    Volumes(VolumesArgs),
    /// List the user's annotations.
    Annotations(AnnotationsArgs),
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// String identifying the originator of the request.
    #[arg(long, default_value = "")]
    source: String,

    /// Field mask restricting the returned fields.
    #[arg(long, default_value = "")]
    fields: String,
}

#[derive(Debug, Args)]
struct VolumesArgs {
    /// Bookshelf id (for example: 0 for Favorites).
    shelf: String,

    /// Maximum number of results to return.
    #[arg(long, default_value_t = 0)]
    max_results: u32,

    /// Index of the first result.
    #[arg(long, default_value_t = 0)]
    start_index: u32,

    /// Full-text search query within the shelf.
    #[arg(short, long, default_value = "")]
    query: String,

    /// Fields to return: full or lite.
    #[arg(long, default_value = "")]
    projection: String,

    /// ISO-3166-1 code overriding the IP-based country.
    #[arg(long, default_value = "")]
    country: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Args)]
struct AnnotationsArgs {
    /// Restrict to one volume.
    #[arg(long, default_value = "")]
    volume_id: String,

    /// Content version of the volume.
    #[arg(long, default_value = "")]
    content_version: String,

    /// Restrict to one layer (for example: notes).
    #[arg(long, default_value = "")]
    layer_id: String,

    /// Restrict to several layers. Repeat the flag for each layer.
    #[arg(long = "layer-ids")]
    layer_ids: Vec<String>,

    /// Maximum number of results to return.
    #[arg(long, default_value_t = 0)]
    max_results: u32,

    /// Continuation token from a previous call.
    #[arg(long, default_value = "")]
    page_token: String,

    /// Include deleted annotations.
    #[arg(long)]
    show_deleted: bool,

    /// RFC 3339 timestamp; only annotations updated at or after it.
    #[arg(long, default_value = "")]
    updated_min: String,

    /// RFC 3339 timestamp; only annotations updated before it.
    #[arg(long, default_value = "")]
    updated_max: String,

    #[command(flatten)]
    common: CommonArgs,
}

impl CommonArgs {
    fn options(&self) -> ShelvesListOptions {
        ShelvesListOptions {
            source: self.source.clone(),
            fields: self.fields.clone(),
        }
    }
}

impl VolumesArgs {
    fn options(&self) -> VolumesListOptions {
        VolumesListOptions {
            max_results: self.max_results,
            start_index: self.start_index,
            query: self.query.clone(),
            projection: self.projection.clone(),
            country: self.country.clone(),
            source: self.common.source.clone(),
            fields: self.common.fields.clone(),
        }
    }
}

impl AnnotationsArgs {
    fn options(&self) -> AnnotationsListOptions {
        AnnotationsListOptions {
            content_version: self.content_version.clone(),
            layer_id: self.layer_id.clone(),
            layer_ids: self.layer_ids.clone(),
            max_results: self.max_results,
            page_token: self.page_token.clone(),
            show_deleted: self.show_deleted,
            source: self.common.source.clone(),
            updated_max: self.updated_max.clone(),
            updated_min: self.updated_min.clone(),
            volume_id: self.volume_id.clone(),
            fields: self.common.fields.clone(),
        }
    }
}

/// Entry point for the CLI.
///
/// Builds a client from flags and environment, runs one listing call and
/// prints the items together with the next page token.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut builder = Client::builder().base_url(&cli.base_url);
    if let Some(token) = &cli.access_token {
        builder = builder.bearer_token(token);
    }
    if let Some(user_agent) = &cli.user_agent {
        builder = builder.user_agent(user_agent);
    }
    let client = builder
        .build()
        .with_context(|| format!("failed to create client with base URL '{}'", cli.base_url))?;

    let output = match &cli.command {
        Command::Shelves(args) => {
            let (shelves, response) = client
                .shelves()
                .list(Some(&args.options()))
                .context("listing bookshelves failed")?;
            page_json(&shelves, &response)?
        }
        Command::Volumes(args) => {
            let (volumes, response) = client
                .volumes()
                .list(&args.shelf, Some(&args.options()))
                .with_context(|| format!("listing volumes of shelf '{}' failed", args.shelf))?;
            page_json(&volumes, &response)?
        }
        Command::Annotations(args) => {
            let (annotations, response) = client
                .annotations()
                .list(Some(&args.options()))
                .context("listing annotations failed")?;
            page_json(&annotations, &response)?
        }
    };

    print_json(&output, cli.compact).context("failed to print JSON output")?;
    Ok(())
}

/// Combines one page of items and its continuation token into a JSON value.
fn page_json<T: Serialize>(items: &[T], response: &Response) -> Result<serde_json::Value> {
    let items = serde_json::to_value(items).context("failed to render items")?;
    Ok(json!({
        "items": items,
        "nextPageToken": response.next_page_token,
    }))
}

/// Prints a JSON value either compact or pretty-formatted.
fn print_json(value: &serde_json::Value, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("Failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
