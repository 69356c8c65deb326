use clap::{Parser, Subcommand};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "bridge-cli")]
#[command(about = "Command-line client for connect-bridge", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the device commands are sent to
    Device,
    /// Play a single track
    Track { id: String },
    /// Play several tracks in order
    Tracks {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Play a playlist
    Playlist { id: String },
    /// List playlists of the account
    Playlists,
    /// Send a transport command (play, pause, next, prev)
    Command { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Device => client.get(format!("{}/", base)).send().await?,
        Commands::Track { id } => {
            client
                .post(format!("{}/track", base))
                .json(&json!({ "id": id }))
                .send()
                .await?
        }
        Commands::Tracks { ids } => {
            client
                .post(format!("{}/tracks", base))
                .json(&json!({ "ids": ids }))
                .send()
                .await?
        }
        Commands::Playlist { id } => {
            client
                .post(format!("{}/playlists", base))
                .json(&json!({ "id": id }))
                .send()
                .await?
        }
        Commands::Playlists => client.get(format!("{}/playlists", base)).send().await?,
        Commands::Command { name } => {
            client
                .post(format!("{}/command", base))
                .json(&json!({ "command": name }))
                .send()
                .await?
        }
    };

    print_response(res).await
}

/// What to show for one bridge reply, and on which stream.
#[derive(Debug, PartialEq, Eq)]
enum Output {
    Stdout(String),
    Stderr(String),
}

/// Pretty-print JSON replies, pass text through, report failures.
fn format_response(
    status: StatusCode,
    content_type: Option<&str>,
    body: &str,
) -> Result<Output, serde_json::Error> {
    if !status.is_success() {
        return Ok(Output::Stderr(format!(
            "Error: bridge returned status {}\nResponse: {}\n",
            status,
            body.trim_end()
        )));
    }

    if content_type.is_some_and(|v| v.starts_with("application/json")) {
        let json: Value = serde_json::from_str(body)?;
        Ok(Output::Stdout(format!("{}\n", serde_json::to_string_pretty(&json)?)))
    } else {
        Ok(Output::Stdout(body.to_string()))
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let content_type = res
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let text = res.text().await?;

    match format_response(status, content_type.as_deref(), &text)? {
        Output::Stdout(out) => print!("{}", out),
        Output::Stderr(out) => eprint!("{}", out),
    }
    Ok(())
}
