use clap::{
    ArgGroup, CommandFactory, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use spotcli::{
    cli::{self, SearchKind},
    config::{self, Config},
    error, info,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
  after_help = "Examples:\n  spotcli -t \"PTSMR\"\n  spotcli --artist \"tyler, the creator\"\n  spotcli --list\n  spotcli --interactive",
)]
#[clap(group(
    ArgGroup::new("mode")
        .args(["track", "artist", "album", "playlist", "player", "list", "interactive"])
        .multiple(false)
))]
struct Cli {
    /// Search for tracks (default)
    #[clap(short = 't', long)]
    track: bool,

    /// Search for artists
    #[clap(short = 'a', long)]
    artist: bool,

    /// Search for albums
    #[clap(short = 'A', long)]
    album: bool,

    /// Search for playlists
    #[clap(short = 'p', long)]
    playlist: bool,

    /// Show the current player state
    #[clap(short = 'P', long)]
    player: bool,

    /// List your saved tracks
    #[clap(short = 'l', long)]
    list: bool,

    /// Interactive mode (menu)
    #[clap(short = 'i', long)]
    interactive: bool,

    /// Number of results to show (1-50)
    #[clap(long, default_value_t = 10)]
    limit: u32,

    /// Log every request to stderr
    #[clap(short = 'v', long)]
    verbose: bool,

    /// Print shell completions and exit
    #[clap(long, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Search query
    query: Option<String>,
}

impl Cli {
    fn search_kind(&self) -> SearchKind {
        if self.artist {
            SearchKind::Artist
        } else if self.album {
            SearchKind::Album
        } else if self.playlist {
            SearchKind::Playlist
        } else {
            SearchKind::Track
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("spotcli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    init_tracing(cli.verbose);

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("{}", e),
    };

    let searching = cli.track || cli.artist || cli.album || cli.playlist;
    let query = cli.query.as_deref().map(str::trim).filter(|q| !q.is_empty());
    if searching && query.is_none() {
        error!("A search query is required. See --help.");
    }

    let client = match cli::connect(config).await {
        Ok(client) => client,
        Err(e) => error!("{}", e),
    };

    let result = if cli.player {
        cli::player::state(&client).await
    } else if cli.list {
        cli::library::saved_tracks(&client, cli.limit).await
    } else if let (false, Some(query)) = (cli.interactive, query) {
        cli::search::search(&client, cli.search_kind(), query, cli.limit).await
    } else {
        info!("Starting interactive mode...");
        cli::interactive::run(&client).await;
        Ok(())
    };

    if let Err(e) = result {
        cli::report(e);
        std::process::exit(1);
    }
}
