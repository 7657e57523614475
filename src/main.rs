use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio::sync::Mutex;

use spotipod::{
    cli::{self, PlayerControl},
    config, error,
    management::LibraryFilter,
    types::PendingLogin,
    utils,
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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the backend proxy
    Serve(ServeOptions),

    /// Log in with Spotify through the proxy
    Auth,

    /// Forget the cached token
    Logout,

    /// List the imported playlists and albums, or show one of them
    Library(LibraryOptions),

    /// Import a playlist or album from a Spotify URL
    Import(ImportOptions),

    /// Remove an entry from the library
    Remove(RemoveOptions),

    /// Browse recently played albums and suggested playlists
    Recent(RecentOptions),

    /// Sync the library with the proxy
    #[command(subcommand)]
    Sync(SyncCommand),

    /// Control playback
    #[command(subcommand)]
    Player(PlayerCommand),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Listen address, overrides SERVER_ADDRESS and PORT
    #[clap(long)]
    pub addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct LibraryOptions {
    #[command(subcommand)]
    pub command: Option<LibraryCommand>,

    /// Which entries to show
    #[clap(long, value_enum, default_value_t = LibraryFilter::All)]
    pub filter: LibraryFilter,
}

#[derive(Subcommand, Debug, Clone)]
pub enum LibraryCommand {
    /// List the tracks of a playlist or album
    Show {
        /// Id of the playlist or album
        id: String,
        /// Start the track with this number on the active device
        #[clap(long, value_parser = clap::value_parser!(usize))]
        play: Option<usize>,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct ImportOptions {
    /// Playlist or album link, e.g. https://open.spotify.com/playlist/<id>
    pub url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RemoveOptions {
    /// Id of the playlist or album
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RecentOptions {
    /// Import the entry with this id instead of listing
    #[clap(long)]
    pub import: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SyncCommand {
    /// Upload the local library, replacing the synced copy
    Push,
    /// Replace the local library with the synced copy
    Pull,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlayerCommand {
    /// Show the current track
    Status,
    /// Follow the playback live
    Watch,
    /// Play or pause
    Toggle,
    /// Skip to the next track
    Next,
    /// Go back to the previous track
    Prev,
    /// Jump to a position (m:ss or milliseconds)
    Seek {
        #[clap(value_parser = utils::parse_position_arg)]
        position: u64,
    },
    /// Set the volume in percent
    Volume {
        #[clap(value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: u8,
    },
    /// Mute, or restore the volume when muted
    Mute,
    /// Toggle shuffle
    Shuffle,
    /// Play a track within an album or playlist
    Play {
        /// Album or playlist URI
        context_uri: String,
        /// Track URI
        track_uri: String,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => cli::serve(opt.addr).await,
        Command::Auth => {
            let login: Arc<Mutex<Option<PendingLogin>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&login)).await;
        }
        Command::Logout => cli::logout().await,
        Command::Library(opt) => match opt.command {
            Some(LibraryCommand::Show { id, play }) => cli::show(&id, play).await,
            None => cli::list_library(opt.filter).await,
        },
        Command::Import(opt) => cli::import(&opt.url).await,
        Command::Remove(opt) => cli::remove(&opt.id).await,
        Command::Recent(opt) => cli::recent(opt.import).await,
        Command::Sync(SyncCommand::Push) => cli::push().await,
        Command::Sync(SyncCommand::Pull) => cli::pull().await,
        Command::Player(command) => match command {
            PlayerCommand::Status => cli::status().await,
            PlayerCommand::Watch => cli::watch().await,
            PlayerCommand::Toggle => cli::control(PlayerControl::Toggle).await,
            PlayerCommand::Next => cli::control(PlayerControl::Next).await,
            PlayerCommand::Prev => cli::control(PlayerControl::Previous).await,
            PlayerCommand::Seek { position } => cli::control(PlayerControl::Seek(position)).await,
            PlayerCommand::Volume { percent } => {
                cli::control(PlayerControl::Volume(percent)).await
            }
            PlayerCommand::Mute => cli::control(PlayerControl::Mute).await,
            PlayerCommand::Shuffle => cli::control(PlayerControl::Shuffle).await,
            PlayerCommand::Play {
                context_uri,
                track_uri,
            } => {
                cli::control(PlayerControl::Play {
                    context_uri,
                    track_uri,
                })
                .await
            }
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
