use clap::{Parser, Subcommand};
use mediaserver::MediaServerType;

#[derive(Parser, Debug)]
#[command(
    name = "mediabot",
    about = "Query Audiobookshelf and Emby servers from one place",
    long_about = None,
    version,
)]
pub struct Args {
    /// Only talk to this backend (audiobookshelf or emby)
    #[arg(short, long, global = true)]
    pub server: Option<MediaServerType>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Server status and library statistics
    Info,
    /// Libraries with item counts
    Libraries,
    /// Search every library of every backend
    Search {
        query: String,
        /// Results shown per backend
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
    /// Users known to each backend
    Users,
    /// Listening statistics of the current user, as JSON
    Stats,
}
