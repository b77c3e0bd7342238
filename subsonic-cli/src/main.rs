use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use subsonic_api::types::{SearchPage, Song};
use subsonic_api::{Profile, SubsonicClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "subsonic",
    version,
    about = "Command-line client for Subsonic-compatible music servers"
)]
struct Cli {
    /// Log requests (overrides `RUST_LOG`)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Authenticate and save the server profile
    Login {
        /// Server base URL, e.g. `https://music.example.com`
        url: String,
        /// User name
        user: String,
        /// Password (read from stdin if not given)
        #[arg(short, long, env = "SUBSONIC_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Client name reported to the server
        #[arg(short, long, default_value = "subsonic-cli")]
        client: String,
    },
    /// Forget the saved profile
    Logout,
    /// Check that the server is up and the saved credential is accepted
    Ping,
    /// Show license status
    License,
    /// List all artists
    Artists,
    /// Show an album and its songs
    Album {
        /// Album ID
        id: String,
    },
    /// Search artists, albums and songs
    Search {
        /// Search keyword
        query: String,
        /// Max results per kind
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },
    /// List playlists
    Playlists,
    /// Show a playlist and its songs
    Playlist {
        /// Playlist ID
        id: String,
    },
    /// Download a song's original file
    Download {
        /// Song ID
        id: String,
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Login {
            url,
            user,
            password,
            client,
        } => cmd_login(&url, &user, password, &client),
        Command::Logout => cmd_logout(),
        Command::Ping => cmd_ping(),
        Command::License => cmd_license(),
        Command::Artists => cmd_artists(),
        Command::Album { id } => cmd_album(&id),
        Command::Search { query, limit } => cmd_search(&query, limit),
        Command::Playlists => cmd_playlists(),
        Command::Playlist { id } => cmd_playlist(&id),
        Command::Download { id, output } => cmd_download(&id, output),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,subsonic_api=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn connect() -> Result<SubsonicClient> {
    let profile = Profile::load()?.context("no saved server; run `subsonic login` first")?;
    tracing::debug!(url = %profile.url, user = %profile.user, "using saved profile");
    Ok(profile.connect()?)
}

// ── login / logout ──

fn cmd_login(url: &str, user: &str, password: Option<String>, client_name: &str) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => read_password()?,
    };
    let client = SubsonicClient::new(url, user, client_name)?;
    client
        .authenticate(&password)
        .with_context(|| format!("login to {url} as {user} failed"))?;

    let profile = Profile::from_client(&client);
    profile.save()?;
    println!("Logged in as {user}. Profile saved to {}", Profile::path()?.display());
    Ok(())
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_owned();
    if password.is_empty() {
        bail!("empty password");
    }
    Ok(password)
}

fn cmd_logout() -> Result<()> {
    Profile::clear()?;
    println!("Profile cleared.");
    Ok(())
}

// ── status ──

fn cmd_ping() -> Result<()> {
    let client = connect()?;
    if client.ping() {
        println!("{} is up.", client.base_url());
        Ok(())
    } else {
        bail!("{} did not answer (run with -v for details)", client.base_url())
    }
}

fn cmd_license() -> Result<()> {
    let client = connect()?;
    let license = client.license()?;
    println!("Valid:   {}", license.valid);
    if let Some(email) = &license.email {
        println!("Email:   {email}");
    }
    if let Some(expires) = &license.license_expires {
        println!("Expires: {expires}");
    }
    Ok(())
}

// ── browsing ──

fn cmd_artists() -> Result<()> {
    let client = connect()?;
    for index in client.artists(None)? {
        println!("{}", index.name);
        for a in &index.artists {
            println!("  [{}] {} ({} albums)", a.id, a.name, a.album_count);
        }
    }
    Ok(())
}

fn cmd_album(id: &str) -> Result<()> {
    let client = connect()?;
    let album = client.album(id)?;
    println!("Album:  {} (id={})", album.name, album.id);
    if let Some(artist) = &album.artist {
        println!("Artist: {artist}");
    }
    if let Some(year) = album.year {
        println!("Year:   {year}");
    }
    println!("Length: {}", format_duration(album.duration));
    println!();
    for s in &album.songs {
        print_song(s);
    }
    Ok(())
}

fn cmd_search(query: &str, limit: u32) -> Result<()> {
    let client = connect()?;
    let result = client.search(query, SearchPage::limit(limit))?;

    if !result.artists.is_empty() {
        println!("Artists:");
        for a in &result.artists {
            println!("  [{}] {}", a.id, a.name);
        }
    }
    if !result.albums.is_empty() {
        println!("Albums:");
        for a in &result.albums {
            println!("  [{}] {} - {}", a.id, a.artist.as_deref().unwrap_or("?"), a.name);
        }
    }
    if !result.songs.is_empty() {
        println!("Songs:");
        for s in &result.songs {
            print_song(s);
        }
    }
    Ok(())
}

// ── playlists ──

fn cmd_playlists() -> Result<()> {
    let client = connect()?;
    for p in client.playlists()? {
        println!("  [{}] {} ({} songs)", p.id, p.name, p.song_count);
    }
    Ok(())
}

fn cmd_playlist(id: &str) -> Result<()> {
    let client = connect()?;
    let p = client.playlist(id)?;
    println!("Playlist: {} (id={})", p.name, p.id);
    println!("Songs:    {}", p.song_count);
    if let Some(owner) = &p.owner {
        println!("Owner:    {owner}");
    }
    if let Some(comment) = &p.comment {
        println!("Comment:  {comment}");
    }
    println!();
    for s in &p.entries {
        print_song(s);
    }
    Ok(())
}

// ── download ──

fn cmd_download(id: &str, output: Option<PathBuf>) -> Result<()> {
    let client = connect()?;
    let dest = if let Some(p) = output {
        p
    } else {
        let song = client.song(id)?;
        let ext = song.suffix.as_deref().unwrap_or("bin");
        PathBuf::from(format!("{}.{ext}", song.id))
    };

    let size = client.save_download(id, &dest)?;
    println!("Downloaded {} ({size} bytes)", dest.display());
    Ok(())
}

fn print_song(s: &Song) {
    let track = s.track.map(|t| format!("{t:>2}. ")).unwrap_or_default();
    println!(
        "  {track}[{}] {} - {} ({})",
        s.id,
        s.artist.as_deref().unwrap_or("?"),
        s.title,
        format_duration(s.duration.unwrap_or(0)),
    );
}

fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
