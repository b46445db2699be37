//! Clap derive structures for the `soundcheck` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! This file must stay free of crate-internal imports: the build script
//! includes it directly to generate man pages.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// soundcheck -- content manager and site builder for the DJ site
#[derive(Debug, Parser)]
#[command(
    name = "soundcheck",
    version,
    about = "Manage the site's content backend from the command line",
    long_about = "Admin tooling for the promotional site: edit the photo gallery,\n\
        mixes, testimonials, venues, and featured video; read the contact\n\
        inbox; build the static site; and serve the HTTP CMS surface.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "SOUNDCHECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'b', env = "SOUNDCHECK_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Publishable API key (overrides profile)
    #[arg(long, env = "SOUNDCHECK_ANON_KEY", global = true, hide_env = true)]
    pub anon_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SOUNDCHECK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SOUNDCHECK_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the admin session
    Auth(AuthArgs),

    /// Manage the photo gallery
    #[command(alias = "ph")]
    Photos(PhotosArgs),

    /// Manage embedded mixes
    #[command(alias = "mx")]
    Mixes(MixesArgs),

    /// Manage testimonials
    #[command(alias = "ts")]
    Testimonials(TestimonialsArgs),

    /// Manage venue logos
    #[command(alias = "vn")]
    Venues(VenuesArgs),

    /// Manage the featured video
    Video(VideoArgs),

    /// Read the contact inbox
    Contacts(ContactsArgs),

    /// Build the static site
    Site(SiteArgs),

    /// Run the HTTP CMS surface
    Serve(ServeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Register a new admin account
    Signup {
        /// Account email address
        #[arg(long)]
        email: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,
    },

    /// Sign in and persist the session
    Login {
        /// Account email address
        #[arg(long)]
        email: String,
    },

    /// Sign out and discard the persisted session
    Logout,

    /// Show the current session state
    Session,
}

// ── Photos ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PhotosArgs {
    #[command(subcommand)]
    pub command: PhotosCommand,
}

#[derive(Debug, Subcommand)]
pub enum PhotosCommand {
    /// List gallery photos in display order
    #[command(alias = "ls")]
    List,

    /// Upload a photo to the gallery
    Upload {
        /// Image file (JPEG, PNG, or WebP, at most 5MB)
        file: PathBuf,

        /// Alt text for the image (required)
        #[arg(long)]
        alt: String,
    },

    /// Delete a photo (asks for confirmation)
    #[command(alias = "rm")]
    Delete {
        /// Photo id
        id: String,
    },

    /// Move a photo to a new position (1-based display positions)
    Reorder {
        /// Current position
        from: usize,

        /// Target position
        to: usize,
    },
}

// ── Mixes ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MixesArgs {
    #[command(subcommand)]
    pub command: MixesCommand,
}

#[derive(Debug, Subcommand)]
pub enum MixesCommand {
    /// List embedded mixes
    #[command(alias = "ls")]
    List,

    /// Add a mix
    Add {
        /// Mix title
        #[arg(long)]
        title: String,

        /// Embed URL on the streaming platform
        #[arg(long = "url")]
        embed_url: String,

        /// Streaming platform
        #[arg(long, value_enum, default_value = "spotify")]
        platform: PlatformArg,

        /// Short description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a mix (asks for confirmation)
    #[command(alias = "rm")]
    Delete {
        /// Mix id
        id: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlatformArg {
    Spotify,
    Mixcloud,
}

// ── Testimonials ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TestimonialsArgs {
    #[command(subcommand)]
    pub command: TestimonialsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TestimonialsCommand {
    /// List testimonials
    #[command(alias = "ls")]
    List,

    /// Add a testimonial
    Add {
        #[command(flatten)]
        fields: TestimonialFields,
    },

    /// Update a testimonial
    Update {
        /// Testimonial id
        id: String,

        #[command(flatten)]
        fields: TestimonialFields,
    },

    /// Delete a testimonial (asks for confirmation)
    #[command(alias = "rm")]
    Delete {
        /// Testimonial id
        id: String,
    },

    /// Upload a portrait image and print its public URL
    UploadImage {
        /// Image file (JPEG, PNG, or WebP, at most 5MB)
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct TestimonialFields {
    /// Client name
    #[arg(long)]
    pub name: String,

    /// Event the testimonial refers to
    #[arg(long)]
    pub event: String,

    /// Testimonial text
    #[arg(long)]
    pub text: String,

    /// Star rating (3-5)
    #[arg(long, default_value = "5")]
    pub rating: u8,

    /// Portrait image URL (see `testimonials upload-image`)
    #[arg(long)]
    pub image: Option<String>,
}

// ── Venues ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VenuesArgs {
    #[command(subcommand)]
    pub command: VenuesCommand,
}

#[derive(Debug, Subcommand)]
pub enum VenuesCommand {
    /// List venues
    #[command(alias = "ls")]
    List,

    /// Add a venue
    Add {
        /// Venue name
        #[arg(long)]
        name: String,

        /// Logo image URL
        #[arg(long)]
        logo: Option<String>,
    },

    /// Update a venue
    Update {
        /// Venue id
        id: String,

        /// Venue name
        #[arg(long)]
        name: String,

        /// Logo image URL
        #[arg(long)]
        logo: Option<String>,
    },

    /// Delete a venue (asks for confirmation)
    #[command(alias = "rm")]
    Delete {
        /// Venue id
        id: String,
    },
}

// ── Video ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VideoArgs {
    #[command(subcommand)]
    pub command: VideoCommand,
}

#[derive(Debug, Subcommand)]
pub enum VideoCommand {
    /// Show the featured video
    Show,

    /// Set (upsert) the featured video
    Set {
        /// Video URL
        #[arg(long)]
        url: String,

        /// Poster image URL
        #[arg(long)]
        poster: Option<String>,
    },
}

// ── Contacts ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ContactsArgs {
    #[command(subcommand)]
    pub command: ContactsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ContactsCommand {
    /// List contact submissions, newest first
    #[command(alias = "ls")]
    List,
}

// ── Site ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SiteArgs {
    #[command(subcommand)]
    pub command: SiteCommand,
}

#[derive(Debug, Subcommand)]
pub enum SiteCommand {
    /// Render the public site from the current content snapshot
    Build {
        /// Output directory
        #[arg(long, default_value = "dist")]
        out: PathBuf,
    },

    /// Rewrite built HTML files with route-specific canonical links
    Canonical {
        /// Built site directory
        #[arg(long, default_value = "dist")]
        dist: PathBuf,

        /// Canonical base URL (defaults to the profile's site_url)
        #[arg(long)]
        base_url: Option<String>,
    },
}

// ── Serve ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8787")]
    pub bind: SocketAddr,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
