use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plantcare-ai")]
#[command(about = "Plant disease diagnosis, encyclopedia and farming advice via generative AI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Diagnose a plant photo and save the result to the scan history
    Scan {
        /// Path to the plant image
        #[arg(required = true)]
        image: PathBuf,

        /// Optional question to ask alongside the image
        #[arg(short, long)]
        prompt: Option<String>,

        /// Do not record the result in the scan history
        #[arg(long)]
        no_save: bool,
    },

    /// Grammatically clean up a speech-to-text transcript
    Correct {
        /// Transcript text to clean up
        #[arg(required = true)]
        text: String,
    },

    /// Look up a plant in the AI encyclopedia
    Encyclopedia {
        /// Plant name, e.g. "Tulsi"
        #[arg(required = true)]
        plant: String,
    },

    /// Crop recommendations for a Karnataka district and month
    Crops {
        /// District name, e.g. "Mandya"
        #[arg(required = true)]
        district: String,

        /// Month name, e.g. "June"
        #[arg(required = true)]
        month: String,
    },

    /// Weather-based farming advice for a city
    Advise {
        /// City to fetch weather for
        #[arg(required = true)]
        city: String,

        /// Crop/farming context, e.g. "rice near Mandya"
        #[arg(short, long, default_value = "general farming")]
        context: String,

        /// Also fetch crop insights for this district (needs --month)
        #[arg(long)]
        district: Option<String>,

        /// Month for the crop insights fetch
        #[arg(long)]
        month: Option<String>,
    },

    /// Generate an Instagram-style caption for a plant photo
    Caption {
        /// Path to the plant image
        #[arg(required = true)]
        image: PathBuf,
    },

    /// Translate UI strings through the backend proxy
    Translate {
        /// Strings to translate
        #[arg(required = true)]
        texts: Vec<String>,

        /// Target language code, e.g. "kn"
        #[arg(short, long, default_value = "kn")]
        target: String,
    },

    /// Current weather for a city
    Weather {
        /// City name
        #[arg(required = true)]
        city: String,
    },

    /// Search care videos for a plant or disease
    Videos {
        /// Search query, e.g. "tomato leaf curl treatment"
        #[arg(required = true)]
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 2)]
        max: u32,
    },

    /// Scan history (capped at 12 entries)
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Community posts (capped at 20 entries)
    Posts {
        #[command(subcommand)]
        action: PostsAction,
    },

    /// Show or update configuration
    Config {
        /// Set the Gemini API key
        #[arg(long)]
        set_gemini_key: Option<String>,

        /// Set the OpenWeatherMap API key
        #[arg(long)]
        set_weather_key: Option<String>,

        /// Print the current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List stored scans, newest first
    List,
    /// Delete one scan by id
    Delete {
        #[arg(required = true)]
        id: String,
    },
    /// Delete all stored scans
    Clear,
}

#[derive(Subcommand)]
pub enum PostsAction {
    /// List community posts, newest first
    List,
    /// Add a post; the caption is AI-generated for local image files
    Add {
        /// Image URL or local file path
        #[arg(required = true)]
        image: String,

        /// Caption; generated when omitted and the image is a local file
        #[arg(short, long)]
        caption: Option<String>,
    },
    /// Delete one post by id
    Delete {
        #[arg(required = true)]
        id: String,
    },
    /// Delete all posts
    Clear,
    /// Seed the feed with stock plant photos when it is empty
    Seed,
}
