use clap::Parser;

#[derive(Parser, Clone, Debug)]
#[command(name = "plantcare-backend")]
#[command(about = "Google Cloud proxy for translation, TTS and STT", long_about = None)]
pub struct Args {
    /// Bind address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Listen port
    #[arg(long, env = "PORT", default_value_t = 5001)]
    pub port: u16,

    /// Google Cloud API key used for the Translation, Text-to-Speech and
    /// Speech-to-Text APIs
    #[arg(long, env = "GOOGLE_API_KEY")]
    pub google_api_key: String,
}
