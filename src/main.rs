use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use clap::Parser;
use plantcare_ai::cli::{Cli, Commands, HistoryAction, PostsAction};
use plantcare_ai::error::PlantCareError;
use plantcare_ai::gemini::{mime_type_for_extension, GeminiClient};
use plantcare_ai::pexels::PexelsClient;
use plantcare_ai::store::LocalStore;
use plantcare_ai::translate::{is_text_in_expected_script, TranslationClient};
use plantcare_ai::youtube::YouTubeClient;
use plantcare_ai::weather::WeatherClient;
use plantcare_ai::{catalog, Config};
use plantcare_common::{CommunityPost, PlantDiagnosis, ScanRecord, WeatherData};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Scan {
            image,
            prompt,
            no_save,
        } => {
            println!("🌱 plantcare-ai - plant scan\n");

            let (image_base64, mime_type) = load_image(&image)?;
            let gemini = GeminiClient::from_config(&config);

            println!("[1/2] Diagnosing...");
            let diagnosis = gemini
                .diagnose_plant(&image_base64, mime_type, prompt.as_deref())
                .await;
            print_diagnosis(&diagnosis);

            if diagnosis.error.is_none() && !no_save {
                println!("\n[2/2] Saving to scan history...");
                let store = LocalStore::default_location()?;
                let timestamp = chrono::Utc::now().timestamp_millis();
                store.add_scan(ScanRecord {
                    id: format!("scan-{}", timestamp),
                    timestamp,
                    image_preview_url: format!("data:{};base64,{}", mime_type, image_base64),
                    diagnosis,
                    original_prompt: prompt.unwrap_or_default(),
                });
                println!("✔ Saved");
            }
        }

        Commands::Correct { text } => {
            let gemini = GeminiClient::from_config(&config);
            let correction = gemini.correct_transcript(&text).await;
            match correction.error {
                Some(error) => println!("⚠ {}", error),
                None => println!("{}", correction.text),
            }
        }

        Commands::Encyclopedia { plant } => {
            println!("📖 plantcare-ai - encyclopedia\n");
            let gemini = GeminiClient::from_config(&config);
            let entry = gemini.encyclopedia_entry(&plant).await;

            if let Some(error) = &entry.error {
                println!("⚠ {}", error);
                return Ok(());
            }
            println!("{}\n", entry.plant_name);
            println!("Summary:         {}", entry.summary);
            println!("Sunlight:        {}", entry.sunlight);
            println!("Watering:        {}", entry.watering);
            println!("Care:            {}", entry.care);
            println!("Common diseases: {}", entry.common_diseases);
        }

        Commands::Crops { district, month } => {
            println!("🌾 plantcare-ai - crop insights\n");
            let district = catalog::find_district(&district)
                .ok_or_else(|| PlantCareError::Config(format!("unknown district: {}", district)))?;
            let month = catalog::find_month(&month)
                .ok_or_else(|| PlantCareError::Config(format!("unknown month: {}", month)))?;

            let gemini = GeminiClient::from_config(&config);
            let insight = gemini.crop_insights(district, month).await;

            if let Some(error) = &insight.error {
                println!("⚠ {}", error);
                return Ok(());
            }
            println!("{} in {}\n", insight.district, insight.month);
            println!("Suitable crops: {}", insight.suitable_crops.join(", "));
            println!("All crops:      {}", insight.all_crops.join(", "));
            println!("Climate:        {}", insight.climate_patterns);
            println!("Tips:           {}", insight.tips);
        }

        Commands::Advise {
            city,
            mut context,
            district,
            month,
        } => {
            println!("🌦 plantcare-ai - weather advisor\n");
            let weather_client = WeatherClient::from_config(&config);
            let gemini = GeminiClient::from_config(&config);

            println!("[1/2] Fetching weather for {}...", city);
            let weather = match (district, month) {
                (Some(district), Some(month)) => {
                    // independent fetches, joined; either failing fails the
                    // whole operation before the dependent advice call
                    let (weather, insight) = tokio::join!(
                        weather_client.fetch(&city),
                        gemini.crop_insights(&district, &month)
                    );
                    let weather = weather?;
                    if let Some(error) = insight.error {
                        return Err(PlantCareError::ApiCall(error).into());
                    }
                    context = format!(
                        "{} (suitable crops this month: {})",
                        context,
                        insight.suitable_crops.join(", ")
                    );
                    weather
                }
                _ => weather_client.fetch(&city).await?,
            };
            print_weather(&weather);

            println!("\n[2/2] Asking for advice...");
            let weather_json = serde_json::to_string(&weather)?;
            let advice = gemini.weather_advice(&weather_json, &context).await;
            match advice.error {
                Some(error) => println!("⚠ {}", error),
                None => println!("\n{}", advice.advice),
            }
        }

        Commands::Caption { image } => {
            let (image_base64, mime_type) = load_image(&image)?;
            let gemini = GeminiClient::from_config(&config);
            let caption = gemini.generate_caption(&image_base64, mime_type).await;
            match caption.error {
                Some(error) => println!("⚠ {}", error),
                None => println!("{}", caption.caption),
            }
        }

        Commands::Translate { texts, target } => {
            let mut translator = TranslationClient::new(config.backend_url.clone());
            let translations = translator.translate_batch(&texts, &target).await;
            for (original, translated) in texts.iter().zip(&translations) {
                if is_text_in_expected_script(translated, &target) {
                    println!("{}  ->  {}", original, translated);
                } else {
                    println!("{}  ->  {}  (⚠ unexpected script)", original, translated);
                }
            }
        }

        Commands::Videos { query, max } => {
            let youtube = YouTubeClient::from_config(&config);
            let videos = youtube.search_videos(&query, max).await;
            if videos.is_empty() {
                println!("No videos found (is YOUTUBE_API_KEY set?).");
            }
            for video in &videos {
                println!("{}\n  {}\n  {}", video.title, video.watch_url(), video.thumbnail_url);
            }
        }

        Commands::Weather { city } => {
            let weather_client = WeatherClient::from_config(&config);
            let weather = weather_client.fetch(&city).await?;
            print_weather(&weather);
        }

        Commands::History { action } => {
            let store = LocalStore::default_location()?;
            match action {
                HistoryAction::List => {
                    let history = store.scan_history();
                    if history.is_empty() {
                        println!("No scans recorded yet.");
                    }
                    for record in &history {
                        println!(
                            "{}  {}  {} ({:?})",
                            record.id,
                            format_timestamp(record.timestamp),
                            record.diagnosis.condition,
                            record.diagnosis.status_tag,
                        );
                    }
                }
                HistoryAction::Delete { id } => {
                    store.delete_scan(&id);
                    println!("✔ Deleted {}", id);
                }
                HistoryAction::Clear => {
                    store.clear_scans();
                    println!("✔ Scan history cleared");
                }
            }
        }

        Commands::Posts { action } => {
            let store = LocalStore::default_location()?;
            match action {
                PostsAction::List => {
                    let posts = store.posts();
                    if posts.is_empty() {
                        println!("No posts yet. Try `plantcare-ai posts seed`.");
                    }
                    for post in &posts {
                        println!(
                            "{}  {}  {}",
                            post.id,
                            format_timestamp(post.timestamp),
                            post.caption
                        );
                    }
                }
                PostsAction::Add { image, caption } => {
                    let timestamp = chrono::Utc::now().timestamp_millis();
                    let path = Path::new(&image);
                    let (image_url, caption) = if path.is_file() {
                        let (image_base64, mime_type) = load_image(path)?;
                        let caption = match caption {
                            Some(caption) => caption,
                            None => {
                                println!("Generating caption...");
                                let gemini = GeminiClient::from_config(&config);
                                let result =
                                    gemini.generate_caption(&image_base64, mime_type).await;
                                if let Some(error) = result.error {
                                    return Err(PlantCareError::ApiCall(error).into());
                                }
                                result.caption
                            }
                        };
                        (
                            format!("data:{};base64,{}", mime_type, image_base64),
                            caption,
                        )
                    } else {
                        let caption = caption.ok_or_else(|| {
                            PlantCareError::Config(
                                "a caption is required when the image is a URL".into(),
                            )
                        })?;
                        (image, caption)
                    };

                    store.add_post(CommunityPost {
                        id: format!("post-{}", timestamp),
                        image_url,
                        caption,
                        timestamp,
                    });
                    println!("✔ Post added");
                }
                PostsAction::Delete { id } => {
                    store.delete_post(&id);
                    println!("✔ Deleted {}", id);
                }
                PostsAction::Clear => {
                    store.clear_posts();
                    println!("✔ Posts cleared");
                }
                PostsAction::Seed => {
                    if !store.posts().is_empty() {
                        println!("The feed already has posts; not seeding.");
                        return Ok(());
                    }
                    let pexels = PexelsClient::from_config(&config);
                    let posts = pexels.fetch_plant_posts().await?;
                    let count = posts.len();
                    for post in posts.into_iter().rev() {
                        store.add_post(post);
                    }
                    println!("✔ Seeded {} posts", count);
                }
            }
        }

        Commands::Config {
            set_gemini_key,
            set_weather_key,
            show,
        } => {
            let mut config = config;

            if let Some(key) = set_gemini_key {
                config.set_gemini_api_key(key)?;
                println!("✔ Gemini API key saved");
            }

            if let Some(key) = set_weather_key {
                config.set_weather_api_key(key)?;
                println!("✔ Weather API key saved");
            }

            if show {
                println!("Configuration:");
                println!("  Model:       {}", config.model);
                println!("  Backend URL: {}", config.backend_url);
                println!(
                    "  Gemini key:  {}",
                    if config.gemini_api_key().is_some() { "set" } else { "not set" }
                );
                println!(
                    "  Weather key: {}",
                    if config.weather_api_key().is_some() { "set" } else { "not set" }
                );
            }
        }
    }

    Ok(())
}

/// Read an image file and return (base64 data, MIME type)
fn load_image(path: &Path) -> anyhow::Result<(String, &'static str)> {
    let bytes = std::fs::read(path)?;
    let mime_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(mime_type_for_extension)
        .unwrap_or("image/jpeg");
    Ok((BASE64.encode(bytes), mime_type))
}

fn print_diagnosis(diagnosis: &PlantDiagnosis) {
    if let Some(error) = &diagnosis.error {
        println!("⚠ {}", error);
        return;
    }

    if let Some(name) = &diagnosis.plant_name {
        let emoji = diagnosis.plant_emoji.as_deref().unwrap_or("🪴");
        match diagnosis.plant_confidence_percent {
            Some(percent) => println!("\n{} {} ({:.0}% sure)", emoji, name, percent),
            None => println!("\n{} {}", emoji, name),
        }
    }
    println!("Condition:  {} ({:?})", diagnosis.condition, diagnosis.status_tag);
    println!("Disease:    {}", diagnosis.disease_name);
    match diagnosis.confidence_percent {
        Some(percent) => {
            println!("Confidence: {} ({:.0}%)", diagnosis.confidence_level, percent)
        }
        None => println!("Confidence: {}", diagnosis.confidence_level),
    }
    if !diagnosis.care_suggestions.is_empty() {
        println!("Care suggestions:");
        for suggestion in &diagnosis.care_suggestions {
            println!("  - {}", suggestion);
        }
    }
}

fn print_weather(weather: &WeatherData) {
    println!(
        "✔ {}: {:.1}°C, {:.0}% humidity, {}{}",
        weather.city,
        weather.temperature,
        weather.humidity,
        weather.description,
        weather
            .rain
            .map(|mm| format!(", {} mm rain (1h)", mm))
            .unwrap_or_default(),
    );
}

fn format_timestamp(timestamp_millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp_millis.to_string())
}
