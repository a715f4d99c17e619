use clap::{Parser, Subcommand};
use wallpaper_relay::error::WallpaperError;
use wallpaper_relay::prompt::augment_prompt;
use wallpaper_relay::wallpaper::request::validate_prompt;
use wallpaper_relay::wallpaper::{GenerateWallpaperBody, GenerateWallpaperResponse, HealthResponse, WallpaperRequest};
use wallpaper_relay::{Config, ImageApiClient, WallpaperTranslator};

#[derive(Parser, Debug)]
#[command(name = "wallpaperctl", about = "CLI for the AI wallpaper relay", version)]
struct Cli {
    /// Override IMAGE_API_URL
    #[arg(global = true, long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a prompt and print the text that would be sent upstream
    Augment {
        #[arg(long)]
        prompt: String,
    },
    /// Generate a wallpaper by calling the image API directly
    Generate {
        #[arg(long)]
        prompt: String,
        /// Passed through to the result untouched
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Query the health endpoint of a running relay
    Health {
        /// Base URL of the relay
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    let cli = Cli::parse();

    match cli.command {
        Commands::Augment { prompt } => {
            if let Err(e) = validate_prompt(&prompt) {
                exit_with(&e);
            }
            println!("{}", augment_prompt(&prompt));
        }
        Commands::Generate { prompt, user_id } => {
            let mut conf = Config::new()?;
            if let Some(url) = cli.api_url {
                conf.image_api_url = url;
            }
            let request = WallpaperRequest::try_from(GenerateWallpaperBody {
                prompt: Some(prompt),
                user_id,
                app_version: None,
            })
            .unwrap_or_else(|e| exit_with(&e));

            let translator = WallpaperTranslator::new(ImageApiClient::from_config(&conf)?);
            println!("Generating via {}", conf.image_api_url);
            match translator.generate(&request).await {
                Ok(wallpaper) => {
                    let body = GenerateWallpaperResponse::from(wallpaper);
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(e) => exit_with(&e),
            }
        }
        Commands::Health { server } => {
            let url = format!("{}/", server.trim_end_matches('/'));
            let health: HealthResponse = reqwest::get(&url).await?.error_for_status()?.json().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
    }
    Ok(())
}

fn exit_with(e: &WallpaperError) -> ! {
    eprintln!("{} ({}, HTTP {})", e, e.code(), e.status().as_u16());
    std::process::exit(2);
}
