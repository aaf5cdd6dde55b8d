use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{ArgGroup, Args, Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use prosody_tts::{
    AppState, ServiceConfig,
    core::prosody::{ParameterOverrides, Style, VowelMode},
    routes,
};

/// Prosody TTS - rhythm-shaped text-to-speech
#[derive(Parser, Debug)]
#[command(name = "prosody-tts")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subcommand to run (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve,

    /// Print the final text without calling the synthesis backend
    Render {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Synthesize speech and write the audio to a file
    Speak {
        #[command(flatten)]
        request: RequestArgs,

        /// Where to write the audio
        #[arg(short = 'o', long = "output", default_value = "speech.mp3")]
        output: PathBuf,
    },

    /// List the available presets
    Presets,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
struct RequestArgs {
    /// Text to transform
    #[arg(short = 't', long)]
    text: Option<String>,

    /// Read the text from a file
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Preset to start from (defaults to the configured default preset)
    #[arg(short = 'p', long)]
    preset: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    tempo_bpm: Option<i64>,

    /// legato, neutral, clipped or staccato
    #[arg(long, value_parser = parse_style)]
    style: Option<Style>,

    /// normal, short or long
    #[arg(long, value_parser = parse_vowel_mode)]
    vowel_mode: Option<VowelMode>,

    #[arg(long, allow_negative_numbers = true)]
    cluster_pause_ms: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    repeat_pause_ms: Option<i64>,

    #[arg(long)]
    stress_first: Option<bool>,

    #[arg(long, allow_negative_numbers = true)]
    repeat_count: Option<i64>,

    #[arg(long)]
    chant: Option<bool>,
}

impl RequestArgs {
    async fn read_text(&self) -> anyhow::Result<String> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
            (None, None) => Err(anyhow!("Either --text or --file is required")),
        }
    }

    fn overrides(&self) -> ParameterOverrides {
        ParameterOverrides {
            tempo_bpm: self.tempo_bpm,
            style: self.style,
            vowel_mode: self.vowel_mode,
            cluster_pause_ms: self.cluster_pause_ms,
            repeat_pause_ms: self.repeat_pause_ms,
            stress_first: self.stress_first,
            repeat_count: self.repeat_count,
            chant_enabled: self.chant,
        }
    }
}

fn parse_style(value: &str) -> Result<Style, String> {
    Style::from_str(value).ok_or_else(|| {
        format!("unknown style '{value}', expected legato, neutral, clipped or staccato")
    })
}

fn parse_vowel_mode(value: &str) -> Result<VowelMode, String> {
    VowelMode::from_str(value)
        .ok_or_else(|| format!("unknown vowel mode '{value}', expected normal, short or long"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = if let Some(config_path) = cli.config {
        info!("Loading configuration from {}", config_path.display());
        ServiceConfig::from_file(&config_path).map_err(|e| anyhow!(e.to_string()))?
    } else {
        ServiceConfig::from_env().map_err(|e| anyhow!(e.to_string()))?
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Render { request } => {
            let text = request.read_text().await?;
            let catalog = config.preset_catalog()?;
            let params = config.resolve_parameters(
                &catalog,
                request.preset.as_deref(),
                &request.overrides(),
            )?;
            let final_text = config.prosody_pipeline().build(&text, &params)?;

            println!("{final_text}");
            eprintln!("slow: {}, tempo: {} bpm", params.is_slow(), params.tempo_bpm);
            Ok(())
        }
        Commands::Speak { request, output } => {
            let text = request.read_text().await?;
            let state = AppState::new(config)?;
            let params =
                state.resolve_parameters(request.preset.as_deref(), &request.overrides())?;
            let speech = state.generator.generate(&text, &params).await?;

            tokio::fs::write(&output, &speech.audio)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;

            println!(
                "Wrote {} bytes to {} (slow: {})",
                speech.audio.len(),
                output.display(),
                speech.slow
            );
            Ok(())
        }
        Commands::Presets => {
            let catalog = config.preset_catalog()?;
            for preset in catalog.iter() {
                let params = preset.parameters()?;
                println!("{}: {}", preset.name, serde_json::to_string(&params)?);
            }
            Ok(())
        }
    }
}

async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    let address = config.address();
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    let app_state = AppState::new(config)?;
    let app = routes::api::create_api_router().with_state(app_state);

    let listener = TcpListener::bind(socket_addr)
        .await
        .with_context(|| format!("Failed to bind {socket_addr}"))?;

    info!("Starting server on {address}");
    axum::serve(listener, app).await?;

    Ok(())
}
