use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use voxgate_core::http::{InterceptorPipeline, ReqwestTransport, TracingNavigator};
use voxgate_core::media::CapabilityProber;
use voxgate_core::synthesis::{Emotion, Language, SynthesisRequest, VoiceGender};
use voxgate_core::{
    CredentialStore, MediaStore, SessionClient, StaticProber, SynthesisClient,
};

#[derive(Parser, Debug)]
#[command(name = "voxgate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Voxgate - client for the Voxgate speech synthesis service")]
struct Args {
    /// Base URL of the synthesis service
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    base_url: String,

    /// Credential file override (defaults to ~/.voxgate/credentials.toml)
    #[arg(long, value_name = "PATH")]
    credentials: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session credential
    Login { username: String, password: String },

    /// Clear the stored session
    Logout,

    /// Print the cached identity, if any
    Whoami,

    /// Synthesize speech and write the audio to a file
    Synthesize {
        text: String,

        /// Locale tag (e.g. en-US, zh-CN)
        #[arg(long, default_value = "en-US")]
        language: String,

        /// Voice gender: female or male
        #[arg(long, default_value = "female")]
        gender: String,

        /// Emotion tag: neutral, happy, sad or angry
        #[arg(long, default_value = "neutral")]
        emotion: String,

        /// Output file for the audio bytes
        #[arg(long, short, default_value = "out.wav")]
        output: PathBuf,
    },

    /// Report whether the local runtime can play a MIME type
    Probe { mime_type: String },
}

fn main() -> Result<()> {
    setup_tracing();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

fn setup_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

async fn async_main() -> Result<()> {
    let args = Args::parse();

    let credentials = match &args.credentials {
        Some(path) => CredentialStore::from_path(path.clone())?,
        None => CredentialStore::new()?,
    };

    // The CLI has no page to be on; the navigator just tracks a nominal
    // surface path so the pipeline's redirect guard behaves as it would in
    // a real host.
    let navigator = Arc::new(TracingNavigator::new("/studio"));
    let pipeline = InterceptorPipeline::new(
        Arc::new(ReqwestTransport::new()),
        credentials.clone(),
        navigator.clone(),
    );

    match args.command {
        Command::Login { username, password } => {
            // A user logging in is on the login surface; this also keeps a
            // rejected login from bouncing through the redirect path.
            navigator.set_current_path("/login");
            let session = SessionClient::new(pipeline, credentials, &args.base_url);
            let username = session.login(&username, &password).await?;
            println!("logged in as {username}");
        }
        Command::Logout => {
            let session = SessionClient::new(pipeline, credentials, &args.base_url);
            session.logout()?;
            println!("logged out");
        }
        Command::Whoami => match credentials.identity() {
            Some(username) => println!("{username}"),
            None => println!("not logged in"),
        },
        Command::Synthesize {
            text,
            language,
            gender,
            emotion,
            output,
        } => {
            let request = build_request(text, &language, &gender, &emotion)?;
            let media = MediaStore::new();
            let client = SynthesisClient::new(pipeline, media.clone(), &args.base_url);

            let handle = client.synthesize(&request).await?;
            let bytes = media
                .resolve(&handle.uri)
                .context("synthesized media entry missing")?;

            fs::write(&output, bytes.as_slice())
                .with_context(|| format!("Failed to write audio to {output:?}"))?;
            info!(uri = %handle.uri, output = ?output, "wrote synthesized audio");
            println!(
                "wrote {} bytes ({}) to {}",
                bytes.len(),
                handle.mime_type,
                output.display()
            );

            media.release(&handle);
        }
        Command::Probe { mime_type } => {
            let prober = StaticProber::with_defaults();
            println!("{}", prober.can_play(&mime_type));
        }
    }

    Ok(())
}

fn build_request(
    text: String,
    language: &str,
    gender: &str,
    emotion: &str,
) -> Result<SynthesisRequest> {
    let language = Language::from_str(language)
        .map_err(|_| anyhow::anyhow!("unsupported language tag: {language}"))?;
    let voice_gender = VoiceGender::from_str(gender)
        .map_err(|_| anyhow::anyhow!("unsupported voice gender: {gender}"))?;
    let emotion = Emotion::from_str(emotion)
        .map_err(|_| anyhow::anyhow!("unsupported emotion tag: {emotion}"))?;

    Ok(SynthesisRequest {
        text,
        language,
        voice_gender,
        emotion,
    })
}
