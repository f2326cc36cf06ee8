//! spokestack-say — synthesize one message with the Spokestack API and write it to disk.
//!
//! Usage:
//!   spokestack-say [--config <path>] [--voice <voice>] [--mode <mode>] [--out <file>] <message>

use spokestack_tts::{
    SpokestackClient, SpokestackClientBuilder, SpokestackConfig, SynthesisOptions,
};
use std::path::PathBuf;

fn print_usage() {
    println!(
        r#"spokestack-say — synthesize speech with Spokestack

USAGE:
    spokestack-say [OPTIONS] <MESSAGE>

OPTIONS:
    --config <path>     YAML config (client_id, secret, language, mode, voice, timeout_secs)
    --voice <voice>     Voice for this message
    --mode <mode>       markdown | ssml | text
    --out <file>        Output file (default: speech.mp3)
    help, --help, -h    Show this help message

ENVIRONMENT:
    SPOKESTACK_CLIENT_ID    Client ID when the config file has none
    SPOKESTACK_SECRET       Secret when the config file has none
    RUST_LOG                Log filter (default: info)"#
    );
}

struct Args {
    config: Option<PathBuf>,
    out: PathBuf,
    options: SynthesisOptions,
    message: String,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut config = None;
    let mut out = PathBuf::from("speech.mp3");
    let mut options = SynthesisOptions::default();
    let mut words = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(iter.next()?)),
            "--voice" => options.voice = Some(iter.next()?.clone()),
            "--mode" => options.mode = Some(iter.next()?.clone()),
            "--out" => out = PathBuf::from(iter.next()?),
            "help" | "--help" | "-h" => return None,
            other => words.push(other.to_string()),
        }
    }

    if words.is_empty() {
        return None;
    }
    Some(Args {
        config,
        out,
        options,
        message: words.join(" "),
    })
}

// Environment credentials fill whatever the config file leaves out.
fn load_config(path: Option<&PathBuf>) -> spokestack_tts::Result<SpokestackConfig> {
    let mut config = match path {
        Some(path) => SpokestackConfig::from_file(path)?,
        None => SpokestackConfig::new("", ""),
    };
    config.fill_missing_credentials(
        std::env::var("SPOKESTACK_CLIENT_ID").ok(),
        std::env::var("SPOKESTACK_SECRET").ok(),
    );
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .try_init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = parse_args(&raw) else {
        print_usage();
        std::process::exit(1);
    };

    let config = load_config(args.config.as_ref())?;
    let language = config.language.clone();
    let client: SpokestackClient = SpokestackClientBuilder::from_config(config).build()?;

    let audio = client
        .synthesize(&args.message, &language, &args.options)
        .await?;
    std::fs::write(&args.out, &audio.data)?;
    println!(
        "Wrote {} bytes of {} to {}",
        audio.data.len(),
        audio.format,
        args.out.display()
    );
    Ok(())
}
