use clap::Parser;
use health_scan::config::cli::{Command, LogFormat, NormalizeArgs, RunArgs};
use health_scan::core::completion::raw_response_from_text;
use health_scan::core::ConfigProvider;
use health_scan::utils::{logger, validation::Validate};
use health_scan::{
    normalize, Cli, LocalStorage, ReplayConfig, ReplayPipeline, ScanEngine, ScanError, TomlConfig,
};
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI args: {:?}", cli);

    let outcome = match cli.command {
        Command::Normalize(args) => run_normalize(args).await,
        Command::Replay(args) => run_replay(ReplayConfig::from(args), false).await,
        Command::Run(args) => run_from_toml(args).await,
    };

    if let Err(e) = outcome {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}

async fn run_normalize(args: NormalizeArgs) -> Result<(), ScanError> {
    let text = match args.file.as_deref() {
        None | Some("-") => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
        Some(path) => tokio::fs::read_to_string(path).await?,
    };

    let raw = raw_response_from_text(&text, args.format)?;
    let analysis = normalize(&raw);
    tracing::info!("Health score {}/10 ({})", analysis.score, analysis.band());

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&analysis)?
    } else {
        serde_json::to_string(&analysis)?
    };
    println!("{}", rendered);
    Ok(())
}

async fn run_replay(config: ReplayConfig, dry_run: bool) -> Result<(), ScanError> {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e);
    }

    let input_path = config.input_path().to_string();
    let input_format = config.input_format();
    let output_path = config.output_path().to_string();
    let report_files = config
        .output_formats()
        .iter()
        .map(|f| f.file_name())
        .collect::<Vec<_>>()
        .join(", ");

    let pipeline = ReplayPipeline::new(LocalStorage::new("."), config);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - No reports will be written");
        let captures = pipeline.pending_captures().await?;
        println!("Input:   {} ({} captures)", input_path, captures.len());
        for capture in &captures {
            println!("         {}", capture);
        }
        println!("Format:  {:?}", input_format);
        println!("Output:  {} ({})", output_path, report_files);
        return Ok(());
    }

    let engine = ScanEngine::new(pipeline);
    let output_path = engine.run().await?;

    println!("✅ Replay completed successfully!");
    println!("📁 Reports saved to: {}", output_path);
    Ok(())
}

async fn run_from_toml(args: RunArgs) -> Result<(), ScanError> {
    tracing::info!("📁 Loading configuration from: {}", args.config);
    let config = TomlConfig::from_file(&args.config)?;
    config.validate()?;

    tracing::info!("✅ Configuration loaded: {}", config.scan.name);
    if let Some(description) = &config.scan.description {
        tracing::info!("   {}", description);
    }

    run_replay(config.to_replay_config()?, args.dry_run).await
}
