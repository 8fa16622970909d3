use anyhow::{Context, Result};
use bettermd::cli::commands::{CheckConfigCommand, ConvertCommand, InspectCommand};
use bettermd::cli::output::*;
use bettermd::cli::{Cli, Command};
use bettermd::convert::{
    output_path_in, BatchConverter, ConversionEvent, ConversionJob, Converter, SourceFormat,
};
use bettermd::core::ConvertConfig;
use bettermd::parse::{HtmlParser, MarkdownParser, Parser};
use bettermd::render::Format;
use std::path::Path;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; stdout is reserved for converted output
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Convert(cmd) => convert(cmd, &cli).await?,
        Command::Inspect(cmd) => inspect(cmd, &cli)?,
        Command::CheckConfig(cmd) => check_config(cmd, &cli)?,
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<ConvertConfig> {
    let config = ConvertConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    debug!("Using config: {:?}", config);
    Ok(config)
}

fn source_format(input: &Path, explicit: Option<SourceFormat>) -> Result<SourceFormat> {
    match explicit {
        Some(from) => Ok(from),
        None => SourceFormat::from_path(input).with_context(|| {
            format!(
                "Cannot detect the format of {}, pass --from html|md",
                input.display()
            )
        }),
    }
}

async fn convert(cmd: &ConvertCommand, cli: &Cli) -> Result<()> {
    let converter = Converter::new(load_config(cli)?);
    let to: Format = cmd.to.into();
    let from = cmd.from.map(SourceFormat::from);

    // One input and nowhere to write: print the result
    if let ([input], None) = (cmd.inputs.as_slice(), &cmd.output) {
        let source = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let rendered = converter
            .convert_str(&source, source_format(input, from)?, to)
            .with_context(|| format!("Failed to convert {}", input.display()))?;
        println!("{}", rendered);
        return Ok(());
    }

    let mut jobs = Vec::with_capacity(cmd.inputs.len());
    for input in &cmd.inputs {
        let output = match (&cmd.output, cmd.inputs.len()) {
            (Some(file), 1) => file.clone(),
            (Some(dir), _) => output_path_in(dir, input, to),
            (None, _) => output_path_in(input.parent().unwrap_or(Path::new("")), input, to),
        };
        if output == *input {
            anyhow::bail!("Refusing to overwrite input {}", input.display());
        }
        jobs.push(ConversionJob::new(input, output, Some(source_format(input, from)?), to)?);
    }

    let progress = create_progress_bar(jobs.len());
    let mut batch = BatchConverter::new(converter, cmd.strategy.into());
    let bar = progress.clone();
    batch.add_event_handler(move |event| match event {
        ConversionEvent::JobCompleted { .. } | ConversionEvent::JobFailed { .. } => {
            bar.println(format_conversion_event(&event));
            bar.inc(1);
        }
        ConversionEvent::JobStarted { ref input } => {
            bar.set_message(input.display().to_string());
        }
        _ => {}
    });

    let outcomes = batch.run(jobs).await;
    progress.finish_and_clear();

    let failures = format_failures(&outcomes);
    let succeeded = outcomes.len() - failures.len();
    println!(
        "{}",
        format_conversion_event(&ConversionEvent::BatchCompleted {
            succeeded,
            failed: failures.len(),
        })
    );

    if !failures.is_empty() {
        for line in &failures {
            eprintln!("{}", line);
        }
        error!("{} file(s) failed to convert", failures.len());
        std::process::exit(1);
    }

    Ok(())
}

fn inspect(cmd: &InspectCommand, cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let source = std::fs::read_to_string(&cmd.input)
        .with_context(|| format!("Failed to read {}", cmd.input.display()))?;

    let nodes = match source_format(&cmd.input, cmd.from.map(SourceFormat::from))? {
        SourceFormat::Html => HtmlParser::new().parse(&source),
        SourceFormat::Markdown => MarkdownParser::with_config(&config).parse(&source),
    }
    .with_context(|| format!("Failed to parse {}", cmd.input.display()))?;

    println!("{}", serde_json::to_string_pretty(&nodes)?);
    Ok(())
}

fn check_config(cmd: &CheckConfigCommand, cli: &Cli) -> Result<()> {
    let loaded = ConvertConfig::load(cli.config.as_deref());

    // JSON mode keeps stdout machine-readable
    if cmd.json {
        return match loaded {
            Ok(config) => {
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
            Err(e) => {
                eprintln!("{} Validation failed: {:#}", CROSS, e);
                std::process::exit(1);
            }
        };
    }

    let source = cli.config.clone().or_else(ConvertConfig::default_path);
    match &source {
        Some(path) if path.exists() || cli.config.is_some() => {
            println!("{} Checking {}", INFO, style(path.display()).dim());
        }
        _ => println!("{} No config file found, showing defaults", INFO),
    }

    match loaded {
        Ok(config) => {
            println!("{} Configuration is valid!", CHECK);
            println!("  Strict: {}", style(config.strict).bold());
            println!("  HTML indent: {}", style(config.html.indent).cyan());
            println!("  HTML escape text: {}", style(config.html.escape_text).cyan());
            println!("  RST heading chars: {}", style(&config.rst.heading_chars).cyan());
            println!("  Markdown inline: {}", style(config.markdown.inline).cyan());
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}
