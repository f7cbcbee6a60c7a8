use clap::{Args, Parser, Subcommand};
use octofhir_vocabgen::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vocabgen")]
#[command(about = "Generate vocabulary classes from an HL7 v3 vocabulary model")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate vocabulary source files
    Generate {
        #[command(flatten)]
        options: ModelOptions,
        /// Output root; files are written under <output>/vocabulary
        #[arg(short, long, default_value = "generated")]
        output: PathBuf,
        /// Print the generation report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how every enumeration resolves without writing anything
    Inspect {
        #[command(flatten)]
        options: ModelOptions,
    },
}

#[derive(Args)]
struct ModelOptions {
    /// Path to the vocabulary model (JSON)
    #[arg(short, long)]
    model: PathBuf,
    /// Path to a configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Maximum number of literals an enumeration may have
    #[arg(long)]
    max_literals: Option<usize>,
    /// Render partial enumerations
    #[arg(long)]
    render_partials: bool,
    /// Render code systems and concept domains, not only value sets
    #[arg(long)]
    generate_all_vocab: bool,
    /// Realm suffix allowed to overwrite existing files
    #[arg(long)]
    preferred_realm: Option<String>,
    /// Java package of the generated classes
    #[arg(long)]
    package: Option<String>,
}

impl ModelOptions {
    fn config(&self) -> Result<VocabGenConfig> {
        let mut config = match &self.config {
            Some(path) => VocabGenConfig::from_json_file(path)?,
            None => VocabGenConfig::default(),
        };

        if let Some(max) = self.max_literals {
            config = config.with_max_literals(max);
        }
        if self.render_partials {
            config = config.with_render_partials(true);
        }
        if self.generate_all_vocab {
            config = config.with_generate_all_vocab(true);
        }
        if let Some(realm) = &self.preferred_realm {
            config = config.with_preferred_realm(realm.clone());
        }
        if let Some(package) = &self.package {
            config = config.with_package(package.clone());
        }
        Ok(config)
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Generate {
            options,
            output,
            json,
        } => generate(&options, &output, json)?,
        Commands::Inspect { options } => inspect(&options)?,
    }

    Ok(())
}

fn generate(options: &ModelOptions, output: &Path, json: bool) -> Result<()> {
    let generator = VocabularyGenerator::new(options.config()?)?;
    let LoadedModel {
        mut model,
        referenced,
    } = VocabularyModel::load(&options.model)?;

    let report = generator.run(&mut model, &referenced, output)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for entity in report.written() {
        if let EntityOutcome::Written { path, .. } = &entity.outcome {
            println!("✅ {} -> {}", entity.identity, path.display());
        }
    }
    for (identity, reason) in report.rejected() {
        println!("⏭️  {identity}: {reason}");
    }
    println!(
        "📊 {} written, {} rejected",
        report.written().count(),
        report.rejected().count()
    );
    Ok(())
}

fn inspect(options: &ModelOptions) -> Result<()> {
    let generator = VocabularyGenerator::new(options.config()?)?;
    let LoadedModel {
        mut model,
        referenced,
    } = VocabularyModel::load(&options.model)?;

    for (identity, outcome) in generator.inspect(&mut model, &referenced) {
        match outcome {
            Ok(name) => println!("{identity}: renders as {name}"),
            Err(reason) => println!("{identity}: {reason}"),
        }
    }
    Ok(())
}
