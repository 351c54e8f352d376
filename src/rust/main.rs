use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use ecosort::assets::verify_file;
use ecosort::{centers, education, AppConfig, Classifier, ClassificationReport, RuntimeConfig, SessionProgress, WasteFootprint, WastePipeline};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify waste photos in one session, awarding EXP for each
    Classify {
        /// Images to classify, in order
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// ONNX model file
        #[arg(short, long)]
        model: Option<PathBuf>,
        /// Label list, one `<index> <name>` per line
        #[arg(short, long)]
        labels: Option<PathBuf>,
        /// Print one JSON report per image instead of text
        #[arg(long)]
        json: bool,
    },
    /// Project daily waste (grams per day) onto a yearly footprint
    Footprint {
        #[arg(long, default_value_t = 0)]
        plastic: u32,
        #[arg(long, default_value_t = 0)]
        metal: u32,
        #[arg(long, default_value_t = 0)]
        cardboard: u32,
        #[arg(long, default_value_t = 0)]
        food: u32,
        #[arg(long, default_value_t = 0)]
        glass: u32,
    },
    /// List recycling centers, nearest first from a point if given
    Centers {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Show learning links and the recycling quiz
    Learn {
        /// Grade quiz answers, one option number per question (e.g. `2,3,1,2`)
        #[arg(long, value_delimiter = ',')]
        answers: Option<Vec<usize>>,
    },
}

fn main() -> Result<()> {
    ecosort::init_logger();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match args.command {
        Command::Classify { images, model, labels, json } => {
            let mut config = config;
            if let Some(model) = model {
                config.model_path = model;
            }
            if let Some(labels) = labels {
                config.labels_path = labels;
            }
            classify(&config, &images, json)
        }
        Command::Footprint { plastic, metal, cardboard, food, glass } => {
            let mut footprint = WasteFootprint::new();
            for (category, grams) in [
                ("Plastic", plastic),
                ("Metal", metal),
                ("Cardboard", cardboard),
                ("Food", food),
                ("Glass", glass),
            ] {
                footprint.set_daily_grams(category, grams);
            }
            let yearly = footprint.yearly();
            println!("Total Yearly Waste: {:.2} kg", yearly.total_kg);
            for (category, kg) in &yearly.per_category_kg {
                println!("  {}: {:.2} kg per year", category, kg);
            }
            Ok(())
        }
        Command::Centers { lat, lon } => {
            let origin = match (lat, lon) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => centers::USER_LOCATION,
            };
            println!("Nearby Recycling Centers (from {:.4}, {:.4}):", origin.0, origin.1);
            for (center, km) in centers::nearest_from(origin) {
                println!("  {} ({:.4}, {:.4}) - {:.2} km", center.name, center.lat, center.lon, km);
            }
            Ok(())
        }
        Command::Learn { answers } => {
            println!("Learn more:");
            for link in &education::LEARNING_LINKS {
                println!("  {}: {}", link.title, link.url);
            }
            println!("\nQuiz:");
            for (i, question) in education::QUIZ.iter().enumerate() {
                println!("{}. {}", i + 1, question.prompt);
                for (j, option) in question.options.iter().enumerate() {
                    println!("   {}) {}", j + 1, option);
                }
            }
            if let Some(answers) = answers {
                let score = education::grade_numbered(&answers);
                println!("\nScore: {} / {}", score.correct, score.total);
            }
            Ok(())
        }
    }
}

fn classify(config: &AppConfig, images: &[PathBuf], json: bool) -> Result<()> {
    config.validate()?;
    if let Some(expected) = &config.model_sha256 {
        verify_file(&config.model_path, expected, "model")?;
    }

    let start_time = Instant::now();
    info!("Loading model from {}", config.model_path.display());
    let classifier = Classifier::builder()
        .with_runtime_config(RuntimeConfig::default().with_threads(config.threads))
        .with_model_file(&config.model_path)?
        .with_labels_file(&config.labels_path)?
        .with_input_size(config.input_size)
        .with_layout(config.layout)
        .build()
        .context("cannot serve any classification without the model")?;
    info!("Classifier built in {:.2?}", start_time.elapsed());

    let pipeline = WastePipeline::new(Arc::new(classifier))
        .with_low_confidence_threshold(config.low_confidence_threshold);

    let mut progress = SessionProgress::new();
    let mut failures = 0;
    for path in images {
        match pipeline.process_file(&progress, path) {
            Ok((next, report)) => {
                progress = next;
                if json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    print_report(path, &report);
                }
            }
            Err(e) if e.is_user_correctable() => {
                failures += 1;
                warn!("Skipping {}: {}", path.display(), e);
                eprintln!("Warning: skipped {} ({})", path.display(), e);
            }
            Err(e) => return Err(e).context("internal classification error"),
        }
    }

    if failures == images.len() {
        bail!("none of the {} inputs could be classified", images.len());
    }
    Ok(())
}

fn print_report(path: &std::path::Path, report: &ClassificationReport) {
    println!("\n{}", path.display());
    println!("  {} detected", report.result.category.to_uppercase());
    println!("  Confidence: {}", report.result.confidence_display());
    println!("  You earned {} EXP!", report.award.points);
    if report.low_confidence {
        println!("  Caution: the confidence score is low. The prediction may not be accurate.");
    }
    for achievement in &report.award.unlocked {
        println!("  Achievement Unlocked: {}", achievement);
    }
    println!(
        "  EXP Progress: {} / {} ({:.0}%)",
        report.experience_points,
        ecosort::progression::DISPLAY_CEILING,
        report.progress_fraction * 100.0
    );
    if !report.achievements.is_empty() {
        println!("  Achievements: {}", report.achievements.join(", "));
    }
    println!("  Recycling Guidelines: {}", report.guideline);
}
