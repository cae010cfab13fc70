use clap::{Parser, Subcommand};
use raid_scorer::{
    leaderboard::{RankBand, RankWatch},
    models::{format_score, BossGroup, DifficultyTier, Mode, RaidKind},
    scoring::{format_used_time, RankLineCalculator, ScoringAlgorithm},
    sources::{HttpStatsSource, StatsSource},
    RaidScoreError, Settings,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "raid-scorer")]
#[clap(about = "Interpret raid leaderboard scores", long_about = None)]
struct Cli {
    /// Settings file used instead of the config/ directory
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a score into a difficulty tier
    Classify {
        score: i64,

        /// Boss id, selects the threshold table
        #[clap(short, long)]
        raid_id: i64,
    },

    /// Recover the time a clear took from its score
    UsedTime {
        score: i64,

        /// Tier the score was cleared at; classified when omitted
        #[clap(short, long)]
        tier: Option<String>,

        #[clap(short, long)]
        raid_id: i64,
    },

    /// Decompose an elimination total into three runs
    Breakdown {
        score: i64,

        /// Threshold table: 4min or 3min
        #[clap(short, long, default_value = "4min")]
        mode: String,
    },

    /// Show the score cut-offs of a season
    Line {
        season: i64,

        /// Use the elimination raid leaderboard
        #[clap(short, long)]
        eliminate: bool,
    },

    /// List reference seasons the source region has not run yet
    Seasons {
        #[clap(short, long)]
        eliminate: bool,
    },

    /// Character usage over the upcoming seasons
    Usage {
        #[clap(short, long)]
        eliminate: bool,

        /// Only count the band containing this rank
        #[clap(long)]
        rank: Option<u32>,

        /// Number of students to print
        #[clap(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show the usage band of a rank
    Band { rank: u32 },

    /// Check a rank watch
    Watch {
        #[clap(long)]
        current: u32,

        #[clap(long)]
        target: u32,

        /// Rank after the next refresh
        #[clap(long)]
        latest: Option<u32>,
    },
}

fn raid_kind(eliminate: bool) -> RaidKind {
    if eliminate {
        RaidKind::Eliminate
    } else {
        RaidKind::Raid
    }
}

fn calculator(settings: &Settings, algorithm: ScoringAlgorithm) -> anyhow::Result<RankLineCalculator> {
    let source = Arc::new(HttpStatsSource::new(settings.sources.clone())?) as Arc<dyn StatsSource>;
    Ok(RankLineCalculator::new(source, algorithm, settings.clone()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new().unwrap_or_else(|e| {
            eprintln!("Failed to load settings ({}), using defaults", e);
            Settings::default()
        }),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    settings.validate().map_err(RaidScoreError::ConfigError)?;

    let algorithm = ScoringAlgorithm::default();
    algorithm
        .constants()
        .validate()
        .map_err(RaidScoreError::ConfigError)?;

    match cli.command {
        Commands::Classify { score, raid_id } => {
            let mode = Mode::for_raid(raid_id);
            let tier = algorithm.classify(score, mode);
            println!("{} ({}): {}", format_score(score), mode, DifficultyTier::label(tier));
        }

        Commands::UsedTime { score, tier, raid_id } => {
            let tier = match tier {
                Some(name) => name.parse::<DifficultyTier>()?,
                None => algorithm
                    .classify(score, Mode::for_raid(raid_id))
                    .ok_or_else(|| anyhow::anyhow!("Score {} is below every tier", score))?,
            };

            match algorithm.used_time(score, tier, raid_id) {
                Ok(seconds) => println!(
                    "{} at {} (group {}): used {}",
                    format_score(score),
                    tier,
                    BossGroup::for_raid(raid_id),
                    format_used_time(seconds)
                ),
                Err(e) => error!("Cannot recover used time: {}", e),
            }
        }

        Commands::Breakdown { score, mode } => {
            let mode = mode.parse::<Mode>()?;
            match algorithm.breakdown(mode, score) {
                Some(breakdown) => println!(
                    "{} ({}): {} (estimate {}, off by {})",
                    format_score(score),
                    mode,
                    breakdown,
                    format_score(breakdown.estimate),
                    format_score(breakdown.difference)
                ),
                None => warn!("No decomposition found for {}", score),
            }
        }

        Commands::Line { season, eliminate } => {
            let calculator = calculator(&settings, algorithm)?;
            let report = calculator.rank_line(raid_kind(eliminate), season).await?;

            println!("\n=== {} ===", report.title());
            for entry in &report.entries {
                println!("{}", entry);
            }
            println!("\nGenerated at {}", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
        }

        Commands::Seasons { eliminate } => {
            let kind = raid_kind(eliminate);
            let calculator = calculator(&settings, algorithm)?;
            let mapping = calculator.season_mapping(kind).await;

            if mapping.is_empty() {
                println!("No upcoming {} seasons", kind);
            }
            for (label, season) in mapping.iter() {
                println!("S{}: {} {} (raid {})", label, season.terrain, season.name, season.raid_id);
            }
        }

        Commands::Usage { eliminate, rank, limit } => {
            let band = rank.map(RankBand::for_rank).transpose()?;
            let calculator = calculator(&settings, algorithm)?;
            let usage = calculator.character_usage(raid_kind(eliminate), band).await?;

            info!("{} students in usage table", usage.len());
            if let Some(band) = band {
                println!("\n=== Usage, {} ===", band);
            } else {
                println!("\n=== Usage, all ranks ===");
            }
            for (i, student) in usage.iter().take(limit).enumerate() {
                println!("{:>3}. {} ({})", i + 1, student.name, format_score(student.count as i64));
            }
        }

        Commands::Band { rank } => {
            let band = RankBand::for_rank(rank)?;
            println!("Rank {} is in {}", rank, band);
        }

        Commands::Watch { current, target, latest } => match RankWatch::register(0, current, target) {
            Ok(mut watch) => {
                println!("Watching rank {} from {}", target, current);
                if let Some(latest) = latest {
                    if watch.should_notify(latest) {
                        watch.mark_notified();
                        println!("Rank {} is within reach of {}, notify", latest, target);
                    } else {
                        println!("Rank {} does not trigger the watch", latest);
                    }
                }
            }
            Err(e) => println!("Watch rejected: {}", e),
        },
    }

    Ok(())
}
