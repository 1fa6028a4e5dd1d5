use crate::aggregate;
use crate::blame;
use crate::error::PieError;
use crate::git::GitRepo;
use crate::model::{AuthorsOutput, ContributionSet, SCHEMA_VERSION};
use crate::pie::{self, RenderOptions};
use crate::store;
use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::collections::HashMap;
use std::path::PathBuf;

/// Fraction of the total below which an author is folded into "Other".
const DEFAULT_THRESHOLD: f64 = 0.05;

#[derive(Parser)]
#[command(name = "gitpie")]
#[command(about = "Pie chart of per-author line contributions in a git repository")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, help = "Path to the git repository")]
    pub repo: Option<PathBuf>,

    #[arg(short, long, help = "Load author counts from a file instead of scanning")]
    pub load: Option<PathBuf>,

    #[arg(short, long, help = "Write raw author counts to this file")]
    pub authors: Option<PathBuf>,

    #[arg(short, long, help = "Radius of the pie chart", default_value_t = 10)]
    pub size: u32,

    #[arg(
        long,
        help = "Fraction of total lines below which authors are grouped into 'Other'",
        default_value_t = DEFAULT_THRESHOLD
    )]
    pub threshold: f64,

    #[arg(long, help = "Output as JSON instead of ASCII art")]
    pub json: bool,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(long, help = "Omit the total line count")]
    pub no_total: bool,

    #[arg(long, help = "Omit the per-author key")]
    pub no_key: bool,

    #[arg(short, long, help = "Verbose output")]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        if self.repo.is_some() && self.load.is_some() {
            return Err(PieError::SourceConflict.into());
        }
        if self.size == 0 {
            return Err(PieError::InvalidInput("size must be at least 1".to_string()).into());
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PieError::InvalidInput(format!(
                "threshold must be in [0, 1], got {}",
                self.threshold
            ))
            .into());
        }

        let (counts, source) = self.collect_counts()?;

        if let Some(path) = &self.authors {
            store::save_authors(path, &counts)
                .with_context(|| format!("Failed to write author counts to {}", path.display()))?;
        }

        let set = ContributionSet::from_counts(counts);
        let set = aggregate::group_long_tail(set, self.threshold)
            .context("Failed to group author counts")?;

        if self.verbose {
            println!("{}", style("Authors:").bold());
            for record in set.records() {
                println!("{}: {}", record.author, record.lines);
            }
        }

        if self.json {
            let output = AuthorsOutput {
                version: SCHEMA_VERSION,
                generated_at: chrono::Utc::now(),
                source,
                total_lines: set.total(),
                records: set.records().to_vec(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            let opts = RenderOptions {
                include_total: !self.no_total,
                include_key: !self.no_key,
                color: !self.no_color,
            };
            let chart = pie::render(&set, self.size, opts).context("Failed to render pie chart")?;
            println!("{chart}");
        }

        Ok(())
    }

    fn collect_counts(&self) -> Result<(HashMap<String, u64>, String)> {
        if let Some(path) = &self.load {
            let (counts, skipped) = store::load_authors(path)
                .with_context(|| format!("Failed to load author counts from {}", path.display()))?;
            if self.verbose && skipped > 0 {
                println!("Skipped {skipped} malformed lines");
            }
            Ok((counts, path.display().to_string()))
        } else if self.repo.is_some() {
            let repo = GitRepo::open(self.repo.as_ref())
                .context("Failed to open git repository")?;
            let counts = blame::collect(&repo, self.verbose)?;
            Ok((counts, repo.path().to_string_lossy().to_string()))
        } else {
            Err(PieError::NoSource.into())
        }
    }
}
