use crate::aggregate;
use crate::error::Result;
use crate::git::GitRepo;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

/// Extract the author name from one line of `git blame` output.
///
/// Takes the text between the first `(` and the first ` 20` of the
/// commit year. This only works for 21st-century timestamps and
/// misparses author names containing `(` or the substring ` 20`.
pub fn extract_author(line: &str) -> Option<&str> {
    let rest = line.split_once('(')?.1;
    let author = rest.split(" 20").next()?.trim();
    if author.is_empty() {
        None
    } else {
        Some(author)
    }
}

/// Per-author line counts for one file.
///
/// Returns `None` when the blame command cannot be run or exits with
/// failure; the caller skips such files and keeps going.
pub fn blame_file(repo_path: &Path, file: &str) -> Option<HashMap<String, u64>> {
    let output = Command::new("git")
        .args(["blame", "--", file])
        .current_dir(repo_path)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let text = String::from_utf8_lossy(&output.stdout);
    let mut counts: HashMap<String, u64> = HashMap::new();
    for line in text.lines() {
        if let Some(author) = extract_author(line) {
            *counts.entry(author.to_string()).or_insert(0) += 1;
        }
    }
    Some(counts)
}

/// Blame every tracked file and merge the per-file counts.
///
/// Files are blamed in parallel; merge is commutative so the result
/// does not depend on completion order. A file that fails to blame is
/// reported and skipped.
pub fn collect(repo: &GitRepo, verbose: bool) -> Result<HashMap<String, u64>> {
    let files = repo.tracked_files()?;
    if verbose {
        println!("Found {} files in {}", files.len(), repo.path().display());
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message("Blaming files...");

    let repo_path = repo.path();
    let results: Vec<Option<HashMap<String, u64>>> = files
        .par_iter()
        .map(|file| {
            let counts = blame_file(repo_path, file);
            if counts.is_none() {
                pb.println(format!(
                    "{} failed to blame {file}, skipping",
                    style("warning:").yellow().bold()
                ));
            } else if verbose {
                if let Some(c) = &counts {
                    pb.println(format!("Found {} authors for {file}", c.len()));
                }
            }
            pb.inc(1);
            counts
        })
        .collect();

    pb.finish_with_message("Blame complete");
    Ok(aggregate::merge(results))
}
