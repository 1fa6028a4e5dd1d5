use crate::error::Result;
use console::style;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Write raw author counts as `author,count` lines, highest first.
///
/// The format has no header and no escaping; an author name containing
/// a comma will not load back correctly.
pub fn save_authors(path: &Path, counts: &HashMap<String, u64>) -> Result<()> {
    let mut entries: Vec<(&String, &u64)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let mut out = String::new();
    for (author, lines) in entries {
        out.push_str(&format!("{author},{lines}\n"));
    }
    fs::write(path, out)?;
    Ok(())
}

/// Load author counts from an `author,count` file.
///
/// Malformed lines are skipped with a warning on stderr; the returned
/// count says how many were skipped. A repeated author keeps the last
/// value seen.
pub fn load_authors(path: &Path) -> Result<(HashMap<String, u64>, usize)> {
    let content = fs::read_to_string(path)?;
    let mut counts = HashMap::new();
    let mut skipped = 0usize;

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some((author, lines)) => {
                counts.insert(author, lines);
            }
            None => {
                skipped += 1;
                eprintln!(
                    "{} skipping malformed line: {line}",
                    style("warning:").yellow().bold()
                );
            }
        }
    }

    Ok((counts, skipped))
}

fn parse_line(line: &str) -> Option<(String, u64)> {
    let (author, count) = line.split_once(',')?;
    let author = author.trim();
    if author.is_empty() {
        return None;
    }
    let lines = count.trim().parse::<u64>().ok()?;
    Some((author.to_string(), lines))
}
