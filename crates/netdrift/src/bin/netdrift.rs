use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use capture::{CapturedOutput, MemorySource};
use netdrift::ComparisonSession;

const COMMAND: &str = "file";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: netdrift <baseline-file> <snapshot-file>");
        process::exit(2);
    }

    let baseline_path = &args[1];
    let snapshot_path = &args[2];

    let baseline_text = fs::read_to_string(baseline_path)
        .with_context(|| format!("Failed to read baseline file {}", baseline_path))?;
    let snapshot_text = fs::read_to_string(snapshot_path)
        .with_context(|| format!("Failed to read snapshot file {}", snapshot_path))?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);

    let mut source = MemorySource::new();
    source.add_capture("baseline", file_capture("baseline", baseline_path, baseline_text, now));
    source.add_capture("snapshot", file_capture("snapshot", snapshot_path, snapshot_text, now));

    let session = ComparisonSession::new(source, "baseline", "snapshot");
    let result = session.compute_full_diff(COMMAND)?;

    if result.identical {
        println!("No differences.");
        return Ok(());
    }

    println!("{}", result.text_diff);
    process::exit(1);
}

fn file_capture(id: &str, path: &str, text: String, captured_at: i64) -> CapturedOutput {
    CapturedOutput {
        id: id.to_string(),
        device_id: path.to_string(),
        command: COMMAND.to_string(),
        raw_text: text.clone(),
        normalized_text: text,
        captured_at,
        version: 1,
    }
}
