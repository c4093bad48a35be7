//! osu! replay (.osr) parser CLI
//!
//! A command-line interface for inspecting and validating osu! replay
//! files.
//!
//! ## Commands
//!
//! - `info` - Display quick replay metadata
//! - `parse` - Parse a replay with output format options
//! - `validate` - Validate replay structure (exit codes for scripting)

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use osr_parser::replay::Replay;
use osr_parser::Mods;

/// osu! replay (.osr) parser
#[derive(Parser)]
#[command(name = "osr-parser")]
#[command(about = "osu! replay (.osr) parser", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display replay information
    Info {
        /// Path to the replay file
        file: PathBuf,
    },
    /// Parse a replay file
    Parse {
        /// Path to the replay file
        file: PathBuf,
        /// Output format: json, pretty
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
        /// Include the decoded frame list in output
        #[arg(long)]
        frames: bool,
        /// Skip frame decompression (header statistics only)
        #[arg(long, conflicts_with = "frames")]
        skip_frames: bool,
    },
    /// Validate replay structure
    Validate {
        /// Path to the replay file
        file: PathBuf,
        /// Verbose error reporting
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Output format options
#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

// ============================================================================
// Serializable Output Structures
// ============================================================================

#[derive(Serialize)]
struct ParseOutput {
    header: HeaderInfo,
    compressed_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    decompressed_size: Option<usize>,
    frame_count: usize,
    seed: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    online_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frames: Option<Vec<FrameInfo>>,
}

#[derive(Serialize)]
struct HeaderInfo {
    game_mode: String,
    version: i32,
    beatmap_hash: String,
    player_name: String,
    replay_hash: String,
    count_300: u16,
    count_100: u16,
    count_50: u16,
    count_geki: u16,
    count_katu: u16,
    count_miss: u16,
    total_score: i32,
    max_combo: u16,
    perfect: bool,
    mods: Vec<String>,
    mods_raw: i32,
    timestamp_ticks: i64,
}

#[derive(Serialize)]
struct FrameInfo {
    time: i32,
    x: f32,
    y: f32,
}

// ============================================================================
// Validation Result Structure
// ============================================================================

struct ValidationResult {
    header_valid: bool,
    decompression_valid: bool,
    frame_parsing_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn is_valid(&self) -> bool {
        self.header_valid && self.decompression_valid && self.frame_parsing_valid
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file } => cmd_info(&file),
        Commands::Parse {
            file,
            output,
            frames,
            skip_frames,
        } => cmd_parse(&file, &output, frames, skip_frames),
        Commands::Validate { file, verbose } => cmd_validate(&file, verbose),
    }
}

// ============================================================================
// Info Command Implementation
// ============================================================================

fn cmd_info(file: &Path) -> ExitCode {
    let replay = match Replay::from_file(file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print_info(&replay);

    ExitCode::SUCCESS
}

fn print_info(replay: &Replay) {
    let h = &replay.header;

    println!("=== Replay Information ===\n");

    println!("Player:");
    println!("  Name: {}", h.player_name);
    println!("  Mode: {:?}", h.game_mode);
    println!("  Mods: {}", mod_names(h.mods).join(", "));

    println!();

    println!("Score:");
    println!("  Total: {}", h.total_score);
    println!("  Max Combo: {}x{}", h.max_combo, if h.perfect { " (perfect)" } else { "" });
    println!(
        "  Hits: {} / {} / {} / {} miss",
        h.count_300, h.count_100, h.count_50, h.count_miss
    );

    println!();

    println!("Technical:");
    println!("  Version: {}", h.version);
    println!("  Beatmap Hash: {}", h.beatmap_hash);
    println!("  Replay Hash: {}", h.replay_hash);
    println!("  Compressed Frames: {} bytes", replay.compressed_data.len());
    println!("  Frame Count: {}", replay.frame_count());
    println!("  Seed: {}", replay.seed);
    if let Some(id) = replay.online_id {
        println!("  Online ID: {}", id);
    }
}

// ============================================================================
// Parse Command Implementation
// ============================================================================

fn cmd_parse(file: &Path, output: &OutputFormat, include_frames: bool, skip_frames: bool) -> ExitCode {
    let data = match std::fs::read(file) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let replay = match Replay::parse_with_options(&data, !skip_frames) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let output_data = build_output(&replay, include_frames);

    match output {
        OutputFormat::Json => print_json(&output_data),
        OutputFormat::Pretty => print_pretty(&output_data),
    }

    ExitCode::SUCCESS
}

fn build_output(replay: &Replay, include_frames: bool) -> ParseOutput {
    let h = &replay.header;

    let header = HeaderInfo {
        game_mode: format!("{:?}", h.game_mode),
        version: h.version,
        beatmap_hash: h.beatmap_hash.clone(),
        player_name: h.player_name.clone(),
        replay_hash: h.replay_hash.clone(),
        count_300: h.count_300,
        count_100: h.count_100,
        count_50: h.count_50,
        count_geki: h.count_geki,
        count_katu: h.count_katu,
        count_miss: h.count_miss,
        total_score: h.total_score,
        max_combo: h.max_combo,
        perfect: h.perfect,
        mods: mod_names(h.mods),
        mods_raw: h.mods.to_raw(),
        timestamp_ticks: h.timestamp_ticks,
    };

    let frames = if include_frames {
        Some(
            replay
                .frames
                .iter()
                .map(|f| FrameInfo {
                    time: f.time,
                    x: f.x,
                    y: f.y,
                })
                .collect(),
        )
    } else {
        None
    };

    ParseOutput {
        header,
        compressed_size: replay.compressed_data.len(),
        decompressed_size: replay.decompressed_data.as_ref().map(Vec::len),
        frame_count: replay.frame_count(),
        seed: replay.seed,
        online_id: replay.online_id,
        frames,
    }
}

fn mod_names(mods: Mods) -> Vec<String> {
    if mods.is_empty() {
        return vec!["None".to_string()];
    }
    mods.iter_names().map(|(name, _)| name.to_string()).collect()
}

fn print_json(output: &ParseOutput) {
    match serde_json::to_string_pretty(output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

fn print_pretty(output: &ParseOutput) {
    println!("=== Header ===");
    println!("Player: {}", output.header.player_name);
    println!("Mode: {}", output.header.game_mode);
    println!("Version: {}", output.header.version);
    println!("Mods: {}", output.header.mods.join(", "));
    println!("Score: {}", output.header.total_score);
    println!("Max Combo: {}", output.header.max_combo);
    println!(
        "Hits: 300x{} 100x{} 50x{} geki x{} katu x{} miss x{}",
        output.header.count_300,
        output.header.count_100,
        output.header.count_50,
        output.header.count_geki,
        output.header.count_katu,
        output.header.count_miss
    );
    println!();

    println!("=== Frames ===");
    println!("Compressed: {} bytes", output.compressed_size);
    if let Some(size) = output.decompressed_size {
        println!("Decompressed: {} bytes", size);
    }
    println!("Frame Count: {}", output.frame_count);
    println!("Seed: {}", output.seed);
    if let Some(id) = output.online_id {
        println!("Online ID: {}", id);
    }

    if let Some(frames) = &output.frames {
        println!();
        println!("=== Frame Data ({}) ===", frames.len());
        // Only show the first 50 frames in pretty mode to avoid spam
        let display_count = std::cmp::min(frames.len(), 50);
        for frame in &frames[..display_count] {
            println!("  [{}ms] ({}, {})", frame.time, frame.x, frame.y);
        }
        if frames.len() > 50 {
            println!("  ... and {} more frames", frames.len() - 50);
        }
    }
}

// ============================================================================
// Validate Command Implementation
// ============================================================================

fn cmd_validate(file: &Path, verbose: bool) -> ExitCode {
    let result = validate_replay(file);

    if verbose {
        print_validation_details(&result, file);
    } else {
        print_validation_summary(&result, file);
    }

    if result.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn validate_replay(file: &Path) -> ValidationResult {
    let mut result = ValidationResult {
        header_valid: false,
        decompression_valid: false,
        frame_parsing_valid: false,
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    // Step 1: Read file
    let data = match std::fs::read(file) {
        Ok(d) => d,
        Err(e) => {
            result.errors.push(format!("Failed to read file: {}", e));
            return result;
        }
    };

    // Step 2: Header and layout (without decompression)
    let skimmed = match Replay::parse_with_options(&data, false) {
        Ok(r) => {
            result.header_valid = true;
            r
        }
        Err(e) => {
            result.errors.push(format!("Header parsing failed: {}", e));
            return result;
        }
    };

    if skimmed.compressed_data.is_empty() {
        result
            .warnings
            .push("Replay contains no frame data".to_string());
    }

    // Step 3: Full decode including decompression and frame parsing
    match Replay::parse(&data) {
        Ok(replay) => {
            result.decompression_valid = true;
            result.frame_parsing_valid = true;

            if replay.frame_count() == 0 {
                result
                    .warnings
                    .push("No frames decoded from replay data".to_string());
            }

            let mut last_time = i32::MIN;
            let decreasing = replay.frames.iter().any(|f| {
                let out_of_order = f.time < last_time;
                last_time = f.time;
                out_of_order
            });
            if decreasing {
                result
                    .warnings
                    .push("Frame times are not monotonically non-decreasing".to_string());
            }
        }
        Err(osr_parser::ParserError::DecompressionError { reason }) => {
            result
                .errors
                .push(format!("Decompression failed: {}", reason));
        }
        Err(e) => {
            result.decompression_valid = true;
            result.errors.push(format!("Frame parsing failed: {}", e));
        }
    }

    result
}

fn print_validation_summary(result: &ValidationResult, file: &Path) {
    let status = if result.is_valid() { "VALID" } else { "INVALID" };
    println!("{}: {}", file.display(), status);
}

fn print_validation_details(result: &ValidationResult, file: &Path) {
    println!("Validating: {}\n", file.display());

    println!("Checks:");
    println!("  Header parsing:    {}", status_icon(result.header_valid));
    println!(
        "  Decompression:     {}",
        status_icon(result.decompression_valid)
    );
    println!(
        "  Frame parsing:     {}",
        status_icon(result.frame_parsing_valid)
    );

    if !result.errors.is_empty() {
        println!("\nErrors:");
        for error in &result.errors {
            println!("  - {}", error);
        }
    }

    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!("  - {}", warning);
        }
    }

    println!(
        "\nResult: {}",
        if result.is_valid() { "VALID" } else { "INVALID" }
    );
}

fn status_icon(valid: bool) -> &'static str {
    if valid {
        "[OK]"
    } else {
        "[FAIL]"
    }
}
