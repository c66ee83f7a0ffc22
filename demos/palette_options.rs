//! Example: four color palettes for a mood brief.
//!
//! Run with:
//! `echo '{"mood": "Warm & Cozy", "aesthetic": "minimalist", "project": "pomodoro timer"}' | cargo run --example palette_options`
//!
//! Reference colors steer option 1 toward the user's picks:
//! `echo '{"mood": "Calm", "reference_colors": ["#FAF6F1", "#C4704A"]}' | cargo run --example palette_options`

use design_council::{generate_palettes, ExecCtx, MoodBrief};
use serde_json::json;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let brief: MoodBrief = serde_json::from_str(&input)?;

    let ctx = ExecCtx::from_env()?.build();
    match generate_palettes(&ctx, &brief).await {
        Ok(output) => {
            for palette in &output.options {
                eprintln!("{:<20} {}", palette.name, palette.colors["accent_primary"]);
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "error": false,
                    "palettes": output.options,
                    "input": output.input,
                }))?
            );
        }
        Err(e) => {
            println!("{}", json!({"error": true, "message": e.to_string()}));
            std::process::exit(1);
        }
    }
    Ok(())
}
