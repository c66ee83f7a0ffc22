//! Example: four Google Fonts pairings for a mood brief.
//!
//! Run with:
//! `echo '{"mood": "Editorial", "project": "literary magazine"}' | cargo run --example typography_options`

use design_council::{generate_typography, ExecCtx, MoodBrief};
use serde_json::json;
use std::io::Read;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let brief: MoodBrief = serde_json::from_str(&input)?;

    let ctx = ExecCtx::from_env()?.max_attempts(2).build();
    let output = match generate_typography(&ctx, &brief).await {
        Ok(output) => output,
        Err(e) => {
            println!("{}", json!({"error": true, "message": e.to_string()}));
            std::process::exit(1);
        }
    };

    for pairing in &output.options {
        eprintln!(
            "{}: {} / {}",
            pairing.name, pairing.display.family, pairing.body.family
        );
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "error": false,
            "typography": output.options,
            "input": output.input,
        }))?
    );
    Ok(())
}
