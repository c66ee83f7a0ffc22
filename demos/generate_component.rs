//! Example: generate a frontend component from a JSON design spec on stdin.
//!
//! Run with:
//! `echo '{"design_spec": "A pricing table with three tiers", "framework": "react"}' | cargo run --example generate_component`
//!
//! Requires `GEMINI_API_KEY`. Set `RUST_LOG=design_council=debug` to watch
//! retries and continuations.

use design_council::{generate_component, DesignSpec, Event, ExecCtx, FnEventHandler};
use serde_json::json;
use std::io::Read;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

async fn run(input: &str) -> anyhow::Result<serde_json::Value> {
    let spec: DesignSpec = serde_json::from_str(input)
        .map_err(|e| anyhow::anyhow!("Invalid JSON input: {}", e))?;

    let progress = Arc::new(FnEventHandler(|event: Event| match event {
        Event::TransportRetry { attempt, delay_ms, reason, .. } => {
            eprintln!("retry #{} in {}ms ({})", attempt, delay_ms, reason)
        }
        Event::Continuation { continuation, accumulated_chars, .. } => {
            eprintln!("output truncated at {} chars, continuation {}", accumulated_chars, continuation)
        }
        _ => {}
    }));

    let ctx = ExecCtx::from_env()?.event_handler(progress).build();
    let output = generate_component(&ctx, &spec).await?;

    Ok(json!({
        "error": false,
        "code": output.code,
        "finish_reason": output.finish_reason,
        "usage": output.usage,
        "lines_of_code": output.lines_of_code,
        "components_count": output.components_count,
        "has_styles": output.has_styles,
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    if input.trim().is_empty() {
        println!("{}", json!({"error": true, "message": "No input provided. Expected JSON with design_spec."}));
        std::process::exit(1);
    }

    match run(&input).await {
        Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
        Err(e) => {
            println!("{}", json!({"error": true, "message": e.to_string()}));
            std::process::exit(1);
        }
    }
    Ok(())
}
