//! Example: watch the continuation controller stitch truncated output.
//!
//! No API key needed; a scripted transport plays the model.
//!
//! Run with: `cargo run --example mock_continuation`

use design_council::envelope::FinishIndicator;
use design_council::{
    generate_with_continuation, CallFailure, Event, ExecCtx, FnEventHandler, GenerationConfig,
    MockTransport, RawEnvelope,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("design_council=debug")
        .init();

    let handler = Arc::new(FnEventHandler(|event: Event| println!("event: {:?}", event)));

    // Three truncated chunks, then a clean finish.
    let mock = MockTransport::texts(&[
        ("export function Timer() {\n", FinishIndicator::LengthLimit),
        ("  const [left, setLeft] = useState(1500);\n", FinishIndicator::LengthLimit),
        ("  return <time>{left}</time>;\n", FinishIndicator::LengthLimit),
        ("}\n", FinishIndicator::Complete),
    ]);
    let ctx = ExecCtx::builder(Arc::new(mock))
        .event_handler(handler.clone())
        .build();
    let response =
        generate_with_continuation(&ctx, "timer", "Write a Timer component", &GenerationConfig::default())
            .await?;
    println!("--- {:?} after {} continuations ---", response.finish_reason, response.continuations);
    print!("{}", response.text);

    // A failure mid-way keeps what was already generated.
    let flaky = MockTransport::new(vec![
        Ok(RawEnvelope::from_text("const palette = {\n", FinishIndicator::LengthLimit)),
        Err(CallFailure::from_status(400, "request too large")),
    ]);
    let ctx = ExecCtx::builder(Arc::new(flaky)).event_handler(handler).build();
    let partial =
        generate_with_continuation(&ctx, "palette", "Write a palette object", &GenerationConfig::default())
            .await?;
    println!("--- {:?} ---", partial.finish_reason);
    print!("{}", partial.text);

    Ok(())
}
