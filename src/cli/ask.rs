use std::sync::Arc;

use tracing::info;

use super::AskArgs;
use crate::adapter::llm::OpenAi;
use crate::adapter::telemetry::LogSink;
use crate::app::Miner;
use crate::config::Config;
use crate::domain::Synapse;
use crate::error::Result;

/// Serve a single message through the full forward path.
pub async fn execute(args: AskArgs) -> Result<()> {
    let config = Config::load_or_default(&args.config)?;
    config.logging.init();

    let llm = Arc::new(OpenAi::from_config(&config)?);
    let mut miner = Miner::new(llm, &config);
    if config.telemetry.enabled {
        miner = miner.with_sink(Arc::new(LogSink::new()));
    }

    let synapse = miner.forward(Synapse::from_message(args.message)).await;
    println!("{}", synapse.completion.unwrap_or_default());

    let totals = miner.usage_totals();
    info!(
        total_tokens = totals.total_tokens,
        prompt_tokens = totals.prompt_tokens,
        completion_tokens = totals.completion_tokens,
        total_cost = %totals.total_cost,
        "usage"
    );

    Ok(())
}
