use roomwatch::{
    source::{pump, LineSource},
    subscribe, ChannelError, InMemoryChannel, WatchConfig,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ChannelError> {
    let config = WatchConfig::from_env().with_args(std::env::args().skip(1));

    // Initialize tracing (stdout carries room data, logs go to stderr)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(room = ?config.room, "Starting roomwatch");

    let (channel, mut outbound) = InMemoryChannel::<Value>::new();
    let channel = Arc::new(channel);
    let subscription = subscribe::<Value>(channel.clone(), config.room.as_deref());

    let mut updates = subscription.watch();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let data = updates.borrow_and_update().data.clone();
            if let Some(data) = data {
                println!("{data}");
            }
        }
    });

    let mut source = LineSource::new(BufReader::new(tokio::io::stdin()));
    let result = pump(&mut source, &*channel).await;

    // Leaving the room drops the state sender, which ends the printer
    drop(subscription);
    if let Err(e) = printer.await {
        warn!(error = %e, "Printer task failed");
    }

    while let Ok(message) = outbound.try_recv() {
        match serde_json::to_string(&message) {
            Ok(json) => println!("{json}"),
            Err(e) => warn!(error = %e, "Failed to serialize outbound message"),
        }
    }

    let delivered = result?;
    info!(delivered, "roomwatch finished");
    Ok(())
}
