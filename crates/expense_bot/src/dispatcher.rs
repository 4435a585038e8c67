//! Update routing: an ordered chain of handlers.

use async_trait::async_trait;
use telegram_client::Update;
use tracing::debug;

/// What a handler did with an update it claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Fully handled, stop the chain.
    Consumed,
    /// Side effects were performed but later handlers may still react.
    Handled,
    /// Inspected and declined, routing continues.
    NotMine,
}

#[async_trait]
pub trait Handler: Send + Sync {
    fn name(&self) -> &'static str;

    /// Cheap synchronous filter. A `true` here only grants a look;
    /// `handle` may still return [`Outcome::NotMine`].
    fn can_handle(&self, update: &Update) -> bool;

    async fn handle(&self, update: &Update) -> anyhow::Result<Outcome>;
}

/// Routes each update through handlers in registration order until one
/// consumes it.
#[derive(Default)]
pub struct Dispatcher {
    handlers: Vec<Box<dyn Handler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Box<dyn Handler>) {
        debug!(handler = handler.name(), "handler registered");
        self.handlers.push(handler);
    }

    pub async fn dispatch(&self, update: &Update) -> anyhow::Result<()> {
        for handler in &self.handlers {
            if !handler.can_handle(update) {
                continue;
            }

            let outcome = handler.handle(update).await?;
            debug!(
                handler = handler.name(),
                update_id = update.update_id,
                ?outcome,
                "update routed"
            );

            if outcome == Outcome::Consumed {
                return Ok(());
            }
        }
        Ok(())
    }
}
