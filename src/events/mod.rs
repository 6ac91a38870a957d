//! Typed publish/subscribe between the session model and whatever renders it.

mod bus;
mod event;

pub use bus::{EventBus, HandlerResult, SubscriptionId};
pub use event::{Event, Topic};

#[cfg(test)]
mod tests;
