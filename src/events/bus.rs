//! Subscriber registry and synchronous fan-out

use crate::events::{Event, Topic};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use tracing::{trace, warn};

/// What a subscriber reports back after handling an event.
///
/// A failing handler is logged and counted; it never stops delivery to the
/// handlers registered after it.
pub type HandlerResult = Result<(), Box<dyn Error + Send + Sync>>;

type Handler = Box<dyn FnMut(&Event) -> HandlerResult>;

/// Handle returned by `EventBus::subscribe`.
///
/// Handles index an arena slot that is never reused, so a stale handle can
/// only ever unsubscribe nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(usize);

/// Outcome of a single `publish`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Number of handlers that were called.
    pub invoked: usize,

    /// Number of those handlers that returned an error.
    pub failed: usize,
}

struct Subscriber {
    topic: Topic,
    handler: Handler,
}

/// A topic-keyed registry of event handlers.
///
/// Publishing is synchronous: every handler currently subscribed to the
/// event's topic runs exactly once, in the order it was subscribed, before
/// `publish` returns. Nothing is buffered, so a handler subscribed after an
/// event was published never sees that event.
#[derive(Default)]
pub struct EventBus {
    /// Every subscriber ever registered, vacated on unsubscribe.
    slots: Vec<Option<Subscriber>>,

    /// Slot indices per topic, in registration order.
    topics: HashMap<Topic, Vec<usize>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a topic.
    ///
    /// The same closure logic may be registered any number of times; each
    /// registration is delivered to separately.
    pub fn subscribe<F>(&mut self, topic: Topic, handler: F) -> SubscriptionId
    where
        F: FnMut(&Event) -> HandlerResult + 'static,
    {
        let index = self.slots.len();

        self.slots.push(Some(Subscriber {
            topic,
            handler: Box::new(handler),
        }));
        self.topics
            .entry(topic)
            .or_insert_with(Vec::new)
            .push(index);

        trace!(%topic, subscription = index, "subscribed");

        SubscriptionId(index)
    }

    /// Remove a handler from the bus.
    ///
    /// Returns `false` if the handle was already unsubscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let subscriber = match self.slots.get_mut(id.0).and_then(Option::take) {
            Some(subscriber) => subscriber,
            None => return false,
        };

        if let Some(order) = self.topics.get_mut(&subscriber.topic) {
            order.retain(|&index| index != id.0);
        }

        trace!(topic = %subscriber.topic, subscription = id.0, "unsubscribed");

        true
    }

    /// Deliver an event to every handler subscribed to its topic.
    pub fn publish(&mut self, event: &Event) -> Delivery {
        let topic = event.topic();
        let mut delivery = Delivery::default();
        let order = match self.topics.get(&topic) {
            Some(order) => order,
            None => return delivery,
        };

        for &index in order.iter() {
            if let Some(subscriber) = self.slots.get_mut(index).and_then(Option::as_mut) {
                delivery.invoked += 1;

                if let Err(e) = (subscriber.handler)(event) {
                    delivery.failed += 1;
                    warn!(%topic, subscription = index, error = %e, "event handler failed");
                }
            }
        }

        delivery
    }

    /// Count the live subscribers of a topic.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.topics.get(&topic).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("EventBus");

        for topic in Topic::enumerate().iter() {
            s.field(&topic.to_string(), &self.subscriber_count(*topic));
        }

        s.finish()
    }
}
