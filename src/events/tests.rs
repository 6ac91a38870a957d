use crate::events::bus::Delivery;
use crate::events::{Event, EventBus, Topic};
use std::cell::RefCell;
use std::rc::Rc;

fn moved(cursor: u64) -> Event {
    Event::AddressChanged { cursor }
}

#[test]
fn publish_without_subscribers() {
    let mut bus = EventBus::new();

    assert_eq!(bus.publish(&moved(0x10)), Delivery::default());
}

#[test]
fn publish_in_subscription_order() {
    let mut bus = EventBus::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    for name in vec!["first", "second", "third"] {
        let seen = seen.clone();
        bus.subscribe(Topic::AddressChanged, move |event| {
            if let Event::AddressChanged { cursor } = event {
                seen.borrow_mut().push((name, *cursor));
            }
            Ok(())
        });
    }

    let delivery = bus.publish(&moved(0xF60));

    assert_eq!(delivery.invoked, 3);
    assert_eq!(delivery.failed, 0);
    assert_eq!(
        *seen.borrow(),
        vec![("first", 0xF60), ("second", 0xF60), ("third", 0xF60)]
    );
}

#[test]
fn publish_only_reaches_topic() {
    let mut bus = EventBus::new();
    let count = Rc::new(RefCell::new(0));

    let c = count.clone();
    bus.subscribe(Topic::AnalysisFailed, move |_| {
        *c.borrow_mut() += 1;
        Ok(())
    });

    assert_eq!(bus.publish(&moved(0)).invoked, 0);
    assert_eq!(*count.borrow(), 0);

    let failure = Event::AnalysisFailed {
        generation: 1,
        message: "bad header".to_string(),
    };
    assert_eq!(bus.publish(&failure).invoked, 1);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn duplicate_handlers_both_run() {
    let mut bus = EventBus::new();
    let count = Rc::new(RefCell::new(0));

    for _ in 0..2 {
        let c = count.clone();
        bus.subscribe(Topic::AddressChanged, move |_| {
            *c.borrow_mut() += 1;
            Ok(())
        });
    }

    bus.publish(&moved(0));

    assert_eq!(*count.borrow(), 2);
    assert_eq!(bus.subscriber_count(Topic::AddressChanged), 2);
}

#[test]
fn failing_handler_does_not_stop_delivery() {
    let mut bus = EventBus::new();
    let reached = Rc::new(RefCell::new(false));

    bus.subscribe(Topic::AddressChanged, |_| Err("row went away".into()));

    let r = reached.clone();
    bus.subscribe(Topic::AddressChanged, move |_| {
        *r.borrow_mut() = true;
        Ok(())
    });

    let delivery = bus.publish(&moved(0));

    assert_eq!(delivery.invoked, 2);
    assert_eq!(delivery.failed, 1);
    assert!(*reached.borrow());
}

#[test]
fn unsubscribe_removes_handler() {
    let mut bus = EventBus::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let s = seen.clone();
    let first = bus.subscribe(Topic::AddressChanged, move |_| {
        s.borrow_mut().push(1);
        Ok(())
    });
    let s = seen.clone();
    bus.subscribe(Topic::AddressChanged, move |_| {
        s.borrow_mut().push(2);
        Ok(())
    });

    assert!(bus.unsubscribe(first));
    assert!(!bus.unsubscribe(first));

    bus.publish(&moved(0));

    assert_eq!(*seen.borrow(), vec![2]);
    assert_eq!(bus.subscriber_count(Topic::AddressChanged), 1);
}

#[test]
fn late_subscriber_misses_earlier_publish() {
    let mut bus = EventBus::new();
    let count = Rc::new(RefCell::new(0));

    bus.publish(&moved(0x1000));

    let c = count.clone();
    bus.subscribe(Topic::AddressChanged, move |_| {
        *c.borrow_mut() += 1;
        Ok(())
    });

    assert_eq!(*count.borrow(), 0);

    bus.publish(&moved(0x2000));

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn subscription_ids_are_not_reused() {
    let mut bus = EventBus::new();

    let first = bus.subscribe(Topic::AddressChanged, |_| Ok(()));
    bus.unsubscribe(first);
    let second = bus.subscribe(Topic::AddressChanged, |_| Ok(()));

    assert_ne!(first, second);
}
