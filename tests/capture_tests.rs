//! Interrupt capture tests: debounce + count + enqueue

use esp_button_mqtt::logging::LogStream;
use esp_button_mqtt::{EdgeOutcome, EventQueue, ManualClock, PressCapture, PressEvent, SpinDoorbell};

mod common;

fn drain_counts(queue: &EventQueue<SpinDoorbell>) -> Vec<u32> {
    std::iter::from_fn(|| queue.try_recv())
        .map(PressEvent::count)
        .collect()
}

#[test]
fn test_edges_50ms_apart_accept_first_only() {
    let queue: EventQueue<SpinDoorbell> = EventQueue::new(SpinDoorbell::new());
    let clock = ManualClock::new(1000);
    let log = LogStream::new();
    let capture = PressCapture::new(&queue, &clock, 200).with_log(&log);

    assert!(capture.on_edge().is_accepted());
    clock.advance(50);
    assert_eq!(capture.on_edge(), EdgeOutcome::Bounced);

    assert_eq!(capture.presses(), 1);
    assert_eq!(drain_counts(&queue), [1]);
}

#[test]
fn test_edges_250ms_apart_accept_both() {
    let queue: EventQueue<SpinDoorbell> = EventQueue::new(SpinDoorbell::new());
    let clock = ManualClock::new(1000);
    let log = LogStream::new();
    let capture = PressCapture::new(&queue, &clock, 200).with_log(&log);

    capture.on_edge();
    clock.advance(250);
    capture.on_edge();

    assert_eq!(capture.presses(), 2);
    assert_eq!(drain_counts(&queue), [1, 2]);
}

#[test]
fn test_burst_yields_single_press() {
    let queue: EventQueue<SpinDoorbell> = EventQueue::new(SpinDoorbell::new());
    let log = LogStream::new();
    let capture = PressCapture::new(&queue, ManualClock::new(0), 200).with_log(&log);

    let outcomes: Vec<EdgeOutcome> = [5000, 5003, 5010, 5040, 5100, 5190]
        .iter()
        .map(|&t| capture.on_edge_at(t))
        .collect();

    assert_eq!(outcomes.iter().filter(|o| o.is_accepted()).count(), 1);
    assert_eq!(outcomes[0], EdgeOutcome::Queued(PressEvent::new(1)));
    assert_eq!(capture.bounced(), 5);
    assert_eq!(drain_counts(&queue), [1]);
}

#[test]
fn test_spaced_edges_count_up() {
    let queue: EventQueue<SpinDoorbell> = EventQueue::new(SpinDoorbell::new());
    let log = LogStream::new();
    let capture = PressCapture::new(&queue, ManualClock::new(0), 200).with_log(&log);

    for i in 0..5u32 {
        let outcome = capture.on_edge_at(1000 + i * 201);
        assert_eq!(outcome.event(), Some(PressEvent::new(i + 1)));
    }
    assert_eq!(capture.presses(), 5);
    assert_eq!(drain_counts(&queue), [1, 2, 3, 4, 5]);
}

#[test]
fn test_overflow_counts_but_drops() {
    let queue: EventQueue<SpinDoorbell> = EventQueue::new(SpinDoorbell::new());
    let log = LogStream::new();
    let capture = PressCapture::new(&queue, ManualClock::new(0), 200).with_log(&log);

    let outcomes: Vec<EdgeOutcome> = (0..12u32).map(|i| capture.on_edge_at(i * 300)).collect();

    assert_eq!(outcomes[10], EdgeOutcome::Dropped(PressEvent::new(11)));
    assert_eq!(outcomes[11], EdgeOutcome::Dropped(PressEvent::new(12)));
    assert_eq!(capture.presses(), 12);
    assert_eq!(queue.dropped(), 2);
    assert_eq!(drain_counts(&queue), (1..=10).collect::<Vec<_>>());

    let messages = common::messages(&log);
    assert_eq!(
        messages,
        ["Event queue full, press #11 dropped", "Event queue full, press #12 dropped"]
    );
}

#[test]
fn test_first_edge_right_after_boot() {
    let queue: EventQueue<SpinDoorbell> = EventQueue::new(SpinDoorbell::new());
    let log = LogStream::new();
    let capture = PressCapture::new(&queue, ManualClock::new(0), 200).with_log(&log);

    assert_eq!(capture.on_edge(), EdgeOutcome::Queued(PressEvent::new(1)));
}
