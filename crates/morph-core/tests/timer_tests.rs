// Host-side tests for the one-shot timer queue.

use morph_core::TimerQueue;

#[test]
fn timers_fire_in_due_order() {
    let mut q = TimerQueue::new();
    q.schedule(2.0, "b");
    q.schedule(1.0, "a");
    q.schedule(3.0, "c");

    assert!(q.pop_due(0.5).is_none());
    let fired: Vec<_> = std::iter::from_fn(|| q.pop_due(2.5)).map(|(_, p)| p).collect();
    assert_eq!(fired, vec!["a", "b"]);
    assert_eq!(q.len(), 1);
}

#[test]
fn equal_due_times_fire_in_schedule_order() {
    let mut q = TimerQueue::new();
    for i in 0..5 {
        q.schedule(1.0, i);
    }
    let fired: Vec<_> = std::iter::from_fn(|| q.pop_due(1.0)).map(|(_, p)| p).collect();
    assert_eq!(fired, vec![0, 1, 2, 3, 4]);
    assert!(q.is_empty());
}

#[test]
fn cancelled_timers_never_fire() {
    let mut q = TimerQueue::new();
    let a = q.schedule(1.0, 'a');
    let b = q.schedule(1.0, 'b');
    assert!(q.cancel(a));
    assert!(!q.cancel(a));
    assert_eq!(q.len(), 1);

    let (id, payload) = q.pop_due(5.0).unwrap();
    assert_eq!((id, payload), (b, 'b'));
    assert!(!q.cancel(b));
}

#[test]
fn cancel_all_clears_queue() {
    let mut q = TimerQueue::new();
    q.schedule(1.0, ());
    q.schedule(2.0, ());
    q.cancel_all();
    assert!(q.is_empty());
    assert!(q.pop_due(100.0).is_none());
}
