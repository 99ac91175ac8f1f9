use std::collections::HashMap;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Duration;

use harvester_core::Frontier;
use pretty_assertions::assert_eq;

fn init_logging() {
    engine_logging::initialize_for_tests();
}

fn drain_with_workers(items: Vec<String>, workers: usize) -> HashMap<String, usize> {
    let frontier: Frontier<String> = items.into_iter().collect();
    let seen = Mutex::new(HashMap::new());

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                while let Some(claim) = frontier.claim() {
                    thread::sleep(Duration::from_millis(1));
                    *seen.lock().unwrap().entry(claim.clone()).or_insert(0) += 1;
                }
            });
        }
        frontier.wait_drained();
    });

    assert!(frontier.is_drained());
    seen.into_inner().unwrap()
}

#[test]
fn every_item_is_claimed_exactly_once() {
    init_logging();
    let items: Vec<String> = (0..20).map(|i| format!("https://site{i}.test/")).collect();
    for workers in [1, items.len(), items.len() + 5] {
        let seen = drain_with_workers(items.clone(), workers);
        assert_eq!(seen.len(), items.len(), "workers={workers}");
        assert!(seen.values().all(|count| *count == 1), "workers={workers}");
    }
}

#[test]
fn duplicate_items_are_each_processed() {
    let seen = drain_with_workers(vec!["a".into(), "a".into(), "b".into()], 2);
    assert_eq!(seen.get("a"), Some(&2));
    assert_eq!(seen.get("b"), Some(&1));
}

#[test]
fn empty_frontier_is_drained_immediately() {
    let frontier: Frontier<String> = Frontier::new();
    assert!(frontier.is_drained());
    assert!(frontier.claim().is_none());
    frontier.wait_drained();
}

#[test]
fn claim_keeps_item_in_flight_until_dropped() {
    let frontier: Frontier<u32> = [1].into_iter().collect();
    let claim = frontier.claim().expect("one item");
    assert_eq!(*claim, 1);
    assert_eq!(frontier.pending_len(), 0);
    assert_eq!(frontier.in_flight(), 1);
    assert!(!frontier.is_drained());
    drop(claim);
    assert!(frontier.is_drained());
}

#[test]
fn idle_worker_waits_for_in_flight_item_then_exits() {
    let frontier: Frontier<u32> = [1].into_iter().collect();
    let claim = frontier.claim().expect("one item");

    thread::scope(|scope| {
        let waiter = scope.spawn(|| frontier.claim().map(|c| *c));
        thread::sleep(Duration::from_millis(20));
        assert!(!waiter.is_finished());
        drop(claim);
        assert_eq!(waiter.join().unwrap(), None);
    });
}

#[test]
fn idle_worker_picks_up_work_pushed_while_waiting() {
    let frontier: Frontier<u32> = [1].into_iter().collect();
    let claim = frontier.claim().expect("one item");

    thread::scope(|scope| {
        let waiter = scope.spawn(|| frontier.claim().map(|c| *c));
        thread::sleep(Duration::from_millis(20));
        frontier.push(2);
        assert_eq!(waiter.join().unwrap(), Some(2));
        drop(claim);
    });
    assert!(frontier.is_drained());
}

#[test]
fn push_wakes_idle_worker_alongside_drain_waiter() {
    let frontier: Frontier<u32> = [1].into_iter().collect();
    let claim = frontier.claim().expect("one item");
    let (picked_tx, picked_rx) = mpsc::channel();

    thread::scope(|scope| {
        let frontier = &frontier;
        scope.spawn(move || frontier.wait_drained());
        scope.spawn(move || {
            let picked = frontier.claim().map(|c| *c);
            picked_tx.send(picked).unwrap();
        });
        thread::sleep(Duration::from_millis(30));

        frontier.push(2);
        let picked = picked_rx.recv_timeout(Duration::from_secs(2));
        drop(claim);
        assert_eq!(picked, Ok(Some(2)));
    });
    assert!(frontier.is_drained());
}

#[test]
fn panicking_worker_releases_its_claim() {
    let frontier: Frontier<u32> = [1, 2].into_iter().collect();

    thread::scope(|scope| {
        let crashed = scope.spawn(|| {
            let _claim = frontier.claim();
            panic!("worker failed mid-item");
        });
        assert!(crashed.join().is_err());
    });

    let survivor = frontier.claim().map(|c| *c);
    assert_eq!(survivor, Some(2));
    frontier.wait_drained();
}
