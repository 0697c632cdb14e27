use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn fast(attempts: usize) -> RetryPolicy {
    RetryPolicy { attempts, base: Duration::from_millis(1) }
}

#[test]
fn default_policy_is_three_attempts_one_second_base() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.attempts, 3);
    assert_eq!(policy.base, Duration::from_secs(1));
}

#[test]
fn delay_grows_linearly() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.delay_after(1), Duration::from_secs(1));
    assert_eq!(policy.delay_after(2), Duration::from_secs(2));
    assert_eq!(policy.delay_after(3), Duration::from_secs(3));
}

#[tokio::test]
async fn first_success_runs_once() {
    let calls = AtomicUsize::new(0);
    let out: Result<u32, String> = retry_linear(fast(3), "op", |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Ok(7) }
    })
    .await;
    assert_eq!(out, Ok(7));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn recovers_on_later_attempt() {
    let out: Result<usize, String> = retry_linear(fast(3), "op", |attempt| async move {
        if attempt < 3 { Err(format!("boom {attempt}")) } else { Ok(attempt) }
    })
    .await;
    assert_eq!(out, Ok(3));
}

#[tokio::test]
async fn exhaustion_returns_last_error() {
    let calls = AtomicUsize::new(0);
    let out: Result<(), String> = retry_linear(fast(3), "op", |attempt| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move { Err(format!("boom {attempt}")) }
    })
    .await;
    assert_eq!(out, Err("boom 3".to_owned()));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn zero_attempts_still_tries_once() {
    let calls = AtomicUsize::new(0);
    let out: Result<(), String> = retry_linear(fast(0), "op", |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err("nope".to_owned()) }
    })
    .await;
    assert!(out.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn permanent_error_stops_early() {
    let calls = AtomicUsize::new(0);
    let out: Result<(), String> = retry_linear_when(
        fast(3),
        "op",
        |e: &String| e != "fatal",
        |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("fatal".to_owned()) }
        },
    )
    .await;
    assert_eq!(out, Err("fatal".to_owned()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
