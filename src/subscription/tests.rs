use super::*;
use assert_call::{call, CallRecorder};

#[test]
fn from_fn_calls_on_drop() {
    let mut cr = CallRecorder::new();
    {
        let _s = Subscription::from_fn(|| call!("drop"));
    }
    cr.verify("drop");
}

#[test]
fn dispose_is_idempotent() {
    let mut cr = CallRecorder::new();
    let mut s = Subscription::from_fn(|| call!("dispose"));
    assert!(!s.is_disposed());
    s.dispose();
    cr.verify("dispose");
    assert!(s.is_disposed());
    s.dispose();
    drop(s);
    cr.verify(());
}

#[test]
fn empty_does_nothing() {
    let mut cr = CallRecorder::new();
    let mut s = Subscription::empty();
    assert!(s.is_disposed());
    s.dispose();
    cr.verify(());
}

#[test]
fn group_disposes_in_order() {
    let mut cr = CallRecorder::new();
    let mut g: Subscriptions = [
        Subscription::from_fn(|| call!("1")),
        Subscription::from_fn(|| call!("2")),
    ]
    .into_iter()
    .collect();
    g += Subscription::from_fn(|| call!("3"));
    assert_eq!(g.len(), 3);

    g.dispose();
    cr.verify(["1", "2", "3"]);
    assert!(g.is_empty());

    drop(g);
    cr.verify(());
}

#[test]
fn group_disposes_on_drop() {
    let mut cr = CallRecorder::new();
    {
        let mut g = Subscriptions::new();
        g.push(Subscription::from_fn(|| call!("a")));
        g.extend([Subscription::from_fn(|| call!("b"))]);
    }
    cr.verify(["a", "b"]);
}
