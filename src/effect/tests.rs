use super::*;
use crate::Action;

#[derive(Debug, PartialEq)]
enum Ping {
    A,
    B,
}
impl Action for Ping {
    type State = ();
}

#[test]
fn default_is_none() {
    assert!(Effect::default().is_none());
    assert!(Effect::default().actions().is_empty());
}

#[test]
fn dispatch_actions() {
    let e = Effect::dispatch(Ping::A);
    let actions = e.actions();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].downcast_ref::<Ping>(), Some(&Ping::A));
}

#[test]
fn dispatch_all_actions() {
    let e = Effect::dispatch_all([Ping::A, Ping::B]);
    let actions: Vec<_> = e
        .actions()
        .iter()
        .filter_map(|a| a.downcast_ref::<Ping>())
        .collect();
    assert_eq!(actions, vec![&Ping::A, &Ping::B]);
}

#[test]
fn other_has_no_actions() {
    let e = Effect::from_fn(|_| {});
    assert!(!e.is_none());
    assert!(e.actions().is_empty());
    assert_eq!(format!("{e:?}"), "Other(..)");
}

#[test]
fn into_effect_from_result() {
    let ok: Result<Effect, &str> = Ok(Effect::dispatch(Ping::B));
    assert_eq!(ok.into_effect().unwrap().actions().len(), 1);

    let err: Result<(), &str> = Err("boom");
    assert_eq!(err.into_effect().unwrap_err().to_string(), "boom");
}

#[test]
fn into_effects_variants() {
    assert!(().into_effects().unwrap().is_empty());
    assert_eq!(Effect::None.into_effects().unwrap().len(), 1);
    assert_eq!(
        vec![Effect::dispatch(Ping::A), Effect::dispatch(Ping::B)]
            .into_effects()
            .unwrap()
            .len(),
        2
    );
}
