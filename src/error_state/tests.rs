use std::cell::RefCell;

use super::*;
use crate::Reason;

fn depth_error() -> Rc<DispatchError> {
    Rc::new(DispatchError::DepthExceeded {
        action: "a",
        depth: 1,
    })
}

#[test]
fn append_and_clear() {
    let s0 = ErrorState::new();
    let Reduction::Modified(s1) = reduce_errors(&s0, &ErrorAction::Append(depth_error())) else {
        panic!("not modified");
    };
    assert!(s0.is_empty());
    assert_eq!(s1.len(), 1);
    assert!(s1.last().unwrap().is_depth_exceeded());

    let Reduction::Modified(s2) = reduce_errors(&s1, &ErrorAction::Clear) else {
        panic!("not modified");
    };
    assert!(s2.is_empty());
    assert!(matches!(
        reduce_errors(&s2, &ErrorAction::Clear),
        Reduction::Unmodified
    ));
}

#[test]
fn track_errors_registers_cell_and_reducer() {
    let store = Store::new();
    let mut s = store.track_errors();
    assert_eq!(s.len(), 2);
    assert_eq!(store.count(), 2);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen0 = seen.clone();
    let _o = store.subscribe(move |state: &ErrorState, reason: Reason| {
        seen0.borrow_mut().push((reason, state.len()));
    });
    store.dispatch(ErrorAction::Append(depth_error()));
    store.dispatch(ErrorAction::Clear);
    assert_eq!(
        *seen.borrow(),
        vec![
            (Reason::Subscribed, 0),
            (Reason::Modified, 1),
            (Reason::Modified, 0)
        ]
    );

    s.dispose();
    assert_eq!(store.count(), 1);
}
