use super::*;

#[test]
fn state_box_unwrap() {
    let b = StateBox::wrap(10_i32);
    assert_eq!(b.unwrap::<i32>(), Some(&10));
    assert_eq!(b.unwrap::<u32>(), None);
    assert_eq!(b.type_id(), TypeId::of::<i32>());
    assert_eq!(b.type_name(), "i32");
}

#[test]
fn state_box_clone_shares_value() {
    let b = StateBox::wrap(String::from("a"));
    let c = b.clone();
    assert!(std::ptr::eq(
        b.unwrap::<String>().unwrap(),
        c.unwrap::<String>().unwrap()
    ));
}

#[test]
fn insert_remove() {
    let mut t = SlotTable::new();
    let k0 = t.insert(0, Rc::new("a"));
    let k1 = t.insert(1, Rc::new("b"));
    assert_eq!(t.len(), 2);
    assert!(t.contains(k0));

    assert_eq!(t.remove(k0).as_deref(), Some(&"a"));
    assert_eq!(t.remove(k0), None);
    assert!(!t.contains(k0));
    assert!(t.contains(k1));
    assert_eq!(t.len(), 1);
}

#[test]
fn stale_key_does_not_remove_new_slot() {
    let mut t = SlotTable::new();
    let k0 = t.insert(0, Rc::new(1));
    t.remove(k0);
    let k1 = t.insert(1, Rc::new(2));
    assert_eq!(t.remove(k0), None);
    assert_eq!(t.len(), 1);
    assert_eq!(t.remove(k1).as_deref(), Some(&2));
}

#[test]
fn select_in_insertion_order() {
    let mut t = SlotTable::new();
    let k0 = t.insert(0, Rc::new(0));
    t.insert(1, Rc::new(1));
    t.remove(k0);
    t.insert(2, Rc::new(2));
    t.insert(3, Rc::new(3));

    let all: Vec<i32> = t.all().iter().map(|x| **x).collect();
    assert_eq!(all, vec![1, 2, 3]);

    let odd: Vec<i32> = t.select(|x| x % 2 == 1).iter().map(|x| **x).collect();
    assert_eq!(odd, vec![1, 3]);
}

#[test]
fn snapshot_survives_remove() {
    let mut t = SlotTable::new();
    let key = t.insert(0, Rc::new(5));
    let snapshot = t.all();
    assert!(t.remove(key).is_some());
    assert_eq!(t.len(), 0);
    assert_eq!(*snapshot[0], 5);
}
