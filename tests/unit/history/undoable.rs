use super::*;

#[test]
fn starts_with_empty_stacks() {
    let store: UndoableStore<i32> = UndoableStore::default();
    assert_eq!(*store.state(), 0);
    assert!(!store.can_undo());
    assert!(!store.can_redo());
    assert_eq!(store.max_history(), 50);
}

#[test]
fn bounded_history_evicts_oldest() {
    let mut store = UndoableStore::new("init", 2);
    store.set("A");
    store.set("B");
    store.set("C");
    assert!(store.undo());
    assert!(store.undo());
    assert_eq!(*store.state(), "A");
    assert!(!store.undo());
    assert_eq!(*store.state(), "A");
}

#[test]
fn set_after_undo_discards_redo_branch() {
    let mut store = UndoableStore::new(0, 10);
    store.set(1);
    store.undo();
    assert!(store.can_redo());
    store.set(2);
    assert!(!store.can_redo());
    assert!(!store.redo());
    assert_eq!(*store.state(), 2);
}

#[test]
fn undo_redo_mirror_each_other() {
    let mut store = UndoableStore::new(vec![0], 10);
    store.update(|v| {
        let mut v = v.clone();
        v.push(1);
        v
    });
    store.update(|v| v.iter().map(|x| x * 10).collect());
    assert_eq!(store.state(), &vec![0, 10]);

    store.undo();
    store.undo();
    assert_eq!(store.state(), &vec![0]);
    assert_eq!(store.redo_len(), 2);

    store.redo();
    store.redo();
    assert_eq!(store.state(), &vec![0, 10]);
    assert_eq!((store.undo_len(), store.redo_len()), (2, 0));
}

#[test]
fn redo_respects_bound() {
    let mut store = UndoableStore::new(0, 1);
    store.set(1);
    store.undo();
    store.redo();
    assert_eq!(store.undo_len(), 1);
    store.undo();
    assert_eq!(*store.state(), 0);
}

#[test]
fn zero_history_keeps_nothing() {
    let mut store = UndoableStore::new(0, 0);
    store.set(1);
    assert!(!store.can_undo());
    store.clear_history();
    assert_eq!(*store.state(), 1);
}
