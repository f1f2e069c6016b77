//! Pagination behaviour through the public state API.

use std::num::NonZeroUsize;

use tricera_console::state::PageState;

fn state(n: usize, size: usize) -> PageState<usize> {
    let mut s = PageState::new(NonZeroUsize::new(size).expect("non-zero"));
    s.replace((0..n).collect());
    s
}

#[test]
/// What: Walking forward and back through 45 items at 20 per page.
///
/// Inputs:
/// - Repeated next/prev beyond both ends.
///
/// Output:
/// - Pages saturate at 1 and 3; the last page holds 5 items.
fn walk_saturates_at_both_ends() {
    let mut s = state(45, 20);
    assert_eq!(s.total_pages(), 3);
    s.prev();
    assert_eq!(s.current_page(), 1);
    for _ in 0..10 {
        s.next();
    }
    assert_eq!(s.current_page(), 3);
    assert_eq!(s.visible(), &[40, 41, 42, 43, 44]);
    let ind = s.indicator();
    assert_eq!(ind.label, "Page 3 of 3");
    assert!(!ind.prev_disabled);
    assert!(ind.next_disabled);
}

#[test]
fn shrinking_reload_clamps_page() {
    let mut s = state(100, 10);
    s.goto(9);
    s.replace((0..15).collect());
    assert_eq!(s.current_page(), 2);
    assert_eq!(s.start_index(), 10);
}

#[test]
fn empty_collection_is_page_one_of_one() {
    let s = state(0, 20);
    assert_eq!(s.total_pages(), 1);
    assert!(s.visible().is_empty());
    let ind = s.indicator();
    assert_eq!(ind.label, "Page 1 of 1");
    assert!(ind.prev_disabled && ind.next_disabled);
}

#[test]
fn page_size_change_reclamps_current_page() {
    let mut s = state(50, 10);
    s.goto(3);
    s.set_page_size(NonZeroUsize::new(25).expect("non-zero"));
    assert_eq!(s.total_pages(), 2);
    assert_eq!(s.current_page(), 2);
    assert_eq!(s.visible().first(), Some(&25));
}
