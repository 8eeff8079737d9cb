use paiv::search::Memo;

#[test]
fn get_after_add_round_trips() {
    let mut memo: Memo<i32, &str> = Memo::new(10);
    memo.add(1, "one");
    memo.add(2, "two");
    assert_eq!(memo.get(&1), Some(&"one"));
    assert_eq!(memo.get(&2), Some(&"two"));
    assert_eq!(memo.get(&3), None);
}

#[test]
fn overwriting_a_key_updates_its_value() {
    let mut memo: Memo<i32, i32> = Memo::new(10);
    memo.add(1, 100);
    memo.add(1, 200);
    assert_eq!(memo.get(&1), Some(&200));
    assert_eq!(memo.len(), 1);
}

#[test]
fn crossing_the_cap_evicts_the_oldest_quarter() {
    let mut memo: Memo<i32, i32> = Memo::new(4);
    for i in 0..4 {
        memo.add(i, i);
    }
    assert_eq!(memo.len(), 4);
    // Crossing the cap (len 5 > cap 4) sweeps floor(5/4) = 1 oldest entry.
    memo.add(4, 4);
    assert_eq!(memo.len(), 4);
    assert_eq!(memo.get(&0), None, "oldest entry should have been swept");
    assert_eq!(memo.get(&4), Some(&4));
}

#[test]
fn reads_do_not_change_eviction_order() {
    let mut memo: Memo<i32, i32> = Memo::new(4);
    for i in 0..4 {
        memo.add(i, i);
    }
    // Reading key 0 repeatedly must not protect it from the sweep, since
    // reads are documented not to reorder the recency list.
    for _ in 0..10 {
        memo.get(&0);
    }
    memo.add(4, 4);
    assert_eq!(memo.get(&0), None);
}
