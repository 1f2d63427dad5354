//! Read Path Tests.
//!
//! Default harness geometry: 1-byte blocks, 2-set direct-mapped L1 and 4-set
//! direct-mapped L2, so blocks 0 and 2 conflict in L1 but not in L2.

use crate::common::harness::{TestHierarchy, far_blocks, far_dirty, near_blocks, near_dirty};
use cachesim_core::AccessOutcome;
use pretty_assertions::assert_eq;

#[test]
fn read_miss_fills_both_levels() {
    let mut caches = TestHierarchy::new().build();

    assert_eq!(caches.read(0).unwrap(), AccessOutcome::Miss);

    assert_eq!(near_blocks(&caches), vec![0]);
    assert_eq!(far_blocks(&caches), vec![0]);
    let stats = caches.stats();
    assert_eq!((stats.near.accesses, stats.near.misses), (1, 1));
    assert_eq!((stats.far.accesses, stats.far.misses), (1, 1));
}

#[test]
fn read_hit_only_counts_near() {
    let mut caches = TestHierarchy::new().build();
    let _ = caches.read(1).unwrap();

    assert_eq!(caches.read(1).unwrap(), AccessOutcome::NearHit);

    let stats = caches.stats();
    assert_eq!((stats.near.accesses, stats.near.misses), (2, 1));
    assert_eq!((stats.far.accesses, stats.far.misses), (1, 1));
}

#[test]
fn read_hit_leaves_far_recency_alone() {
    // 2-way single-set L2 so recency order is observable.
    let mut caches = TestHierarchy::new().l1(2, 0).l2(1, 1).build();
    let _ = caches.read(0).unwrap();
    let _ = caches.read(1).unwrap();
    let before = caches.far().find(caches.block_of(0)).unwrap().recency();

    let _ = caches.read(0).unwrap();

    let after = caches.far().find(caches.block_of(0)).unwrap().recency();
    assert_eq!(before, after);
}

#[test]
fn far_hit_after_near_conflict() {
    let mut caches = TestHierarchy::new().build();
    let _ = caches.read(0).unwrap();
    let _ = caches.read(2).unwrap();
    assert_eq!(near_blocks(&caches), vec![2]);
    assert_eq!(far_blocks(&caches), vec![0, 2]);

    assert_eq!(caches.read(0).unwrap(), AccessOutcome::FarHit);

    assert_eq!(near_blocks(&caches), vec![0]);
    assert_eq!(far_blocks(&caches), vec![0, 2]);
    let stats = caches.stats();
    assert_eq!((stats.near.accesses, stats.near.misses), (3, 3));
    assert_eq!((stats.far.accesses, stats.far.misses), (3, 2));
    assert_eq!(caches.check_inclusion(), None);
}

#[test]
fn read_inherits_far_dirty_bit() {
    let mut caches = TestHierarchy::new().write_allocate(false).build();
    let _ = caches.read(0).unwrap();
    let _ = caches.read(2).unwrap();
    // Write-around on an L2 hit dirties only the L2 copy.
    assert_eq!(caches.write(0).unwrap(), AccessOutcome::FarHit);
    assert!(far_dirty(&caches, 0));
    assert_eq!(near_blocks(&caches), vec![2]);

    assert_eq!(caches.read(0).unwrap(), AccessOutcome::FarHit);

    assert!(near_dirty(&caches, 0));
    assert!(far_dirty(&caches, 0));
}

#[test]
fn clean_far_copy_gives_clean_near_line() {
    let mut caches = TestHierarchy::new().build();
    let _ = caches.read(0).unwrap();
    assert!(!near_dirty(&caches, 0));
    assert!(!far_dirty(&caches, 0));
}

#[test]
fn addresses_in_one_block_share_a_line() {
    let mut caches = TestHierarchy::new().block_log2(2).l1(3, 0).l2(4, 0).build();

    assert_eq!(caches.read(0x10).unwrap(), AccessOutcome::Miss);
    assert_eq!(caches.read(0x13).unwrap(), AccessOutcome::NearHit);
    assert_eq!(caches.read(0x14).unwrap(), AccessOutcome::Miss);
    assert_eq!(near_blocks(&caches), vec![4, 5]);
}

#[test]
fn far_eviction_back_invalidates_near() {
    // L1: one 2-way set. L2: two direct-mapped sets, so 0 and 2 collide there.
    let mut caches = TestHierarchy::new().l1(1, 1).l2(1, 0).build();
    let _ = caches.read(0).unwrap();
    assert_eq!(near_blocks(&caches), vec![0]);

    assert_eq!(caches.read(2).unwrap(), AccessOutcome::Miss);

    assert_eq!(far_blocks(&caches), vec![2]);
    assert_eq!(near_blocks(&caches), vec![2], "L1 copy of 0 must go with L2's");
    assert_eq!(caches.check_inclusion(), None);
}
