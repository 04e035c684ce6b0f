use hashspace::{Crc32Hasher, Error, HashFunction, HashRing, HashRingBuilder, Md5Hasher, RingHasher};

fn ring_with_targets(count: usize) -> HashRing {
    let mut ring = HashRing::new();
    for i in 1..=count {
        ring.add_target(&format!("target{}", i)).unwrap();
    }
    ring
}

#[test]
fn test_all_targets_empty() {
    let ring = HashRing::new();
    assert!(ring.all_targets().is_empty());
}

#[test]
fn test_add_target_and_all_targets() {
    let mut ring = HashRing::new();
    ring.add_target("t-a")
        .unwrap()
        .add_target("t-b")
        .unwrap()
        .add_target("t-c")
        .unwrap();

    assert_eq!(ring.all_targets(), vec!["t-a", "t-b", "t-c"]);
}

#[test]
fn test_add_targets_and_all_targets() {
    let targets = ["t-a", "t-b", "t-c"];

    let mut ring = HashRing::new();
    ring.add_targets(targets).unwrap();
    assert_eq!(ring.all_targets(), targets.to_vec());
}

#[test]
fn test_duplicate_target_leaves_ring_unchanged() {
    let mut ring = HashRing::new();
    ring.add_target("t-a").unwrap();
    let positions = ring.position_count();

    assert_eq!(
        ring.add_target("t-a").unwrap_err(),
        Error::DuplicateTarget("t-a".to_string())
    );
    assert_eq!(ring.all_targets(), vec!["t-a"]);
    assert_eq!(ring.position_count(), positions);
}

#[test]
fn test_add_targets_is_not_atomic() {
    let mut ring = HashRing::new();
    ring.add_target("t-b").unwrap();

    let err = ring.add_targets(["t-a", "t-b", "t-c"]).unwrap_err();
    assert_eq!(err, Error::DuplicateTarget("t-b".to_string()));

    // t-a went in before the failure; t-c was never reached.
    assert_eq!(ring.all_targets(), vec!["t-b", "t-a"]);
}

#[test]
fn test_remove_target() {
    let mut ring = HashRing::new();
    ring.add_target("t-a")
        .unwrap()
        .add_target("t-b")
        .unwrap()
        .add_target("t-c")
        .unwrap()
        .remove_target("t-b")
        .unwrap();

    assert_eq!(ring.all_targets(), vec!["t-a", "t-c"]);
    assert!(!ring.contains_target("t-b"));
    assert!(ring.positions_of("t-b").is_none());
}

#[test]
fn test_remove_missing_target() {
    let mut ring = HashRing::new();
    ring.add_target("t-a").unwrap();

    assert_eq!(
        ring.remove_target("not-there").unwrap_err(),
        Error::TargetNotFound("not-there".to_string())
    );
    assert_eq!(ring.all_targets(), vec!["t-a"]);
}

#[test]
fn test_remove_then_re_add() {
    let mut ring = ring_with_targets(3);
    ring.remove_target("target2").unwrap();
    ring.add_target("target2").unwrap();

    assert_eq!(ring.all_targets(), vec!["target1", "target3", "target2"]);
}

#[test]
fn test_lookup_empty_ring() {
    let ring = HashRing::new();

    assert_eq!(ring.lookup("resource").unwrap_err(), Error::EmptyRing);
    assert!(ring.lookup_list("resource", 3).unwrap().is_empty());
}

#[test]
fn test_lookup_list_zero_count() {
    let ring = ring_with_targets(3);
    assert_eq!(ring.lookup_list("resource", 0).unwrap_err(), Error::InvalidCount);

    let empty = HashRing::new();
    assert_eq!(empty.lookup_list("resource", 0).unwrap_err(), Error::InvalidCount);
}

#[test]
fn test_repeatable_lookups() {
    let ring = ring_with_targets(10);

    assert_eq!(ring.lookup("t1").unwrap(), ring.lookup("t1").unwrap());
    assert_eq!(ring.lookup("t2").unwrap(), ring.lookup("t2").unwrap());
}

#[test]
fn test_lookups_are_valid_targets() {
    let ring = ring_with_targets(10);
    let targets = ring.all_targets();

    for i in 1..=10 {
        let owner = ring.lookup(&format!("r{}", i)).unwrap();
        assert!(targets.contains(&owner), "target must be in list of targets");
    }
}

#[test]
fn test_consistent_lookups_after_adding_and_removing() {
    let mut ring = ring_with_targets(10);
    let before: Vec<String> = (1..=100)
        .map(|i| ring.lookup(&format!("t{}", i)).unwrap().to_string())
        .collect();

    ring.add_target("new-target")
        .unwrap()
        .remove_target("new-target")
        .unwrap()
        .add_target("new-target")
        .unwrap()
        .remove_target("new-target")
        .unwrap();

    let after: Vec<String> = (1..=100)
        .map(|i| ring.lookup(&format!("t{}", i)).unwrap().to_string())
        .collect();

    // Holds as long as "new-target" collides with none of the others.
    assert_eq!(before, after);
}

#[test]
fn test_consistent_lookups_with_new_instance() {
    for hash_fn in [HashFunction::Crc32, HashFunction::Md5] {
        let build = || {
            let mut ring = HashRingBuilder::new().hash_function(hash_fn).build();
            for i in 1..=10 {
                ring.add_target(&format!("target{}", i)).unwrap();
            }
            ring
        };
        let ring1 = build();
        let ring2 = build();

        for i in 1..=100 {
            let resource = format!("t{}", i);
            assert_eq!(ring1.lookup(&resource).unwrap(), ring2.lookup(&resource).unwrap());
            assert_eq!(
                ring1.lookup_list(&resource, 3).unwrap(),
                ring2.lookup_list(&resource, 3).unwrap()
            );
        }
    }
}

#[test]
fn test_get_multiple_targets() {
    let ring = ring_with_targets(10);

    let targets = ring.lookup_list("resource", 2).unwrap();
    assert_eq!(targets.len(), 2);
    assert_ne!(targets[0], targets[1]);
}

#[test]
fn test_get_multiple_targets_with_only_one_target() {
    let mut ring = HashRing::new();
    ring.add_target("single-target").unwrap();

    for count in [1, 2, 10] {
        assert_eq!(ring.lookup_list("resource", count).unwrap(), vec!["single-target"]);
    }
}

#[test]
fn test_get_more_targets_than_exist() {
    let mut ring = HashRing::new();
    ring.add_target("target1").unwrap();
    ring.add_target("target2").unwrap();

    let targets = ring.lookup_list("resource", 4).unwrap();
    assert_eq!(targets.len(), 2);
    assert_ne!(targets[0], targets[1]);
}

#[test]
fn test_lookup_list_distinct_and_live() {
    let mut ring = ring_with_targets(8);
    ring.remove_target("target3").unwrap();
    let live = ring.all_targets();

    for i in 0..200 {
        let resource = format!("key-{}", i);
        for count in 1..=10 {
            let targets = ring.lookup_list(&resource, count).unwrap();
            assert_eq!(targets.len(), count.min(live.len()));
            assert!(targets.iter().all(|t| live.contains(t)));

            let mut deduped = targets.clone();
            deduped.sort_unstable();
            deduped.dedup();
            assert_eq!(deduped.len(), targets.len());
        }
        // Primary of the list form is the single lookup.
        assert_eq!(ring.lookup_list(&resource, 3).unwrap()[0], ring.lookup(&resource).unwrap());
    }
}

#[test]
fn test_successors_walk_every_target() {
    let ring = ring_with_targets(5);

    let walked: Vec<&str> = ring.successors("resource").collect();
    assert_eq!(walked.len(), 5);
    assert_eq!(&walked[..3], ring.lookup_list("resource", 3).unwrap().as_slice());
}

#[test]
fn test_builder_invalid_replicas() {
    assert_eq!(HashRingBuilder::new().replicas(0).err(), Some(Error::InvalidReplicaCount));
    assert!(HashRing::with_hasher(Crc32Hasher, 0).is_err());
}

#[test]
fn test_default_replica_count() {
    let mut ring = HashRing::new();
    ring.add_target("t").unwrap();
    assert_eq!(ring.replicas(), 64);
    assert_eq!(ring.positions_of("t").unwrap().len(), 64);
}

#[test]
fn test_crc32_hash() {
    let hasher = Crc32Hasher;
    assert_eq!(hasher.hash("test"), hasher.hash("test"));
    assert_ne!(hasher.hash("test"), hasher.hash("different"));
}

#[test]
fn test_md5_hash() {
    let hasher = Md5Hasher;
    assert_eq!(hasher.hash("test"), hasher.hash("test"));
    assert_ne!(hasher.hash("test"), hasher.hash("different"));
}

#[test]
fn test_replica_positions_use_name_and_index() {
    let mut ring = HashRingBuilder::new().replicas(3).unwrap().build();
    ring.add_target("node").unwrap();

    let expected: Vec<u32> = ["node0", "node1", "node2"]
        .iter()
        .map(|v| Crc32Hasher.hash(v))
        .collect();
    assert_eq!(ring.positions_of("node").unwrap(), expected.as_slice());
}
