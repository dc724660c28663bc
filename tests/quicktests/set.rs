use avl_set::AvlSet;

use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and a hashset.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], set: &mut AvlSet<K>, keys: &mut HashSet<K>) -> bool
where
    K: std::hash::Hash + Eq + Clone + Ord,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                set.insert(k.clone());
                keys.insert(k.clone());
            }
            Op::Delete(k) => {
                set.delete(k);
                keys.remove(k);
            }
        }

        if set.validate().is_err() {
            return false;
        }
    }

    true
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut set = AvlSet::new();
    let mut keys = HashSet::new();

    do_ops(&ops, &mut set, &mut keys)
        && set.len() == keys.len()
        && keys.iter().all(|key| set.search(key) == Some(key))
}

#[quickcheck]
fn every_node_stays_balanced(ops: Vec<Op<i16>>) -> bool {
    let mut set = AvlSet::new();
    let mut keys = HashSet::new();

    do_ops(&ops, &mut set, &mut keys);
    set.in_order().all(|entry| entry.balance_factor.abs() <= 1)
}

#[quickcheck]
fn in_order_is_sorted_and_unique(xs: Vec<i8>) -> bool {
    let set: AvlSet<_> = xs.iter().copied().collect();

    let mut expected = xs;
    expected.sort_unstable();
    expected.dedup();

    set.iter().copied().eq(expected)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut set = AvlSet::new();
    for x in &xs {
        set.insert(*x);
    }

    xs.iter().all(|x| set.search(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut set = AvlSet::new();
    for x in &xs {
        set.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| set.search(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut set = AvlSet::new();
    for x in &xs {
        set.insert(*x);
    }
    for delete in &deletes {
        set.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| set.search(x).is_none())
        && still_present.iter().all(|x| set.search(x).is_some())
        && set.validate().is_ok()
}

#[quickcheck]
fn height_is_logarithmic(xs: Vec<u16>) -> bool {
    let set: AvlSet<_> = xs.into_iter().collect();

    // An AVL tree with n keys is at most ~1.44 * lg(n + 2) levels tall.
    let bound = 1.45 * ((set.len() + 2) as f64).log2();
    (set.height() as f64) <= bound
}
