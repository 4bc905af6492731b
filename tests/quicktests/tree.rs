use cursor_bst::Tree;

use std::collections::{BTreeSet, HashSet};

use quickcheck_macros::quickcheck;

/// Walks a tree with a cursor, from `begin` until it equals `end`.
fn walk(tree: &Tree<i8>) -> Vec<i8> {
    let mut keys = Vec::new();
    let mut cursor = tree.begin();
    while cursor != tree.end() {
        keys.push(*cursor.key().unwrap());
        cursor.move_next().unwrap();
    }
    keys
}

fn is_strictly_increasing(keys: &[i8]) -> bool {
    keys.windows(2).all(|w| w[0] < w[1])
}

#[quickcheck]
fn walk_is_sorted_and_sized(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let keys = walk(&tree);

    is_strictly_increasing(&keys) && keys.len() == tree.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.find(x).key() == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x) == tree.end())
}

#[quickcheck]
fn reinserting_changes_nothing(xs: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    let before = walk(&tree);

    let any_inserted = xs.iter().any(|x| tree.insert(*x));

    !any_inserted && walk(&tree) == before && tree.len() == before.len()
}

#[quickcheck]
fn with_erasures(xs: Vec<i8>, erasures: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    let mut expected: BTreeSet<i8> = xs.iter().copied().collect();

    for erase in &erasures {
        if tree.find_mut(erase).erase() != expected.take(erase) {
            return false;
        }
    }

    let keys = walk(&tree);
    is_strictly_increasing(&keys)
        && keys.len() == tree.len()
        && keys.iter().eq(expected.iter())
        && erasures.iter().all(|x| !tree.contains(x))
}

#[quickcheck]
fn copy_is_independent(xs: Vec<i8>, ys: Vec<i8>) -> bool {
    let original: Tree<i8> = xs.iter().copied().collect();
    let before = walk(&original);

    let mut copy = original.clone();
    for y in &ys {
        copy.insert(*y);
    }
    for x in &xs {
        copy.erase(x);
    }

    walk(&original) == before && original.len() == before.len()
}

#[quickcheck]
fn move_empties_source(xs: Vec<i8>) -> bool {
    let mut source: Tree<i8> = xs.iter().copied().collect();
    let before = walk(&source);

    let moved = std::mem::take(&mut source);

    source.len() == 0 && source.begin() == source.end() && walk(&moved) == before
}
