use super::{assert_invariants, keys};
use crate::Tree;

#[test]
fn empty_tree() {
    let tree: Tree<i32> = Tree::new();
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    assert!(tree.root().is_none());
    assert_eq!(tree.get("a"), None);
}

#[test]
fn insert_one() {
    let mut tree = Tree::new();
    tree.insert("hello", 42);
    assert_eq!(tree.len(), 1);
    assert!(!tree.is_empty());
    assert_eq!(tree.get("hello"), Some(&42));
    assert_invariants(&tree);
}

#[test]
fn get_missing_key() {
    let mut tree = Tree::new();
    tree.insert("a", 1);
    assert_eq!(tree.get("b"), None);
    assert_eq!(tree.get(""), None);
    assert_eq!(tree.get("ab"), None);
}

#[test]
fn insert_multiple() {
    let mut tree = Tree::new();
    for i in 0..10 {
        tree.insert(format!("key-{i}"), i * 10);
        assert_invariants(&tree);
    }
    assert_eq!(tree.len(), 10);
    for i in 0..10 {
        assert_eq!(tree.get(format!("key-{i}")), Some(&(i * 10)));
    }
}

#[test]
fn overwrite_value() {
    let mut tree = Tree::new();
    tree.insert("k", 1);
    tree.insert("k", 2);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get("k"), Some(&2));
    assert_invariants(&tree);
}

/// Keys that are prefixes of each other land in inline leaves.
#[test]
fn nested_keys() {
    let mut tree = Tree::new();
    tree.insert("abc", 3);
    tree.insert("a", 1);
    tree.insert("ab", 2);
    tree.insert("abcd", 4);
    assert_invariants(&tree);

    assert_eq!(tree.get("a"), Some(&1));
    assert_eq!(tree.get("ab"), Some(&2));
    assert_eq!(tree.get("abc"), Some(&3));
    assert_eq!(tree.get("abcd"), Some(&4));
    assert_eq!(tree.get("abcde"), None);
    assert_eq!(keys(&tree), ["a", "ab", "abc", "abcd"]);
}

#[test]
fn empty_key() {
    let mut tree = Tree::new();
    tree.insert("", 0);
    tree.insert("x", 1);
    assert_invariants(&tree);
    assert_eq!(tree.get(""), Some(&0));
    assert_eq!(tree.get("x"), Some(&1));

    assert!(tree.remove(""));
    assert_invariants(&tree);
    assert_eq!(tree.get(""), None);
    assert_eq!(tree.get("x"), Some(&1));
}

/// A new key diverging in the middle of a compressed prefix splits it.
#[test]
fn split_compressed_prefix() {
    let mut tree = Tree::new();
    tree.insert("romane", 1);
    tree.insert("romanus", 2);
    tree.insert("romulus", 3);
    tree.insert("rubens", 4);
    tree.insert("ruber", 5);
    tree.insert("rubicon", 6);
    tree.insert("rubicundus", 7);
    assert_invariants(&tree);

    let expected = [
        "romane",
        "romanus",
        "romulus",
        "rubens",
        "ruber",
        "rubicon",
        "rubicundus",
    ];
    assert_eq!(keys(&tree), expected);
    assert_eq!(tree.get("rom"), None);
    assert_eq!(tree.get("rubicundus"), Some(&7));
}

#[test]
fn byte_keys() {
    let mut tree = Tree::new();
    tree.insert([0xff_u8, 0x00], 1);
    tree.insert([0x00_u8, 0xff], 2);
    tree.insert(vec![0x7f_u8], 3);
    assert_invariants(&tree);
    assert_eq!(tree.get([0xff_u8, 0x00]), Some(&1));
    let order: Vec<i32> = tree.iter().map(|(_, v)| *v).collect();
    assert_eq!(order, [2, 3, 1]);
}

#[test]
fn contains_key() {
    let mut tree = Tree::new();
    tree.insert("42", "val");
    assert!(tree.contains_key("42"));
    assert!(!tree.contains_key("4"));
}

#[test]
fn remove_existing() {
    let mut tree = Tree::new();
    tree.insert("a", 1);
    tree.insert("b", 2);
    assert!(tree.remove("a"));
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get("a"), None);
    assert_eq!(tree.get("b"), Some(&2));
    assert_invariants(&tree);
}

#[test]
fn remove_missing() {
    let mut tree = Tree::new();
    tree.insert("a", 1);
    assert!(!tree.remove("z"));
    assert!(!tree.remove(""));
    assert!(!tree.remove("ab"));
    assert_eq!(tree.len(), 1);
}

#[test]
fn remove_from_empty() {
    let mut tree: Tree<i32> = Tree::new();
    assert!(!tree.remove("a"));
    assert!(tree.is_empty());
}

#[test]
fn remove_all() {
    let mut tree = Tree::new();
    tree.insert("1", 10);
    tree.insert("2", 20);
    tree.insert("3", 30);
    assert!(tree.remove("1"));
    assert!(tree.remove("2"));
    assert!(tree.remove("3"));
    assert!(tree.is_empty());
    assert!(tree.root().is_none());
}

/// Removing an inline leaf or a sibling collapses nodes back down.
#[test]
fn remove_collapses() {
    let mut tree = Tree::new();
    tree.insert("team", 1);
    tree.insert("tea", 2);
    tree.insert("ten", 3);
    assert_invariants(&tree);

    assert!(tree.remove("tea"));
    assert_invariants(&tree);
    assert_eq!(keys(&tree), ["team", "ten"]);

    assert!(tree.remove("ten"));
    assert_invariants(&tree);
    assert_eq!(keys(&tree), ["team"]);
    assert!(matches!(tree.root(), Some(crate::node::Node::Leaf(_))));
}
