use orchard::util::testing;
use orchard::{Forest, NodeId};

fn values(forest: &Forest<i32>, parent: NodeId) -> Vec<i32> {
    forest
        .children(parent)
        .unwrap()
        .map(|id| *forest.value(id).unwrap())
        .collect()
}

#[test]
fn given_children_when_sorted_ascending_then_descending_then_reversed() {
    testing::init_test_setup();
    let mut forest = Forest::new();
    let root = forest.create(0);
    for v in [5, 3, 9, 1, 7] {
        let child = forest.create(v);
        forest.child_add(root, child).unwrap();
    }

    forest.sort_children(root).unwrap();
    let ascending = values(&forest, root);
    forest.sort_children_by_value(root, |a, b| b.cmp(a)).unwrap();
    let descending = values(&forest, root);

    assert_eq!(ascending, vec![1, 3, 5, 7, 9]);
    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(descending, reversed);
}

#[test]
fn given_sorted_children_when_walking_then_links_intact() {
    testing::init_test_setup();
    let mut forest = Forest::new();
    let root = forest.create(0);
    let b = forest.create(2);
    let a = forest.create(1);
    let grandchild = forest.create(10);
    forest.child_add(root, b).unwrap();
    forest.child_add(root, a).unwrap();
    forest.child_add(b, grandchild).unwrap();

    forest.node_mut(root).unwrap().sort_children().unwrap();

    let mut seen = Vec::new();
    forest
        .for_each_breadth_first(root, &mut seen, |seen, _, node| seen.push(*node.value()))
        .unwrap();
    assert_eq!(seen, vec![0, 1, 2, 10]);
    assert_eq!(forest.parent(grandchild).unwrap(), Some(b));
}

#[test]
fn given_leaf_when_sorted_then_no_op() {
    let mut forest = Forest::new();
    let leaf = forest.create(1);

    forest.sort_children(leaf).unwrap();

    assert!(values(&forest, leaf).is_empty());
}
