use super::*;

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

fn chain(nodes: Vec<Node>) -> NodeList {
    let len = nodes.len();
    let linked = nodes
        .into_iter()
        .enumerate()
        .map(|(i, n)| n.with_links(i.checked_sub(1), (i + 1 < len).then_some(i + 1)))
        .collect();
    NodeList::from_nodes(linked).unwrap()
}

fn p() -> Node {
    Node::normal(
        Point::new(-5.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(0.0, 30.0),
    )
}

fn q() -> Node {
    Node::normal(
        Point::new(40.0, -20.0),
        Point::new(40.0, 0.0),
        Point::new(45.0, 0.0),
    )
}

#[test]
fn split_normal_leaves_zero_length_seam() {
    let mut list = chain(vec![p(), q()]);
    let copy_id = list.split_node(0).unwrap();
    assert_eq!(copy_id, 1);
    assert_eq!(list.len(), 3);

    let original = list.at(0).unwrap();
    let copy = list.at(1).unwrap();
    assert_eq!(original.out_handle, original.anchor);
    assert_eq!(copy.in_handle, copy.anchor);
    assert_eq!(copy.out_handle, p().out_handle);
    assert_eq!(copy.anchor, original.anchor);
    assert_eq!(original.next_id(), Some(1));
    assert_eq!(copy.next_id(), Some(2));
    assert_eq!(list.at(2).unwrap().prev_id(), Some(1));
}

#[test]
fn split_keeps_placeholder_values() {
    let mut list = chain(vec![p(), Node::dissolved(0.4), q()]);
    let copy_id = list.split_node(1).unwrap();
    assert!(list.at(copy_id).unwrap().is_dissolved());
    assert_eq!(list.at(copy_id).unwrap().t, 0.4);
}

#[test]
fn split_move_is_rejected() {
    let mut list = chain(vec![p(), Node::move_break()]);
    assert!(matches!(list.split_node(1), Err(PathError::Validation(_))));
}

#[test]
fn split_and_disconnect_breaks_the_chain() {
    let mut list = chain(vec![
        Node::corner(Point::new(0.0, 0.0)),
        Node::corner(Point::new(1.0, 0.0)),
        Node::corner(Point::new(2.0, 0.0)),
    ]);
    let (move_id, copy_id) = list.split_and_disconnect(1).unwrap();
    assert_eq!((move_id, copy_id), (2, 3));
    assert!(list.at(move_id).unwrap().is_move());
    assert_eq!(list.at(1).unwrap().next_id(), Some(move_id));
    assert_eq!(list.at(move_id).unwrap().next_id(), None);
    assert_eq!(list.at(copy_id).unwrap().prev_id(), None);
    assert_eq!(list.at(copy_id).unwrap().next_id(), Some(4));
    assert!(!list.nodes_in_same_segment(0, 4).unwrap());
    assert!(list.nodes_in_same_segment(3, 4).unwrap());
}

#[test]
fn promote_splits_enclosing_curve() {
    let mut list = chain(vec![p(), Node::dissolved(0.5), q()]);
    let seg = CubicSegment::from_nodes(&p(), &q());
    list.promote_dissolved_to_normal(1).unwrap();

    let promoted = list.at(1).unwrap();
    assert!(promoted.is_normal());
    assert!(close(promoted.anchor, seg.eval(0.5)));

    let first = CubicSegment::from_nodes(list.at(0).unwrap(), promoted);
    let second = CubicSegment::from_nodes(promoted, list.at(2).unwrap());
    for i in 0..=10 {
        let u = f64::from(i) / 10.0;
        assert!(close(first.eval(u), seg.eval(0.5 * u)));
        assert!(close(second.eval(u), seg.eval(0.5 + 0.5 * u)));
    }
}

#[test]
fn promote_remaps_surrounding_markers() {
    let mut list = chain(vec![
        p(),
        Node::dissolved(0.2),
        Node::default(),
        Node::dissolved(0.4),
        Node::dissolved(0.7),
        q(),
    ]);
    list.promote_dissolved_to_normal(3).unwrap();
    assert!((list.at(1).unwrap().t - 0.5).abs() < 1e-12);
    assert!((list.at(4).unwrap().t - 0.5).abs() < 1e-12);
    assert!(list.at(2).unwrap().is_dummy());
}

#[test]
fn promote_requires_dissolved_between_normals() {
    let mut list = chain(vec![p(), Node::dissolved(0.5), q()]);
    assert!(matches!(
        list.promote_dissolved_to_normal(0),
        Err(PathError::Validation(_))
    ));

    let mut open_end = chain(vec![p(), Node::dissolved(0.5)]);
    assert!(matches!(
        open_end.promote_dissolved_to_normal(1),
        Err(PathError::Validation(_))
    ));
}

#[test]
fn dissolve_undoes_promote() {
    let original = chain(vec![p(), Node::dissolved(0.1), Node::dissolved(0.3), q()]);
    let mut list = original.clone();
    list.promote_dissolved_to_normal(2).unwrap();
    list.dissolve_normal(2).unwrap();

    let node = list.at(2).unwrap();
    assert!(node.is_dissolved());
    assert!((node.t - 0.3).abs() < 1e-9);
    assert!((list.at(1).unwrap().t - 0.1).abs() < 1e-9);
    assert!(close(list.at(0).unwrap().out_handle, p().out_handle));
    assert!(close(list.at(3).unwrap().in_handle, q().in_handle));
}

#[test]
fn dissolve_requires_normal_neighbours() {
    let mut list = chain(vec![p(), q()]);
    assert!(matches!(list.dissolve_normal(0), Err(PathError::Validation(_))));
    assert!(matches!(list.dissolve_normal(1), Err(PathError::Validation(_))));
}

#[test]
fn identical_lists_never_split() {
    let list = chain(vec![p(), Node::dissolved(0.5), q()]);
    for id in 0..list.len() {
        assert!(!list.should_split_node(id, &list).unwrap());
    }
}

#[test]
fn interior_normal_needs_both_neighbours_to_differ() {
    let this = chain(vec![
        Node::corner(Point::new(0.0, 0.0)),
        Node::corner(Point::new(1.0, 0.0)),
        Node::corner(Point::new(2.0, 0.0)),
    ]);
    // same nodes, visited as 0 -> 2 -> 1
    let sibling = NodeList::from_nodes(vec![
        Node::corner(Point::new(0.0, 0.0)).with_links(None, Some(2)),
        Node::corner(Point::new(1.0, 0.0)).with_links(Some(2), None),
        Node::corner(Point::new(2.0, 0.0)).with_links(Some(0), Some(1)),
    ])
    .unwrap();

    assert!(!this.should_split_node(1, &sibling).unwrap());
    assert!(this.should_split_node(0, &sibling).unwrap());
    assert!(this.should_split_node(2, &sibling).unwrap());
    assert_eq!(
        should_split_this_node(
            0,
            this.at(0).unwrap(),
            sibling.at(0).unwrap(),
            &this,
            &sibling
        )
        .unwrap(),
        this.should_split_node(0, &sibling).unwrap()
    );
}

#[test]
fn interior_normal_splits_when_only_sibling_continues() {
    let this = chain(vec![
        Node::corner(Point::new(0.0, 0.0)),
        Node::corner(Point::new(1.0, 0.0)),
        Node::default(),
    ]);
    let sibling = chain(vec![
        Node::corner(Point::new(0.0, 0.0)),
        Node::corner(Point::new(1.0, 0.0)),
        Node::corner(Point::new(2.0, 0.0)),
    ]);
    assert!(this.should_split_node(1, &sibling).unwrap());
    assert!(!sibling.should_split_node(1, &this).unwrap());
}
