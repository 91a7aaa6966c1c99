use super::*;

#[test]
fn tags_roundtrip_and_reject_unknown() {
    for ty in [
        NodeType::Normal,
        NodeType::Move,
        NodeType::Dissolved,
        NodeType::Dummy,
    ] {
        assert_eq!(NodeType::from_tag(ty.tag()).unwrap(), ty);
    }
    assert!(matches!(
        NodeType::try_from(4),
        Err(PathError::UnrecognizedNodeType(4))
    ));
}

#[test]
fn default_node_is_unlinked_dummy() {
    let n = Node::default();
    assert!(n.is_dummy());
    assert!(!n.has_prev());
    assert!(!n.has_next());
}

#[test]
fn dissolved_clamps_t() {
    assert_eq!(Node::dissolved(1.5).t, 1.0);
    assert_eq!(Node::dissolved(-0.5).t, 0.0);
    assert!(Node::dissolved(0.25).is_dissolved());
}

#[test]
fn insert_shift_moves_links_at_or_after_position() {
    let mut n = Node::default().with_links(Some(1), Some(3));
    n.shift_ids_for_insert(3);
    assert_eq!(n.prev_id(), Some(1));
    assert_eq!(n.next_id(), Some(4));
    n.shift_ids_for_insert(1);
    assert_eq!(n.prev_id(), Some(2));
    assert_eq!(n.next_id(), Some(5));
}

#[test]
fn remove_shift_moves_links_after_position_only() {
    let mut n = Node::default().with_links(Some(2), Some(5));
    n.shift_ids_for_remove(2);
    assert_eq!(n.prev_id(), Some(2));
    assert_eq!(n.next_id(), Some(4));
}

#[test]
fn switch_swaps_links() {
    let mut n = Node::corner(Point::new(1.0, 2.0)).with_links(None, Some(4));
    n.switch_prev_and_next();
    assert_eq!(n.prev_id(), Some(4));
    assert_eq!(n.next_id(), None);
}
