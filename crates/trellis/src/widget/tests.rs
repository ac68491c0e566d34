//! Tests for the widget system.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use proptest::prelude::*;
    use trellis_render::{Point, Rect, Size};

    use crate::widget::layout::{ComponentItem, LayoutItem};
    use crate::widget::widgets::{GripArea, PushButton, SizeGrip};
    use crate::widget::{
        Component, Document, EventTarget, EventType, Item, MouseButton, PointerEvent, SizeHint,
        Viewport, VisualNode,
    };

    fn setup() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("trellis=trace,trellis_core=trace")
            .with_test_writer()
            .try_init();
    }

    /// A mounted target with a grip appended to it.
    fn grip_fixture(area: GripArea, rect: Rect, min: Size, max: Size) -> (Document, Component, SizeGrip) {
        let doc = Document::new();
        let target = Component::new(&doc);
        target.item().mount().unwrap();
        target.set_minimum_size(min);
        target.set_maximum_size(max);
        target.set_offset_rect(rect);

        let grip = SizeGrip::new(&doc, area, &target).unwrap();
        target.item().append(&[grip.item()]).unwrap();
        (doc, target, grip)
    }

    fn press(doc: &Document, grip: &SizeGrip, x: f64, y: f64) -> PointerEvent {
        let node = grip.item().node().unwrap();
        doc.dispatch(PointerEvent::mouse_down(Some(node), MouseButton::Left, x, y))
    }

    fn move_to(doc: &Document, x: f64, y: f64) -> PointerEvent {
        doc.dispatch(PointerEvent::mouse_move(None, x, y))
    }

    fn release(doc: &Document, x: f64, y: f64) -> PointerEvent {
        doc.dispatch(PointerEvent::mouse_up(None, MouseButton::Left, x, y))
    }

    fn drag_listeners(doc: &Document) -> (usize, usize) {
        (
            doc.listener_count(EventTarget::Document, EventType::MouseUp),
            doc.listener_count(EventTarget::Document, EventType::MouseMove),
        )
    }

    // =========================================================================
    // Size Grip
    // =========================================================================

    #[test]
    fn test_right_grip_clamps_to_size_limits() {
        setup();
        let (doc, target, grip) = grip_fixture(
            GripArea::Right,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Size::new(50.0, 50.0),
            Size::new(300.0, 300.0),
        );

        press(&doc, &grip, 100.0, 50.0);
        assert_eq!(grip.drag_offset(), Point::ZERO);

        move_to(&doc, 600.0, 50.0);
        assert_eq!(target.offset_rect().right, 300.0);

        move_to(&doc, 10.0, 50.0);
        assert_eq!(target.offset_rect().right, 50.0);
        assert_eq!(target.offset_rect().left, 0.0);
        assert_eq!(target.offset_rect().bottom, 100.0);
    }

    #[test]
    fn test_bottom_right_drag_end_to_end() {
        setup();
        let (doc, target, grip) = grip_fixture(
            GripArea::BottomRight,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Size::new(20.0, 20.0),
            Size::new(500.0, 500.0),
        );
        let events = Arc::new(Mutex::new(Vec::new()));
        for (signal, name) in [
            (grip.resize_started(), "started"),
            (grip.resized(), "resized"),
            (grip.resize_finished(), "finished"),
        ] {
            let events = events.clone();
            signal.connect(move |rect| events.lock().push((name, *rect)));
        }

        let down = press(&doc, &grip, 100.0, 100.0);
        assert!(down.is_default_prevented());
        assert!(grip.is_dragging());
        assert_eq!(drag_listeners(&doc), (1, 1));

        let moved = move_to(&doc, 250.0, 180.0);
        assert!(moved.is_default_prevented());
        assert_eq!(target.offset_rect(), Rect::new(0.0, 0.0, 250.0, 180.0));

        let up = release(&doc, 250.0, 180.0);
        assert!(up.is_default_prevented());
        assert!(!grip.is_dragging());
        assert_eq!(grip.drag_offset(), Point::ZERO);
        assert_eq!(drag_listeners(&doc), (0, 0));

        let after = move_to(&doc, 400.0, 400.0);
        assert!(!after.is_default_prevented());
        assert_eq!(target.offset_rect(), Rect::new(0.0, 0.0, 250.0, 180.0));

        let final_rect = Rect::new(0.0, 0.0, 250.0, 180.0);
        assert_eq!(
            *events.lock(),
            vec![
                ("started", Rect::new(0.0, 0.0, 100.0, 100.0)),
                ("resized", final_rect),
                ("finished", final_rect),
            ]
        );

        let node = target.item().node().unwrap();
        assert_eq!(doc.surface().geometry(node).unwrap(), Some(final_rect));
    }

    #[test]
    fn test_drag_offset_is_preserved() {
        setup();
        let (doc, target, grip) = grip_fixture(
            GripArea::Right,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Size::ZERO,
            Size::new(1000.0, 1000.0),
        );

        press(&doc, &grip, 95.0, 10.0);
        assert_eq!(grip.drag_offset(), Point::new(-5.0, 0.0));

        move_to(&doc, 200.0, 10.0);
        assert_eq!(target.offset_rect().right, 205.0);
    }

    #[test]
    fn test_left_and_top_grips_keep_opposite_edges() {
        setup();
        let (doc, target, grip) = grip_fixture(
            GripArea::TopLeft,
            Rect::new(100.0, 100.0, 200.0, 200.0),
            Size::new(30.0, 30.0),
            Size::new(150.0, 150.0),
        );

        press(&doc, &grip, 100.0, 100.0);
        move_to(&doc, 0.0, 190.0);

        assert_eq!(target.offset_rect(), Rect::new(50.0, 170.0, 200.0, 200.0));
    }

    #[test]
    fn test_pointer_is_clamped_to_viewport() {
        setup();
        let (doc, target, grip) = grip_fixture(
            GripArea::Right,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Size::ZERO,
            Size::new(5000.0, 5000.0),
        );
        doc.set_viewport(Viewport::from_window(0.0, 0.0, 320.0, 240.0));

        press(&doc, &grip, 100.0, 50.0);
        move_to(&doc, 900.0, 50.0);

        assert_eq!(target.offset_rect().right, 320.0);
    }

    #[test]
    fn test_bounds_are_reread_on_every_move() {
        setup();
        let (doc, target, grip) = grip_fixture(
            GripArea::Right,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Size::ZERO,
            Size::new(500.0, 500.0),
        );

        press(&doc, &grip, 100.0, 50.0);
        move_to(&doc, 400.0, 50.0);
        assert_eq!(target.offset_rect().right, 400.0);

        target.set_maximum_size(Size::new(250.0, 250.0));
        move_to(&doc, 400.0, 50.0);
        assert_eq!(target.offset_rect().right, 250.0);
    }

    #[test]
    fn test_secondary_buttons_are_ignored() {
        setup();
        let (doc, target, grip) = grip_fixture(
            GripArea::Right,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Size::ZERO,
            Size::new(500.0, 500.0),
        );
        let node = grip.item().node().unwrap();

        let down = doc.dispatch(PointerEvent::mouse_down(Some(node), MouseButton::Right, 100.0, 0.0));
        assert!(!down.is_default_prevented());
        assert!(!grip.is_dragging());

        press(&doc, &grip, 100.0, 0.0);
        doc.dispatch(PointerEvent::mouse_up(None, MouseButton::Middle, 0.0, 0.0));
        assert!(grip.is_dragging());

        move_to(&doc, 150.0, 0.0);
        assert_eq!(target.offset_rect().right, 150.0);
    }

    #[test]
    fn test_destroying_grip_releases_target() {
        setup();
        let (doc, target, grip) = grip_fixture(
            GripArea::Bottom,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Size::ZERO,
            Size::new(500.0, 500.0),
        );
        let grip_node = grip.item().node().unwrap();
        press(&doc, &grip, 50.0, 100.0);

        grip.destroy().unwrap();

        assert!(grip.target().is_none());
        assert!(!grip.is_dragging());
        assert_eq!(drag_listeners(&doc), (0, 0));
        assert_eq!(doc.listener_count(EventTarget::Node(grip_node), EventType::MouseDown), 0);
        assert!(!target.item().is_destroyed());
        assert!(target.item().children().unwrap().is_empty());
        assert_eq!(target.item().destroyed().connection_count(), 0);
    }

    #[test]
    fn test_destroying_target_releases_grip() {
        setup();
        let doc = Document::new();
        let target = Component::new(&doc);
        target.set_offset_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        let grip = SizeGrip::new(&doc, GripArea::Right, &target).unwrap();
        grip.item().mount().unwrap();

        target.item().destroy().unwrap();
        assert!(grip.target().is_none());

        let down = press(&doc, &grip, 100.0, 0.0);
        assert!(!down.is_default_prevented());
        assert!(!grip.is_dragging());
    }

    #[test]
    fn test_destroying_grip_through_ancestor_unbinds() {
        setup();
        let (doc, target, grip) = grip_fixture(
            GripArea::Right,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Size::ZERO,
            Size::new(500.0, 500.0),
        );
        let grip_node = grip.item().node().unwrap();
        press(&doc, &grip, 100.0, 0.0);

        target.item().destroy().unwrap();

        assert!(grip.item().is_destroyed());
        assert!(grip.target().is_none());
        assert_eq!(drag_listeners(&doc), (0, 0));
        assert_eq!(doc.listener_count(EventTarget::Node(grip_node), EventType::MouseDown), 0);
    }

    // =========================================================================
    // Size Negotiation
    // =========================================================================

    #[test]
    fn test_explicit_minimum_beats_hint() {
        let doc = Document::new();
        let component = Component::with_hints(
            &doc,
            SizeHint::from_dimensions(120.0, 40.0).with_minimum_dimensions(10.0, 10.0),
        );
        let item = ComponentItem::new(&component);
        assert_eq!(item.minimum_size(), Size::new(10.0, 10.0));

        component.set_minimum_size(Size::new(50.0, 50.0));
        assert_eq!(item.minimum_size(), Size::new(50.0, 50.0));

        component.set_minimum_size(Size::INVALID);
        assert_eq!(item.minimum_size(), Size::new(10.0, 10.0));
    }

    #[test]
    fn test_size_hint_never_below_minimum() {
        let doc = Document::new();
        let cases = [
            (Size::new(5.0, 5.0), Size::new(50.0, 50.0), Size::INVALID),
            (Size::INVALID, Size::new(20.0, 30.0), Size::new(100.0, 100.0)),
            (Size::new(500.0, 1.0), Size::new(60.0, 60.0), Size::new(40.0, 40.0)),
        ];
        for (preferred, minimum, maximum) in cases {
            let component = Component::with_hints(&doc, SizeHint::new(preferred));
            component.set_minimum_size(minimum);
            component.set_maximum_size(maximum);
            let item = ComponentItem::new(&component);

            let hint = item.size_hint();
            let min = item.minimum_size();
            assert!(hint.width >= min.width && hint.height >= min.height, "{hint:?} < {min:?}");
        }
    }

    // =========================================================================
    // Item Tree
    // =========================================================================

    const PARENTS: usize = 3;
    const CHILDREN: usize = 8;

    #[derive(Debug, Clone, Copy)]
    enum TreeOp {
        Append,
        Prepend,
        InsertBefore,
    }

    /// One placement of up to two children under one parent.
    #[derive(Debug, Clone)]
    struct Placement {
        op: TreeOp,
        parent: usize,
        first: usize,
        second: usize,
        before: usize,
    }

    fn placement_strategy() -> impl Strategy<Value = Placement> {
        (
            prop_oneof![
                Just(TreeOp::Append),
                Just(TreeOp::Prepend),
                Just(TreeOp::InsertBefore),
            ],
            0..PARENTS,
            0..CHILDREN,
            0..CHILDREN,
            0..CHILDREN,
        )
            .prop_map(|(op, parent, first, second, before)| Placement {
                op,
                parent,
                first,
                second,
                before,
            })
    }

    proptest! {
        #[test]
        fn test_tree_operations_keep_single_membership(
            placements in prop::collection::vec(placement_strategy(), 1..48)
        ) {
            let doc = Document::new();
            let parents: Vec<Item> = (0..PARENTS).map(|_| Item::new(&doc)).collect();
            let children: Vec<Item> = (0..CHILDREN).map(|_| Item::new(&doc)).collect();

            for placement in &placements {
                let parent = &parents[placement.parent];
                let first = &children[placement.first];
                let second = &children[placement.second];
                let batch: Vec<&Item> = if first.ptr_eq(second) {
                    vec![first]
                } else {
                    vec![first, second]
                };

                match placement.op {
                    TreeOp::Append => parent.append(&batch).unwrap(),
                    TreeOp::Prepend => parent.prepend(&batch).unwrap(),
                    TreeOp::InsertBefore => {
                        let candidates: Vec<Item> = parent
                            .children()
                            .unwrap()
                            .into_iter()
                            .filter(|c| !batch.iter().any(|b| b.ptr_eq(c)))
                            .collect();
                        if candidates.is_empty() {
                            parent.append(&batch).unwrap();
                        } else {
                            let before = &candidates[placement.before % candidates.len()];
                            parent.insert_before(before, &batch).unwrap();
                        }
                    }
                }

                // The batch is contiguous and in order in its new parent.
                let list = parent.children().unwrap();
                let start = list.iter().position(|c| c.ptr_eq(batch[0])).unwrap();
                for (offset, item) in batch.iter().enumerate() {
                    prop_assert!(list[start + offset].ptr_eq(item));
                }

                // Every child has at most one home, matching its parent link.
                for child in &children {
                    let homes: Vec<&Item> = parents
                        .iter()
                        .filter(|p| p.children().unwrap().iter().any(|c| c.ptr_eq(child)))
                        .collect();
                    let occurrences: usize = parents
                        .iter()
                        .map(|p| p.children().unwrap().iter().filter(|c| c.ptr_eq(child)).count())
                        .sum();
                    prop_assert!(occurrences <= 1);
                    prop_assert_eq!(homes.first().copied().cloned(), child.parent());
                }

                // The surface mirrors the item tree.
                for p in &parents {
                    let expected: Vec<_> = p
                        .children()
                        .unwrap()
                        .iter()
                        .map(|c| c.node().unwrap())
                        .collect();
                    prop_assert_eq!(doc.surface().children(p.node().unwrap()).unwrap(), expected);
                }
            }
        }
    }

    #[test]
    fn test_destroy_visits_every_descendant_once() {
        setup();
        let doc = Document::new();
        let root = Item::new(&doc);
        let mut all = vec![root.clone()];
        for _ in 0..3 {
            let child = Item::new(&doc);
            root.append(&[&child]).unwrap();
            for _ in 0..2 {
                let grandchild = Item::new(&doc);
                child.append(&[&grandchild]).unwrap();
                all.push(grandchild);
            }
            all.push(child);
        }
        let outer = Item::new(&doc);
        outer.append(&[&root]).unwrap();

        let destroyed = Arc::new(Mutex::new(Vec::new()));
        for item in &all {
            let destroyed = destroyed.clone();
            item.destroyed().connect(move |id| destroyed.lock().push(*id));
        }

        root.destroy().unwrap();

        let mut seen = destroyed.lock().clone();
        assert_eq!(seen.len(), all.len());
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), all.len());
        assert!(outer.children().unwrap().is_empty());
        assert!(all.iter().all(Item::is_destroyed));
    }

    // =========================================================================
    // Buttons
    // =========================================================================

    #[test]
    fn test_push_button_click_on_label() {
        setup();
        let doc = Document::new();
        let button = PushButton::new(&doc, "Go").unwrap();
        button.item().mount().unwrap();
        let node = button.item().node().unwrap();
        let label = doc.surface().children(node).unwrap()[0];

        let clicks = Arc::new(Mutex::new(0));
        let clicks_clone = clicks.clone();
        button.button().clicked().connect(move |_| *clicks_clone.lock() += 1);

        doc.dispatch(PointerEvent::mouse_down(Some(label), MouseButton::Left, 5.0, 5.0));
        assert!(button.button().is_pressed());
        doc.dispatch(PointerEvent::mouse_up(Some(label), MouseButton::Left, 5.0, 5.0));

        assert_eq!(*clicks.lock(), 1);
        assert!(!button.button().is_pressed());
    }
}
