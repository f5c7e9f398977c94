// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios exercising the gallery interaction engine across
//! component boundaries: selection + keyboard + marquee against real
//! layout geometry.

use iced_gallery::gallery::geometry::{GeometryAdapter, JustifiedGeometry, NavDirection};
use iced_gallery::gallery::justified::RowLayout;
use iced_gallery::gallery::manager::{ClickModifiers, GalleryManager, KeyInput, Message};
use iced_gallery::gallery::LayoutMode;
use iced_gallery::media::{DocId, MediaItem};
use iced::Point;

fn square_items(count: usize) -> Vec<MediaItem> {
    (0..count)
        .map(|i| {
            MediaItem::new(DocId::from(i as i64), format!("{i}.jpg"), format!("{i}.jpg"))
                .with_dimensions(500, 500)
        })
        .collect()
}

fn shift_click(gallery: &mut GalleryManager, index: usize) {
    gallery.handle(Message::ItemPressed {
        index,
        modifiers: ClickModifiers {
            shift: true,
            command: false,
        },
    });
}

fn selected_indices(gallery: &GalleryManager) -> Vec<usize> {
    (0..gallery.items().len())
        .filter(|&i| gallery.item_props(i).selected)
        .collect()
}

#[test]
fn shift_click_anchor_walk_matches_file_manager_semantics() {
    let mut gallery = GalleryManager::new(square_items(8), LayoutMode::Grid, 1300.0);

    // Shift-click with no prior anchor selects only item 2, anchor = 2.
    shift_click(&mut gallery, 2);
    assert_eq!(selected_indices(&gallery), vec![2]);
    assert_eq!(gallery.anchor_index(), Some(2));

    // Shift-click 5: selects 2..=5 inclusive, anchor advances to 5.
    shift_click(&mut gallery, 5);
    assert_eq!(selected_indices(&gallery), vec![2, 3, 4, 5]);
    assert_eq!(gallery.anchor_index(), Some(5));

    // Shift-click 0: item 0 is unselected, so the target state is
    // "selected" and the whole 0..=5 range becomes selected.
    shift_click(&mut gallery, 0);
    assert_eq!(selected_indices(&gallery), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(gallery.anchor_index(), Some(0));

    // Shift-click 5 again: item 5 is selected, so the target state is
    // "deselected" and the whole 0..=5 range clears.
    shift_click(&mut gallery, 5);
    assert_eq!(selected_indices(&gallery), Vec::<usize>::new());
}

#[test]
fn justified_resize_keeps_indices_addressable() {
    let items = square_items(12);
    let mut gallery = GalleryManager::new(items, LayoutMode::Justified, 1200.0);

    // Focus an item somewhere in the middle via keyboard.
    for _ in 0..7 {
        gallery.handle(Message::KeyPressed {
            key: KeyInput::Direction(NavDirection::Right),
        });
    }
    assert_eq!(gallery.focused_index(), Some(7));
    let rows_before = gallery.rows().clone();
    assert!(rows_before.locate(7).is_some());

    // Resizing fully recomputes the rows; no stale row geometry survives.
    gallery.handle(Message::ContainerResized { width: 700.0 });
    let rows_after = gallery.rows().clone();
    assert_ne!(rows_before, rows_after);

    // The focused item keeps its list index and stays addressable.
    assert_eq!(gallery.focused_index(), Some(7));
    assert!(rows_after.locate(7).is_some());

    // Navigation still resolves against the new geometry.
    let geometry = JustifiedGeometry::new(gallery.rows());
    let below = geometry.next_index(7, NavDirection::Down, gallery.items().len());
    assert!(below < gallery.items().len());
}

#[test]
fn marquee_drag_commits_replace_and_append_sets() {
    // 1300px container buckets to 4 grid columns of ~322px cells.
    let mut gallery = GalleryManager::new(square_items(8), LayoutMode::Grid, 1300.0);

    // Pre-existing selection: item 0 (via Cmd-click).
    gallery.handle(Message::ItemPressed {
        index: 0,
        modifiers: ClickModifiers {
            shift: false,
            command: true,
        },
    });

    // Non-append drag over items 1 and 2: final selection is exactly the
    // hit set, so item 0 is deselected.
    gallery.handle(Message::BackgroundPressed {
        position: Point::new(340.0, 10.0),
        scroll_offset: 0.0,
        append: false,
        viewport_height: 700.0,
    });
    gallery.handle(Message::PointerMoved {
        position: Point::new(900.0, 200.0),
        scroll_offset: 0.0,
        append: false,
    });
    gallery.handle(Message::PointerReleased);
    assert_eq!(selected_indices(&gallery), vec![1, 2]);

    // Append drag over item 3: unions with the previous selection.
    gallery.handle(Message::BackgroundPressed {
        position: Point::new(980.0, 10.0),
        scroll_offset: 0.0,
        append: true,
        viewport_height: 700.0,
    });
    gallery.handle(Message::PointerMoved {
        position: Point::new(1290.0, 200.0),
        scroll_offset: 0.0,
        append: true,
    });
    gallery.handle(Message::PointerReleased);
    assert_eq!(selected_indices(&gallery), vec![1, 2, 3]);
}

#[test]
fn selection_survives_id_representation_swaps_across_inputs() {
    // Items whose host ids are numeric strings.
    let items: Vec<MediaItem> = (0..6)
        .map(|i| {
            MediaItem::new(
                DocId::from(format!("{i}")),
                format!("{i}.jpg"),
                format!("{i}.jpg"),
            )
            .with_dimensions(500, 500)
        })
        .collect();
    let mut gallery = GalleryManager::new(items, LayoutMode::Grid, 1300.0);

    gallery.handle(Message::ItemPressed {
        index: 3,
        modifiers: ClickModifiers {
            shift: false,
            command: true,
        },
    });

    // The numeric form of the same id reads as selected.
    assert!(gallery.selection().is_selected(&DocId::from(3)));
    assert!(gallery.selection().is_selected(&DocId::from("3")));
    assert_eq!(gallery.selection().count(), 1);
}

#[test]
fn keyboard_navigation_tracks_justified_geometry_not_column_offsets() {
    // Wide first row, narrow second row: vertical movement must land on
    // the horizontally closest item, not index +/- columns.
    let mut items: Vec<MediaItem> = (0..3)
        .map(|i| {
            MediaItem::new(DocId::from(i), format!("{i}.jpg"), format!("{i}.jpg"))
                .with_dimensions(800, 500)
        })
        .collect();
    items.extend((3..9).map(|i| {
        MediaItem::new(DocId::from(i), format!("{i}.jpg"), format!("{i}.jpg"))
            .with_dimensions(400, 500)
    }));

    let layout = RowLayout::compute(&items, 1200.0);
    assert!(layout.rows().len() >= 2, "fixture must span two rows");
    let geometry = JustifiedGeometry::new(&layout);

    let last_in_first_row = layout.rows()[0].slots.last().expect("row has items").index;
    let below = geometry.next_index(last_in_first_row, NavDirection::Down, items.len());
    let second_row = &layout.rows()[1];
    assert!(second_row.slots.iter().any(|s| s.index == below));

    // Coming back up lands in the first row again.
    let back_up = geometry.next_index(below, NavDirection::Up, items.len());
    assert!(layout.rows()[0].slots.iter().any(|s| s.index == back_up));
}
