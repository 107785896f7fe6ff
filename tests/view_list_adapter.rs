//! Drives the view list adapter the way a list widget would: subscribe, then
//! re-read count and rows every time a change arrives.

use imgkit::ImageWiz;
use imgkit::adapter::{DataSetObserver, ListAdapter, ViewListAdapter};
use std::cell::RefCell;
use std::rc::Rc;

/// A row view: a caption plus an optional thumbnail.
#[derive(Debug, Clone, PartialEq)]
struct Row {
    caption: String,
    thumbnail: Option<(u32, u32)>,
}

impl Row {
    fn new(caption: &str) -> Self {
        Self {
            caption: caption.to_string(),
            thumbnail: None,
        }
    }
}

/// Records the number of changes it has been told about.
#[derive(Default)]
struct Widget {
    refreshes: RefCell<usize>,
}

impl DataSetObserver for Widget {
    fn on_changed(&self) {
        *self.refreshes.borrow_mut() += 1;
    }
}

fn captions(adapter: &ViewListAdapter<Row>) -> Vec<String> {
    (0..adapter.count())
        .filter_map(|i| adapter.view(i))
        .map(|r| r.caption.clone())
        .collect()
}

#[test]
fn widget_sees_each_mutation_and_current_rows() {
    let widget = Rc::new(Widget::default());
    let mut adapter = ViewListAdapter::<Row>::new();
    adapter.register_observer(widget.clone());

    adapter.add_item(Row::new("v1"));
    assert_eq!(*widget.refreshes.borrow(), 1);
    assert_eq!(captions(&adapter), ["v1"]);

    adapter.add_item(Row::new("v2"));
    assert_eq!(*widget.refreshes.borrow(), 2);
    assert_eq!(adapter.count(), 2);

    adapter.remove_item(&Row::new("v1"));
    assert_eq!(*widget.refreshes.borrow(), 3);
    assert_eq!(captions(&adapter), ["v2"]);

    adapter.clear_list();
    assert_eq!(*widget.refreshes.borrow(), 4);
    assert!(adapter.is_empty());
    assert!(!adapter.is_enabled(0));
}

#[test]
fn rows_built_from_images() {
    let mut adapter = ViewListAdapter::<Row>::new();

    for (caption, w, h) in [("wide", 300, 100), ("tall", 100, 300)] {
        let mut wiz = ImageWiz::from(image::RgbaImage::new(w, h));
        wiz.scale(0, 50).square_crop();
        adapter.add_item(Row {
            caption: caption.to_string(),
            thumbnail: wiz.dimensions(),
        });
    }

    assert_eq!(adapter.count(), 2);
    assert_eq!(adapter.view(0).unwrap().thumbnail, Some((50, 50)));
    assert_eq!(adapter.view(1).unwrap().thumbnail, Some((16, 16)));
}

#[test]
fn unregistered_widget_stops_refreshing() {
    let widget = Rc::new(Widget::default());
    let observer: Rc<dyn DataSetObserver> = widget.clone();
    let mut adapter = ViewListAdapter::<Row>::new();

    adapter.register_observer(observer.clone());
    adapter.add_item(Row::new("a"));
    adapter.unregister_observer(&observer);
    adapter.add_item(Row::new("b"));

    assert_eq!(*widget.refreshes.borrow(), 1);
    assert_eq!(captions(&adapter), ["a", "b"]);
}
