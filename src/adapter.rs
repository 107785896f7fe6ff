//! A list adapter that hands ready-made views to a list widget.
//!
//! The widget side is pull-based: it asks for [`count`](ListAdapter::count)
//! and for the view at each position it draws, and only asks again after a
//! registered [`DataSetObserver`] hears that something changed.
//! [`ViewListAdapter`] owns the views and performs that notification after
//! every mutation.
//!
//! ```
//! use imgkit::adapter::{ListAdapter, ViewListAdapter};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let refreshes = Rc::new(Cell::new(0));
//! let seen = refreshes.clone();
//! let observer: Rc<dyn imgkit::adapter::DataSetObserver> =
//!     Rc::new(move || seen.set(seen.get() + 1));
//!
//! let mut adapter = ViewListAdapter::<&str>::new();
//! adapter.register_observer(observer);
//! adapter.add_item("header");
//! adapter.add_item("row");
//!
//! assert_eq!(adapter.count(), 2);
//! assert_eq!(adapter.view(1), Some(&"row"));
//! assert_eq!(refreshes.get(), 2);
//! ```

use std::rc::Rc;

/// Receives change notifications from an adapter.
pub trait DataSetObserver {
    /// The data changed; re-query the adapter.
    fn on_changed(&self);

    /// The data is no longer valid.
    fn on_invalidated(&self) {}
}

impl<F: Fn()> DataSetObserver for F {
    fn on_changed(&self) {
        self()
    }
}

/// What a list widget needs from its data source.
pub trait ListAdapter {
    type View;

    fn count(&self) -> usize;

    /// The data item at `position`.
    fn item(&self, position: usize) -> Option<&Self::View>;

    fn item_id(&self, position: usize) -> u64;

    fn has_stable_ids(&self) -> bool;

    /// The view to display at `position`.
    fn view(&self, position: usize) -> Option<&Self::View>;

    fn item_view_type(&self, position: usize) -> usize;

    fn view_type_count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn are_all_items_enabled(&self) -> bool;

    fn is_enabled(&self, position: usize) -> bool;

    /// Subscribe to change notifications. Registering twice has no extra effect.
    fn register_observer(&mut self, observer: Rc<dyn DataSetObserver>);

    /// Unsubscribe. Unknown observers are ignored.
    fn unregister_observer(&mut self, observer: &Rc<dyn DataSetObserver>);
}

/// Adapter over an ordered list of views.
///
/// Views keep insertion order and may repeat. Each mutation updates the list
/// first and then notifies every observer once.
pub struct ViewListAdapter<V> {
    views: Vec<V>,
    observers: Vec<Rc<dyn DataSetObserver>>,
}

impl<V> Default for ViewListAdapter<V> {
    fn default() -> Self {
        Self {
            views: Vec::new(),
            observers: Vec::new(),
        }
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for ViewListAdapter<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewListAdapter")
            .field("views", &self.views)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<V> ViewListAdapter<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a view. `None` is ignored without notifying.
    pub fn add_item(&mut self, view: impl Into<Option<V>>) {
        let Some(view) = view.into() else {
            return;
        };
        self.views.push(view);
        self.notify_changed();
    }

    /// Drop every view.
    pub fn clear_list(&mut self) {
        self.views.clear();
        self.notify_changed();
    }

    /// Tell observers the list changed.
    pub fn notify_changed(&self) {
        for observer in &self.observers {
            observer.on_changed();
        }
    }

    /// Tell observers the list is no longer valid.
    pub fn notify_invalidated(&self) {
        for observer in &self.observers {
            observer.on_invalidated();
        }
    }

    pub fn views(&self) -> &[V] {
        &self.views
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<V: PartialEq> ViewListAdapter<V> {
    /// Remove the first view equal to `view`. `None` is ignored without
    /// notifying; a view that isn't listed still notifies.
    pub fn remove_item<'a>(&mut self, view: impl Into<Option<&'a V>>)
    where
        V: 'a,
    {
        let Some(view) = view.into() else {
            return;
        };
        if let Some(index) = self.views.iter().position(|v| v == view) {
            self.views.remove(index);
        }
        self.notify_changed();
    }
}

impl<V> ListAdapter for ViewListAdapter<V> {
    type View = V;

    fn count(&self) -> usize {
        self.views.len()
    }

    fn item(&self, position: usize) -> Option<&V> {
        self.views.get(position)
    }

    fn item_id(&self, _position: usize) -> u64 {
        0
    }

    fn has_stable_ids(&self) -> bool {
        false
    }

    fn view(&self, position: usize) -> Option<&V> {
        self.views.get(position)
    }

    fn item_view_type(&self, _position: usize) -> usize {
        0
    }

    fn view_type_count(&self) -> usize {
        1
    }

    fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    fn are_all_items_enabled(&self) -> bool {
        true
    }

    fn is_enabled(&self, position: usize) -> bool {
        position < self.views.len()
    }

    fn register_observer(&mut self, observer: Rc<dyn DataSetObserver>) {
        if !self.observers.iter().any(|o| Rc::ptr_eq(o, &observer)) {
            self.observers.push(observer);
        }
    }

    fn unregister_observer(&mut self, observer: &Rc<dyn DataSetObserver>) {
        self.observers.retain(|o| !Rc::ptr_eq(o, observer));
    }
}
