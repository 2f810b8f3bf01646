use crate::store::TaskStore;

/// Live reorder gesture over the full (unfiltered) task list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragGesture {
    /// Index the grabbed task occupies right now
    current: Option<usize>,
}

impl DragGesture {
    pub fn start(&mut self, index: usize) {
        self.current = Some(index);
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// The pointer entered `index`; shuffle the list right away if it moved
    pub fn enter(&mut self, index: usize, store: &mut TaskStore) {
        let Some(current) = self.current else {
            return;
        };
        if index == current || index >= store.len() {
            return;
        }

        store.reorder(current, index);
        self.current = Some(index);
    }

    pub fn end(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;
    use pretty_assertions::assert_eq;

    fn store_with(titles: &[&str]) -> TaskStore {
        TaskStore::new(titles.iter().map(|t| Task::new(t.to_string(), None)).collect())
    }

    fn titles(store: &TaskStore) -> Vec<String> {
        store.tasks().iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_drag_reorders_incrementally() {
        let mut store = store_with(&["A", "B", "C", "D"]);
        let mut drag = DragGesture::default();

        drag.start(0);
        drag.enter(1, &mut store);
        assert_eq!(titles(&store), vec!["B", "A", "C", "D"]);
        drag.enter(2, &mut store);
        assert_eq!(titles(&store), vec!["B", "C", "A", "D"]);
        assert_eq!(drag.current(), Some(2));

        drag.end();
        assert_eq!(drag.current(), None);
    }

    #[test]
    fn test_entering_same_index_does_nothing() {
        let mut store = store_with(&["A", "B"]);
        let mut drag = DragGesture::default();

        drag.start(1);
        drag.enter(1, &mut store);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_enter_without_start_is_ignored() {
        let mut store = store_with(&["A", "B"]);
        let mut drag = DragGesture::default();

        drag.enter(1, &mut store);
        assert_eq!(titles(&store), vec!["A", "B"]);
    }

    #[test]
    fn test_enter_past_end_is_ignored() {
        let mut store = store_with(&["A", "B"]);
        let mut drag = DragGesture::default();

        drag.start(1);
        drag.enter(2, &mut store);
        assert_eq!(titles(&store), vec!["A", "B"]);
        assert_eq!(drag.current(), Some(1));
    }
}
