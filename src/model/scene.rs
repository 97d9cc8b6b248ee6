use bitflags::bitflags;

bitflags! {
    /// Per-primitive render attributes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PlotAttrs: u32 {
        const ON          = 1;
        const TRANSPARENT = 2;
        const SHADING     = 4;
        const ORIENTATION = 8;
        const POINTS      = 16;
        const LINES       = 32;
    }
}

/// Handle to a vertex buffer owned by the render context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// A renderable graphics primitive
#[derive(Debug, Clone, PartialEq)]
pub struct GPrim {
    pub attrs: PlotAttrs,
    pub lines: Vec<BufferId>,
    pub line_width: f32,
    pub line_color: [f32; 3],
}

impl GPrim {
    pub fn new(attrs: PlotAttrs) -> Self {
        Self {
            attrs,
            lines: Vec::new(),
            line_width: 1.0,
            line_color: [0.0, 0.0, 0.0],
        }
    }

    pub fn toggle(&mut self, attr: PlotAttrs) {
        self.attrs ^= attr;
    }
}

/// Primitives keyed by name, iterated in insertion order.
///
/// Re-inserting an existing key keeps its position; removing and then
/// inserting moves it to the end.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    entries: Vec<(String, GPrim)>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&GPrim> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut GPrim> {
        let idx = self.position(key)?;
        Some(&mut self.entries[idx].1)
    }

    /// Insert or replace; returns the primitive previously stored under `key`
    pub fn insert(&mut self, key: impl Into<String>, gprim: GPrim) -> Option<GPrim> {
        let key = key.into();
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, gprim)),
            None => {
                self.entries.push((key, gprim));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<GPrim> {
        let idx = self.position(key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GPrim)> {
        self.entries.iter().map(|(k, g)| (k.as_str(), g))
    }

    /// Successor of `current` in iteration order.
    ///
    /// `None` selects the first key, the last key wraps to `None`, and a key
    /// that is not in the graph is returned unchanged.
    pub fn next_after(&self, current: Option<&str>) -> Option<String> {
        match current {
            None => self.entries.first().map(|(k, _)| k.clone()),
            Some(cur) => match self.position(cur) {
                Some(i) => self.entries.get(i + 1).map(|(k, _)| k.clone()),
                None => Some(cur.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(keys: &[&str]) -> SceneGraph {
        let mut g = SceneGraph::new();
        for k in keys {
            g.insert(*k, GPrim::new(PlotAttrs::ON));
        }
        g
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let g = graph(&["face 3", "edge 1", "face 1"]);
        let keys: Vec<&str> = g.keys().collect();
        assert_eq!(keys, vec!["face 3", "edge 1", "face 1"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut g = graph(&["a", "b"]);
        let old = g.insert("a", GPrim::new(PlotAttrs::LINES));
        assert_eq!(old.map(|p| p.attrs), Some(PlotAttrs::ON));
        assert_eq!(g.keys().next(), Some("a"));
        assert_eq!(g.get("a").map(|p| p.attrs), Some(PlotAttrs::LINES));
    }

    #[test]
    fn test_remove_then_insert_moves_to_end() {
        let mut g = graph(&["jack", "a"]);
        assert!(g.remove("jack").is_some());
        g.insert("jack", GPrim::new(PlotAttrs::ON));
        let keys: Vec<&str> = g.keys().collect();
        assert_eq!(keys, vec!["a", "jack"]);
        assert!(g.remove("missing").is_none());
    }

    #[test]
    fn test_next_after_cycles_and_wraps() {
        let g = graph(&["a", "b"]);
        assert_eq!(g.next_after(None).as_deref(), Some("a"));
        assert_eq!(g.next_after(Some("a")).as_deref(), Some("b"));
        assert_eq!(g.next_after(Some("b")), None);
        assert_eq!(g.next_after(Some("gone")).as_deref(), Some("gone"));
        assert_eq!(SceneGraph::new().next_after(None), None);
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let mut p = GPrim::new(PlotAttrs::ON | PlotAttrs::LINES);
        p.toggle(PlotAttrs::LINES);
        assert_eq!(p.attrs, PlotAttrs::ON);
        p.toggle(PlotAttrs::LINES);
        assert_eq!(p.attrs, PlotAttrs::ON | PlotAttrs::LINES);
    }
}
