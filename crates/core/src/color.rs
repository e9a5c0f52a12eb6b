//! Color maps: how an event is turned into a block or text color.

use std::collections::HashMap;

use timeline_cat_protocol::{Color, Palette};

use crate::model::TimeEvent;

/// Maps an event to the color it should be drawn with.
///
/// Takes `&mut self` so that stateful maps (like [`SimpleColorMap`]) can
/// remember earlier assignments.
pub trait ColorMap {
    fn color_for(&mut self, event: &TimeEvent) -> Color;
}

impl<M: ColorMap + ?Sized> ColorMap for &mut M {
    fn color_for(&mut self, event: &TimeEvent) -> Color {
        (**self).color_for(event)
    }
}

/// Hands out a new palette cycle slot for each distinct event name.
///
/// Repeated names reuse their first color. Once the number of distinct names
/// exceeds the cycle length, slots are reused (`count % cycle_len`).
#[derive(Debug, Clone)]
pub struct SimpleColorMap {
    seen: HashMap<String, Color>,
    count: usize,
    cycle_len: usize,
}

impl SimpleColorMap {
    pub fn new() -> Self {
        Self::with_palette_len(Palette::ggplot().len())
    }

    /// Cycle through `len` slots; `0` is treated as `1`.
    pub fn with_palette_len(len: usize) -> Self {
        Self {
            seen: HashMap::new(),
            count: 0,
            cycle_len: len.clamp(1, usize::from(u8::MAX) + 1),
        }
    }

    pub fn for_palette(palette: &Palette) -> Self {
        Self::with_palette_len(palette.len())
    }

    /// Forget every assignment, so the next name gets `C0` again.
    pub fn reset(&mut self) {
        self.seen.clear();
        self.count = 0;
    }

    /// Number of distinct names seen so far.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The color already assigned to `name`, if any.
    pub fn get(&self, name: &str) -> Option<Color> {
        self.seen.get(name).copied()
    }
}

impl Default for SimpleColorMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorMap for SimpleColorMap {
    fn color_for(&mut self, event: &TimeEvent) -> Color {
        if let Some(color) = self.seen.get(event.name()) {
            return *color;
        }
        if self.count == self.cycle_len {
            log::warn!(
                "more than {} distinct event names, block colors will repeat",
                self.cycle_len
            );
        }
        // cycle_len <= 256, so the slot always fits in a u8
        let slot = u8::try_from(self.count % self.cycle_len).unwrap_or(u8::MAX);
        let color = Color::Cycle(slot);
        self.count += 1;
        self.seen.insert(event.name().to_string(), color);
        color
    }
}

/// Returns the same color for every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantColorMap(pub Color);

impl ColorMap for ConstantColorMap {
    fn color_for(&mut self, _event: &TimeEvent) -> Color {
        self.0
    }
}

/// Adapts a closure into a [`ColorMap`].
pub struct FnColorMap<F>(pub F);

impl<F: FnMut(&TimeEvent) -> Color> ColorMap for FnColorMap<F> {
    fn color_for(&mut self, event: &TimeEvent) -> Color {
        (self.0)(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, stream: &str, category: &str) -> TimeEvent {
        TimeEvent::new(0.0, 1.0, name, stream, category).unwrap()
    }

    #[test]
    fn same_name_same_color() {
        let mut map = SimpleColorMap::new();
        let a = map.color_for(&event("A", "s1", "c1"));
        let b = map.color_for(&event("B", "s1", "c1"));
        let a_again = map.color_for(&event("A", "s2", "c2"));
        assert_eq!(a, Color::Cycle(0));
        assert_eq!(b, Color::Cycle(1));
        assert_eq!(a, a_again);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn wraps_after_palette_is_exhausted() {
        let mut map = SimpleColorMap::with_palette_len(3);
        let colors: Vec<_> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|n| map.color_for(&event(n, "s", "c")))
            .collect();
        assert_eq!(
            colors,
            vec![
                Color::Cycle(0),
                Color::Cycle(1),
                Color::Cycle(2),
                Color::Cycle(0),
                Color::Cycle(1),
            ]
        );
    }

    #[test]
    fn zero_length_palette_still_assigns() {
        let mut map = SimpleColorMap::with_palette_len(0);
        assert_eq!(map.color_for(&event("a", "s", "c")), Color::Cycle(0));
        assert_eq!(map.color_for(&event("b", "s", "c")), Color::Cycle(0));
    }

    #[test]
    fn reset_starts_over() {
        let mut map = SimpleColorMap::new();
        map.color_for(&event("x", "s", "c"));
        map.color_for(&event("y", "s", "c"));
        map.reset();
        assert!(map.is_empty());
        assert_eq!(map.get("y"), None);
        assert_eq!(map.color_for(&event("y", "s", "c")), Color::Cycle(0));
    }

    #[test]
    fn separate_instances_do_not_share_state() {
        let mut first = SimpleColorMap::new();
        let mut second = SimpleColorMap::new();
        first.color_for(&event("a", "s", "c"));
        assert_eq!(second.color_for(&event("b", "s", "c")), Color::Cycle(0));
    }

    #[test]
    fn constant_and_closure_maps() {
        let ev = event("a", "s", "c");
        assert_eq!(ConstantColorMap(Color::BLACK).color_for(&ev), Color::BLACK);

        let mut by_stream = FnColorMap(|e: &TimeEvent| {
            if e.stream() == "s" {
                Color::Cycle(4)
            } else {
                Color::WHITE
            }
        });
        assert_eq!(by_stream.color_for(&ev), Color::Cycle(4));
    }

    #[test]
    fn borrowed_map_keeps_state() {
        fn paint<M: ColorMap>(mut colors: M, ev: &TimeEvent) -> Color {
            colors.color_for(ev)
        }

        let mut map = SimpleColorMap::new();
        paint(&mut map, &event("a", "s", "c"));
        assert_eq!(map.get("a"), Some(Color::Cycle(0)));
    }
}
