use std::collections::VecDeque;
use crate::model::ViewerState;

const SEPARATOR: &str = "\u{a0} \u{a0} \u{a0} ";

/// Destination of the status text
pub trait StatusSink {
    fn show(&self, text: &str);
}

impl StatusSink for web_sys::Element {
    fn show(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}

/// Rolling frame rate plus pick/active/locate status.
///
/// `record_tick` is called at the end of every render; `refresh_display` runs
/// on its own timer.
#[derive(Debug, Clone)]
pub struct StatusLine {
    capacity: usize,
    render_time: Option<f64>,
    framerates: VecDeque<f64>,
}

impl StatusLine {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            render_time: None,
            framerates: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Record a completed render at `now_ms` milliseconds
    pub fn record_tick(&mut self, now_ms: f64) {
        let Some(last) = self.render_time else {
            self.render_time = Some(now_ms);
            return;
        };

        let elapsed = now_ms - last;
        if elapsed == 0.0 {
            return;
        }

        self.framerates.push_back(1000.0 / elapsed);
        while self.framerates.len() > self.capacity {
            self.framerates.pop_front();
        }
        self.render_time = Some(now_ms);
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.framerates.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.framerates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.framerates.is_empty()
    }

    /// Mean of the retained samples
    pub fn average(&self) -> Option<f64> {
        if self.framerates.is_empty() {
            return None;
        }
        Some(self.framerates.iter().sum::<f64>() / self.framerates.len() as f64)
    }

    pub fn status_text(&self, state: &ViewerState) -> String {
        let mut text = match self.average() {
            Some(fps) => format!("Framerate:{}fps", fps.round()),
            None => "Framerate:--fps".to_string(),
        };

        if let Some(picked) = &state.picked {
            text.push_str(SEPARATOR);
            text.push_str(&format!(
                "Picked: {}  strip = {}  type = {}",
                picked.gprim, picked.strip, picked.kind
            ));
        }
        if let Some(active) = &state.active {
            text.push_str(SEPARATOR);
            text.push_str(&format!("Active: {active}"));
        }
        if let Some([x, y, z]) = state.located {
            text.push_str(SEPARATOR);
            text.push_str(&format!("({x}, \u{a0} {y}, \u{a0} {z})"));
        }
        text
    }

    pub fn refresh_display(&self, state: &ViewerState, sink: &dyn StatusSink) {
        sink.show(&self.status_text(state));
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(10)
    }
}
