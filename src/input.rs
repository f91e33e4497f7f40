//! Stroke input: maps mouse and touch events onto grid cells and feeds them
//! into the capture session.

use crate::session::CaptureSession;
use eframe::egui;

/// Screen geometry of the rendered grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub origin: egui::Pos2,
    pub cell_size: f32,
    pub gap: f32,
    pub size: usize,
}

impl GridLayout {
    pub fn new(origin: egui::Pos2, cell_size: f32, gap: f32, size: usize) -> Self {
        Self { origin, cell_size, gap, size }
    }

    fn pitch(&self) -> f32 {
        self.cell_size + self.gap
    }

    /// Width and height of the whole grid, gaps included
    pub fn extent(&self) -> egui::Vec2 {
        let side = self.size as f32 * self.cell_size + self.size.saturating_sub(1) as f32 * self.gap;
        egui::vec2(side, side)
    }

    /// Row-major index of the cell under `pos`. Gaps and points outside the
    /// grid hit nothing.
    pub fn cell_at(&self, pos: egui::Pos2) -> Option<usize> {
        let col = self.axis_index(pos.x - self.origin.x)?;
        let row = self.axis_index(pos.y - self.origin.y)?;
        Some(row * self.size + col)
    }

    fn axis_index(&self, offset: f32) -> Option<usize> {
        if !offset.is_finite() || offset < 0.0 {
            return None;
        }
        let pitch = self.pitch();
        let index = (offset / pitch).floor() as usize;
        if index >= self.size || offset - index as f32 * pitch >= self.cell_size {
            return None;
        }
        Some(index)
    }

    pub fn cell_rect(&self, index: usize) -> egui::Rect {
        let (row, col) = (index / self.size, index % self.size);
        let min = self.origin + egui::vec2(col as f32 * self.pitch(), row as f32 * self.pitch());
        egui::Rect::from_min_size(min, egui::vec2(self.cell_size, self.cell_size))
    }
}

/// Channel-independent stroke command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeEvent {
    Begin(usize),
    Continue(usize),
    End,
}

/// Translate one raw input event. Presses and moves only count over a
/// cell; releases end the stroke wherever they happen.
pub fn translate(event: &egui::Event, layout: &GridLayout) -> Option<StrokeEvent> {
    match event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            ..
        } => {
            if *pressed {
                layout.cell_at(*pos).map(StrokeEvent::Begin)
            } else {
                Some(StrokeEvent::End)
            }
        }
        egui::Event::PointerMoved(pos) => layout.cell_at(*pos).map(StrokeEvent::Continue),
        egui::Event::Touch { phase, pos, .. } => match phase {
            egui::TouchPhase::Start => layout.cell_at(*pos).map(StrokeEvent::Begin),
            egui::TouchPhase::Move => layout.cell_at(*pos).map(StrokeEvent::Continue),
            egui::TouchPhase::End | egui::TouchPhase::Cancel => Some(StrokeEvent::End),
        },
        egui::Event::WindowFocused(false) => Some(StrokeEvent::End),
        _ => None,
    }
}

pub fn apply(session: &mut CaptureSession, stroke: StrokeEvent) {
    match stroke {
        StrokeEvent::Begin(cell) => session.begin_stroke(cell),
        StrokeEvent::Continue(cell) => session.continue_stroke(cell),
        StrokeEvent::End => session.end_stroke(),
    }
}

/// Feed a frame's worth of events into the session in order.
pub fn feed(session: &mut CaptureSession, layout: &GridLayout, events: &[egui::Event]) {
    for stroke in events.iter().filter_map(|e| translate(e, layout)) {
        apply(session, stroke);
    }
}
