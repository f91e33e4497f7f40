//! Drawing grid: layout, pointer/touch input and cell painting

use super::App;
use crate::constants::GRID_SIZE;
use crate::input::{self, GridLayout};
use crate::theme;
use crate::ui::components::paint_cell;
use eframe::egui;

impl App {
    pub(crate) fn render_canvas(&mut self, ui: &mut egui::Ui) {
        theme::canvas_frame().show(ui, |ui| {
            let extent = GridLayout::new(egui::Pos2::ZERO, theme::CELL_SIZE, theme::CELL_GAP, GRID_SIZE).extent();
            let (rect, response) = ui.allocate_exact_size(extent, egui::Sense::click_and_drag());
            let layout = GridLayout::new(rect.min, theme::CELL_SIZE, theme::CELL_GAP, GRID_SIZE);

            let events = ui.input(|i| i.events.clone());
            self.handle_grid_input(&layout, &events);

            if self.session.is_drawing() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
            } else if response.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
            }
            let hovered_cell = response
                .hover_pos()
                .filter(|_| !self.input_blocked())
                .and_then(|pos| layout.cell_at(pos));

            let painter = ui.painter_at(rect);
            let grid = self.session.grid();
            for index in 0..grid.cells().len() {
                paint_cell(
                    &painter,
                    layout.cell_rect(index),
                    grid.is_painted(index),
                    hovered_cell == Some(index),
                );
            }
        });
    }

    /// Feed this frame's pointer and touch events to the session, or end any
    /// stroke while a dialog holds input.
    pub(crate) fn handle_grid_input(&mut self, layout: &GridLayout, events: &[egui::Event]) {
        if self.input_blocked() {
            self.session.end_stroke();
        } else {
            input::feed(&mut self.session, layout, events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AlertKind;
    use crate::settings::Settings;
    use tempfile::tempdir;

    fn layout() -> GridLayout {
        GridLayout::new(egui::pos2(0.0, 0.0), 30.0, 2.0, GRID_SIZE)
    }

    fn drag_over(cells: &[usize]) -> Vec<egui::Event> {
        let layout = layout();
        let mut events = vec![egui::Event::PointerButton {
            pos: layout.cell_rect(cells[0]).center(),
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        }];
        events.extend(cells[1..].iter().map(|&i| egui::Event::PointerMoved(layout.cell_rect(i).center())));
        events
    }

    #[test]
    fn open_alert_suspends_grid_input() {
        let dir = tempdir().unwrap();
        let mut app = App::with_settings(Settings::default(), dir.path().to_path_buf());
        app.push_alert(AlertKind::Info, "Current samples: 0");

        app.handle_grid_input(&layout(), &drag_over(&[4, 5, 6]));
        assert_eq!(app.session.grid().painted_count(), 0);
        assert!(!app.session.is_drawing());

        app.alerts.clear();
        app.handle_grid_input(&layout(), &drag_over(&[4, 5, 6]));
        assert_eq!(app.session.grid().painted_count(), 3);
        assert!(app.session.is_drawing());
    }

    #[test]
    fn opening_settings_mid_stroke_ends_it() {
        let dir = tempdir().unwrap();
        let mut app = App::with_settings(Settings::default(), dir.path().to_path_buf());
        app.handle_grid_input(&layout(), &drag_over(&[0, 1]));
        assert!(app.session.is_drawing());

        app.show_settings = true;
        let layout = layout();
        app.handle_grid_input(&layout, &[egui::Event::PointerMoved(layout.cell_rect(2).center())]);
        assert!(!app.session.is_drawing());
        assert!(!app.session.grid().is_painted(2));
        assert_eq!(app.session.grid().painted_count(), 2);
    }
}
