use std::cell::Cell;
use std::rc::Rc;

use eframe::egui;
use polyline_engine::{CommandResult, Drawing, Outcome, UndoAvailability};

use crate::options::ViewerOptions;
use crate::ui::canvas::{CanvasCommand, CanvasContext, CanvasViewState};
use crate::ui::framework::*;

pub struct RootViewState {
    drawing: Drawing,
    canvas: CanvasViewState,
    availability: Rc<Cell<UndoAvailability>>,
    status: String,
}

impl RootViewState {
    pub fn new(options: &ViewerOptions) -> Self {
        let mut drawing = Drawing::new(&options.config);

        // 버튼 활성화 여부는 UndoManager 가 알려주는 값을 그대로 쓴다
        let availability = Rc::new(Cell::new(drawing.undo_manager().availability()));
        let sink = availability.clone();
        drawing.undo_manager_mut().subscribe(move |a| sink.set(a));

        Self {
            drawing,
            canvas: CanvasViewState::new(options.canvas_width, options.canvas_height),
            availability,
            status: "Click to start a line".into(),
        }
    }

    pub fn update(&mut self, egui_ctx: &egui::Context) {
        egui_ctx.set_visuals(egui::Visuals::light());

        self.bottom_panel(egui_ctx);

        let mut commands = Vec::new();
        egui::CentralPanel::default().show(egui_ctx, |ui| {
            let mut ctx = CanvasContextImpl {
                drawing: &self.drawing,
                availability: self.availability.get(),
                commands: &mut commands,
            };
            self.canvas.update(ui, &mut ctx);
        });

        // Mutation
        for command in commands {
            self.apply(command);
        }
    }

    fn bottom_panel(&mut self, egui_ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_panel").show(egui_ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.as_str());
                ui.separator();
                ui.label(format!("{} lines", self.drawing.permanent().len()));
                if self.drawing.machine().is_drawing() {
                    ui.separator();
                    ui.label(format!("{} vertices", self.drawing.machine().committed_count()));
                }
            });
        });
    }

    fn apply(&mut self, command: CanvasCommand) {
        let result: CommandResult<Option<String>> = match command {
            CanvasCommand::Input { pointer, event } => {
                self.drawing.set_pointer(pointer);
                self.drawing.input(&event).map(status_of)
            }
            CanvasCommand::Undo => self
                .drawing
                .undo()
                .map(|d| d.map(|d| format!("Undo: {}", d))),
            CanvasCommand::Redo => self
                .drawing
                .redo()
                .map(|d| d.map(|d| format!("Redo: {}", d))),
        };

        match result {
            Ok(Some(status)) => self.status = status,
            Ok(None) => {}
            Err(e) => {
                log::warn!("{}", e);
                self.status = e.to_string();
            }
        }
    }
}

fn status_of(outcome: Outcome) -> Option<String> {
    let status = match outcome {
        Outcome::Started => "Drawing: click to add, Enter to finish, Esc to cancel",
        Outcome::Finished => "Line committed",
        Outcome::Abandoned => "Line abandoned",
        _ => return None,
    };
    Some(status.to_string())
}

struct CanvasContextImpl<'a> {
    drawing: &'a Drawing,
    availability: UndoAvailability,
    commands: &'a mut Vec<CanvasCommand>,
}

impl ViewContext for CanvasContextImpl<'_> {
    type Model = Drawing;
    type Command = CanvasCommand;

    fn model(&self) -> &Drawing {
        self.drawing
    }

    fn push_command(&mut self, command: CanvasCommand) {
        self.commands.push(command);
    }
}

impl UndoableViewContext for CanvasContextImpl<'_> {
    fn can_undo(&self) -> bool {
        self.availability.can_undo
    }

    fn can_redo(&self) -> bool {
        self.availability.can_redo
    }

    fn undo_hint(&self) -> Option<String> {
        self.drawing.undo_manager().undo_description()
    }

    fn redo_hint(&self) -> Option<String> {
        self.drawing.undo_manager().redo_description()
    }

    fn request_undo(&mut self) {
        self.commands.push(CanvasCommand::Undo);
    }

    fn request_redo(&mut self) {
        self.commands.push(CanvasCommand::Redo);
    }
}

impl CanvasContext for CanvasContextImpl<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use polyline_engine::{InputEvent, Key, Point};

    fn input(x: f32, y: f32, event: InputEvent) -> CanvasCommand {
        CanvasCommand::Input {
            pointer: Point::new(x, y),
            event,
        }
    }

    #[test]
    fn commands_drive_drawing_and_buttons() {
        let mut root = RootViewState::new(&ViewerOptions::default());
        assert_eq!(root.availability.get(), UndoAvailability::default());

        root.apply(input(0.0, 0.0, InputEvent::PointerClick));
        root.apply(input(10.0, 0.0, InputEvent::PointerClick));
        root.apply(input(10.0, 0.0, InputEvent::KeyPress(Key::Enter)));

        assert_eq!(root.drawing.permanent().len(), 1);
        assert_eq!(root.status, "Line committed");
        assert_eq!(
            root.availability.get(),
            UndoAvailability { can_undo: true, can_redo: false }
        );

        root.apply(CanvasCommand::Undo);
        assert!(root.drawing.permanent().is_empty());
        assert!(root.status.starts_with("Undo: Commit line"));
        assert_eq!(
            root.availability.get(),
            UndoAvailability { can_undo: false, can_redo: true }
        );

        root.apply(CanvasCommand::Redo);
        assert_eq!(root.drawing.permanent().len(), 1);
    }

    #[test]
    fn rejected_commit_shows_error_in_status() {
        let mut options = ViewerOptions::default();
        options.config = options.config.with_line_limit(Some(0));
        let mut root = RootViewState::new(&options);

        root.apply(input(0.0, 0.0, InputEvent::PointerClick));
        root.apply(input(5.0, 5.0, InputEvent::PointerClick));
        root.apply(input(5.0, 5.0, InputEvent::KeyPress(Key::Enter)));

        assert!(root.status.starts_with("could not execute"));
        assert!(!root.drawing.machine().is_drawing());
    }
}
