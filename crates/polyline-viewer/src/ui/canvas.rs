use eframe::egui;
use polyline_engine::{Drawing, InputEvent, Key, Point, Polyline};

use crate::ui::framework::*;

pub const PREVIEW_COLOR: egui::Color32 = egui::Color32::RED;
pub const LINE_COLOR: egui::Color32 = egui::Color32::BLACK;
pub const STROKE_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    Input { pointer: Point, event: InputEvent },
    Undo,
    Redo,
}

pub trait CanvasContext:
    ViewContext<Model = Drawing, Command = CanvasCommand> + UndoableViewContext
{
}

pub enum CanvasViewEvent {
    PointerMoved(Point),
    PointerClicked(Point),
    KeyPressed(Key),
    UndoRequested,
    RedoRequested,
}

pub struct CanvasViewState {
    size: egui::Vec2,
    last_pointer: Option<Point>,
}

impl CanvasViewState {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: egui::vec2(width, height),
            last_pointer: None,
        }
    }

    fn undo_redo_buttons<C: CanvasContext>(ui: &mut egui::Ui, ctx: &C, events: &mut Vec<CanvasViewEvent>) {
        ui.horizontal(|ui| {
            let undo = ui.add_enabled(ctx.can_undo(), egui::widgets::Button::new("Undo"));
            let undo = match ctx.undo_hint() {
                Some(hint) => undo.on_hover_text(hint),
                None => undo,
            };
            if undo.clicked() {
                events.push(CanvasViewEvent::UndoRequested);
            }

            let redo = ui.add_enabled(ctx.can_redo(), egui::widgets::Button::new("Redo"));
            let redo = match ctx.redo_hint() {
                Some(hint) => redo.on_hover_text(hint),
                None => redo,
            };
            if redo.clicked() {
                events.push(CanvasViewEvent::RedoRequested);
            }
        });
    }

    fn keyboard(ui: &egui::Ui, events: &mut Vec<CanvasViewEvent>) {
        let input = &ui.ctx().input();
        // NOTE: cmd+z / cmd+shift+z 는 상태 기계로 보내지 않는다
        if input.modifiers.command && input.modifiers.shift && input.key_pressed(egui::Key::Z) {
            events.push(CanvasViewEvent::RedoRequested);
            return;
        } else if input.modifiers.command && input.key_pressed(egui::Key::Z) {
            events.push(CanvasViewEvent::UndoRequested);
            return;
        }

        for e in &input.events {
            if let egui::Event::Key { key, pressed: true, .. } = e {
                log::debug!("key pressed: {:?}", key);
                events.push(CanvasViewEvent::KeyPressed(key_from_egui(*key)));
            }
        }
    }

    fn paint(painter: &egui::Painter, origin: egui::Pos2, line: &Polyline, color: egui::Color32) {
        let points: Vec<egui::Pos2> = line.points.iter().map(|p| to_screen(*p, origin)).collect();
        painter.add(egui::Shape::line(points, egui::Stroke::new(STROKE_WIDTH, color)));
    }
}

impl<C: CanvasContext> ViewState<C> for CanvasViewState {
    type Event = CanvasViewEvent;

    fn interact(&mut self, ui: &mut egui::Ui, ctx: &C) -> Vec<Self::Event> {
        let mut events = Vec::new();

        Self::undo_redo_buttons(ui, ctx, &mut events);

        egui::Frame::canvas(ui.style()).show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(self.size, egui::Sense::click());
            let origin = response.rect.min;

            let pointer = response.hover_pos().map(|pos| to_canvas(pos, origin));
            if let Some(p) = pointer {
                if self.last_pointer != Some(p) {
                    events.push(CanvasViewEvent::PointerMoved(p));
                }
                self.last_pointer = Some(p);
            }

            if response.clicked() {
                let at = response.interact_pointer_pos().map(|pos| to_canvas(pos, origin)).or(pointer);
                if let Some(p) = at {
                    events.push(CanvasViewEvent::PointerClicked(p));
                }
            }

            let drawing = ctx.model();
            for line in drawing.permanent().lines() {
                Self::paint(&painter, origin, line, LINE_COLOR);
            }
            for line in drawing.preview().lines() {
                Self::paint(&painter, origin, line, PREVIEW_COLOR);
            }
        });

        Self::keyboard(ui, &mut events);

        events
    }

    fn handle_view_event(&mut self, ctx: &mut C, event: Self::Event) {
        // 키 입력에는 좌표가 없으므로 마지막으로 본 포인터 위치를 쓴다
        let last = self.last_pointer.unwrap_or_else(|| Point::new(0.0, 0.0));
        match event {
            CanvasViewEvent::PointerMoved(pointer) => ctx.push_command(CanvasCommand::Input {
                pointer,
                event: InputEvent::PointerMove,
            }),
            CanvasViewEvent::PointerClicked(pointer) => ctx.push_command(CanvasCommand::Input {
                pointer,
                event: InputEvent::PointerClick,
            }),
            CanvasViewEvent::KeyPressed(key) => ctx.push_command(CanvasCommand::Input {
                pointer: last,
                event: InputEvent::KeyPress(key),
            }),
            CanvasViewEvent::UndoRequested => ctx.request_undo(),
            CanvasViewEvent::RedoRequested => ctx.request_redo(),
        }
    }
}

pub fn key_from_egui(key: egui::Key) -> Key {
    match key {
        egui::Key::Enter => Key::Enter,
        egui::Key::Escape => Key::Escape,
        egui::Key::Backspace => Key::Backspace,
        other => Key::Other(format!("{:?}", other)),
    }
}

fn to_canvas(pos: egui::Pos2, origin: egui::Pos2) -> Point {
    let v = pos - origin;
    Point::new(v.x, v.y)
}

fn to_screen(p: Point, origin: egui::Pos2) -> egui::Pos2 {
    origin + egui::vec2(p.x, p.y)
}
