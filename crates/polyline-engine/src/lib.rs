mod command;
mod config;
mod geometry;
mod machine;
mod surface;
mod undo_manager;

// 엔진은 창이나 UI 에 대해서는 몰라야 한다.
// 입력 이벤트를 받아서 레이어를 조작하고, 되돌릴 수 있는 작업은 UndoManager 에 맡긴다.
// 그리는 일은 레이어를 구현하는 쪽(viewer)의 책임이다.

pub use cgmath;

pub use crate::command::{Command, CommandError, CommandResult, CommitLineCommand};
pub use crate::config::{DrawingConfig, MAX_POINTS};
pub use crate::geometry::{GeometryBuffer, LineId, Point, Polyline};
pub use crate::machine::{ConstructionState, ConstructionStateMachine, DrawingContext, InputEvent, Key, Outcome};
pub use crate::surface::{Layer, PermanentSurface, PointerSource, PreviewSurface, SurfaceError};
pub use crate::undo_manager::{UndoAvailability, UndoManager};

/// 한 화면에 필요한 엔진 상태를 한 곳에 묶는다.
/// 상태 기계, 두 레이어, undo 기록을 모두 소유하고 포인터 위치만 바깥에서 받는다.
pub struct Drawing {
    machine: ConstructionStateMachine,
    undo_manager: UndoManager,
    preview: Layer,
    permanent: Layer,
    pointer: Point,
}

impl Drawing {
    pub fn new(config: &DrawingConfig) -> Self {
        Self {
            machine: ConstructionStateMachine::with_max_points(config.max_points),
            undo_manager: UndoManager::with_history_limit(config.history_limit),
            preview: Layer::new(),
            permanent: Layer::with_line_limit(config.line_limit),
            pointer: Point::new(0.0, 0.0),
        }
    }

    pub fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    pub fn input(&mut self, event: &InputEvent) -> CommandResult<Outcome> {
        let mut ctx = DrawingContext {
            pointer: &self.pointer,
            preview: &mut self.preview,
            permanent: &mut self.permanent,
            undo_manager: &mut self.undo_manager,
        };
        self.machine.handle(event, &mut ctx)
    }

    pub fn undo(&mut self) -> CommandResult<Option<String>> {
        self.undo_manager.undo(&mut self.permanent)
    }

    pub fn redo(&mut self) -> CommandResult<Option<String>> {
        self.undo_manager.redo(&mut self.permanent)
    }

    pub fn machine(&self) -> &ConstructionStateMachine {
        &self.machine
    }

    pub fn undo_manager(&self) -> &UndoManager {
        &self.undo_manager
    }

    pub fn undo_manager_mut(&mut self) -> &mut UndoManager {
        &mut self.undo_manager
    }

    pub fn preview(&self) -> &Layer {
        &self.preview
    }

    pub fn permanent(&self) -> &Layer {
        &self.permanent
    }
}
