use crate::command::{Command, CommandResult};
use crate::config::MAX_POINTS;
use crate::geometry::{GeometryBuffer, Point};
use crate::surface::{PermanentSurface, PointerSource, PreviewSurface};
use crate::undo_manager::UndoManager;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
    Backspace,
    Other(String),
}

impl Key {
    /// Maps a key name as reported by the shell ("Enter", "Escape", ...).
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" | "Return" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Backspace" => Key::Backspace,
            other => Key::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerClick,
    PointerMove,
    KeyPress(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Started,
    PreviewMoved,
    VertexCommitted,
    VertexRetracted,
    Finished,
    Abandoned,
    Ignored,
}

/// 작성 중인 buffer 는 Drawing 상태가 소유한다. Idle 에서는 buffer 가 존재할 수 없다.
#[derive(Debug)]
pub enum ConstructionState {
    Idle,
    Drawing(GeometryBuffer),
}

/// Everything an action may touch, borrowed for the duration of one event.
pub struct DrawingContext<'a> {
    pub pointer: &'a dyn PointerSource,
    pub preview: &'a mut dyn PreviewSurface,
    pub permanent: &'a mut dyn PermanentSurface,
    pub undo_manager: &'a mut UndoManager,
}

impl PointerSource for Point {
    fn pointer_position(&self) -> Point {
        *self
    }
}

pub struct ConstructionStateMachine {
    state: ConstructionState,
    max_points: usize,
}

impl ConstructionStateMachine {
    pub fn new() -> Self {
        Self::with_max_points(MAX_POINTS)
    }

    pub fn with_max_points(max_points: usize) -> Self {
        Self {
            state: ConstructionState::Idle,
            max_points: max_points.max(2),
        }
    }

    pub fn state(&self) -> &ConstructionState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ConstructionState::Drawing(_))
    }

    pub fn buffer(&self) -> Option<&GeometryBuffer> {
        match &self.state {
            ConstructionState::Idle => None,
            ConstructionState::Drawing(buffer) => Some(buffer),
        }
    }

    pub fn committed_count(&self) -> usize {
        self.buffer().map(GeometryBuffer::committed_count).unwrap_or(0)
    }

    /// Consumes one input event. A rejected commit is reported as an error,
    /// but the machine is back in `Idle` either way.
    pub fn handle(&mut self, event: &InputEvent, ctx: &mut DrawingContext) -> CommandResult<Outcome> {
        use ConstructionState::*;
        use InputEvent::*;

        log::debug!("input: {:?}", event);
        let state = std::mem::replace(&mut self.state, Idle);
        let (next, outcome) = match (event, state) {
            (PointerClick, Idle) => {
                let buffer = GeometryBuffer::start(ctx.pointer.pointer_position());
                ctx.preview.add(buffer.as_polyline());
                (Drawing(buffer), Outcome::Started)
            }
            (PointerMove, Drawing(mut buffer)) => {
                buffer.set_preview(ctx.pointer.pointer_position());
                ctx.preview.redraw(buffer.as_polyline());
                (Drawing(buffer), Outcome::PreviewMoved)
            }
            (PointerClick, Drawing(mut buffer)) if buffer.committed_count() < self.max_points => {
                buffer.commit_preview(ctx.pointer.pointer_position());
                ctx.preview.redraw(buffer.as_polyline());
                (Drawing(buffer), Outcome::VertexCommitted)
            }
            // 꽉 찬 상태에서의 클릭은 버리지 않고 선을 완성한다
            (PointerClick, Drawing(buffer)) => return Self::finish(buffer, ctx),
            (KeyPress(Key::Enter), Drawing(buffer)) => return Self::finish(buffer, ctx),
            (KeyPress(Key::Escape), Drawing(buffer)) => {
                ctx.preview.remove(buffer.id());
                log::debug!("abandoned line with {} vertices", buffer.committed_count());
                (Idle, Outcome::Abandoned)
            }
            (KeyPress(Key::Backspace), Drawing(mut buffer)) if buffer.committed_count() > 1 => {
                buffer.retract(ctx.pointer.pointer_position());
                ctx.preview.redraw(buffer.as_polyline());
                (Drawing(buffer), Outcome::VertexRetracted)
            }
            (_, state) => (state, Outcome::Ignored),
        };
        self.state = next;
        Ok(outcome)
    }

    fn finish(buffer: GeometryBuffer, ctx: &mut DrawingContext) -> CommandResult<Outcome> {
        ctx.preview.remove(buffer.id());
        let line = buffer.into_committed();
        if line.points.len() <= 1 {
            log::debug!("nothing to commit, line {} dropped", line.abbreviated_id());
            return Ok(Outcome::Abandoned);
        }
        ctx.undo_manager
            .execute_command(Command::commit_line(line), &mut *ctx.permanent)?;
        Ok(Outcome::Finished)
    }
}

impl Default for ConstructionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Layer;

    struct World {
        machine: ConstructionStateMachine,
        preview: Layer,
        permanent: Layer,
        undo_manager: UndoManager,
        pointer: Point,
    }

    impl World {
        fn new() -> Self {
            Self {
                machine: ConstructionStateMachine::new(),
                preview: Layer::new(),
                permanent: Layer::new(),
                undo_manager: UndoManager::new(),
                pointer: Point::new(0.0, 0.0),
            }
        }

        fn send(&mut self, event: InputEvent) -> Outcome {
            let mut ctx = DrawingContext {
                pointer: &self.pointer,
                preview: &mut self.preview,
                permanent: &mut self.permanent,
                undo_manager: &mut self.undo_manager,
            };
            self.machine.handle(&event, &mut ctx).unwrap()
        }

        fn click(&mut self, x: f32, y: f32) -> Outcome {
            self.pointer = Point::new(x, y);
            self.send(InputEvent::PointerClick)
        }

        fn move_to(&mut self, x: f32, y: f32) -> Outcome {
            self.pointer = Point::new(x, y);
            self.send(InputEvent::PointerMove)
        }

        fn key(&mut self, name: &str) -> Outcome {
            self.send(InputEvent::KeyPress(Key::from_name(name)))
        }
    }

    #[test]
    fn key_names() {
        assert_eq!(Key::from_name("Enter"), Key::Enter);
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("Backspace"), Key::Backspace);
        assert_eq!(Key::from_name("a"), Key::Other("a".into()));
    }

    #[test]
    fn idle_ignores_everything_but_click() {
        let mut world = World::new();
        assert_eq!(world.move_to(1.0, 1.0), Outcome::Ignored);
        assert_eq!(world.key("Enter"), Outcome::Ignored);
        assert_eq!(world.key("Escape"), Outcome::Ignored);
        assert_eq!(world.key("Backspace"), Outcome::Ignored);
        assert!(matches!(world.machine.state(), ConstructionState::Idle));
        assert_eq!(world.preview.redraw_count(), 0);
    }

    #[test]
    fn click_starts_a_line_on_the_preview_layer() {
        let mut world = World::new();
        assert_eq!(world.click(3.0, 4.0), Outcome::Started);

        match world.machine.state() {
            ConstructionState::Drawing(buffer) => assert_eq!(buffer.committed(), &[Point::new(3.0, 4.0)]),
            ConstructionState::Idle => panic!("expected Drawing"),
        }
        assert_eq!(world.machine.committed_count(), 1);
        assert_eq!(world.preview.len(), 1);
        assert_eq!(
            world.preview.lines()[0].points,
            vec![Point::new(3.0, 4.0), Point::new(3.0, 4.0)]
        );
    }

    #[test]
    fn move_updates_preview_only() {
        let mut world = World::new();
        world.click(0.0, 0.0);
        assert_eq!(world.move_to(5.0, 6.0), Outcome::PreviewMoved);

        let buffer = world.machine.buffer().unwrap();
        assert_eq!(buffer.committed_count(), 1);
        assert_eq!(buffer.preview(), Point::new(5.0, 6.0));
        assert_eq!(world.preview.lines()[0].points[1], Point::new(5.0, 6.0));
    }

    #[test]
    fn not_full_guard_holds_below_max_points() {
        let mut world = World::new();
        world.click(0.0, 0.0);
        for c in 1..MAX_POINTS {
            assert_eq!(world.machine.committed_count(), c);
            assert_eq!(world.click(c as f32, 0.0), Outcome::VertexCommitted);
        }
        assert_eq!(world.machine.committed_count(), MAX_POINTS);

        // 상한에 도달한 뒤의 클릭은 선을 완성한다
        assert_eq!(world.click(99.0, 99.0), Outcome::Finished);
        assert!(!world.machine.is_drawing());
        assert_eq!(world.permanent.lines()[0].points.len(), MAX_POINTS);
    }

    #[test]
    fn small_max_points_finishes_early() {
        let mut world = World::new();
        world.machine = ConstructionStateMachine::with_max_points(2);
        world.click(0.0, 0.0);
        assert_eq!(world.click(1.0, 0.0), Outcome::VertexCommitted);
        assert_eq!(world.click(2.0, 0.0), Outcome::Finished);
        assert_eq!(
            world.permanent.lines()[0].points,
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]
        );
    }

    #[test]
    fn backspace_retracts_last_committed_vertex() {
        let mut world = World::new();
        world.click(0.0, 0.0);
        world.click(10.0, 0.0);
        world.click(10.0, 10.0);
        world.move_to(4.0, 4.0);

        assert_eq!(world.key("Backspace"), Outcome::VertexRetracted);
        let buffer = world.machine.buffer().unwrap();
        assert_eq!(buffer.committed(), &[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        assert_eq!(buffer.preview(), Point::new(4.0, 4.0));
    }

    #[test]
    fn backspace_is_ignored_with_a_single_vertex() {
        let mut world = World::new();
        world.click(0.0, 0.0);
        world.move_to(2.0, 2.0);

        assert_eq!(world.key("Backspace"), Outcome::Ignored);
        assert!(world.machine.is_drawing());
        assert_eq!(world.machine.committed_count(), 1);
        assert_eq!(world.machine.buffer().unwrap().preview(), Point::new(2.0, 2.0));
    }

    #[test]
    fn enter_commits_through_the_undo_manager() {
        let mut world = World::new();
        world.click(0.0, 0.0);
        world.click(10.0, 0.0);
        world.click(10.0, 10.0);

        assert_eq!(world.key("Enter"), Outcome::Finished);
        assert!(!world.machine.is_drawing());
        assert!(world.preview.is_empty());
        assert_eq!(
            world.permanent.lines()[0].points,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]
        );
        assert!(world.undo_manager.can_undo());
        assert!(!world.undo_manager.can_redo());
    }

    #[test]
    fn enter_with_single_vertex_is_abandonment() {
        let mut world = World::new();
        world.click(0.0, 0.0);
        world.move_to(8.0, 8.0);

        assert_eq!(world.key("Enter"), Outcome::Abandoned);
        assert!(world.permanent.is_empty());
        assert!(world.preview.is_empty());
        assert!(!world.undo_manager.can_undo());
    }

    #[test]
    fn escape_discards_everything() {
        let mut world = World::new();
        world.click(0.0, 0.0);
        world.move_to(3.0, 3.0);
        world.click(3.0, 3.0);
        world.click(6.0, 0.0);

        assert_eq!(world.key("Escape"), Outcome::Abandoned);
        assert!(!world.machine.is_drawing());
        assert!(world.preview.is_empty());
        assert!(world.permanent.is_empty());
        assert_eq!(world.undo_manager.undo_count(), 0);
    }

    #[test]
    fn other_keys_are_ignored_while_drawing() {
        let mut world = World::new();
        world.click(0.0, 0.0);
        world.click(1.0, 1.0);

        assert_eq!(world.key("z"), Outcome::Ignored);
        assert!(world.machine.is_drawing());
        assert_eq!(world.machine.committed_count(), 2);
    }

    #[test]
    fn rejected_commit_returns_to_idle_and_reports() {
        let mut world = World::new();
        world.permanent = Layer::with_line_limit(Some(0));
        world.click(0.0, 0.0);
        world.click(5.0, 5.0);

        let mut ctx = DrawingContext {
            pointer: &world.pointer,
            preview: &mut world.preview,
            permanent: &mut world.permanent,
            undo_manager: &mut world.undo_manager,
        };
        let result = world
            .machine
            .handle(&InputEvent::KeyPress(Key::Enter), &mut ctx);

        assert!(result.is_err());
        assert!(!world.machine.is_drawing());
        assert!(world.preview.is_empty());
        assert!(world.permanent.is_empty());
        assert!(!world.undo_manager.can_undo());
    }
}
