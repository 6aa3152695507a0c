use std::collections::VecDeque;

use crate::command::{Command, CommandResult};
use crate::surface::PermanentSurface;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UndoAvailability {
    pub can_undo: bool,
    pub can_redo: bool,
}

type AvailabilityListener = Box<dyn FnMut(UndoAvailability)>;

/// Two stacks of commands, most recent at the back.
///
/// A command lives in at most one stack. Executing a fresh command drops the
/// redo branch, so a stale redo can never resurrect a line over newer edits.
pub struct UndoManager {
    undo_stack: VecDeque<Command>,
    redo_stack: VecDeque<Command>,
    history_limit: Option<usize>,
    listeners: Vec<AvailabilityListener>,
}

impl UndoManager {
    pub fn new() -> Self {
        Self::with_history_limit(None)
    }

    /// With `Some(limit)` the oldest command is forgotten once the undo stack
    /// grows past `limit`. Its line stays on the surface.
    pub fn with_history_limit(history_limit: Option<usize>) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            history_limit: history_limit.map(|limit| limit.max(1)),
            listeners: Vec::new(),
        }
    }

    /// Registers a callback fired after every history change with the new
    /// undo/redo availability. The UI uses it to enable its buttons.
    pub fn subscribe(&mut self, listener: impl FnMut(UndoAvailability) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn availability(&self) -> UndoAvailability {
        UndoAvailability {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Applies `command` and records it. On failure the command is dropped
    /// and both stacks stay exactly as they were.
    pub fn execute_command<S: PermanentSurface + ?Sized>(
        &mut self,
        command: Command,
        surface: &mut S,
    ) -> CommandResult<()> {
        let result = command.execute(surface);
        match &result {
            Ok(()) => {
                log::info!("executed: {}", command);
                self.undo_stack.push_back(command);
                self.redo_stack.clear();
                if let Some(limit) = self.history_limit {
                    while self.undo_stack.len() > limit {
                        if let Some(evicted) = self.undo_stack.pop_front() {
                            log::debug!("history full, dropped: {}", evicted);
                        }
                    }
                }
            }
            Err(e) => log::warn!("{}", e),
        }
        self.emit_availability();
        result
    }

    /// Returns `Ok(None)` when there is nothing to undo.
    pub fn undo<S: PermanentSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> CommandResult<Option<String>> {
        let Some(command) = self.undo_stack.pop_back() else { return Ok(None); };
        if let Err(e) = command.undo(surface) {
            self.undo_stack.push_back(command);
            return Err(e);
        }
        log::info!("undone: {}", command);
        let description = command.description();
        self.redo_stack.push_back(command);
        self.emit_availability();
        Ok(Some(description))
    }

    /// Returns `Ok(None)` when there is nothing to redo.
    pub fn redo<S: PermanentSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> CommandResult<Option<String>> {
        let Some(command) = self.redo_stack.pop_back() else { return Ok(None); };
        if let Err(e) = command.execute(surface) {
            self.redo_stack.push_back(command);
            return Err(e);
        }
        log::info!("redone: {}", command);
        let description = command.description();
        self.undo_stack.push_back(command);
        self.emit_availability();
        Ok(Some(description))
    }

    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.back().map(Command::description)
    }

    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.back().map(Command::description)
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.emit_availability();
    }

    fn emit_availability(&mut self) {
        let availability = self.availability();
        for listener in self.listeners.iter_mut() {
            listener(availability);
        }
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}
