use thiserror::Error;

use crate::geometry::{LineId, Point, Polyline};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("layer is full ({limit} lines)")]
    Full { limit: usize },
    #[error("line {0} is already on the layer")]
    DuplicateLine(LineId),
    #[error("line {0} is not on the layer")]
    UnknownLine(LineId),
    #[error("line needs at least 2 vertices, got {count}")]
    Degenerate { count: usize },
}

pub trait PointerSource {
    fn pointer_position(&self) -> Point;
}

/// 작성 중인 선을 보여주는 임시 레이어
pub trait PreviewSurface {
    fn add(&mut self, line: &Polyline);
    fn remove(&mut self, id: LineId);
    fn redraw(&mut self, line: &Polyline);
}

/// 확정된 선이 올라가는 그림 레이어
pub trait PermanentSurface {
    fn add(&mut self, line: &Polyline) -> Result<(), SurfaceError>;
    fn remove(&mut self, id: LineId) -> Result<(), SurfaceError>;
    fn contains(&self, id: LineId) -> bool;
}

/// In-memory layer. The viewer paints straight from `lines()`.
#[derive(Debug, Default)]
pub struct Layer {
    lines: Vec<Polyline>,
    line_limit: Option<usize>,
    redraw_count: usize,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line_limit(line_limit: Option<usize>) -> Self {
        Self {
            line_limit,
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[Polyline] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn redraw_count(&self) -> usize {
        self.redraw_count
    }

    fn position(&self, id: LineId) -> Option<usize> {
        self.lines.iter().position(|l| l.id == id)
    }
}

impl PreviewSurface for Layer {
    fn add(&mut self, line: &Polyline) {
        if self.position(line.id).is_none() {
            self.lines.push(line.clone());
        }
        self.redraw_count += 1;
    }

    fn remove(&mut self, id: LineId) {
        if let Some(index) = self.position(id) {
            self.lines.remove(index);
        }
        self.redraw_count += 1;
    }

    fn redraw(&mut self, line: &Polyline) {
        match self.position(line.id) {
            Some(index) => self.lines[index].points.clone_from(&line.points),
            None => log::warn!("redraw of detached line {}", line.abbreviated_id()),
        }
        self.redraw_count += 1;
    }
}

impl PermanentSurface for Layer {
    fn add(&mut self, line: &Polyline) -> Result<(), SurfaceError> {
        if line.points.len() < 2 {
            return Err(SurfaceError::Degenerate {
                count: line.points.len(),
            });
        }
        if self.position(line.id).is_some() {
            return Err(SurfaceError::DuplicateLine(line.id));
        }
        if let Some(limit) = self.line_limit {
            if self.lines.len() >= limit {
                return Err(SurfaceError::Full { limit });
            }
        }
        self.lines.push(line.clone());
        Ok(())
    }

    fn remove(&mut self, id: LineId) -> Result<(), SurfaceError> {
        let index = self.position(id).ok_or(SurfaceError::UnknownLine(id))?;
        self.lines.remove(index);
        Ok(())
    }

    fn contains(&self, id: LineId) -> bool {
        self.position(id).is_some()
    }
}
