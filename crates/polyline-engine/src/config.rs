pub const MAX_POINTS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawingConfig {
    /// Committed vertices a single polyline may hold.
    pub max_points: usize,
    /// Commands kept on the undo stack before the oldest is evicted,
    /// `None` keeps the whole session undoable.
    pub history_limit: Option<usize>,
    /// Lines the drawing layer accepts, `None` for unbounded.
    pub line_limit: Option<usize>,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            max_points: MAX_POINTS,
            history_limit: None,
            line_limit: None,
        }
    }
}

impl DrawingConfig {
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        // 두 점 미만으로는 선이 만들어지지 않는다
        self.max_points = max_points.max(2);
        self
    }

    pub fn with_history_limit(mut self, history_limit: Option<usize>) -> Self {
        self.history_limit = history_limit.map(|limit| limit.max(1));
        self
    }

    pub fn with_line_limit(mut self, line_limit: Option<usize>) -> Self {
        self.line_limit = line_limit;
        self
    }
}
