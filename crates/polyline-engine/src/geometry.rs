use cgmath::Point2;
use uuid::Uuid;

pub type Point = Point2<f32>;

pub type LineId = Uuid;

/// 식별자가 붙은 꼭짓점 목록. 미리보기 레이어와 그림 레이어가 공유하는 단위다.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub id: LineId,
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
        }
    }

    pub fn abbreviated_id(&self) -> String {
        self.id.to_string()[..8].to_string()
    }
}

/*
작성 중인 polyline 의 꼭짓점 버퍼.

- 마지막 원소는 항상 미리보기(preview) 점이다. 포인터를 따라 움직이고, 확정된 꼭짓점 수에는 포함되지 않는다.
- 나머지 원소는 모두 확정(committed)된 꼭짓점이다.
- 버퍼는 절대 비지 않는다. 즉 preview 점은 항상 존재한다.
 */
#[derive(Clone, Debug)]
pub struct GeometryBuffer {
    line: Polyline,
}

impl GeometryBuffer {
    pub fn start(p: Point) -> Self {
        Self {
            line: Polyline::new(vec![p, p]),
        }
    }

    pub fn id(&self) -> LineId {
        self.line.id
    }

    pub fn committed_count(&self) -> usize {
        self.line.points.len() - 1
    }

    pub fn committed(&self) -> &[Point] {
        &self.line.points[..self.committed_count()]
    }

    pub fn preview(&self) -> Point {
        self.line.points[self.committed_count()]
    }

    pub fn set_preview(&mut self, p: Point) {
        let last = self.committed_count();
        self.line.points[last] = p;
    }

    /// Moves the preview to `p`, promotes it and appends a fresh preview on top.
    pub fn commit_preview(&mut self, p: Point) {
        self.set_preview(p);
        self.line.points.push(p);
    }

    /// Drops the most recently committed vertex. The first vertex is never retracted.
    pub fn retract(&mut self, p: Point) -> bool {
        if self.committed_count() <= 1 {
            return false;
        }
        let last_committed = self.committed_count() - 1;
        self.line.points.remove(last_committed);
        self.set_preview(p);
        true
    }

    pub fn as_polyline(&self) -> &Polyline {
        &self.line
    }

    pub fn into_committed(mut self) -> Polyline {
        self.line.points.pop();
        self.line
    }
}
