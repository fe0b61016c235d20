use geo::Point;

/// Every point stored under one exact code, in insertion order.
///
/// Entries only exist on terminal trie nodes and always hold at least one
/// point.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    code: String,
    points: Vec<Point>,
}

impl IndexEntry {
    pub(crate) fn new(code: String, first: Point) -> Self {
        Self {
            code,
            points: vec![first],
        }
    }

    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// The code this entry terminates.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Points that hashed to [`Self::code`], oldest first.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of accumulated points. Never zero.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}
