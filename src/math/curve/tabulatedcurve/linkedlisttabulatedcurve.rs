use std::cell::Cell;
use std::fmt;
use std::hash::{
    Hash,
    Hasher
};

use crate::math::curve::curve::Curve;
use crate::math::curve::tabulatedcurve::arraytabulatedcurve::ArrayTabulatedCurve;
use crate::math::curve::tabulatedcurve::point2d::Point2D;
use crate::math::curve::tabulatedcurve::tabulatedcurve::{
    check_deletable,
    check_index,
    check_insertable,
    check_neighbours,
    curves_equal,
    fmt_points,
    hash_points,
    interpolate,
    uniform_grid,
    validate_points,
    TabulatedCurve
};
use crate::math::curve::tabulatedcurve::tabulatedcurveerror::{
    TabulatedCurveError,
    TabulatedCurveResult
};
use crate::math::tolerance;

// ─────────────────────────────────────────────────────────────────────────────
// LinkedListTabulatedCurve - circular doubly linked list with sentinel
// ─────────────────────────────────────────────────────────────────────────────
//
// 節點存放在 arena（Vec<Node>）中，以 slot 編號互相連結：
//
//   nodes[SENTINEL].next → 第 0 個點
//   nodes[SENTINEL].prev → 最後一個點
//   空串列：sentinel 的 prev/next 指向自己
//
// 刪除後的 slot 放入 free_slots 重複使用。
//
// last_accessed 記錄最近一次存取的 (index, slot)。查找 index 時若
// |index - cached| < index 就從快取位置出發，否則從第 0 個點出發，
// 連續存取因此接近 O(1)。快取只影響走訪步數，不影響結果。

const SENTINEL: usize = 0;

#[derive(Debug, Clone, Copy)]
struct Node {
    point: Point2D,
    prev: usize,
    next: usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeCursor {
    index: usize,
    slot: usize
}

#[derive(Debug)]
pub struct LinkedListTabulatedCurve {
    nodes: Vec<Node>,
    free_slots: Vec<usize>,
    points_count: usize,
    last_accessed: Cell<Option<NodeCursor>>
}

impl LinkedListTabulatedCurve {
    /// Copies `points`, which must hold at least two samples strictly
    /// ascending by x.
    pub fn new(points: &[Point2D]) -> TabulatedCurveResult<LinkedListTabulatedCurve> {
        validate_points(points)?;
        Ok(Self::from_valid_points(points.iter().copied()))
    }

    /// `points_count` evenly spaced samples on `[left_x, right_x]` with y = 0.
    pub fn from_bounds(left_x: f64,
                       right_x: f64,
                       points_count: usize) -> TabulatedCurveResult<LinkedListTabulatedCurve> {
        Self::from_values(left_x, right_x, &vec![0.0; points_count])
    }

    /// Evenly spaced samples on `[left_x, right_x]` carrying `values` as y.
    pub fn from_values(left_x: f64,
                       right_x: f64,
                       values: &[f64]) -> TabulatedCurveResult<LinkedListTabulatedCurve> {
        let grid = uniform_grid(left_x, right_x, values)?;
        Ok(Self::from_valid_points(grid.into_iter()))
    }

    fn empty() -> LinkedListTabulatedCurve {
        let sentinel = Node {
            point: Point2D::default(),
            prev: SENTINEL,
            next: SENTINEL
        };
        LinkedListTabulatedCurve {
            nodes: vec![sentinel],
            free_slots: Vec::new(),
            points_count: 0,
            last_accessed: Cell::new(None)
        }
    }

    fn from_valid_points<I>(points: I) -> LinkedListTabulatedCurve
    where
        I: IntoIterator<Item = Point2D>
    {
        let mut curve = Self::empty();
        for point in points {
            curve.add_node_to_tail(point);
        }
        curve
    }

    /// Points in ascending x order, walked from the head.
    pub fn iter(&self) -> Points<'_> {
        Points {
            nodes: &self.nodes,
            slot: self.nodes[SENTINEL].next,
            remaining: self.points_count
        }
    }

    fn allocate(&mut self, point: Point2D) -> usize {
        let node = Node { point, prev: SENTINEL, next: SENTINEL };
        match self.free_slots.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            },
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Links a new node in front of `target`; `target == SENTINEL` appends.
    fn link_before(&mut self, target: usize, point: Point2D) -> usize {
        let slot = self.allocate(point);
        let prev = self.nodes[target].prev;
        self.nodes[slot].prev = prev;
        self.nodes[slot].next = target;
        self.nodes[prev].next = slot;
        self.nodes[target].prev = slot;
        slot
    }

    fn unlink(&mut self, slot: usize) -> Point2D {
        let Node { point, prev, next } = self.nodes[slot];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.free_slots.push(slot);
        point
    }

    fn add_node_to_tail(&mut self, point: Point2D) -> usize {
        let slot = self.link_before(SENTINEL, point);
        self.points_count += 1;
        self.last_accessed.set(Some(NodeCursor { index: self.points_count - 1, slot }));
        slot
    }

    /// Arena slot holding point `index`.
    fn node_slot(&self, index: usize) -> TabulatedCurveResult<usize> {
        check_index(index, self.points_count)?;

        let start = match self.last_accessed.get() {
            Some(cursor) if cursor.index.abs_diff(index) < index => cursor,
            _ => NodeCursor { index: 0, slot: self.nodes[SENTINEL].next }
        };

        let mut slot = start.slot;
        if index >= start.index {
            for _ in start.index..index {
                slot = self.nodes[slot].next;
            }
        } else {
            for _ in index..start.index {
                slot = self.nodes[slot].prev;
            }
        }

        self.last_accessed.set(Some(NodeCursor { index, slot }));
        Ok(slot)
    }

    fn delete_node_by_index(&mut self, index: usize) -> TabulatedCurveResult<Point2D> {
        check_deletable(self.points_count)?;
        let slot = self.node_slot(index)?;
        let point = self.unlink(slot);
        self.points_count -= 1;

        match self.last_accessed.get() {
            Some(cursor) if cursor.index == index => {
                let head = NodeCursor { index: 0, slot: self.nodes[SENTINEL].next };
                self.last_accessed.set(Some(head));
            },
            Some(cursor) if cursor.index > index => {
                self.last_accessed.set(Some(NodeCursor { index: cursor.index - 1, ..cursor }));
            },
            _ => {}
        }
        Ok(point)
    }

    fn neighbours_x(&self, index: usize, slot: usize) -> (Option<f64>, Option<f64>) {
        let node = &self.nodes[slot];
        let prev_x = (index > 0).then(|| self.nodes[node.prev].point.x());
        let next_x = (index + 1 < self.points_count).then(|| self.nodes[node.next].point.x());
        (prev_x, next_x)
    }
}

impl TabulatedCurve for LinkedListTabulatedCurve {
    fn points_count(&self) -> usize {
        self.points_count
    }

    fn left_domain_border(&self) -> TabulatedCurveResult<f64> {
        if self.points_count == 0 {
            return Err(TabulatedCurveError::EmptyState);
        }
        Ok(self.nodes[self.nodes[SENTINEL].next].point.x())
    }

    fn right_domain_border(&self) -> TabulatedCurveResult<f64> {
        if self.points_count == 0 {
            return Err(TabulatedCurveError::EmptyState);
        }
        Ok(self.nodes[self.nodes[SENTINEL].prev].point.x())
    }

    fn function_value(&self, x: f64) -> f64 {
        interpolate(self.iter(), x)
    }

    fn point(&self, index: usize) -> TabulatedCurveResult<Point2D> {
        let slot = self.node_slot(index)?;
        Ok(self.nodes[slot].point)
    }

    fn set_point(&mut self, index: usize, point: Point2D) -> TabulatedCurveResult<()> {
        let slot = self.node_slot(index)?;
        let (prev_x, next_x) = self.neighbours_x(index, slot);
        check_neighbours(point.x(), prev_x, next_x)?;
        self.nodes[slot].point = point;
        Ok(())
    }

    fn set_point_x(&mut self, index: usize, x: f64) -> TabulatedCurveResult<()> {
        let slot = self.node_slot(index)?;
        let (prev_x, next_x) = self.neighbours_x(index, slot);
        check_neighbours(x, prev_x, next_x)?;
        self.nodes[slot].point.set_x(x);
        Ok(())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> TabulatedCurveResult<()> {
        let slot = self.node_slot(index)?;
        self.nodes[slot].point.set_y(y);
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> TabulatedCurveResult<()> {
        self.delete_node_by_index(index).map(|_| ())
    }

    fn add_point(&mut self, point: Point2D) -> TabulatedCurveResult<()> {
        check_insertable(point.x())?;
        let mut insert_index = 0;
        let mut slot = self.nodes[SENTINEL].next;
        while insert_index < self.points_count
            && tolerance::less(self.nodes[slot].point.x(), point.x()) {
            slot = self.nodes[slot].next;
            insert_index += 1;
        }

        if insert_index < self.points_count
            && tolerance::equals(self.nodes[slot].point.x(), point.x()) {
            return Err(TabulatedCurveError::DuplicatePoint(point.x()));
        }

        // slot is the sentinel when the new point goes last
        let new_slot = self.link_before(slot, point);
        self.points_count += 1;
        self.last_accessed.set(Some(NodeCursor { index: insert_index, slot: new_slot }));
        Ok(())
    }

    fn points(&self) -> Vec<Point2D> {
        self.iter().collect()
    }

    fn hash_code(&self) -> u64 {
        hash_points(self.points_count, self.iter())
    }

    fn clone_box(&self) -> Box<dyn TabulatedCurve> {
        Box::new(self.clone())
    }
}

impl Curve for LinkedListTabulatedCurve {
    fn min_x(&self) -> f64 {
        self.left_domain_border().unwrap_or(f64::NAN)
    }

    fn max_x(&self) -> f64 {
        self.right_domain_border().unwrap_or(f64::NAN)
    }

    fn value(&self, x: f64) -> f64 {
        self.function_value(x)
    }
}

impl Clone for LinkedListTabulatedCurve {
    /// Compact copy: fresh arena in list order, no free slots, empty cache.
    fn clone(&self) -> Self {
        let mut copy = Self::from_valid_points(self.iter());
        copy.last_accessed.set(None);
        copy
    }
}

impl fmt::Display for LinkedListTabulatedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_points(f, self.iter())
    }
}

impl PartialEq for LinkedListTabulatedCurve {
    fn eq(&self, other: &Self) -> bool {
        self.points_count == other.points_count && self.iter().eq(other.iter())
    }
}

impl PartialEq<ArrayTabulatedCurve> for LinkedListTabulatedCurve {
    fn eq(&self, other: &ArrayTabulatedCurve) -> bool {
        curves_equal(self, other)
    }
}

impl Hash for LinkedListTabulatedCurve {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

/// Iterator over the points of a [`LinkedListTabulatedCurve`].
#[derive(Clone)]
pub struct Points<'a> {
    nodes: &'a [Node],
    slot: usize,
    remaining: usize
}

impl Iterator for Points<'_> {
    type Item = Point2D;

    fn next(&mut self) -> Option<Point2D> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.slot];
        self.slot = node.next;
        self.remaining -= 1;
        Some(node.point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Points<'_> {}
