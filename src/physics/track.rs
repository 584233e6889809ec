use bevy::prelude::*;

/// One confirmed piece of track, screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

/// What a drag did to the active stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Extend {
    /// First point of the stroke; nothing to collide with yet.
    Started,
    /// Too close to the previous point; dropped.
    Skipped,
    /// Point appended, closing this segment.
    Segment(Segment),
}

/// Every polyline the user has drawn, oldest first. Points are only ever appended.
#[derive(Default, Debug, Clone)]
pub struct Strokes {
    lines: Vec<Vec<Vec2>>,
}

impl Strokes {
    /// Start a new, empty polyline; subsequent points land in it.
    pub fn begin(&mut self) {
        self.lines.push(Vec::new());
    }

    /// Offer `point` to the active polyline.
    ///
    /// The point is kept only if it is at least `min_len` away from the last kept
    /// point, which thins out the dense stream of drag events. With no active
    /// polyline (a drag that never saw a press) one is started.
    pub fn extend(&mut self, point: Vec2, min_len: f32) -> Extend {
        if self.lines.is_empty() {
            self.begin();
        }
        let Some(line) = self.lines.last_mut() else {
            return Extend::Skipped;
        };

        let Some(&last) = line.last() else {
            line.push(point);
            return Extend::Started;
        };

        if last.distance(point) < min_len {
            return Extend::Skipped;
        }

        line.push(point);
        Extend::Segment(Segment { a: last, b: point })
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Vec2]> {
        self.lines.iter().map(Vec::as_slice)
    }

    /// Number of polylines, including empty ones.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    pub fn segment_count(&self) -> usize {
        self.lines.iter().map(|l| l.len().saturating_sub(1)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f32 = 10.0;

    #[test]
    fn short_drag_is_dropped_then_long_drag_closes_segment() {
        let mut s = Strokes::default();
        s.begin();

        assert_eq!(s.extend(Vec2::new(0.0, 0.0), MIN), Extend::Started);
        assert_eq!(s.extend(Vec2::new(0.0, 5.0), MIN), Extend::Skipped);
        assert_eq!(s.point_count(), 1);

        assert_eq!(
            s.extend(Vec2::new(0.0, 20.0), MIN),
            Extend::Segment(Segment {
                a: Vec2::new(0.0, 0.0),
                b: Vec2::new(0.0, 20.0),
            })
        );
        assert_eq!(s.point_count(), 2);
        assert_eq!(s.segment_count(), 1);
    }

    #[test]
    fn exactly_min_length_is_kept() {
        let mut s = Strokes::default();
        s.begin();
        s.extend(Vec2::ZERO, MIN);
        assert!(matches!(
            s.extend(Vec2::new(6.0, 8.0), MIN),
            Extend::Segment(_)
        ));
    }

    #[test]
    fn distance_is_measured_from_last_kept_point() {
        let mut s = Strokes::default();
        s.begin();
        s.extend(Vec2::ZERO, MIN);
        // each step is 6 units: 6 and 12 from the origin, only the second counts
        assert_eq!(s.extend(Vec2::new(6.0, 0.0), MIN), Extend::Skipped);
        assert!(matches!(
            s.extend(Vec2::new(12.0, 0.0), MIN),
            Extend::Segment(Segment { a, .. }) if a == Vec2::ZERO
        ));
    }

    #[test]
    fn press_starts_a_separate_stroke() {
        let mut s = Strokes::default();
        s.begin();
        s.extend(Vec2::ZERO, MIN);
        s.extend(Vec2::new(20.0, 0.0), MIN);

        s.begin();
        assert_eq!(s.extend(Vec2::new(100.0, 100.0), MIN), Extend::Started);

        assert_eq!(s.len(), 2);
        assert_eq!(s.segment_count(), 1);
        let lines: Vec<_> = s.iter().collect();
        assert_eq!(lines[1], &[Vec2::new(100.0, 100.0)]);
    }

    #[test]
    fn drag_without_press_starts_a_stroke() {
        let mut s = Strokes::default();
        assert_eq!(s.extend(Vec2::new(3.0, 4.0), MIN), Extend::Started);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn press_without_drag_leaves_empty_stroke() {
        let mut s = Strokes::default();
        s.begin();
        s.begin();
        assert_eq!(s.len(), 2);
        assert_eq!(s.point_count(), 0);
        assert_eq!(s.segment_count(), 0);
    }
}
