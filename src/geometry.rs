//! Plane geometry for the angle and circle-theorem diagrams.
//!
//! Coordinates are SVG user units (y grows downwards); angles are radians
//! measured with `atan2(dy, dx)` in that frame. Everything here is a pure
//! function of its inputs, so the same points always yield the same paths.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

const TAU: f64 = 2.0 * PI;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Point at `angle` on the circle of `radius` around `center`.
pub fn point_on_circle(angle: f64, radius: f64, center: Point) -> Point {
    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Direction of `p` seen from `center`, in [0, 2π).
pub fn polar_angle(p: Point, center: Point) -> f64 {
    let theta = (p.y - center.y).atan2(p.x - center.x);
    if theta < 0.0 {
        theta + TAU
    } else {
        theta
    }
}

/// Folds any angle difference into (−π, π].
pub fn wrap_signed(mut diff: f64) -> f64 {
    while diff <= -PI {
        diff += TAU;
    }
    while diff > PI {
        diff -= TAU;
    }
    diff
}

/// Signed turn from arm1 to arm2 around `vertex`, in (−π, π].
pub fn signed_angle(vertex: Point, arm1: Point, arm2: Point) -> f64 {
    let a1 = (arm1.y - vertex.y).atan2(arm1.x - vertex.x);
    let a2 = (arm2.y - vertex.y).atan2(arm2.x - vertex.x);
    wrap_signed(a2 - a1)
}

/// Magnitude of ∠(p1, vertex, p2) in degrees, unrounded.
pub fn angle_degrees(p1: Point, vertex: Point, p2: Point) -> f64 {
    signed_angle(vertex, p1, p2).abs().to_degrees()
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// ∠(p1, vertex, p2) rounded to one decimal, as shown to students.
pub fn display_degrees(p1: Point, vertex: Point, p2: Point) -> f64 {
    round1(angle_degrees(p1, vertex, p2))
}

/// Start/end of a sweep plus its positive extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSweep {
    pub start: f64,
    pub end: f64,
    pub diff: f64,
}

/// Orders two directions so the counter-clockwise sweep from `start` to
/// `end` is the minor one.
pub fn smart_arc(start_angle: f64, end_angle: f64) -> ArcSweep {
    let (mut start, mut end) = (start_angle, end_angle);
    let mut diff = (end - start).rem_euclid(TAU);
    if diff > PI {
        std::mem::swap(&mut start, &mut end);
        diff = TAU - diff;
    }
    ArcSweep { start, end, diff }
}

/// Minor arc between two points on a circle given by their polar angles.
pub fn minor_arc(angle_a: f64, angle_b: f64) -> ArcSweep {
    let mut diff = (angle_a - angle_b).abs();
    if diff > PI {
        diff = TAU - diff;
    }
    let (mut start, mut end) = (angle_a, angle_b);
    if (end - start).rem_euclid(TAU) > PI {
        std::mem::swap(&mut start, &mut end);
    }
    ArcSweep { start, end, diff }
}

/// SVG numbers: two decimals, no trailing zeros, never "-0".
fn num(v: f64) -> String {
    let r = (v * 100.0).round() / 100.0;
    if r == 0.0 {
        "0".to_string()
    } else {
        r.to_string()
    }
}

fn push_cmd(out: &mut String, cmd: &str, values: &[f64]) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(cmd);
    for v in values {
        let _ = write!(out, " {}", num(*v));
    }
}

/// Filled wedge marking the angle between two directions at `vertex`.
pub fn angle_arc_path(vertex: Point, radius: f64, angle1: f64, angle2: f64) -> String {
    let sweep = smart_arc(angle1, angle2);
    let s = point_on_circle(sweep.start, radius, vertex);
    let e = point_on_circle(sweep.end, radius, vertex);
    let mut d = String::new();
    push_cmd(&mut d, "M", &[vertex.x, vertex.y]);
    push_cmd(&mut d, "L", &[s.x, s.y]);
    push_cmd(&mut d, "A", &[radius, radius, 0.0, 0.0, 1.0, e.x, e.y]);
    push_cmd(&mut d, "Z", &[]);
    d
}

/// Arc along the circle itself, counter-clockwise from `start_angle` to `end_angle`.
pub fn circle_arc_path(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> String {
    let diff = (end_angle - start_angle).rem_euclid(TAU);
    let s = point_on_circle(start_angle, radius, center);
    let e = point_on_circle(end_angle, radius, center);
    let large_arc = if diff > PI { 1.0 } else { 0.0 };
    let mut d = String::new();
    push_cmd(&mut d, "M", &[s.x, s.y]);
    push_cmd(&mut d, "A", &[radius, radius, 0.0, large_arc, 1.0, e.x, e.y]);
    d
}

/// Where the degree label of an angle wedge goes.
pub fn text_position(vertex: Point, radius: f64, angle1: f64, angle2: f64) -> Point {
    let sweep = smart_arc(angle1, angle2);
    point_on_circle(sweep.start + sweep.diff / 2.0, radius, vertex)
}

/// Label just outside the circle, halfway along the minor arc AB.
pub fn arc_label_position(center: Point, radius: f64, angle_a: f64, angle_b: f64, padding: f64) -> Point {
    let mid = (angle_a.sin() + angle_b.sin()).atan2(angle_a.cos() + angle_b.cos());
    point_on_circle(mid, radius + padding, center)
}

/// Square corner mark at `p` between the directions towards `a` and `b`.
pub fn right_angle_mark(p: Point, a: Point, b: Point, size: f64) -> String {
    let unit = |q: Point| {
        let len = p.distance(&q);
        if len == 0.0 {
            Point::default()
        } else {
            Point::new((q.x - p.x) / len, (q.y - p.y) / len)
        }
    };
    let (u1, u2) = (unit(a), unit(b));
    let p1 = Point::new(p.x + u1.x * size, p.y + u1.y * size);
    let p2 = Point::new(p.x + u2.x * size, p.y + u2.y * size);
    let p3 = Point::new(p.x + (u1.x + u2.x) * size, p.y + (u1.y + u2.y) * size);
    let mut d = String::new();
    push_cmd(&mut d, "M", &[p1.x, p1.y]);
    push_cmd(&mut d, "L", &[p3.x, p3.y]);
    push_cmd(&mut d, "L", &[p2.x, p2.y]);
    d
}

/// `count` short ticks across the midpoint of p1p2, marking equal lengths.
pub fn equal_length_marks(p1: Point, p2: Point, count: usize) -> Vec<(Point, Point)> {
    let len = p1.distance(&p2);
    if len == 0.0 {
        return Vec::new();
    }
    let (mx, my) = ((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0);
    let (dx, dy) = ((p2.x - p1.x) / len, (p2.y - p1.y) / len);
    let (nx, ny) = (-dy, dx);
    let (size, gap) = (6.0, 3.0);
    (0..count)
        .map(|i| {
            let offset = (i as f64 - (count as f64 - 1.0) / 2.0) * gap;
            let (bx, by) = (mx + dx * offset, my + dy * offset);
            (
                Point::new(bx - nx * size, by - ny * size),
                Point::new(bx + nx * size, by + ny * size),
            )
        })
        .collect()
}

/// Points of contact of the two tangents from `external`; `None` unless it
/// lies strictly outside the circle.
pub fn tangent_points(center: Point, radius: f64, external: Point) -> Option<(Point, Point)> {
    let dist = center.distance(&external);
    if dist <= radius + 1.0 {
        return None;
    }
    let towards = (external.y - center.y).atan2(external.x - center.x);
    let offset = (radius / dist).acos();
    Some((
        point_on_circle(towards + offset, radius, center),
        point_on_circle(towards - offset, radius, center),
    ))
}

// -------- Angle figure --------

/// A labelled angle ∠(arm1, vertex, arm2) ready to draw.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AngleFigure {
    pub vertex: Point,
    pub arm1: Point,
    pub arm2: Point,
    /// Letters for arm1, vertex, arm2.
    pub labels: [String; 3],
    pub degrees: f64,
    pub arc_path: String,
    pub label_position: Point,
    /// Further labelled rays from the same vertex, drawn unmarked.
    pub other_rays: Vec<(String, Point)>,
}

/// Arc wedge and one-decimal degrees for the angle at `vertex`.
pub fn angle_figure(vertex: Point, arm1: Point, arm2: Point, radius: f64, labels: [String; 3]) -> AngleFigure {
    let a1 = (arm1.y - vertex.y).atan2(arm1.x - vertex.x);
    let a2 = (arm2.y - vertex.y).atan2(arm2.x - vertex.x);
    AngleFigure {
        vertex,
        arm1,
        arm2,
        labels,
        degrees: display_degrees(arm1, vertex, arm2),
        arc_path: angle_arc_path(vertex, radius, a1, a2),
        label_position: text_position(vertex, radius + 14.0, a1, a2),
        other_rays: Vec::new(),
    }
}

// -------- Circle theorems --------

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TheoremMode {
    /// Angle at the centre is twice the angle at the circumference.
    Center,
    /// Angles in the same segment are equal.
    Segment,
    /// Angle in a semicircle is a right angle.
    Semicircle,
    /// Arcs are proportional to the angles at the centre.
    PropCenter,
    /// Arcs are proportional to the angles at the circumference.
    PropCircum,
    /// Opposite angles of a cyclic quadrilateral are supplementary.
    CyclicQuad,
    /// Tangent-chord angle equals the angle in the alternate segment.
    TangentChord,
    /// Tangents from an external point.
    TangentProps,
}

impl TheoremMode {
    pub const ALL: [TheoremMode; 8] = [
        TheoremMode::Center,
        TheoremMode::Segment,
        TheoremMode::Semicircle,
        TheoremMode::PropCenter,
        TheoremMode::PropCircum,
        TheoremMode::CyclicQuad,
        TheoremMode::TangentChord,
        TheoremMode::TangentProps,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            TheoremMode::Center => "center",
            TheoremMode::Segment => "segment",
            TheoremMode::Semicircle => "semicircle",
            TheoremMode::PropCenter => "prop_center",
            TheoremMode::PropCircum => "prop_circum",
            TheoremMode::CyclicQuad => "cyclic_quad",
            TheoremMode::TangentChord => "tangent_chord",
            TheoremMode::TangentProps => "tangent_props",
        }
    }

    pub fn parse(slug: &str) -> Result<Self, QuizError> {
        TheoremMode::ALL
            .iter()
            .copied()
            .find(|m| m.slug() == slug)
            .ok_or_else(|| QuizError::UnknownMode(slug.to_string()))
    }

    /// Starting positions (as fractions of π) of the points each mode shows.
    fn default_angles(&self) -> &'static [(&'static str, f64)] {
        match self {
            TheoremMode::Center => &[("A", 0.8), ("B", 0.2), ("P", 1.5)],
            TheoremMode::Segment => &[("A", 0.7), ("B", 0.3), ("P", 1.4), ("Q", 1.6)],
            TheoremMode::Semicircle => &[("A", 1.0), ("B", 0.0), ("P", 1.5)],
            TheoremMode::PropCenter | TheoremMode::PropCircum => &[
                ("A", 0.8),
                ("B", 0.6),
                ("C", 0.4),
                ("D", 0.2),
                ("P", 1.3),
                ("Q", 1.7),
            ],
            TheoremMode::CyclicQuad => &[("A", 0.75), ("B", 0.25), ("C", 1.8), ("D", 1.2)],
            TheoremMode::TangentChord => &[("T", 0.5), ("A", 1.8), ("P", 1.2)],
            TheoremMode::TangentProps => &[],
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Degrees,
    Length,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Measurement {
    pub label: String,
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    fn degrees(label: &str, value: f64) -> Self {
        Self { label: label.to_string(), value, unit: Unit::Degrees }
    }
    fn length(label: &str, value: f64) -> Self {
        Self { label: label.to_string(), value, unit: Unit::Length }
    }
}

/// Everything the frontend needs to draw one theorem configuration.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CircleFigure {
    pub mode: TheoremMode,
    pub center: Point,
    pub radius: f64,
    pub points: BTreeMap<String, Point>,
    pub measurements: Vec<Measurement>,
    /// SVG paths for the highlighted angles and arcs.
    pub arcs: Vec<String>,
    /// Anchor positions for arc-length labels.
    pub labels: BTreeMap<String, Point>,
    /// Equal-length tick marks as line segments.
    pub ticks: Vec<(Point, Point)>,
}

impl CircleFigure {
    pub fn value(&self, label: &str) -> Option<f64> {
        self.measurements.iter().find(|m| m.label == label).map(|m| m.value)
    }
}

/// A circle with named points on it (by polar angle) plus one free point
/// used by the external-tangent mode.
#[derive(Clone, Debug, PartialEq)]
pub struct CircleScene {
    pub mode: TheoremMode,
    pub center: Point,
    pub radius: f64,
    pub angles: BTreeMap<String, f64>,
    pub external: Point,
}

const SCENE_CENTER: Point = Point::new(350.0, 260.0);
const SCENE_RADIUS: f64 = 160.0;
const ARC_MARK_RADIUS: f64 = 30.0;

impl CircleScene {
    pub fn new(mode: TheoremMode) -> Self {
        let angles = mode
            .default_angles()
            .iter()
            .map(|(name, frac)| (name.to_string(), frac * PI))
            .collect();
        Self {
            mode,
            center: SCENE_CENTER,
            radius: SCENE_RADIUS,
            angles,
            external: Point::new(SCENE_CENTER.x + 280.0, SCENE_CENTER.y),
        }
    }

    /// Scene with explicit point positions (radians); unspecified points keep defaults.
    pub fn with_angles(mode: TheoremMode, overrides: &BTreeMap<String, f64>) -> Self {
        let mut scene = Self::new(mode);
        for (name, angle) in overrides {
            if scene.angles.contains_key(name) {
                scene.angles.insert(name.clone(), angle.rem_euclid(TAU));
            }
        }
        scene
    }

    /// Moves a point as a pointer drag would. On the semicircle the other
    /// diameter end follows; in tangent mode `T` moves freely.
    pub fn drag(&mut self, name: &str, to: Point) {
        if self.mode == TheoremMode::TangentProps {
            if name == "T" {
                self.external = to;
            }
            return;
        }
        if !self.angles.contains_key(name) {
            return;
        }
        let angle = polar_angle(to, self.center);
        self.angles.insert(name.to_string(), angle);
        if self.mode == TheoremMode::Semicircle {
            let opposite = (angle + PI).rem_euclid(TAU);
            match name {
                "A" => {
                    self.angles.insert("B".into(), opposite);
                }
                "B" => {
                    self.angles.insert("A".into(), opposite);
                }
                _ => {}
            }
        }
    }

    pub fn point(&self, name: &str) -> Point {
        match name {
            "O" => self.center,
            "T" if self.mode == TheoremMode::TangentProps => self.external,
            _ => point_on_circle(self.angle(name), self.radius, self.center),
        }
    }

    fn angle(&self, name: &str) -> f64 {
        self.angles.get(name).copied().unwrap_or(0.0)
    }

    fn wedge(&self, p1: &str, vertex: &str, p2: &str) -> String {
        let v = self.point(vertex);
        let a1 = polar_angle(self.point(p1), v);
        let a2 = polar_angle(self.point(p2), v);
        angle_arc_path(v, ARC_MARK_RADIUS, a1, a2)
    }

    fn deg(&self, p1: &str, vertex: &str, p2: &str) -> f64 {
        display_degrees(self.point(p1), self.point(vertex), self.point(p2))
    }

    pub fn measure(&self) -> CircleFigure {
        let mut points: BTreeMap<String, Point> = self
            .angles
            .keys()
            .map(|k| (k.clone(), self.point(k)))
            .collect();
        points.insert("O".into(), self.center);
        let mut measurements = Vec::new();
        let mut arcs = Vec::new();
        let mut labels = BTreeMap::new();
        let mut ticks = Vec::new();

        match self.mode {
            TheoremMode::Center | TheoremMode::Semicircle => {
                measurements.push(Measurement::degrees("∠AOB", self.deg("A", "O", "B")));
                measurements.push(Measurement::degrees("∠APB", self.deg("A", "P", "B")));
                arcs.push(self.wedge("A", "O", "B"));
                arcs.push(self.wedge("A", "P", "B"));
            }
            TheoremMode::Segment => {
                measurements.push(Measurement::degrees("∠APB", self.deg("A", "P", "B")));
                measurements.push(Measurement::degrees("∠AQB", self.deg("A", "Q", "B")));
                arcs.push(self.wedge("A", "P", "B"));
                arcs.push(self.wedge("A", "Q", "B"));
            }
            TheoremMode::PropCenter | TheoremMode::PropCircum => {
                let ab = minor_arc(self.angle("A"), self.angle("B"));
                let cd = minor_arc(self.angle("C"), self.angle("D"));
                measurements.push(Measurement::length("arc AB", (ab.diff * self.radius).round()));
                measurements.push(Measurement::length("arc CD", (cd.diff * self.radius).round()));
                if self.mode == TheoremMode::PropCenter {
                    measurements.push(Measurement::degrees("∠AOB", round1(ab.diff.to_degrees())));
                    measurements.push(Measurement::degrees("∠COD", round1(cd.diff.to_degrees())));
                    arcs.push(self.wedge("A", "O", "B"));
                    arcs.push(self.wedge("C", "O", "D"));
                } else {
                    measurements.push(Measurement::degrees("∠APB", self.deg("A", "P", "B")));
                    measurements.push(Measurement::degrees("∠CQD", self.deg("C", "Q", "D")));
                    arcs.push(self.wedge("A", "P", "B"));
                    arcs.push(self.wedge("C", "Q", "D"));
                }
                arcs.push(circle_arc_path(self.center, self.radius, ab.start, ab.end));
                arcs.push(circle_arc_path(self.center, self.radius, cd.start, cd.end));
                labels.insert(
                    "arc AB".to_string(),
                    arc_label_position(self.center, self.radius, self.angle("A"), self.angle("B"), 25.0),
                );
                labels.insert(
                    "arc CD".to_string(),
                    arc_label_position(self.center, self.radius, self.angle("C"), self.angle("D"), 25.0),
                );
            }
            TheoremMode::CyclicQuad => {
                let (a, b) = (self.point("A"), self.point("B"));
                let len = a.distance(&b);
                let e = if len == 0.0 {
                    b
                } else {
                    Point::new(b.x + (b.x - a.x) / len * 60.0, b.y + (b.y - a.y) / len * 60.0)
                };
                points.insert("E".into(), e);
                let angle_b = self.deg("A", "B", "C");
                let angle_d = self.deg("C", "D", "A");
                measurements.push(Measurement::degrees("∠ABC", angle_b));
                measurements.push(Measurement::degrees("∠CDA", angle_d));
                measurements.push(Measurement::degrees("∠ABC + ∠CDA", round1(angle_b + angle_d)));
                measurements.push(Measurement::degrees("∠EBC", display_degrees(e, b, self.point("C"))));
                arcs.push(self.wedge("A", "B", "C"));
                arcs.push(self.wedge("C", "D", "A"));
            }
            TheoremMode::TangentChord => {
                let t = self.point("T");
                let theta = self.angle("T");
                let reach = 200.0;
                let t1 = Point::new(t.x + reach * theta.sin(), t.y - reach * theta.cos());
                let t2 = Point::new(t.x - reach * theta.sin(), t.y + reach * theta.cos());
                points.insert("T1".into(), t1);
                points.insert("T2".into(), t2);
                let a = self.point("A");
                let with_t1 = display_degrees(t1, t, a);
                let tangent_chord = if with_t1 < 90.0 { with_t1 } else { display_degrees(t2, t, a) };
                measurements.push(Measurement::degrees("tangent-chord", tangent_chord));
                measurements.push(Measurement::degrees("∠TPA", self.deg("T", "P", "A")));
                arcs.push(self.wedge("T", "P", "A"));
            }
            TheoremMode::TangentProps => {
                let t = self.external;
                points.insert("T".into(), t);
                if let Some((ta, tb)) = tangent_points(self.center, self.radius, t) {
                    points.insert("A".into(), ta);
                    points.insert("B".into(), tb);
                    let o = self.center;
                    measurements.push(Measurement::length("TA", round1(t.distance(&ta))));
                    measurements.push(Measurement::length("TB", round1(t.distance(&tb))));
                    measurements.push(Measurement::degrees("∠ATO", display_degrees(ta, t, o)));
                    measurements.push(Measurement::degrees("∠BTO", display_degrees(tb, t, o)));
                    measurements.push(Measurement::degrees("∠AOT", display_degrees(ta, o, t)));
                    measurements.push(Measurement::degrees("∠BOT", display_degrees(tb, o, t)));
                    arcs.push(right_angle_mark(ta, o, t, 18.0));
                    arcs.push(right_angle_mark(tb, o, t, 18.0));
                    ticks.extend(equal_length_marks(t, ta, 2));
                    ticks.extend(equal_length_marks(t, tb, 2));
                }
            }
        }

        CircleFigure {
            mode: self.mode,
            center: self.center,
            radius: self.radius,
            points,
            measurements,
            arcs,
            labels,
            ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_angle_from_axes() {
        let v = Point::new(0.0, 0.0);
        let deg = display_degrees(Point::new(10.0, 0.0), v, Point::new(0.0, 10.0));
        assert!((deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn signed_difference_stays_in_half_open_range() {
        assert!((wrap_signed(PI) - PI).abs() < 1e-12);
        assert!((wrap_signed(-PI) - PI).abs() < 1e-12);
        assert!((wrap_signed(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn arc_path_is_idempotent() {
        let (v, a, b) = (Point::new(120.0, 80.0), Point::new(200.0, 90.0), Point::new(150.0, 10.0));
        let first = angle_figure(v, a, b, 25.0, ["A".into(), "B".into(), "C".into()]);
        let second = angle_figure(v, a, b, 25.0, ["A".into(), "B".into(), "C".into()]);
        assert_eq!(first, second);
        assert!(first.arc_path.starts_with("M 120 80 L "));
        assert!(first.arc_path.ends_with(" Z"));
    }

    #[test]
    fn smart_arc_always_sweeps_minor() {
        let s = smart_arc(0.1 * PI, 1.9 * PI);
        assert!(s.diff <= PI);
        assert!((s.start - 1.9 * PI).abs() < 1e-12);
        assert!((s.diff - 0.2 * PI).abs() < 1e-9);
    }

    #[test]
    fn circle_arc_sets_large_arc_flag() {
        let c = Point::new(0.0, 0.0);
        assert!(circle_arc_path(c, 10.0, 0.0, 1.5 * PI).contains(" 0 1 1 "));
        assert!(circle_arc_path(c, 10.0, 0.0, 0.5 * PI).contains(" 0 0 1 "));
    }

    #[test]
    fn centre_angle_is_twice_circumference_angle() {
        let fig = CircleScene::new(TheoremMode::Center).measure();
        let at_o = fig.value("∠AOB").unwrap();
        let at_p = fig.value("∠APB").unwrap();
        assert!((at_o - 2.0 * at_p).abs() < 0.2, "{at_o} vs {at_p}");
    }

    #[test]
    fn semicircle_drag_keeps_diameter() {
        let mut scene = CircleScene::new(TheoremMode::Semicircle);
        scene.drag("A", Point::new(350.0 - 113.0, 260.0 - 113.0));
        let fig = scene.measure();
        assert!((fig.value("∠APB").unwrap() - 90.0).abs() < 0.11);
        assert!((fig.value("∠AOB").unwrap() - 180.0).abs() < 0.11);
    }

    #[test]
    fn cyclic_quad_opposite_angles_supplementary() {
        let fig = CircleScene::new(TheoremMode::CyclicQuad).measure();
        assert!((fig.value("∠ABC + ∠CDA").unwrap() - 180.0).abs() < 0.2);
        assert!((fig.value("∠EBC").unwrap() - fig.value("∠CDA").unwrap()).abs() < 0.2);
    }

    #[test]
    fn tangent_lengths_are_equal() {
        let fig = CircleScene::new(TheoremMode::TangentProps).measure();
        assert!((fig.value("TA").unwrap() - fig.value("TB").unwrap()).abs() < 0.11);
        assert!((fig.value("∠ATO").unwrap() - fig.value("∠BTO").unwrap()).abs() < 0.11);
        assert_eq!(fig.ticks.len(), 4);
    }

    #[test]
    fn no_tangents_from_inside() {
        let mut scene = CircleScene::new(TheoremMode::TangentProps);
        scene.drag("T", Point::new(360.0, 250.0));
        assert!(scene.measure().measurements.is_empty());
    }

    #[test]
    fn tangent_chord_matches_alternate_segment() {
        let fig = CircleScene::new(TheoremMode::TangentChord).measure();
        assert!((fig.value("tangent-chord").unwrap() - fig.value("∠TPA").unwrap()).abs() < 0.2);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert_eq!(TheoremMode::parse("spiral"), Err(QuizError::UnknownMode("spiral".into())));
        assert_eq!(TheoremMode::parse("cyclic_quad"), Ok(TheoremMode::CyclicQuad));
    }
}
