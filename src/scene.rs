//! Terminal scene renderer.
//!
//! Coordinate system (world units, origin bottom-left):
//! - `x` in `[0, 100]`
//! - `y` in `[0, 70]`
//!
//! [`render_frame`] is a pure function of `(params, frame)`. Motion is
//! decorative: crane sway and bubble bob are sines of the frame clock, and the
//! container count is a saturating progress ratio. Nothing here is retained
//! between calls.

use crate::scenario::ScenarioParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const WORLD_WIDTH: f64 = 100.0;
pub const WORLD_HEIGHT: f64 = 70.0;

/// Throughput at which the ship fills in exactly `FULL_LOAD_FRAMES` frames.
pub const REFERENCE_GMPH: f64 = 45.85;
pub const FULL_LOAD_FRAMES: f64 = 60.0;
pub const MAX_CONTAINERS: usize = 20;

pub const CRANE_COUNT: usize = 14;
pub const CRANE_SWAY_RATE: f64 = 0.15;
pub const CRANE_SWAY_AMPLITUDE: f64 = 1.2;

pub const BUBBLE_BASE_Y: f64 = 60.0;
pub const BUBBLE_RATE: f64 = 0.1;
pub const BUBBLE_AMPLITUDE: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BACKGROUND: Color = Color(0xd0, 0xd3, 0xd4);
    pub const SEA: Color = Color(0x5d, 0xad, 0xe2);
    pub const QUAY: Color = Color(0x7f, 0x8c, 0x8d);
    pub const HULL: Color = Color(0x2c, 0x3e, 0x50);
    pub const DECKHOUSE: Color = Color(0xc0, 0x39, 0x2b);
    pub const CONTAINER: Color = Color(0x00, 0x80, 0x00);
    pub const CRANE: Color = Color(0xf3, 0x9c, 0x12);
    pub const BOOM: Color = Color(0x1f, 0x77, 0xb4);
    pub const SMOKE: Color = Color(0x7f, 0x8c, 0x8d);
    pub const BUBBLE: Color = Color(0xbd, 0xc3, 0xc7);
    pub const LABEL: Color = Color(0x00, 0x00, 0x00);

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// What a shape depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Prop {
    Sea,
    Quay,
    Hull,
    Deckhouse,
    Container,
    CraneTower,
    CraneBoom,
    CraneSpreader,
    Smoke,
    Co2Bubble,
    Co2Label,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Primitive {
    /// Axis-aligned rectangle anchored at its lower-left corner.
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: Color,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Color,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        stroke: Color,
    },
    /// Text centered on `(x, y)`.
    Text {
        x: f64,
        y: f64,
        text: String,
        size: f64,
        fill: Color,
    },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shape {
    pub prop: Prop,
    pub primitive: Primitive,
}

/// Draw list for one frame, back to front.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub shapes: Vec<Shape>,
}

impl Scene {
    fn new() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            background: Color::BACKGROUND,
            shapes: Vec::with_capacity(128),
        }
    }

    fn push(&mut self, prop: Prop, primitive: Primitive) {
        self.shapes.push(Shape { prop, primitive });
    }

    fn rect(&mut self, prop: Prop, x: f64, y: f64, w: f64, h: f64, fill: Color) {
        self.push(prop, Primitive::Rect { x, y, w, h, fill });
    }

    fn circle(&mut self, prop: Prop, cx: f64, cy: f64, r: f64, fill: Color) {
        self.push(prop, Primitive::Circle { cx, cy, r, fill });
    }

    pub fn shapes_of(&self, prop: Prop) -> impl Iterator<Item = &Primitive> + '_ {
        self.shapes
            .iter()
            .filter(move |s| s.prop == prop)
            .map(|s| &s.primitive)
    }

    pub fn count(&self, prop: Prop) -> usize {
        self.shapes_of(prop).count()
    }
}

/// `n` evenly spaced points over `[start, stop]`, both ends included.
///
/// `n == 1` yields `[start]`; `n == 0` yields nothing.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// Ship loading progress in `[0, 1]`.
pub fn loading_progress(params: &ScenarioParams, frame: u64) -> f64 {
    ((frame as f64 / FULL_LOAD_FRAMES) * (params.throughput_gmph / REFERENCE_GMPH)).min(1.0)
}

pub fn loaded_containers(params: &ScenarioParams, frame: u64) -> usize {
    (loading_progress(params, frame) * MAX_CONTAINERS as f64) as usize
}

/// Horizontal crane offset. `t` is the frame clock as a float.
pub fn crane_sway(t: f64, speed: f64, crane_index: usize) -> f64 {
    (t * CRANE_SWAY_RATE * speed + crane_index as f64).sin() * CRANE_SWAY_AMPLITUDE
}

/// Vertical CO2 bubble position; the phase comes from the bubble's `x`.
pub fn bubble_y(t: f64, x: f64) -> f64 {
    BUBBLE_BASE_Y + (t * BUBBLE_RATE + x).sin() * BUBBLE_AMPLITUDE
}

pub fn render_frame(params: &ScenarioParams, frame: u64) -> Scene {
    let t = frame as f64;
    let mut scene = Scene::new();

    scene.rect(Prop::Sea, 0.0, 0.0, 100.0, 25.0, Color::SEA);
    scene.rect(Prop::Quay, 0.0, 25.0, 100.0, 20.0, Color::QUAY);

    scene.rect(Prop::Hull, 20.0, 8.0, 60.0, 10.0, Color::HULL);
    scene.rect(Prop::Deckhouse, 30.0, 18.0, 40.0, 5.0, Color::DECKHOUSE);

    // Two rows of ten on deck.
    for i in 0..loaded_containers(params, frame) {
        let x = 25.0 + (i % 10) as f64 * 5.0;
        let y = 10.0 + (i / 10) as f64 * 3.0;
        scene.rect(Prop::Container, x, y, 3.0, 2.0, Color::CONTAINER);
    }

    for (i, x) in linspace(5.0, 95.0, CRANE_COUNT).into_iter().enumerate() {
        let sx = x + crane_sway(t, params.animation_speed, i);

        scene.rect(Prop::CraneTower, sx, 25.0, 2.0, 15.0, Color::CRANE);
        scene.push(
            Prop::CraneBoom,
            Primitive::Line {
                x1: sx + 1.0,
                y1: 40.0,
                x2: sx + 6.0,
                y2: 48.0,
                width: 2.0,
                stroke: Color::BOOM,
            },
        );
        scene.rect(Prop::CraneSpreader, sx + 6.0, 46.0, 2.0, 2.0, Color::CONTAINER);
    }

    for x in linspace(15.0, 85.0, params.smoke_count) {
        scene.circle(Prop::Smoke, x, 50.0, 2.0, Color::SMOKE);
    }

    for x in linspace(20.0, 80.0, params.co2_bubble_count) {
        let y = bubble_y(t, x);
        scene.circle(Prop::Co2Bubble, x, y, 3.0, Color::BUBBLE);
        scene.push(
            Prop::Co2Label,
            Primitive::Text {
                x,
                y,
                text: "CO2".to_string(),
                size: 9.0,
                fill: Color::LABEL,
            },
        );
    }

    scene
}
