/// Shelf slot layout and the boxes spawned from a sign matrix
use nalgebra::Vector3;
use serde::Serialize;

use crate::matrix::{PointList, SignMatrix};

/// Spacing between neighbouring slots
pub const DEFAULT_UNIT: f64 = 1.2;

/// Slots filled before any sign matrix is applied (all but the centre)
pub const DEFAULT_FILL: [usize; 8] = [0, 1, 2, 3, 5, 6, 7, 8];

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Convert from hue, saturation and lightness, all in `0..=1`
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let channel = |t: f64| {
            let t = t.rem_euclid(1.0);
            let v = if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * 6.0 * (2.0 / 3.0 - t)
            } else {
                p
            };
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        };
        Self {
            r: channel(h + 1.0 / 3.0),
            g: channel(h),
            b: channel(h - 1.0 / 3.0),
        }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Gradient colour for box `i` of `n`, so neighbouring boxes stay distinguishable
pub fn color_by_index(i: usize, n: usize) -> Rgb {
    let hue = (i as f64 / n.max(1) as f64) * 0.9;
    Rgb::from_hsl(hue, 0.85, 0.55)
}

/// A box sitting in one shelf slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShelfBox {
    pub slot: usize,
    pub sign: i8,
    /// Shelf-local anchor position of the slot
    pub position: [f64; 3],
    pub color: Rgb,
}

impl ShelfBox {
    /// Negative boxes are drawn half transparent
    pub fn opacity(&self) -> f32 {
        if self.sign < 0 {
            0.5
        } else {
            1.0
        }
    }

    pub fn local(&self) -> Vector3<f64> {
        Vector3::from(self.position)
    }
}

/// Geometry of a 3×3 slot shelf
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShelfLayout {
    pub unit: f64,
    pub flip_rows: bool,
    pub flip_cols: bool,
}

impl ShelfLayout {
    pub fn new(unit: f64) -> Self {
        Self {
            unit,
            flip_rows: true,
            flip_cols: true,
        }
    }

    /// Shelf-local position of slot `k` (row-major, 0..9)
    pub fn anchor(&self, slot: usize) -> Vector3<f64> {
        let row = (slot / 3) as f64;
        let col = (slot % 3) as f64;
        Vector3::new((col - 1.0) * self.unit, (1.0 - row) * self.unit, 0.0)
    }

    /// Which sign-matrix entry a slot displays
    fn source_cell(&self, slot: usize) -> (usize, usize) {
        let (r, c) = (slot / 3, slot % 3);
        let rr = if self.flip_rows { 2 - r } else { r };
        let cc = if self.flip_cols { 2 - c } else { c };
        (rr, cc)
    }

    fn place(&self, placed: Vec<(usize, i8)>) -> Vec<ShelfBox> {
        let count = placed.len();
        placed
            .into_iter()
            .enumerate()
            .map(|(i, (slot, sign))| {
                let p = self.anchor(slot);
                ShelfBox {
                    slot,
                    sign,
                    position: [p.x, p.y, p.z],
                    color: color_by_index(i, count),
                }
            })
            .collect()
    }

    /// One box per non-zero entry, in slot order
    pub fn boxes_from_signs(&self, signs: &SignMatrix) -> Vec<ShelfBox> {
        let placed = (0..9)
            .filter_map(|slot| {
                let (r, c) = self.source_cell(slot);
                let sign = signs.get(r, c);
                (sign != 0).then_some((slot, sign))
            })
            .collect();
        self.place(placed)
    }

    /// The initial shelf: every slot but the centre, all positive
    pub fn default_boxes(&self) -> Vec<ShelfBox> {
        self.place(DEFAULT_FILL.iter().map(|&slot| (slot, 1)).collect())
    }

    /// Box positions as a point list, ready for a transform
    pub fn positions(boxes: &[ShelfBox]) -> PointList {
        PointList::new(boxes.iter().map(ShelfBox::local).collect())
    }
}

impl Default for ShelfLayout {
    fn default() -> Self {
        Self::new(DEFAULT_UNIT)
    }
}
