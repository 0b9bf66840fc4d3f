use crate::{CoverflowOptions, ItemTransform};

/// The numeric knobs the transform interpolation needs, detached from the full options so the
/// math stays a pure function of plain values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformParams {
    pub spacing: f32,
    pub wing_span: f32,
    pub rotation: f32,
    pub mid_rotation: f32,
    pub perspective: f32,
    pub scale_down: f32,
    pub scale_further: f32,
}

impl<K> From<&CoverflowOptions<K>> for TransformParams {
    fn from(o: &CoverflowOptions<K>) -> Self {
        Self {
            spacing: o.spacing,
            wing_span: o.wing_span,
            rotation: o.rotation,
            mid_rotation: o.mid_rotation,
            perspective: o.perspective,
            scale_down: o.scale_down,
            scale_further: o.scale_further,
        }
    }
}

/// Piecewise-linear interpolation over `(input, output)` stops, clamped to the endpoint values
/// outside the control range. Stops must be sorted by input.
fn interpolate(stops: &[(f32, f32)], x: f32) -> f32 {
    debug_assert!(stops.len() >= 2, "interpolate needs at least two stops");

    let (first_in, first_out) = stops[0];
    if x <= first_in {
        return first_out;
    }
    let (last_in, last_out) = stops[stops.len() - 1];
    if x >= last_in {
        return last_out;
    }

    for w in stops.windows(2) {
        let (x0, y0) = w[0];
        let (x1, y1) = w[1];
        if x <= x1 {
            let t = (x - x0) / (x1 - x0);
            return y0 + (y1 - y0) * t;
        }
    }
    last_out
}

/// Computes the 3D transform for an item at `offset` position units from the scroll position
/// (`offset = ordinal - scroll_position`; fractional, any sign, unbounded magnitude).
///
/// All three channels are independent and symmetric about zero: negating the offset negates
/// `translate_x` and `rotate_y` and leaves `scale` unchanged. The rotation curve has extra
/// control points at ±0.5 so the flip reads clearly as an item crosses the midpoint, while the
/// outer segments are flat (all distant items share the same maximal tilt).
pub fn item_transform(offset: f32, p: &TransformParams) -> ItemTransform {
    let translate_x = interpolate(
        &[
            (-2.0, p.spacing + p.wing_span),
            (-1.0, p.spacing),
            (0.0, 0.0),
            (1.0, -p.spacing),
            (2.0, -p.spacing - p.wing_span),
        ],
        offset,
    );

    let scale = interpolate(
        &[
            (-2.0, p.scale_further),
            (-1.0, p.scale_down),
            (0.0, 1.0),
            (1.0, p.scale_down),
            (2.0, p.scale_further),
        ],
        offset,
    );

    let rotate_y = interpolate(
        &[
            (-2.0, -p.rotation),
            (-1.0, -p.rotation),
            (-0.5, -p.mid_rotation),
            (0.0, 0.0),
            (0.5, p.mid_rotation),
            (1.0, p.rotation),
            (2.0, p.rotation),
        ],
        offset,
    );

    ItemTransform {
        translate_x,
        scale,
        rotate_y,
        perspective: p.perspective,
    }
}

/// The per-item "focus proximity" signal: 0 when the item is exactly centered, saturating at
/// ±1 one full position away and beyond.
///
/// Hosts pass this into item content explicitly (e.g. to dim or sharpen covers) instead of
/// relying on ambient context propagation.
pub fn focus_proximity(offset: f32) -> f32 {
    offset.clamp(-1.0, 1.0)
}
