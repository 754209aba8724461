//! Normalized-polygon to pixel-rectangle conversion.

use chairspot_core::{NormalizedVertex, PixelRect};

/// Compute the axis-aligned pixel envelope of a normalized polygon.
///
/// Every vertex is scaled by the image dimensions and truncated to an
/// integer, then the elementwise min/max across all vertices forms the
/// rectangle. The polygon's actual shape is discarded — this is the coarse
/// box the rest of the pipeline crops. Returns `None` for an empty polygon.
pub fn bounding_rect(vertices: &[NormalizedVertex], width: u32, height: u32) -> Option<PixelRect> {
    let mut iter = vertices.iter().map(|v| {
        let x = (v.x * width as f32) as u32;
        let y = (v.y * height as f32) as u32;
        (x, y)
    });

    let (first_x, first_y) = iter.next()?;
    let mut rect = PixelRect {
        x_min: first_x,
        y_min: first_y,
        x_max: first_x,
        y_max: first_y,
    };
    for (x, y) in iter {
        rect.x_min = rect.x_min.min(x);
        rect.y_min = rect.y_min.min(y);
        rect.x_max = rect.x_max.max(x);
        rect.y_max = rect.y_max.max(y);
    }
    Some(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> NormalizedVertex {
        NormalizedVertex { x, y }
    }

    #[test]
    fn scales_and_takes_min_max() {
        let vertices = [v(0.1, 0.2), v(0.5, 0.2), v(0.5, 0.8), v(0.1, 0.8)];
        let rect = bounding_rect(&vertices, 1000, 1000).unwrap();
        assert_eq!(
            rect,
            PixelRect {
                x_min: 100,
                y_min: 200,
                x_max: 500,
                y_max: 800,
            }
        );
        assert_eq!(rect.width(), 400);
        assert_eq!(rect.height(), 600);
    }

    #[test]
    fn vertex_order_does_not_matter() {
        let a = [v(0.5, 0.8), v(0.1, 0.2), v(0.1, 0.8), v(0.5, 0.2)];
        let b = [v(0.1, 0.2), v(0.5, 0.2), v(0.5, 0.8), v(0.1, 0.8)];
        assert_eq!(
            bounding_rect(&a, 640, 480),
            bounding_rect(&b, 640, 480)
        );
    }

    #[test]
    fn truncates_fractional_pixels() {
        let vertices = [v(0.333, 0.333), v(0.666, 0.666)];
        let rect = bounding_rect(&vertices, 100, 100).unwrap();
        assert_eq!(rect.x_min, 33);
        assert_eq!(rect.x_max, 66);
    }

    #[test]
    fn empty_polygon_yields_nothing() {
        assert_eq!(bounding_rect(&[], 1000, 1000), None);
    }
}
