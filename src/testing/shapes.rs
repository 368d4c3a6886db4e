use image::{DynamicImage, Rgb, RgbImage};

pub const BACKGROUND_LEVEL: u8 = 40;
pub const SUBJECT_LEVEL: u8 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Square,
    Circle,
}

impl Shape {
    /// Whether `(dx, dy)` from the centre lies inside a shape of half-size
    /// `half` turned by `angle_deg`.
    fn contains(self, dx: f64, dy: f64, half: f64, angle_deg: f64) -> bool {
        match self {
            Shape::Square => {
                let (s, c) = angle_deg.to_radians().sin_cos();
                let u = c * dx + s * dy;
                let v = -s * dx + c * dy;
                u.abs() <= half && v.abs() <= half
            }
            Shape::Circle => dx * dx + dy * dy <= half * half,
        }
    }
}

/// A `size`×`size` subject photo and its empty background, with the shape
/// centred.
pub fn shape_pair(shape: Shape, size: u32, half: f64, angle_deg: f64) -> (DynamicImage, DynamicImage) {
    shape_pair_at(shape, size, half, angle_deg, (0, 0))
}

/// Like [`shape_pair`] with the centre moved by `offset` pixels.
pub fn shape_pair_at(
    shape: Shape,
    size: u32,
    half: f64,
    angle_deg: f64,
    offset: (i32, i32),
) -> (DynamicImage, DynamicImage) {
    let cx = (size / 2) as f64 + offset.0 as f64;
    let cy = (size / 2) as f64 + offset.1 as f64;
    let background = RgbImage::from_pixel(size, size, Rgb([BACKGROUND_LEVEL; 3]));
    let subject = RgbImage::from_fn(size, size, |x, y| {
        if shape.contains(x as f64 - cx, y as f64 - cy, half, angle_deg) {
            Rgb([SUBJECT_LEVEL; 3])
        } else {
            Rgb([BACKGROUND_LEVEL; 3])
        }
    });
    (
        DynamicImage::ImageRgb8(subject),
        DynamicImage::ImageRgb8(background),
    )
}
