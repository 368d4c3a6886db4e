//! Outer boundary of the dominant blob in a mask.

use crate::core::BinaryMask;
use std::collections::VecDeque;

/// 8-neighbourhood offsets, clockwise on screen starting at West.
const XPOSTAB: [i64; 8] = [-1, -1, 0, 1, 1, 1, 0, -1];
const YPOSTAB: [i64; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

#[inline]
fn direction_of(dx: i64, dy: i64) -> Option<usize> {
    (0..8).find(|&d| XPOSTAB[d] == dx && YPOSTAB[d] == dy)
}

/// Keeps only the largest 8-connected foreground component.
///
/// Ties go to the component met first in raster order.
pub fn largest_component(mask: &BinaryMask) -> BinaryMask {
    let (width, height) = mask.dimensions();
    let mut labels = vec![0u32; width as usize * height as usize];
    let index = |x: i64, y: i64| y as usize * width as usize + x as usize;

    let mut best_label = 0u32;
    let mut best_size = 0usize;
    let mut next_label = 0u32;
    let mut queue = VecDeque::new();

    for (sx, sy) in mask.foreground() {
        let (sx, sy) = (sx as i64, sy as i64);
        if labels[index(sx, sy)] != 0 {
            continue;
        }
        next_label += 1;
        labels[index(sx, sy)] = next_label;
        queue.push_back((sx, sy));
        let mut size = 0usize;

        while let Some((x, y)) = queue.pop_front() {
            size += 1;
            for d in 0..8 {
                let (nx, ny) = (x + XPOSTAB[d], y + YPOSTAB[d]);
                if mask.get(nx, ny) && labels[index(nx, ny)] == 0 {
                    labels[index(nx, ny)] = next_label;
                    queue.push_back((nx, ny));
                }
            }
        }

        if size > best_size {
            best_size = size;
            best_label = next_label;
        }
    }

    BinaryMask::from_fn(width, height, |x, y| {
        best_label != 0 && labels[index(x as i64, y as i64)] == best_label
    })
}

/// Traces the outer boundary of the component containing the first
/// foreground pixel in raster order (Moore-neighbour tracing).
///
/// The walk goes clockwise on screen and stops when it is about to repeat its
/// first step. Returns an empty vector for an empty mask and a single point
/// for an isolated pixel.
pub fn trace_outer_boundary(mask: &BinaryMask) -> Vec<(i64, i64)> {
    let Some((sx, sy)) = mask.foreground().next() else {
        return Vec::new();
    };
    let start = (sx as i64, sy as i64);

    // Nothing lies west of or above the first raster pixel.
    let mut backtrack = 0usize;
    let mut current = start;
    let mut contour = vec![start];
    let mut first_step: Option<(i64, i64)> = None;
    let limit = 4 * mask.foreground_count() + 8;

    for _ in 0..limit {
        let mut found = None;
        for i in 1..=8 {
            let d = (backtrack + i) % 8;
            let candidate = (current.0 + XPOSTAB[d], current.1 + YPOSTAB[d]);
            if mask.get(candidate.0, candidate.1) {
                found = Some((d, candidate));
                break;
            }
        }
        let Some((d, next)) = found else {
            // Isolated pixel.
            return contour;
        };

        if current == start {
            match first_step {
                None => first_step = Some(next),
                Some(step) if step == next => {
                    // `start` was pushed again on arrival.
                    contour.pop();
                    break;
                }
                Some(_) => {}
            }
        }

        // The neighbour examined just before `next` is background and becomes
        // the new backtrack point.
        let prev = (d + 7) % 8;
        let bx = current.0 + XPOSTAB[prev];
        let by = current.1 + YPOSTAB[prev];
        backtrack = direction_of(bx - next.0, by - next.1).unwrap_or(0);

        current = next;
        contour.push(current);
    }
    contour
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_largest_blob() {
        let mask = BinaryMask::from_fn(12, 6, |x, y| {
            (x < 2 && y < 2) || ((5..11).contains(&x) && (1..5).contains(&y))
        });
        let big = largest_component(&mask);
        assert_eq!(big.foreground_count(), 24);
        assert!(!big.get(0, 0));
        assert!(big.get(5, 1));
    }

    #[test]
    fn diagonal_pixels_are_connected() {
        let mask = BinaryMask::from_fn(4, 4, |x, y| x == y);
        assert_eq!(largest_component(&mask).foreground_count(), 4);
    }

    #[test]
    fn empty_mask_stays_empty() {
        let mask = BinaryMask::new(3, 3);
        assert!(largest_component(&mask).is_empty());
        assert!(trace_outer_boundary(&mask).is_empty());
    }

    #[test]
    fn isolated_pixel_contour() {
        let mut mask = BinaryMask::new(3, 3);
        mask.set(1, 1, true);
        assert_eq!(trace_outer_boundary(&mask), vec![(1, 1)]);
    }

    #[test]
    fn block_boundary_visits_each_edge_pixel_once() {
        let mask = BinaryMask::from_fn(8, 8, |x, y| (2..6).contains(&x) && (1..5).contains(&y));
        let contour = trace_outer_boundary(&mask);
        assert_eq!(contour.len(), 12);
        assert_eq!(contour[0], (2, 1));
        assert_eq!(contour[1], (3, 1));
        let mut unique = contour.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 12);
        for (x, y) in contour {
            assert!(x == 2 || x == 5 || y == 1 || y == 4);
        }
    }

    #[test]
    fn two_pixel_shape_walks_both_pixels() {
        let mask = BinaryMask::from_fn(4, 3, |x, y| y == 1 && (1..3).contains(&x));
        assert_eq!(trace_outer_boundary(&mask), vec![(1, 1), (2, 1)]);
    }

    #[test]
    fn consecutive_points_are_neighbours() {
        let mask = BinaryMask::from_fn(20, 20, |x, y| {
            let dx = x as f64 - 9.5;
            let dy = y as f64 - 9.5;
            dx * dx + dy * dy <= 49.0
        });
        let contour = trace_outer_boundary(&mask);
        assert!(contour.len() > 8);
        for pair in contour.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!((a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1);
            assert_ne!(a, b);
        }
        let (first, last) = (contour[0], contour[contour.len() - 1]);
        assert!((first.0 - last.0).abs() <= 1 && (first.1 - last.1).abs() <= 1);
    }
}
