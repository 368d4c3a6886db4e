/// Boolean foreground grid with the same dimensions as the image it came from.
///
/// Pixels are stored row-major; `true` marks the silhouette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl BinaryMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width as usize * height as usize],
        }
    }

    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns `false` for coordinates outside the grid.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.pixels[self.index(x as u32, y as u32)]
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = value;
        }
    }

    pub fn foreground_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.pixels.iter().any(|&p| p)
    }

    /// Iterates over `(x, y)` of every foreground pixel in row-major order.
    pub fn foreground(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let w = self.width as usize;
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, p)| **p)
            .map(move |(i, _)| ((i % w) as u32, (i / w) as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_mask_is_empty() {
        let m = BinaryMask::new(4, 3);
        assert_eq!(m.dimensions(), (4, 3));
        assert!(m.is_empty());
        assert_eq!(m.foreground_count(), 0);
    }

    #[test]
    fn from_fn_and_foreground_iteration() {
        let m = BinaryMask::from_fn(3, 2, |x, y| x == y);
        assert_eq!(m.foreground_count(), 2);
        let pts: Vec<_> = m.foreground().collect();
        assert_eq!(pts, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn out_of_bounds_reads_are_background() {
        let mut m = BinaryMask::new(2, 2);
        m.set(1, 1, true);
        assert!(m.get(1, 1));
        assert!(!m.get(-1, 0));
        assert!(!m.get(2, 1));
        m.set(5, 5, true);
        assert_eq!(m.foreground_count(), 1);
    }
}
