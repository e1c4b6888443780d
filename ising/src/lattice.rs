use itertools::iproduct;
use nalgebra::DMatrix;
use rand::Rng;

/// Spin value of an "up" site
pub const UP: i8 = 1;
/// Spin value of a "down" site
pub const DOWN: i8 = -1;

/// A lattice coordinate already wrapped into `0..size_x` × `0..size_y`.
///
/// Two sites are equal iff their canonical coordinates match, which makes
/// `Site` usable as a cluster-membership key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Site {
    pub x: usize,
    pub y: usize,
}

/// Fixed-size 2D Ising lattice with periodic boundary conditions.
///
/// Spins are stored row-major in a single contiguous buffer (`y * size_x + x`).
/// An axis of length 1 is degenerate: neighbors along it are not wrapped back
/// onto the site itself but contribute a fixed zero. `size_y == 1` is the
/// usual 1D chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    size_x: usize,
    size_y: usize,
    /// Number of sites as a float, used as a normalization constant
    size_xy: f64,
    spins: Vec<i8>,
}

impl Lattice {
    /// Create a `size_x` × `size_y` lattice with every spin up
    pub fn new(size_x: usize, size_y: usize) -> Self {
        assert!(
            size_x > 0 && size_y > 0,
            "lattice dimensions must be positive, got {}x{}",
            size_x,
            size_y
        );

        Self {
            size_x,
            size_y,
            size_xy: size_x as f64 * size_y as f64,
            spins: vec![UP; size_x * size_y],
        }
    }

    /// Create a 1D chain of `size_x` spins, all up
    pub fn chain(size_x: usize) -> Self {
        Self::new(size_x, 1)
    }

    pub fn size_x(&self) -> usize {
        self.size_x
    }

    pub fn size_y(&self) -> usize {
        self.size_y
    }

    /// Number of sites, as a float
    pub fn size_xy(&self) -> f64 {
        self.size_xy
    }

    /// True for the degenerate 1D chain (`size_y == 1`)
    pub fn is_chain(&self) -> bool {
        self.size_y == 1
    }

    /// Wrap an arbitrary coordinate into its canonical site
    pub fn site(&self, x: isize, y: isize) -> Site {
        Site {
            x: x.rem_euclid(self.size_x as isize) as usize,
            y: y.rem_euclid(self.size_y as isize) as usize,
        }
    }

    #[inline]
    fn index(&self, x: isize, y: isize) -> usize {
        let site = self.site(x, y);
        site.y * self.size_x + site.x
    }

    /// Spin at `(x, y)` with periodic wrapping on both axes
    #[inline]
    pub fn spin_at(&self, x: isize, y: isize) -> i8 {
        self.spins[self.index(x, y)]
    }

    /// Spin at an already canonical site
    #[inline]
    pub fn spin(&self, site: Site) -> i8 {
        self.spins[site.y * self.size_x + site.x]
    }

    /// Assign a spin value at `(x, y)` with periodic wrapping
    pub fn set_spin(&mut self, x: isize, y: isize, value: i8) {
        assert!(
            value == UP || value == DOWN,
            "spin values are restricted to +1/-1, got {}",
            value
        );
        let idx = self.index(x, y);
        self.spins[idx] = value;
    }

    /// Reverse the spin at `(x, y)`
    #[inline]
    pub fn flip(&mut self, x: isize, y: isize) {
        let idx = self.index(x, y);
        self.spins[idx] *= -1;
    }

    /// Reverse the spin at an already canonical site
    #[inline]
    pub fn flip_site(&mut self, site: Site) {
        let idx = site.y * self.size_x + site.x;
        self.spins[idx] *= -1;
    }

    /// True when the offset moves along an axis of length 1
    #[inline]
    fn is_degenerate_offset(&self, dx: isize, dy: isize) -> bool {
        (dx != 0 && self.size_x == 1) || (dy != 0 && self.size_y == 1)
    }

    /// Value of the neighbor at offset `(dx, dy)` from `(x, y)`.
    ///
    /// Offsets along a degenerate axis yield 0 instead of wrapping back onto
    /// the site itself.
    #[inline]
    pub fn neighbor(&self, x: isize, y: isize, dx: isize, dy: isize) -> i8 {
        if self.is_degenerate_offset(dx, dy) {
            return 0;
        }
        self.spin_at(x + dx, y + dy)
    }

    /// Canonical sites of the (up to 4) nearest neighbors of `site`.
    ///
    /// Degenerate axes contribute no neighbors, so a chain reports two and a
    /// single site none.
    pub fn neighbor_sites(&self, site: Site) -> impl Iterator<Item = Site> + '_ {
        let (x, y) = (site.x as isize, site.y as isize);
        static OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        OFFSETS
            .iter()
            .filter(move |&&(dx, dy)| !self.is_degenerate_offset(dx, dy))
            .map(move |&(dx, dy)| self.site(x + dx, y + dy))
    }

    /// Iterate over every canonical site, row by row
    pub fn sites(&self) -> impl Iterator<Item = Site> {
        iproduct!(0..self.size_y, 0..self.size_x).map(|(y, x)| Site { x, y })
    }

    /// Raw row-major spin buffer
    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    /// Set every spin to `value`
    pub fn uniform(&mut self, value: i8) {
        assert!(
            value == UP || value == DOWN,
            "spin values are restricted to +1/-1, got {}",
            value
        );
        self.spins.fill(value);
    }

    /// Draw every spin independently: up with probability `p`, down otherwise
    pub fn randomize<R: Rng + ?Sized>(&mut self, p: f64, rng: &mut R) {
        assert!(
            (0.0..=1.0).contains(&p),
            "up-spin probability must lie in [0, 1], got {}",
            p
        );
        for spin in self.spins.iter_mut() {
            *spin = if rng.gen::<f64>() < p { UP } else { DOWN };
        }
    }

    /// Snapshot of the spins as a `size_y` × `size_x` integer grid
    pub fn to_grid(&self) -> DMatrix<i32> {
        DMatrix::from_fn(self.size_y, self.size_x, |row, col| {
            self.spins[row * self.size_x + col] as i32
        })
    }
}
