//! Seeded 3-D gradient noise
//!
//! Classic improved Perlin noise over a seeded permutation table. All math is
//! `f64` so the same seed reproduces the same terrain everywhere.

/// Shuffle seeds wrap at 2^32 so `seed + 1.0` stays exact in `f64`
const SEED_PERIOD: f64 = 4_294_967_296.0;

/// Seeded gradient noise generator
#[derive(Debug, Clone)]
pub struct Perlin {
    /// Permutation table, doubled for wraparound
    perm: [u8; 512],
}

impl Perlin {
    pub fn new(seed: f64) -> Self {
        let mut perlin = Self { perm: [0; 512] };
        perlin.reseed(seed);
        perlin
    }

    /// Noise for an integer world seed.
    ///
    /// The high half is folded into the low half so every bit of the seed
    /// still picks the permutation.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(((seed ^ (seed >> 32)) & 0xFFFF_FFFF) as f64)
    }

    /// Rebuild the permutation table from a seed
    pub fn reseed(&mut self, seed: f64) {
        let mut permutation: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut rng = SineRng::new(seed);

        // Fisher-Yates, walking down from the end
        let mut current = permutation.len();
        while current != 0 {
            let pick = (rng.next_f64() * current as f64).floor() as usize;
            current -= 1;
            permutation.swap(current, pick.min(current));
        }

        for (i, &p) in permutation.iter().enumerate() {
            self.perm[i] = p;
            self.perm[i + 256] = p;
        }
    }

    /// Sample noise at (x, y, z). Roughly in [-1, 1].
    pub fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let zi = (z.floor() as i64 & 255) as usize;
        let x = x - x.floor();
        let y = y - y.floor();
        let z = z - z.floor();
        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p[aa], x, y, z), grad(p[ba], x - 1.0, y, z)),
                lerp(u, grad(p[ab], x, y - 1.0, z), grad(p[bb], x - 1.0, y - 1.0, z)),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p[aa + 1], x, y, z - 1.0),
                    grad(p[ba + 1], x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(p[ab + 1], x, y - 1.0, z - 1.0),
                    grad(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }
}

/// Sine-hash generator used only for shuffling. Each draw advances the seed by one.
struct SineRng {
    seed: f64,
}

impl SineRng {
    fn new(seed: f64) -> Self {
        let seed = if seed.is_finite() { seed % SEED_PERIOD } else { 0.0 };
        Self { seed }
    }

    fn next_f64(&mut self) -> f64 {
        let x = self.seed.sin() * 10000.0;
        self.seed += 1.0;
        x - x.floor()
    }
}

/// 6t^5 - 15t^4 + 10t^3
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot the offset with one of 16 gradient directions picked by the hash
#[inline]
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
