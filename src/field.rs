use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParams {
    pub scale: f64,
    pub octaves: usize,
    pub persistence: f64,
    pub lacunarity: f64,
    pub seed: u32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self { scale: 60.0, octaves: 4, persistence: 0.5, lacunarity: 2.0, seed: 0 }
    }
}

/// Which sampler drives a field. `Hashed` is a compatibility shim: it keys a
/// PRNG off the integer lattice cell and ignores the fractal parameters, so
/// it stays deterministic per (x, y, seed) with no noise backend involved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseBackend {
    Fractal,
    Hashed,
}

enum Sampler {
    Fractal(Fbm<Perlin>, f64),
    Hashed(u32),
}

impl Sampler {
    fn new(params: &NoiseParams, backend: NoiseBackend) -> Self {
        match backend {
            NoiseBackend::Fractal => {
                let fbm = Fbm::<Perlin>::new(params.seed)
                    .set_octaves(params.octaves.max(1))
                    .set_persistence(params.persistence)
                    .set_lacunarity(params.lacunarity);
                Sampler::Fractal(fbm, params.scale.max(f64::EPSILON))
            }
            NoiseBackend::Hashed => Sampler::Hashed(params.seed),
        }
    }

    fn get(&self, x: f64, y: f64) -> f64 {
        match self {
            Sampler::Fractal(fbm, scale) => fbm.get([x / scale, y / scale]),
            Sampler::Hashed(seed) => {
                let key = ((x.floor() as i64).wrapping_mul(928_371)
                    + (y.floor() as i64).wrapping_mul(1_237)
                    + (*seed as i64).wrapping_mul(19_349_663))
                    & 0xFFFF_FFFF;
                let mut rng = Pcg64Mcg::seed_from_u64(key as u64);
                rng.gen::<f64>() * 2.0 - 1.0
            }
        }
    }
}

/// One sample, deterministic per inputs. Nominally [-1, 1] for the fractal
/// backend but not guaranteed bounded; callers normalize over the field.
pub fn sample(params: &NoiseParams, backend: NoiseBackend, x: f64, y: f64) -> f64 {
    Sampler::new(params, backend).get(x, y)
}

/// Dense scalar field over the canvas with the observed (min, max) cached
/// for per-field min-max normalization.
pub struct NoiseField {
    pub width: u32,
    pub height: u32,
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl NoiseField {
    pub fn generate(width: u32, height: u32, params: &NoiseParams, backend: NoiseBackend) -> Self {
        let sampler = Sampler::new(params, backend);
        let mut values = Vec::with_capacity((width * height) as usize);
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for y in 0..height {
            for x in 0..width {
                let v = sampler.get(x as f64, y as f64);
                if v < min {
                    min = v;
                }
                if v > max {
                    max = v;
                }
                values.push(v);
            }
        }
        Self { width, height, values, min, max }
    }

    #[inline]
    pub fn raw(&self, x: u32, y: u32) -> f64 {
        self.values[(y * self.width + x) as usize]
    }

    /// Remap to [0,1] over this field's own range. A flat field (max == min)
    /// gets a unit range instead of a divide by zero.
    #[inline]
    pub fn normalized(&self, x: u32, y: u32) -> f64 {
        let range = if self.max > self.min { self.max - self.min } else { 1.0 };
        (self.raw(x, y) - self.min) / range
    }
}
