//! The parallel render driver.
//!
//! The image is one flat, row-major pixel buffer. It is cut into contiguous
//! chunks, one per worker, and each worker has exclusive `&mut` access to its
//! chunk alone, so the workers never share a pixel and need no locking to
//! write their results.

use std::ops::Range;
use std::time::Instant;

use log::{debug, info};

use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::hittable::Hittable;
use crate::progress::Progress;
use crate::sampler::Sampler;
use crate::vec3::Color;
use crate::{ray_color, Image};

/// Workers report progress after every this many pixels.
const PROGRESS_INTERVAL: usize = 100;

/// Everything about a render except what is being looked at.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    /// Paths traced and averaged for each pixel.
    pub samples_per_pixel: usize,
    /// Longest path, in surface interactions, before giving up on it.
    pub max_depth: usize,
    /// Worker threads; each renders one contiguous chunk of the image.
    pub threads: usize,
    /// Seeds the workers' samplers. The same seed and thread count always
    /// produce the same image.
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        // 1200 wide at 3:2.
        RenderSettings {
            width: 1200,
            height: 800,
            samples_per_pixel: 50,
            max_depth: 50,
            threads: 16,
            seed: 0xDEADBEEF,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<()> {
        let check = |ok: bool, what: &str| {
            if ok {
                Ok(())
            } else {
                Err(Error::InvalidSettings(format!("{} must be at least 1", what)))
            }
        };
        check(self.width > 0, "width")?;
        check(self.height > 0, "height")?;
        check(self.samples_per_pixel > 0, "samples per pixel")?;
        check(self.threads > 0, "thread count")?;

        let bytes = self
            .width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(std::mem::size_of::<Color>()));
        match bytes {
            Some(b) if b <= isize::MAX as usize => Ok(()),
            _ => Err(Error::InvalidSettings(format!(
                "a {}x{} image is too large",
                self.width, self.height
            ))),
        }
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// The height, rounded to the nearest pixel, of an image `width` wide with
/// the given aspect ratio (width over height).
pub fn image_height_for(width: usize, aspect: f64) -> Result<usize> {
    if !(aspect.is_finite() && aspect > 0.) {
        return Err(Error::InvalidSettings(format!(
            "aspect ratio {} must be a positive number",
            aspect
        )));
    }
    let height = 0.5 + width as f64 / aspect;
    if height >= usize::MAX as f64 {
        return Err(Error::InvalidSettings(format!(
            "aspect ratio {} makes the image too tall",
            aspect
        )));
    }
    Ok(height as usize)
}

/// Splits `0..n` into `workers` contiguous ranges of `n / workers` indices,
/// with the last range also taking whatever is left over.
///
/// ```
/// use pathtracer::render::partition;
///
/// assert_eq!(partition(10, 3), vec![0..3, 3..6, 6..10]);
/// ```
pub fn partition(n: usize, workers: usize) -> Vec<Range<usize>> {
    let per_worker = n.checked_div(workers).unwrap_or(0);
    (0..workers)
        .map(|w| {
            let start = w * per_worker;
            let end = if w + 1 == workers { n } else { start + per_worker };
            start..end
        })
        .collect()
}

/// Renders `world` as seen by `camera`.
///
/// Spawns `settings.threads` workers, each tracing `samples_per_pixel` jittered
/// paths through every pixel of its chunk, and waits for all of them before
/// returning the finished image.
pub fn render(
    settings: &RenderSettings,
    camera: &Camera,
    world: &impl Hittable,
    progress: &Progress,
) -> Result<Image> {
    settings.validate()?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.threads)
        .thread_name(|i| format!("render-{}", i))
        .build()?;

    info!(
        "rendering {}x{}, {} samples per pixel, depth {}, {} workers",
        settings.width, settings.height, settings.samples_per_pixel, settings.max_depth, settings.threads
    );
    let started = Instant::now();

    let mut image = Image::new(settings.width, settings.height);
    let chunks = partition(settings.width * settings.height, settings.threads);
    progress.start(settings.threads);
    pool.scope(|s| {
        let mut rest = image.pixels_mut();
        for (worker, range) in chunks.into_iter().enumerate() {
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            s.spawn(move |_| render_chunk(worker, range, chunk, settings, camera, world, progress));
        }
    });
    progress.finish(settings.threads);

    info!("rendered in {:.2?}", started.elapsed());
    Ok(image)
}

/// Fills `chunk`, which holds the pixels with flat indices `range`.
fn render_chunk(
    worker: usize,
    range: Range<usize>,
    chunk: &mut [Color],
    settings: &RenderSettings,
    camera: &Camera,
    world: &impl Hittable,
    progress: &Progress,
) {
    let mut sampler = Sampler::for_worker(settings.seed, worker);
    debug!("worker {} rendering pixels {:?}", worker, range);

    let (width, height) = (settings.width, settings.height);
    // A one-pixel axis has nothing to span.
    let u_scale = (width - 1).max(1) as f64;
    let v_scale = (height - 1).max(1) as f64;

    let total = chunk.len();
    for (offset, (idx, pixel)) in range.zip(chunk.iter_mut()).enumerate() {
        // Buffer rows run top to bottom; camera rows bottom to top.
        let i = idx % width;
        let j = height - 1 - idx / width;

        let mut accum = Color::default();
        for _ in 0..settings.samples_per_pixel {
            let u = (i as f64 + sampler.random_double()) / u_scale;
            let v = (j as f64 + sampler.random_double()) / v_scale;
            let ray = camera.get_ray(u, v, &mut sampler);
            accum += ray_color(ray, world, settings.max_depth, &mut sampler);
        }
        *pixel = accum / settings.samples_per_pixel as f64;

        if offset % PROGRESS_INTERVAL == 0 {
            progress.update(worker, offset, total);
        }
    }
    progress.update(worker, total, total);
}
