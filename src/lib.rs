#![deny(unsafe_code)]

pub mod camera;
pub mod error;
pub mod hittable;
pub mod material;
pub mod progress;
pub mod ray;
pub mod render;
pub mod sampler;
pub mod scene;
pub mod vec3;

use std::io::Write;

pub use crate::camera::Camera;
pub use crate::error::{Error, Result};
pub use crate::hittable::{HitRecord, Hittable, HittableList, Sphere};
pub use crate::material::Material;
pub use crate::render::{render, RenderSettings};
pub use crate::sampler::Sampler;

use crate::ray::Ray;
use crate::vec3::{unit_vector, Axis::Y, Channel::*, Color, Vec3};

/// Rays start this far along their path before they can hit anything, so a
/// scattered ray doesn't immediately re-hit the surface it left.
const NEAR: f64 = 0.0001;

/// Background seen by rays that escape the scene: white at the horizon
/// blending to pale blue overhead.
pub fn sky_color(ray: &Ray) -> Color {
    let t = ((1. + unit_vector(ray.direction)[Y]) / 2.).abs();
    (1. - t) * Color::from(1.) + t * Vec3(0.7, 0.8, 1.0)
}

/// Computes the color seen along `ray` in the scene `world`.
///
/// This is the actual ray-tracing routine. The path is followed for at most
/// `depth` surface interactions; a path that is still bouncing after that, or
/// that is absorbed by a surface, contributes black.
pub fn ray_color(mut ray: Ray, world: &impl Hittable, depth: usize, sampler: &mut Sampler) -> Color {
    // Records the cumulative (product) attenuation of each surface we've
    // visited so far.
    let mut strength = Color::from(1.);

    for _ in 0..depth {
        let hit = match world.hit(&ray, NEAR..f64::INFINITY) {
            Some(hit) => hit,
            None => return strength * sky_color(&ray),
        };

        match hit.material.scatter(&ray, &hit, sampler) {
            Some((new_ray, attenuation)) => {
                ray = new_ray;
                strength = strength * attenuation;
            }
            None => return Color::default(),
        }
    }

    Color::default()
}

/// A rendered picture: one linear color per pixel, row-major, top row first.
#[derive(Clone, Debug)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Image {
    /// An all-black image.
    pub fn new(width: usize, height: usize) -> Self {
        Image {
            width,
            height,
            pixels: vec![Color::default(); width * height],
        }
    }

    /// Wraps an existing pixel buffer, which must hold `width * height`
    /// pixels.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(Error::InvalidSettings(format!(
                "{} pixels do not make a {}x{} image",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Image {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// The pixel in column `x` of row `y`, counting rows from the top.
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }
}

/// Writes one pixel as a `P3` body line, gamma-correcting with a square root.
pub fn write_color(out: &mut impl Write, color: Color) -> Result<()> {
    fn to_byte(x: f64) -> i32 {
        (256. * x.sqrt().max(0.).min(0.999)) as i32
    }

    writeln!(
        out,
        "{} {} {}",
        to_byte(color[R]),
        to_byte(color[G]),
        to_byte(color[B])
    )?;
    Ok(())
}

/// Writes `image` as a plain-text (`P3`) PPM.
pub fn write_ppm(out: &mut impl Write, image: &Image) -> Result<()> {
    write!(out, "P3\n{} {}\n255\n", image.width, image.height)?;
    for &color in &image.pixels {
        write_color(out, color)?;
    }
    out.flush()?;
    Ok(())
}
