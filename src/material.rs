use crate::hittable::HitRecord;
use crate::ray::Ray;
use crate::sampler::Sampler;
use crate::vec3::{reflect, refract, Color, EPS};

/// Material options for a rendered object.
///
/// Materials are immutable once built and are normally shared between many
/// objects through an `Arc`. Use the constructor functions, which clamp the
/// parameters into their meaningful ranges.
#[derive(Clone, Debug)]
pub enum Material {
    /// An opaque material with a matte surface, where lighting is calculated
    /// using [Lambertian reflectance][lambert].
    ///
    /// [lambert]: https://en.wikipedia.org/wiki/Lambertian_reflectance
    Lambertian { albedo: Color },
    /// A reflective material that looks like polished or frosted metal.
    Metal {
        /// The amount of light energy reflected in each color component, so
        /// `Vec3(1., 1., 1.)` is a white surface, and `Vec3(0., 0., 0.)` is
        /// totally black.
        albedo: Color,
        /// The amount of randomness introduced into reflected rays. A `fuzz` of
        /// 0 makes the surface look polished and mirror-smooth, while a `fuzz`
        /// of 1 produces a frosted, almost matte surface.
        fuzz: f64,
    },
    /// A transparent refractive material like glass or water.
    Dielectric {
        albedo: Color,
        /// [Refractive index][ref-idx] of the material, at least 1.
        ///
        /// [ref-idx]: https://en.wikipedia.org/wiki/Refractive_index
        refr_index: f64,
        /// Chance that a ray crossing the surface refracts rather than
        /// reflects.
        refr_likelihood: f64,
    },
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.max(0.).min(1.),
        }
    }

    pub fn dielectric(albedo: Color, refr_index: f64, refr_likelihood: f64) -> Self {
        Material::Dielectric {
            albedo,
            refr_index: refr_index.max(1.),
            refr_likelihood: refr_likelihood.max(0.).min(1.),
        }
    }

    /// Performs surface scattering from a material.
    ///
    /// When light traveling along `ray` reaches a surface made out of this
    /// material (intersection described by `hit`), some of it will be absorbed,
    /// and the rest will either be reflected or refracted. If 100% of the light
    /// is absorbed, `scatter` returns `None`; otherwise, it returns a new `Ray`
    /// giving the reflected/refracted direction of the light, and a `Color`
    /// with the amount of energy reflected/refracted in each of red, green,
    /// and blue.
    ///
    /// (In reality, light would be *both* reflected and refracted, but we
    /// choose one or the other randomly and use over-sampling to produce a
    /// blend.)
    pub fn scatter(&self, ray: &Ray, hit: &HitRecord, sampler: &mut Sampler) -> Option<(Ray, Color)> {
        match self {
            Material::Lambertian { albedo } => {
                let mut direction = hit.normal + sampler.random_unit_vector();
                if direction.squared_length() < EPS {
                    direction = hit.normal;
                }
                Some((Ray::new(hit.p, direction), *albedo))
            }
            Material::Metal { albedo, fuzz } => {
                let direction =
                    reflect(ray.direction, hit.normal) + *fuzz * sampler.random_unit_vector();
                if direction.dot(hit.normal) > EPS {
                    Some((Ray::new(hit.p, direction), *albedo))
                } else {
                    // Scattered below the surface.
                    None
                }
            }
            Material::Dielectric {
                albedo,
                refr_index,
                refr_likelihood,
            } => {
                let direction = if sampler.random_double() < *refr_likelihood {
                    let ratio = if hit.front_face {
                        *refr_index
                    } else {
                        1. / *refr_index
                    };
                    refract(ray.direction, hit.normal, ratio)
                } else {
                    reflect(ray.direction, hit.normal)
                };
                Some((Ray::new(hit.p, direction), *albedo))
            }
        }
    }
}
