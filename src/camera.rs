use crate::ray::Ray;
use crate::sampler::Sampler;
use crate::vec3::{unit_vector, Point3, Vec3};

/// A thin-lens camera. Everything is derived up front by `Camera::look`.
#[derive(Clone, Debug)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Places a camera at `look_from`, aimed at `look_at`, with `up` fixing
    /// the roll. `vfov` is the vertical field of view in degrees; `aspect` is
    /// width over height. Objects `focus_dist` away are in perfect focus, and
    /// `aperture` is the lens diameter (0 gives a pinhole camera).
    pub fn look(
        look_from: Point3,
        look_at: Point3,
        up: Vec3,
        aspect: f64,
        vfov: f64,
        focus_dist: f64,
        aperture: f64,
    ) -> Self {
        let theta = vfov * std::f64::consts::PI / 180.;
        let viewport_height = 2. * f64::tan(theta / 2.);
        let viewport_width = aspect * viewport_height;

        let w = unit_vector(look_from - look_at);
        let u = unit_vector(up.cross(&w));
        let v = w.cross(&u);

        let horizontal = focus_dist * viewport_width * u;
        let vertical = focus_dist * viewport_height * v;
        let lower_left_corner = look_from - focus_dist * w - horizontal / 2. - vertical / 2.;
        Camera {
            origin: look_from,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: aperture / 2.,
        }
    }

    /// The ray through screen position `(s, t)`, where `(0, 0)` is the lower
    /// left corner and `(1, 1)` the upper right. The ray starts at a random
    /// point on the lens.
    pub fn get_ray(&self, s: f64, t: f64, sampler: &mut Sampler) -> Ray {
        let (radius, theta) = sampler.random_polar_in_unit_disk();
        let radius = radius * self.lens_radius;
        let origin = self.origin + radius * theta.cos() * self.u + radius * theta.sin() * self.v;
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(origin, target - origin)
    }
}
