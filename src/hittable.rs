use std::ops::Range;
use std::sync::Arc;

use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::{Point3, Vec3, EPS};

/// Something in a scene that rays can strike.
///
/// The primary purpose of a `Hittable` is to interact with rays of light using
/// the `hit` method.
pub trait Hittable: std::fmt::Debug + Sync + Send {
    /// Tests if `ray` intersects the object `self`, and if so, if that
    /// intersection occurs within `t_range` along the ray. (Recall that `Ray`
    /// is defined in terms of a `t` value that refers to points along the ray.)
    ///
    /// The `t_range` serves two purposes here. First, if the intersection
    /// occurs at *negative* `t`, the object is behind the photons instead of in
    /// front of them, and the intersection is an illusion. Second, while the
    /// upper end of `t_range` starts out as infinity, we adjust it down as we
    /// find objects along `ray`. Once we've found an object at position `t`, we
    /// can ignore any objects at positions greater than `t`.
    fn hit<'o>(&'o self, ray: &Ray, t_range: Range<f64>) -> Option<HitRecord<'o>>;
}

/// A description of a `Ray` hitting a `Hittable`. This stores information
/// needed for shading later.
///
/// The `'m` lifetime refers to the `Material` of the object, which we capture
/// by reference. Thus, a `HitRecord` cannot outlive the object it refers to.
#[derive(Clone, Debug)]
pub struct HitRecord<'m> {
    /// Position along the ray, expressed as the ray parameter.
    pub t: f64,
    /// Position along the ray, as an actual point.
    pub p: Point3,
    /// Surface normal at the hit position. Always faces against the ray.
    pub normal: Vec3,
    /// Whether the ray struck the outward-facing side of the surface.
    pub front_face: bool,
    /// Material of the object at the hit position.
    pub material: &'m Material,
}

impl<'m> HitRecord<'m> {
    /// Builds a record from the geometric `outward_normal`, flipping it if
    /// the ray arrived from inside.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: &'m Material) -> Self {
        let front_face = ray.direction.dot(outward_normal) < -EPS;
        HitRecord {
            t,
            p: ray.at(t),
            normal: if front_face {
                outward_normal
            } else {
                -outward_normal
            },
            front_face,
            material,
        }
    }
}

/// A sphere.
///
/// A negative `radius` turns the sphere inside out: its normals point toward
/// the center, which is how hollow glass shells are made.
#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Point3,
    pub radius: f64,
    /// Shared, since many spheres usually use one material.
    pub material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Point3, radius: f64, material: Arc<Material>) -> Self {
        Sphere {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    #[inline]
    fn hit<'o>(&'o self, ray: &Ray, t_range: Range<f64>) -> Option<HitRecord<'o>> {
        let oc = ray.origin - self.center;
        let a = ray.direction.squared_length();
        let half_b = -oc.dot(ray.direction);
        let c = oc.squared_length() - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;
        if discriminant < -EPS {
            return None;
        }

        let sqrt_d = discriminant.max(0.).sqrt();
        let within = |t: f64| t > t_range.start + EPS && t < t_range.end - EPS;
        let t = [(half_b - sqrt_d) / a, (half_b + sqrt_d) / a]
            .iter()
            .copied()
            .find(|&t| within(t))?;

        let outward_normal = (ray.at(t) - self.center) / self.radius;
        Some(HitRecord::new(ray, t, outward_normal, &self.material))
    }
}

/// A group of objects that is hit wherever its nearest member is hit.
#[derive(Debug, Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    pub fn new() -> Self {
        HittableList::default()
    }

    pub fn add(&mut self, object: impl Hittable + 'static) {
        self.objects.push(Box::new(object));
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit<'o>(&'o self, ray: &Ray, mut t_range: Range<f64>) -> Option<HitRecord<'o>> {
        let mut hit = None;
        for object in &self.objects {
            if let Some(rec) = object.hit(ray, t_range.clone()) {
                t_range.end = rec.t;
                hit = Some(rec)
            }
        }
        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::{unit_vector, Color};

    fn grey() -> Arc<Material> {
        Arc::new(Material::lambertian(Color::from(0.5)))
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn head_on_hit_from_outside() {
        let s = Sphere::new(Vec3(0., 0., -5.), 1., grey());
        let ray = Ray::new(Vec3::default(), Vec3(0., 0., -2.));
        let hit = s.hit(&ray, 0. ..f64::INFINITY).unwrap();

        // t is in units of the (non-unit) direction.
        assert!(close(hit.t * ray.direction.length(), 5. - 1.));
        assert_eq!(hit.p, Vec3(0., 0., -4.));
        assert!(close(unit_vector(hit.normal).dot(unit_vector(ray.direction)), -1.));
        assert!(hit.front_face);
    }

    #[test]
    fn passing_ray_misses() {
        let s = Sphere::new(Vec3(0., 0., -5.), 1., grey());
        let ray = Ray::new(Vec3(1.5, 0., 0.), Vec3(0., 0., -1.));
        assert!(s.hit(&ray, 0. ..f64::INFINITY).is_none());
    }

    #[test]
    fn sphere_behind_ray_misses() {
        let s = Sphere::new(Vec3(0., 0., 5.), 1., grey());
        let ray = Ray::new(Vec3::default(), Vec3(0., 0., -1.));
        assert!(s.hit(&ray, 0. ..f64::INFINITY).is_none());
    }

    #[test]
    fn hit_from_inside_uses_far_root_and_back_face() {
        let s = Sphere::new(Vec3::default(), 2., grey());
        let ray = Ray::new(Vec3::default(), Vec3(1., 0., 0.));
        let hit = s.hit(&ray, 0. ..f64::INFINITY).unwrap();
        assert!(close(hit.t, 2.));
        assert!(!hit.front_face);
        assert_eq!(hit.normal, Vec3(-1., 0., 0.));
    }

    #[test]
    fn t_range_excludes_hits() {
        let s = Sphere::new(Vec3(0., 0., -5.), 1., grey());
        let ray = Ray::new(Vec3::default(), Vec3(0., 0., -1.));
        assert!(s.hit(&ray, 0. ..3.).is_none());
        // Near root excluded, far root still in range.
        let hit = s.hit(&ray, 4.5..10.).unwrap();
        assert!(close(hit.t, 6.));
    }

    #[test]
    fn negative_radius_flips_the_surface() {
        let s = Sphere::new(Vec3(0., 0., -5.), -1., grey());
        let ray = Ray::new(Vec3::default(), Vec3(0., 0., -1.));
        let hit = s.hit(&ray, 0. ..f64::INFINITY).unwrap();
        assert!(close(hit.t, 4.));
        // The outward normal points inward, so the ray sees the back face.
        assert!(!hit.front_face);
        assert_eq!(hit.normal, Vec3(0., 0., 1.));
    }

    #[test]
    fn list_reports_nearest_member() {
        let mut world = HittableList::new();
        assert!(world.is_empty());
        world.add(Sphere::new(Vec3(0., 0., -10.), 1., grey()));
        world.add(Sphere::new(Vec3(0., 0., -4.), 1., grey()));
        world.add(Sphere::new(Vec3(0., 0., -7.), 1., grey()));
        assert_eq!(world.len(), 3);

        let ray = Ray::new(Vec3::default(), Vec3(0., 0., -1.));
        let hit = world.hit(&ray, 0. ..f64::INFINITY).unwrap();
        assert!(close(hit.t, 3.));

        let away = Ray::new(Vec3::default(), Vec3(0., 1., 0.));
        assert!(world.hit(&away, 0. ..f64::INFINITY).is_none());

        world.clear();
        assert!(world.hit(&ray, 0. ..f64::INFINITY).is_none());
    }

    #[test]
    fn spheres_share_one_material() {
        let m = grey();
        let a = Sphere::new(Vec3(0., 0., -2.), 0.5, m.clone());
        let b = Sphere::new(Vec3(0., 0., 2.), 0.5, m.clone());
        assert_eq!(Arc::strong_count(&m), 3);
        let ha = a.hit(&Ray::new(Vec3::default(), Vec3(0., 0., -1.)), 0. ..f64::INFINITY).unwrap();
        let hb = b.hit(&Ray::new(Vec3::default(), Vec3(0., 0., 1.)), 0. ..f64::INFINITY).unwrap();
        assert!(std::ptr::eq(ha.material, hb.material));
    }
}
