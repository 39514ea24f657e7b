//! Ready-made scenes to render.

use std::sync::Arc;

use crate::camera::Camera;
use crate::hittable::{HittableList, Sphere};
use crate::material::Material;
use crate::sampler::Sampler;
use crate::vec3::{Color, Vec3};

fn ground_sphere() -> Sphere {
    Sphere::new(
        Vec3(0., -1000., 0.),
        1000.,
        Arc::new(Material::lambertian(Color::from(0.5))),
    )
}

/// Nothing but a huge grey ground sphere under the sky.
pub fn single_ground() -> HittableList {
    let mut world = HittableList::new();
    world.add(ground_sphere());
    world
}

/// The "final scene": a field of small random spheres around three big ones
/// (glass, matte brown and polished metal).
pub fn random_scene(sampler: &mut Sampler) -> HittableList {
    let mut world = single_ground();
    let glass = Arc::new(Material::dielectric(Color::from(1.), 1.5, 1.));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = sampler.random_double();
            let center = Vec3(
                a as f64 + 0.9 * sampler.random_double(),
                0.2,
                b as f64 + 0.9 * sampler.random_double(),
            );
            if (center - Vec3(4., 0.2, 0.)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = sampler.random_vector(0., 1.) * sampler.random_vector(0., 1.);
                Arc::new(Material::lambertian(albedo))
            } else if choose_mat < 0.95 {
                let albedo = sampler.random_vector(0.5, 1.);
                let fuzz = sampler.random_double_range(0., 0.5);
                Arc::new(Material::metal(albedo, fuzz))
            } else {
                glass.clone()
            };
            world.add(Sphere::new(center, 0.2, material));
        }
    }

    world.add(Sphere::new(Vec3(0., 1., 0.), 1., glass));
    world.add(Sphere::new(
        Vec3(-4., 1., 0.),
        1.,
        Arc::new(Material::lambertian(Vec3(0.4, 0.2, 0.1))),
    ));
    world.add(Sphere::new(
        Vec3(4., 1., 0.),
        1.,
        Arc::new(Material::metal(Vec3(0.7, 0.6, 0.5), 0.)),
    ));
    world
}

/// The camera the ready-made scenes are meant to be seen through.
pub fn demo_camera(aspect: f64) -> Camera {
    Camera::look(
        Vec3(13., 2., 3.),
        Vec3(0., 0., 0.),
        Vec3(0., 1., 0.),
        aspect,
        20.,
        10.,
        0.1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_scene_is_reproducible() {
        let a = random_scene(&mut Sampler::new(5));
        let b = random_scene(&mut Sampler::new(5));
        assert_eq!(a.len(), b.len());
        // Ground, three feature spheres, and most of the 22x22 grid.
        assert!(a.len() > 400 && a.len() <= 4 + 22 * 22, "{}", a.len());
    }

    #[test]
    fn single_ground_has_one_sphere() {
        assert_eq!(single_ground().len(), 1);
    }
}
