use crate::vec3::{Point3, Vec3};

/// A ray, beginning at `origin` and extending along `direction`.
///
/// `direction` need not have unit length.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Ray { origin, direction }
    }

    /// Finds the point along the ray at parameter `t`. Positive values of `t`
    /// represent positions forward from the origin, and negative values,
    /// behind the origin.
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_walks_along_direction() {
        let r = Ray::new(Vec3(1., 2., 3.), Vec3(0.5, -1., 2.));
        for &t in &[-2., 0., 0.75, 10.] {
            assert_eq!(r.at(t), r.origin + t * r.direction);
        }
        assert_eq!(r.at(2.), Vec3(2., 0., 7.));
    }
}
