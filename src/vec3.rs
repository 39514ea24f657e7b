use rand::prelude::*;

use crate::error::{Error, Result};

/// Tolerance used by division, equality and the other near-zero checks in the
/// renderer.
pub const EPS: f64 = 1e-8;

/// A three-vector of doubles, used as a color, coordinate, etc.
///
/// The components of the vector can be accessed in four ways:
///
/// 1. Tuple-style: `v.0`, `v.1`, `v.2`.
/// 2. By position: `v[0]`, `v[1]`, `v[2]`. Any other index panics; use
///    `Vec3::get` to get an error instead.
/// 3. Using the `Axis` enum: `v[X]`, `v[Y]`, `v[Z]`. This requires a `use
///    pathtracer::vec3::Axis::*` statement.
/// 4. Using the `Channel` enum: `v[R]`, `v[G]`, `v[B]`. This requires a `use
///    pathtracer::vec3::Channel::*` statement.
///
/// All arithmetic operators work lane by lane. Division adds `EPS` to the
/// divisor, so dividing by zero yields a huge value rather than infinity.
#[derive(Copy, Clone, Default, Debug)]
pub struct Vec3(pub f64, pub f64, pub f64);

/// A `Vec3` used as a position.
pub type Point3 = Vec3;
/// A `Vec3` used as a linear RGB color.
pub type Color = Vec3;

impl Vec3 {
    /// Fetches lane `i`, or reports `Error::IndexOutOfRange`.
    ///
    /// ```
    /// use pathtracer::vec3::Vec3;
    ///
    /// let v = Vec3(1., 2., 3.);
    /// assert_eq!(v.get(2).unwrap(), 3.);
    /// assert!(v.get(3).is_err());
    /// ```
    pub fn get(&self, i: usize) -> Result<f64> {
        match i {
            0 => Ok(self.0),
            1 => Ok(self.1),
            2 => Ok(self.2),
            _ => Err(Error::IndexOutOfRange(i)),
        }
    }

    /// Computes the dot product of two vectors.
    #[inline]
    pub fn dot(&self, other: Self) -> f64 {
        (*self * other).sum()
    }

    /// Computes the cross product of two vectors.
    pub fn cross(&self, other: &Self) -> Self {
        Vec3(
            self.1 * other.2 - self.2 * other.1,
            self.2 * other.0 - self.0 * other.2,
            self.0 * other.1 - self.1 * other.0,
        )
    }

    #[inline]
    pub fn squared_length(&self) -> f64 {
        self.dot(*self)
    }

    /// Gets the length/magnitude of a vector.
    #[inline]
    pub fn length(&self) -> f64 {
        self.squared_length().sqrt()
    }

    /// Adds up the three lanes.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.reduce(std::ops::Add::add)
    }

    /// Applies `f` to each element of the vector in turn, giving a new vector.
    #[inline]
    pub fn map(self, mut f: impl FnMut(f64) -> f64) -> Self {
        Vec3(f(self.0), f(self.1), f(self.2))
    }

    /// Combines each corresponding element of `self` and `other` by giving them
    /// as arguments to function `f`. The results are collected into a new
    /// vector.
    #[inline]
    pub fn zip_with(self, other: Vec3, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        Vec3(f(self.0, other.0), f(self.1, other.1), f(self.2, other.2))
    }

    /// Combines the elements of `self` using `f` until only one result remains.
    #[inline]
    pub fn reduce(self, f: impl Fn(f64, f64) -> f64) -> f64 {
        f(f(self.0, self.1), self.2)
    }
}

/// Produces a vector collinear with `v` but with unit length.
///
/// Vectors of (near) zero length have no direction; the result is then
/// meaningless, and checking for that is up to the caller.
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.length()
}

/// Broadcasts a single value to all vector lanes.
impl From<f64> for Vec3 {
    #[inline]
    fn from(v: f64) -> Self {
        Vec3(v, v, v)
    }
}

/// Two vectors are equal when they are less than `EPS` apart, squared.
impl PartialEq for Vec3 {
    fn eq(&self, other: &Vec3) -> bool {
        (*self - *other).squared_length() < EPS
    }
}

/// Element-wise multiplication (Hadamard product). I have reservations about
/// making this available as `*`, but it sure is convenient...
impl std::ops::Mul for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.zip_with(rhs, std::ops::Mul::mul)
    }
}

/// `scalar * vector`
impl std::ops::Mul<Vec3> for f64 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        Vec3::from(self) * rhs
    }
}

/// `vector * scalar`
impl std::ops::Mul<f64> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        self * Vec3::from(rhs)
    }
}

/// `vector / vector`, with `EPS` added to each divisor lane.
impl std::ops::Div for Vec3 {
    type Output = Vec3;

    #[inline]
    fn div(self, rhs: Vec3) -> Self::Output {
        self.zip_with(rhs, |a, b| a / (b + EPS))
    }
}

/// `vector / scalar`, with `EPS` added to the divisor.
impl std::ops::Div<f64> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        self / Vec3::from(rhs)
    }
}

/// `vector + vector`
impl std::ops::Add for Vec3 {
    type Output = Vec3;

    #[inline]
    fn add(self, rhs: Vec3) -> Self::Output {
        self.zip_with(rhs, std::ops::Add::add)
    }
}

/// `scalar + vector`
impl std::ops::Add<Vec3> for f64 {
    type Output = Vec3;

    #[inline]
    fn add(self, rhs: Vec3) -> Self::Output {
        rhs.map(|x| self + x)
    }
}

/// `vector - vector`
impl std::ops::Sub for Vec3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, rhs: Vec3) -> Self::Output {
        self.zip_with(rhs, std::ops::Sub::sub)
    }
}

/// `-vector`
impl std::ops::Neg for Vec3 {
    type Output = Vec3;

    #[inline]
    fn neg(self) -> Self::Output {
        self.map(std::ops::Neg::neg)
    }
}

impl std::ops::AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

impl std::ops::MulAssign for Vec3 {
    #[inline]
    fn mul_assign(&mut self, rhs: Vec3) {
        *self = *self * rhs;
    }
}

impl std::ops::DivAssign for Vec3 {
    #[inline]
    fn div_assign(&mut self, rhs: Vec3) {
        *self = *self / rhs;
    }
}

impl std::ops::DivAssign<f64> for Vec3 {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

/// Allow accumulation of vectors from an iterator.
impl std::iter::Sum for Vec3 {
    #[inline]
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Vec3::default(), std::ops::Add::add)
    }
}

/// Allow `Vec3` to be produced by `Rng::gen`.
///
/// The resulting vector has each component in the half-open range `[0,1)`. Note
/// that this is *not* a unit vector.
impl rand::distributions::Distribution<Vec3> for rand::distributions::Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3(rng.gen(), rng.gen(), rng.gen())
    }
}

impl std::ops::Index<usize> for Vec3 {
    type Output = f64;

    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.0,
            1 => &self.1,
            2 => &self.2,
            _ => panic!("{}", Error::IndexOutOfRange(i)),
        }
    }
}

impl std::ops::IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        match i {
            0 => &mut self.0,
            1 => &mut self.1,
            2 => &mut self.2,
            _ => panic!("{}", Error::IndexOutOfRange(i)),
        }
    }
}

/// Names for vector lanes when used as a color.
///
/// `Vec3` has an `Index` impl for `Channel`, so you can use `Channel` values to
/// select components from a `Vec3`:
///
/// ```
/// use pathtracer::vec3::{Vec3, Channel::*};
///
/// let v = Vec3(1., 2., 3.);
/// assert_eq!(v[R], 1.);
/// assert_eq!(v[G], 2.);
/// assert_eq!(v[B], 3.);
/// ```
#[derive(Copy, Clone, Debug)]
pub enum Channel {
    /// Red.
    R,
    /// Green.
    G,
    /// Blue.
    B,
}

use Channel::*;

impl ::std::ops::Index<Channel> for Vec3 {
    type Output = f64;

    fn index(&self, idx: Channel) -> &Self::Output {
        match idx {
            R => &self.0,
            G => &self.1,
            B => &self.2,
        }
    }
}

/// Names for vector lanes when used as a coordinate.
///
/// ```
/// use pathtracer::vec3::{Vec3, Axis::*};
///
/// let v = Vec3(1., 2., 3.);
/// assert_eq!(v[X], 1.);
/// assert_eq!(v[Y], 2.);
/// assert_eq!(v[Z], 3.);
/// ```
#[derive(Copy, Clone, Debug)]
pub enum Axis {
    X,
    Y,
    Z,
}

use Axis::*;

impl ::std::ops::Index<Axis> for Vec3 {
    type Output = f64;

    fn index(&self, idx: Axis) -> &Self::Output {
        match idx {
            X => &self.0,
            Y => &self.1,
            Z => &self.2,
        }
    }
}

/// Reflects a vector `v` around a surface normal `n`.
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2. * v.dot(n) * n
}

/// Refracts `v` through a surface with unit normal `n`, which must face
/// against `v`. `ref_idx` is the ratio of the refractive index on the far
/// side to the one on the near side.
///
/// The result has unit length. When the tangential part of the refracted
/// direction would be longer than 1 there is no refracted ray (total internal
/// reflection), and the mirror reflection is returned instead.
pub fn refract(v: Vec3, n: Vec3, ref_idx: f64) -> Vec3 {
    let tangent = (v - v.dot(n) * n) / (ref_idx * v.length());
    let sin2 = tangent.squared_length();
    if sin2 < 1. - EPS {
        tangent - (1. - sin2).sqrt() * n
    } else {
        reflect(v, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn dot_is_symmetric_and_cross_antisymmetric() {
        let a = Vec3(1.5, -2., 0.25);
        let b = Vec3(-3., 0.5, 4.);
        assert_eq!(a.dot(b), b.dot(a));
        assert_eq!(a.cross(&b), -b.cross(&a));
        assert!(close(a.cross(&b).dot(a), 0.));
    }

    #[test]
    fn unit_vector_has_unit_length() {
        for v in &[Vec3(3., 4., 0.), Vec3(-0.01, 0.2, 7.), Vec3(1e3, 1e3, -1e3)] {
            assert!(close(unit_vector(*v).length(), 1.), "{:?}", v);
        }
    }

    #[test]
    fn division_never_produces_infinity() {
        let v = Vec3(1., 2., 3.) / 0.;
        assert!(v.0.is_finite() && v.1.is_finite() && v.2.is_finite());
        assert!(v.0 > 1e7);
    }

    #[test]
    fn equality_is_approximate() {
        assert_eq!(Vec3(1., 1., 1.), Vec3(1. + 1e-6, 1., 1. - 1e-6));
        assert_ne!(Vec3(1., 1., 1.), Vec3(1.001, 1., 1.));
    }

    #[test]
    fn accumulating_operators() {
        let mut v = Vec3(1., 2., 3.);
        v += Vec3::from(1.);
        assert_eq!(v, Vec3(2., 3., 4.));
        v *= Vec3(2., 0.5, 1.);
        assert_eq!(v, Vec3(4., 1.5, 4.));
        v -= Vec3(4., 0.5, 0.);
        assert_eq!(v, Vec3(0., 1., 4.));
        v /= 2.;
        assert_eq!(v, Vec3(0., 0.5, 2.));
    }

    #[test]
    fn positional_indexing() {
        let mut v = Vec3(1., 2., 3.);
        v[1] = 5.;
        assert_eq!(v[0], 1.);
        assert_eq!(v[1], 5.);
        assert_eq!(v[2], 3.);
    }

    #[test]
    #[should_panic(expected = "index 3 not in {0,1,2}")]
    fn indexing_past_z_panics() {
        let v = Vec3::default();
        let _ = v[3];
    }

    #[test]
    fn reflection_flips_normal_component() {
        let n = unit_vector(Vec3(0.2, 1., -0.3));
        let v = Vec3(1., -2., 0.5);
        let r = reflect(v, n);
        assert!(close(r.dot(n), -v.dot(n)));
        assert!(close(r.length(), v.length()));
    }

    #[test]
    fn refraction_straight_through_is_unbent() {
        let n = Vec3(0., 1., 0.);
        let r = refract(Vec3(0., -3., 0.), n, 1.5);
        assert_eq!(r, Vec3(0., -1., 0.));
    }

    #[test]
    fn refraction_obeys_snell() {
        let n = Vec3(0., 1., 0.);
        let v = unit_vector(Vec3(1., -1., 0.));
        let r = refract(v, n, 1.5);
        let sin_in = v.0;
        let sin_out = r.0;
        assert!(close(sin_in / sin_out, 1.5));
        assert!(close(r.length(), 1.));
    }

    #[test]
    fn grazing_exit_totally_reflects() {
        // Leaving glass at 60 degrees from the normal exceeds the critical angle.
        let n = Vec3(0., 1., 0.);
        let v = Vec3(3f64.sqrt(), -1., 0.);
        assert_eq!(refract(v, n, 1. / 1.5), reflect(v, n));
    }
}
