// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! NURBS curve and surface parameters carried by edges and faces.
//!
//! Host applications usually store a knot vector with the first and last
//! values once (`len(knots) == len(points) + degree - 1`). This kernel uses the
//! full clamped form (`len(knots) == len(points) + degree + 1`). The only way
//! to obtain a [`KnotVector`] is [`KnotVector::from_host_knots`], so the end
//! knots are duplicated exactly once before any constructor sees them.

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};

/// Knot vector in kernel convention (end knots repeated).
#[derive(Debug, Clone, PartialEq)]
pub struct KnotVector(Vec<f64>);

impl KnotVector {
    /// Converts a host knot vector by duplicating its first and last value.
    ///
    /// Knot values must be finite and non-decreasing.
    pub fn from_host_knots(host: &[f64]) -> Result<Self> {
        let (first, last) = match (host.first(), host.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(Error::InvalidNurbs("knot vector is empty".into())),
        };
        if host.iter().any(|k| !k.is_finite()) {
            return Err(Error::InvalidNurbs("knot vector has non-finite values".into()));
        }
        if host.windows(2).any(|w| w[1] < w[0]) {
            return Err(Error::InvalidNurbs("knot vector is decreasing".into()));
        }

        let mut knots = Vec::with_capacity(host.len() + 2);
        knots.push(first);
        knots.extend_from_slice(host);
        knots.push(last);
        Ok(Self(knots))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parametric domain `[knots[degree], knots[count]]` for `count` poles.
    fn domain(&self, degree: usize, count: usize) -> (f64, f64) {
        (self.0[degree], self.0[count])
    }

    /// Index of the knot span containing `t`, clamped to the last non-empty
    /// span at the upper end of the domain.
    fn find_span(&self, degree: usize, count: usize, t: f64) -> usize {
        let knots = &self.0;
        if t >= knots[count] {
            let mut span = count - 1;
            while span > degree && knots[span] >= knots[span + 1] {
                span -= 1;
            }
            return span;
        }
        if t <= knots[degree] {
            let mut span = degree;
            while span < count - 1 && knots[span + 1] <= t {
                span += 1;
            }
            return span;
        }

        let (mut low, mut high) = (degree, count);
        let mut mid = (low + high) / 2;
        while t < knots[mid] || t >= knots[mid + 1] {
            if t < knots[mid] {
                high = mid;
            } else {
                low = mid;
            }
            mid = (low + high) / 2;
        }
        mid
    }

    /// Non-vanishing B-spline basis values on `span` (Cox-de Boor triangle).
    fn basis(&self, span: usize, degree: usize, t: f64) -> Vec<f64> {
        let knots = &self.0;
        let mut n = vec![0.0; degree + 1];
        let mut left = vec![0.0; degree + 1];
        let mut right = vec![0.0; degree + 1];
        n[0] = 1.0;

        for j in 1..=degree {
            left[j] = t - knots[span + 1 - j];
            right[j] = knots[span + j] - t;
            let mut saved = 0.0;
            for r in 0..j {
                let denom = right[r + 1] + left[j - r];
                let temp = if denom.abs() < 1e-14 { 0.0 } else { n[r] / denom };
                n[r] = saved + right[r + 1] * temp;
                saved = left[j - r] * temp;
            }
            n[j] = saved;
        }
        n
    }
}

fn check_weights(weights: &[f64]) -> Result<()> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(Error::InvalidNurbs("weights must be finite and non-negative".into()));
    }
    Ok(())
}

fn check_knot_count(direction: &str, knots: &KnotVector, count: usize, degree: usize) -> Result<()> {
    if degree == 0 {
        return Err(Error::InvalidNurbs(format!("{direction} degree must be at least 1")));
    }
    if count <= degree {
        return Err(Error::InvalidNurbs(format!(
            "{direction}: {count} control points cannot carry degree {degree}"
        )));
    }
    if knots.len() != count + degree + 1 {
        return Err(Error::InvalidNurbs(format!(
            "{direction}: expected {} knots for {count} control points of degree {degree}, got {}",
            count + degree + 1,
            knots.len()
        )));
    }
    Ok(())
}

/// Homogeneous accumulation of weighted poles.
fn project(sum: Vector3<f64>, weight: f64, fallback: Point3<f64>) -> Point3<f64> {
    if weight.abs() < 1e-14 {
        fallback
    } else {
        Point3::from(sum / weight)
    }
}

const MAX_SEARCH_STEPS: usize = 400;

const COMPASS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (1.0, 1.0),
    (1.0, -1.0),
    (-1.0, 1.0),
    (-1.0, -1.0),
];

/// A (possibly rational) B-spline curve in kernel convention.
#[derive(Debug, Clone, PartialEq)]
pub struct NurbsCurve {
    control_points: Vec<Point3<f64>>,
    weights: Vec<f64>,
    knots: KnotVector,
    degree: usize,
    rational: bool,
    periodic: bool,
}

impl NurbsCurve {
    /// Validates and assembles curve parameters.
    pub fn new(
        control_points: Vec<Point3<f64>>,
        weights: Vec<f64>,
        knots: KnotVector,
        rational: bool,
        periodic: bool,
        degree: usize,
    ) -> Result<Self> {
        if control_points.len() != weights.len() {
            return Err(Error::InvalidNurbs(format!(
                "{} control points but {} weights",
                control_points.len(),
                weights.len()
            )));
        }
        check_weights(&weights)?;
        check_knot_count("curve", &knots, control_points.len(), degree)?;

        Ok(Self {
            control_points,
            weights,
            knots,
            degree,
            rational,
            periodic,
        })
    }

    pub fn control_points(&self) -> &[Point3<f64>] {
        &self.control_points
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn knots(&self) -> &KnotVector {
        &self.knots
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn is_rational(&self) -> bool {
        self.rational
    }

    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    pub fn domain(&self) -> (f64, f64) {
        self.knots.domain(self.degree, self.control_points.len())
    }

    /// Evaluates the curve at parameter `t` (clamped to the domain).
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        let (t0, t1) = self.domain();
        let t = t.clamp(t0, t1);
        let count = self.control_points.len();
        let span = self.knots.find_span(self.degree, count, t);
        let basis = self.knots.basis(span, self.degree, t);

        let mut sum = Vector3::zeros();
        let mut weight = 0.0;
        for (j, n) in basis.iter().enumerate() {
            let idx = span - self.degree + j;
            let w = n * self.weights[idx];
            sum += self.control_points[idx].coords * w;
            weight += w;
        }
        project(sum, weight, self.control_points[span])
    }

    /// Evaluates at a fraction of the domain, `0.0` = start, `1.0` = end.
    pub fn point_at_fraction(&self, fraction: f64) -> Point3<f64> {
        let (t0, t1) = self.domain();
        self.point_at(t0 + (t1 - t0) * fraction)
    }

    pub fn start_point(&self) -> Point3<f64> {
        self.point_at_fraction(0.0)
    }

    pub fn end_point(&self) -> Point3<f64> {
        self.point_at_fraction(1.0)
    }
}

/// A (possibly rational) tensor-product B-spline surface in kernel convention.
///
/// Control points and weights are stored row-major: `points[u][v]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NurbsSurface {
    control_points: Vec<Vec<Point3<f64>>>,
    weights: Vec<Vec<f64>>,
    u_knots: KnotVector,
    v_knots: KnotVector,
    rational: bool,
    u_periodic: bool,
    v_periodic: bool,
    u_degree: usize,
    v_degree: usize,
}

impl NurbsSurface {
    /// Validates and assembles surface parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        control_points: Vec<Vec<Point3<f64>>>,
        weights: Vec<Vec<f64>>,
        u_knots: KnotVector,
        v_knots: KnotVector,
        rational: bool,
        u_periodic: bool,
        v_periodic: bool,
        u_degree: usize,
        v_degree: usize,
    ) -> Result<Self> {
        let u_count = control_points.len();
        let v_count = control_points.first().map_or(0, Vec::len);
        if weights.len() != u_count {
            return Err(Error::InvalidNurbs(format!(
                "{u_count} control point rows but {} weight rows",
                weights.len()
            )));
        }
        for (row, weight_row) in control_points.iter().zip(&weights) {
            if row.len() != v_count || weight_row.len() != v_count {
                return Err(Error::InvalidNurbs("control grid is not rectangular".into()));
            }
            check_weights(weight_row)?;
        }
        check_knot_count("u", &u_knots, u_count, u_degree)?;
        check_knot_count("v", &v_knots, v_count, v_degree)?;

        Ok(Self {
            control_points,
            weights,
            u_knots,
            v_knots,
            rational,
            u_periodic,
            v_periodic,
            u_degree,
            v_degree,
        })
    }

    pub fn control_points(&self) -> &[Vec<Point3<f64>>] {
        &self.control_points
    }

    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    pub fn u_knots(&self) -> &KnotVector {
        &self.u_knots
    }

    pub fn v_knots(&self) -> &KnotVector {
        &self.v_knots
    }

    pub fn is_rational(&self) -> bool {
        self.rational
    }

    pub fn is_u_periodic(&self) -> bool {
        self.u_periodic
    }

    pub fn is_v_periodic(&self) -> bool {
        self.v_periodic
    }

    pub fn u_degree(&self) -> usize {
        self.u_degree
    }

    pub fn v_degree(&self) -> usize {
        self.v_degree
    }

    pub fn u_count(&self) -> usize {
        self.control_points.len()
    }

    pub fn v_count(&self) -> usize {
        self.control_points[0].len()
    }

    pub fn u_domain(&self) -> (f64, f64) {
        self.u_knots.domain(self.u_degree, self.u_count())
    }

    pub fn v_domain(&self) -> (f64, f64) {
        self.v_knots.domain(self.v_degree, self.v_count())
    }

    /// Evaluates the surface at `(u, v)` (clamped to the domain).
    pub fn point_at(&self, u: f64, v: f64) -> Point3<f64> {
        let (u0, u1) = self.u_domain();
        let (v0, v1) = self.v_domain();
        let u = u.clamp(u0, u1);
        let v = v.clamp(v0, v1);

        let u_span = self.u_knots.find_span(self.u_degree, self.u_count(), u);
        let v_span = self.v_knots.find_span(self.v_degree, self.v_count(), v);
        let nu = self.u_knots.basis(u_span, self.u_degree, u);
        let nv = self.v_knots.basis(v_span, self.v_degree, v);

        let mut sum = Vector3::zeros();
        let mut weight = 0.0;
        for (a, bu) in nu.iter().enumerate() {
            let i = u_span - self.u_degree + a;
            for (b, bv) in nv.iter().enumerate() {
                let j = v_span - self.v_degree + b;
                let w = bu * bv * self.weights[i][j];
                sum += self.control_points[i][j].coords * w;
                weight += w;
            }
        }
        project(sum, weight, self.control_points[u_span][v_span])
    }

    /// Curve along `v` at fixed `u`.
    ///
    /// Collapses the `u` direction in homogeneous space, so the result lies on
    /// the surface for clamped and unclamped knot vectors alike.
    pub fn iso_curve_at_u(&self, u: f64) -> Result<NurbsCurve> {
        let (u0, u1) = self.u_domain();
        let u = u.clamp(u0, u1);
        let span = self.u_knots.find_span(self.u_degree, self.u_count(), u);
        let basis = self.u_knots.basis(span, self.u_degree, u);

        let mut points = Vec::with_capacity(self.v_count());
        let mut weights = Vec::with_capacity(self.v_count());
        for j in 0..self.v_count() {
            let mut sum = Vector3::zeros();
            let mut weight = 0.0;
            for (a, n) in basis.iter().enumerate() {
                let i = span - self.u_degree + a;
                let w = n * self.weights[i][j];
                sum += self.control_points[i][j].coords * w;
                weight += w;
            }
            points.push(project(sum, weight, self.control_points[span][j]));
            weights.push(weight);
        }

        NurbsCurve::new(
            points,
            weights,
            self.v_knots.clone(),
            self.rational,
            self.v_periodic,
            self.v_degree,
        )
    }

    /// Curve along `u` at fixed `v`.
    pub fn iso_curve_at_v(&self, v: f64) -> Result<NurbsCurve> {
        let (v0, v1) = self.v_domain();
        let v = v.clamp(v0, v1);
        let span = self.v_knots.find_span(self.v_degree, self.v_count(), v);
        let basis = self.v_knots.basis(span, self.v_degree, v);

        let mut points = Vec::with_capacity(self.u_count());
        let mut weights = Vec::with_capacity(self.u_count());
        for i in 0..self.u_count() {
            let mut sum = Vector3::zeros();
            let mut weight = 0.0;
            for (b, n) in basis.iter().enumerate() {
                let j = span - self.v_degree + b;
                let w = n * self.weights[i][j];
                sum += self.control_points[i][j].coords * w;
                weight += w;
            }
            points.push(project(sum, weight, self.control_points[i][span]));
            weights.push(weight);
        }

        NurbsCurve::new(
            points,
            weights,
            self.u_knots.clone(),
            self.rational,
            self.u_periodic,
            self.u_degree,
        )
    }

    /// Returns `(origin, unit normal)` when every control point lies within
    /// `tolerance` of a common plane.
    ///
    /// By the convex hull property the whole surface is then planar.
    pub fn plane(&self, tolerance: f64) -> Option<(Point3<f64>, Vector3<f64>)> {
        let u_last = self.u_count() - 1;
        let v_last = self.v_count() - 1;
        let corners = [
            self.control_points[0][0],
            self.control_points[u_last][0],
            self.control_points[u_last][v_last],
            self.control_points[0][v_last],
        ];

        // Newell's method over the corner polygon
        let mut normal = Vector3::<f64>::zeros();
        for i in 0..corners.len() {
            let curr = corners[i];
            let next = corners[(i + 1) % corners.len()];
            normal.x += (curr.y - next.y) * (curr.z + next.z);
            normal.y += (curr.z - next.z) * (curr.x + next.x);
            normal.z += (curr.x - next.x) * (curr.y + next.y);
        }
        let len = normal.norm();
        if len < 1e-15 {
            return None;
        }
        let normal = normal / len;
        let origin = corners[0];

        let planar = self
            .control_points
            .iter()
            .flatten()
            .all(|p| (p - origin).dot(&normal).abs() <= tolerance);
        planar.then_some((origin, normal))
    }

    /// Distance from `point` to the closest point of the surface.
    ///
    /// A sample grid over the domain seeds a compass search in parameter
    /// space, whose step halves whenever no neighbour is closer.
    pub fn distance_to(&self, point: &Point3<f64>) -> f64 {
        let (u0, u1) = self.u_domain();
        let (v0, v1) = self.v_domain();
        let nu = 4 * self.u_count();
        let nv = 4 * self.v_count();
        let distance = |u: f64, v: f64| (self.point_at(u, v) - point).norm();

        let (mut u, mut v, mut best) = (u0, v0, f64::INFINITY);
        for i in 0..=nu {
            let su = u0 + (u1 - u0) * i as f64 / nu as f64;
            for j in 0..=nv {
                let sv = v0 + (v1 - v0) * j as f64 / nv as f64;
                let d = distance(su, sv);
                if d < best {
                    (u, v, best) = (su, sv, d);
                }
            }
        }

        let mut du = (u1 - u0) / nu as f64;
        let mut dv = (v1 - v0) / nv as f64;
        let min_du = (u1 - u0).abs() * 1e-12;
        let min_dv = (v1 - v0).abs() * 1e-12;
        for _ in 0..MAX_SEARCH_STEPS {
            if du <= min_du && dv <= min_dv {
                break;
            }
            let mut moved = false;
            for (su, sv) in COMPASS {
                let cu = (u + su * du).clamp(u0, u1);
                let cv = (v + sv * dv).clamp(v0, v1);
                let d = distance(cu, cv);
                if d < best {
                    (u, v, best) = (cu, cv, d);
                    moved = true;
                }
            }
            if !moved {
                du *= 0.5;
                dv *= 0.5;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quarter_circle() -> NurbsCurve {
        let w = std::f64::consts::FRAC_1_SQRT_2;
        NurbsCurve::new(
            vec![
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![1.0, w, 1.0],
            KnotVector::from_host_knots(&[0.0, 0.0, 1.0, 1.0]).unwrap(),
            true,
            false,
            2,
        )
        .unwrap()
    }

    #[test]
    fn host_knots_gain_two_duplicated_ends() {
        let host = [0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0];
        let knots = KnotVector::from_host_knots(&host).unwrap();
        let k = knots.as_slice();

        assert_eq!(knots.len(), host.len() + 2);
        assert_eq!(k[0], k[1]);
        assert_eq!(k[k.len() - 1], k[k.len() - 2]);
        assert_eq!(&k[1..k.len() - 1], &host);
    }

    #[test]
    fn cubic_curve_knot_count_is_points_plus_four() {
        // 5 control points, degree 3: host stores 5 + 3 - 1 = 7 knots
        let host = [0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0];
        let points: Vec<_> = (0..5).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let curve = NurbsCurve::new(
            points,
            vec![1.0, 2.0, 1.0, 2.0, 1.0],
            KnotVector::from_host_knots(&host).unwrap(),
            true,
            false,
            3,
        )
        .unwrap();

        assert_eq!(curve.knots().len(), curve.control_points().len() + 4);
    }

    #[test]
    fn uncorrected_knots_are_rejected() {
        // Feeding host-length knots twice through the correction breaks the count
        let once = KnotVector::from_host_knots(&[0.0, 0.0, 1.0, 1.0]).unwrap();
        let twice = KnotVector::from_host_knots(once.as_slice()).unwrap();
        let points = vec![Point3::origin(), Point3::new(1.0, 1.0, 0.0), Point3::new(2.0, 0.0, 0.0)];

        let result = NurbsCurve::new(points, vec![1.0; 3], twice, false, false, 2);
        assert!(matches!(result, Err(Error::InvalidNurbs(_))));
    }

    #[test]
    fn mismatched_weights_are_rejected() {
        let knots = KnotVector::from_host_knots(&[0.0, 1.0]).unwrap();
        let points = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        assert!(NurbsCurve::new(points, vec![1.0], knots, false, false, 1).is_err());
    }

    #[test]
    fn empty_host_knots_are_rejected() {
        assert!(KnotVector::from_host_knots(&[]).is_err());
        assert!(KnotVector::from_host_knots(&[1.0, 0.0]).is_err());
    }

    #[test]
    fn non_finite_host_knots_are_rejected() {
        for host in [[0.0, f64::NAN], [f64::NEG_INFINITY, 1.0], [0.0, f64::INFINITY]] {
            assert!(matches!(
                KnotVector::from_host_knots(&host),
                Err(Error::InvalidNurbs(_))
            ));
        }
    }

    #[test]
    fn rational_quarter_circle_stays_on_circle() {
        let curve = quarter_circle();
        assert_relative_eq!(curve.start_point(), Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(curve.end_point(), Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);

        for i in 0..=10 {
            let p = curve.point_at_fraction(i as f64 / 10.0);
            assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn bilinear_patch_iso_curves_and_plane() {
        let surface = NurbsSurface::new(
            vec![
                vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0)],
                vec![Point3::new(3.0, 0.0, 0.0), Point3::new(3.0, 2.0, 0.0)],
            ],
            vec![vec![1.0, 1.0], vec![1.0, 1.0]],
            KnotVector::from_host_knots(&[0.0, 1.0]).unwrap(),
            KnotVector::from_host_knots(&[0.0, 1.0]).unwrap(),
            false,
            false,
            false,
            1,
            1,
        )
        .unwrap();

        assert_relative_eq!(surface.point_at(0.5, 0.5), Point3::new(1.5, 1.0, 0.0), epsilon = 1e-12);

        let iso = surface.iso_curve_at_u(1.0).unwrap();
        assert_relative_eq!(iso.start_point(), Point3::new(3.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(iso.end_point(), Point3::new(3.0, 2.0, 0.0), epsilon = 1e-12);

        let (_, normal) = surface.plane(1e-9).unwrap();
        assert_relative_eq!(normal.z.abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn distance_to_patch_interior_and_outside() {
        let surface = NurbsSurface::new(
            vec![
                vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
                vec![Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)],
            ],
            vec![vec![1.0, 1.0], vec![1.0, 1.0]],
            KnotVector::from_host_knots(&[0.0, 1.0]).unwrap(),
            KnotVector::from_host_knots(&[0.0, 1.0]).unwrap(),
            false,
            false,
            false,
            1,
            1,
        )
        .unwrap();

        assert_relative_eq!(surface.distance_to(&Point3::new(0.3, 0.7, 0.0)), 0.0, epsilon = 1e-9);
        assert_relative_eq!(surface.distance_to(&Point3::new(0.3, 0.7, 2.0)), 2.0, epsilon = 1e-9);
        // In the plane, beyond the patch edge x = 1
        assert_relative_eq!(surface.distance_to(&Point3::new(4.0, 0.5, 0.0)), 3.0, epsilon = 1e-9);
        assert!(surface.distance_to(&Point3::new(55.0, 55.0, 0.0)) > 70.0);
    }

    #[test]
    fn distance_to_rational_cylinder() {
        // Quarter cylinder of radius 1 along z, rational in u
        let w = std::f64::consts::FRAC_1_SQRT_2;
        let surface = NurbsSurface::new(
            vec![
                vec![Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 2.0)],
                vec![Point3::new(1.0, 1.0, 0.0), Point3::new(1.0, 1.0, 2.0)],
                vec![Point3::new(0.0, 1.0, 0.0), Point3::new(0.0, 1.0, 2.0)],
            ],
            vec![vec![1.0, 1.0], vec![w, w], vec![1.0, 1.0]],
            KnotVector::from_host_knots(&[0.0, 0.0, 1.0, 1.0]).unwrap(),
            KnotVector::from_host_knots(&[0.0, 1.0]).unwrap(),
            true,
            false,
            false,
            2,
            1,
        )
        .unwrap();

        let on = Point3::new(w, w, 1.0);
        assert_relative_eq!(surface.distance_to(&on), 0.0, epsilon = 1e-7);
        let outside = Point3::new(2.0 * w, 2.0 * w, 1.0);
        assert_relative_eq!(surface.distance_to(&outside), 1.0, epsilon = 1e-7);
    }

    #[test]
    fn ragged_grid_is_rejected() {
        let result = NurbsSurface::new(
            vec![
                vec![Point3::origin(), Point3::new(0.0, 1.0, 0.0)],
                vec![Point3::new(1.0, 0.0, 0.0)],
            ],
            vec![vec![1.0, 1.0], vec![1.0]],
            KnotVector::from_host_knots(&[0.0, 1.0]).unwrap(),
            KnotVector::from_host_knots(&[0.0, 1.0]).unwrap(),
            false,
            false,
            false,
            1,
            1,
        );
        assert!(result.is_err());
    }
}
