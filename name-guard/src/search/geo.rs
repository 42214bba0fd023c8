//! Coordinates and geodesic distance on the WGS-84 ellipsoid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Meters per mile used when converting a search radius for the places API.
pub const METERS_PER_MILE: f64 = 1609.34;

const METERS_PER_STATUTE_MILE: f64 = 1609.344;

// WGS-84
const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
const FLATTENING: f64 = 1.0 / 298.257_223_563;
const SEMI_MINOR_AXIS: f64 = (1.0 - FLATTENING) * SEMI_MAJOR_AXIS;
const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

const MAX_ITERATIONS: usize = 200;
const CONVERGENCE: f64 = 1e-12;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Geodesic distance between two points in statute miles.
///
/// Uses Vincenty's inverse formula; nearly antipodal points where the
/// iteration does not converge fall back to the haversine distance.
///
/// # Examples
///
/// ```rust
/// use name_guard::search::{geodesic_miles, Coordinates};
///
/// let austin = Coordinates::new(30.2672, -97.7431);
/// let dallas = Coordinates::new(32.7767, -96.7970);
/// let miles = geodesic_miles(austin, dallas);
/// assert!((miles - 182.0).abs() < 2.0);
/// ```
pub fn geodesic_miles(from: Coordinates, to: Coordinates) -> f64 {
    let meters = vincenty_meters(from, to).unwrap_or_else(|| haversine_meters(from, to));
    meters / METERS_PER_STATUTE_MILE
}

/// Whether a distance falls inside the search radius. The boundary is included.
pub fn is_within_radius(distance_miles: f64, radius_miles: f64) -> bool {
    distance_miles <= radius_miles
}

/// Rounds a distance to two decimal places for display.
pub fn round_miles(distance_miles: f64) -> f64 {
    (distance_miles * 100.0).round() / 100.0
}

fn vincenty_meters(from: Coordinates, to: Coordinates) -> Option<f64> {
    let l = (to.lng - from.lng).to_radians();
    let u1 = ((1.0 - FLATTENING) * from.lat.to_radians().tan()).atan();
    let u2 = ((1.0 - FLATTENING) * to.lat.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // coincident points
            return Some(0.0);
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // equatorial line: cos_sq_alpha = 0
        let cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };
        let c = FLATTENING / 16.0 * cos_sq_alpha * (4.0 + FLATTENING * (4.0 - 3.0 * cos_sq_alpha));

        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * FLATTENING
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - previous).abs() < CONVERGENCE {
            let u_sq = cos_sq_alpha * (SEMI_MAJOR_AXIS.powi(2) - SEMI_MINOR_AXIS.powi(2))
                / SEMI_MINOR_AXIS.powi(2);
            let a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = b
                * sin_sigma
                * (cos_2sigma_m
                    + b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                            - b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma.powi(2))
                                * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));
            return Some(SEMI_MINOR_AXIS * a * (sigma - delta_sigma));
        }
    }
    None
}

fn haversine_meters(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * MEAN_EARTH_RADIUS * h.sqrt().asin()
}
