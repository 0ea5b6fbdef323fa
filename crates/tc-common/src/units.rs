//! Unit conversions for storm intensity values.

/// Metres per second in one knot.
pub const MPS_PER_KNOT: f64 = 0.514_444_444_4;

/// Pascals in one hectopascal (millibar).
pub const PA_PER_HPA: f64 = 100.0;

pub fn knots_to_mps(knots: f64) -> f64 {
    knots * MPS_PER_KNOT
}

pub fn mps_to_knots(mps: f64) -> f64 {
    mps / MPS_PER_KNOT
}

/// Pressure in Pa to hPa (mb).
pub fn pa_to_hpa(pa: f64) -> f64 {
    pa / PA_PER_HPA
}
