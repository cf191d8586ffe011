// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Apparent geocentric longitude of the Sun, and the civil day on which it reaches a given value.
//!
//! Uses a truncated VSOP87 series for the heliocentric position of the Earth, with the FK5
//! correction, low precision nutation and annual aberration applied. The residual error is about
//! one arc second, i.e. well under a minute of time, which is enough to pin solar terms to a day.

use std::f64::consts::TAU;

use jiff::civil;

use crate::date::CalendarDate;

/// (amplitude, phase, frequency) triples, amplitudes scaled by 1e8.
type Series = &'static [(f64, f64, f64)];

const L0: Series = &[
    (175347046.0, 0.0, 0.0),
    (3341656.0, 4.6692568, 6283.0758500),
    (34894.0, 4.62610, 12566.15170),
    (3497.0, 2.7441, 5753.3849),
    (3418.0, 2.8289, 3.5231),
    (3136.0, 3.6277, 77713.7715),
    (2676.0, 4.4181, 7860.4194),
    (2343.0, 6.1352, 3930.2097),
    (1324.0, 0.7425, 11506.7698),
    (1273.0, 2.0371, 529.6910),
    (1199.0, 1.1096, 1577.3435),
    (990.0, 5.233, 5884.927),
    (902.0, 2.045, 26.298),
    (857.0, 3.508, 398.149),
    (780.0, 1.179, 5223.694),
    (753.0, 2.533, 5507.553),
    (505.0, 4.583, 18849.228),
    (492.0, 4.205, 775.523),
    (357.0, 2.920, 0.067),
    (317.0, 5.849, 11790.629),
    (284.0, 1.899, 796.298),
    (271.0, 0.315, 10977.079),
    (243.0, 0.345, 5486.778),
    (206.0, 4.806, 2544.314),
    (205.0, 1.869, 5573.143),
    (202.0, 2.458, 6069.777),
    (156.0, 0.833, 213.299),
    (132.0, 3.411, 2942.463),
    (126.0, 1.083, 20.775),
    (115.0, 0.645, 0.980),
    (103.0, 0.636, 4694.003),
    (102.0, 0.976, 15720.839),
    (102.0, 4.267, 7.114),
    (99.0, 6.21, 2146.17),
    (98.0, 0.68, 155.42),
    (86.0, 5.98, 161000.69),
    (85.0, 1.30, 6275.96),
    (85.0, 3.67, 71430.70),
    (80.0, 1.81, 17260.15),
    (79.0, 3.04, 12036.46),
    (75.0, 1.76, 5088.63),
    (74.0, 3.50, 3154.69),
    (74.0, 4.68, 801.82),
    (70.0, 0.83, 9437.76),
    (62.0, 3.98, 8827.39),
    (61.0, 1.82, 7084.90),
    (57.0, 2.78, 6286.60),
    (56.0, 4.39, 14143.50),
    (56.0, 3.47, 6279.55),
    (52.0, 0.19, 12139.55),
    (52.0, 1.33, 1748.02),
    (51.0, 0.28, 5856.48),
    (49.0, 0.49, 1194.45),
    (41.0, 5.37, 8429.24),
    (41.0, 2.40, 19651.05),
    (39.0, 6.17, 10447.39),
    (37.0, 6.04, 10213.29),
    (37.0, 2.57, 1059.38),
    (36.0, 1.71, 2352.87),
    (36.0, 1.78, 6812.77),
    (33.0, 0.59, 17789.85),
    (30.0, 0.44, 83996.85),
    (30.0, 2.74, 1349.87),
    (25.0, 3.16, 4690.48),
];

const L1: Series = &[
    (628331966747.0, 0.0, 0.0),
    (206059.0, 2.678235, 6283.075850),
    (4303.0, 2.6351, 12566.1517),
    (425.0, 1.590, 3.523),
    (119.0, 5.796, 26.298),
    (109.0, 2.966, 1577.344),
    (93.0, 2.59, 18849.23),
    (72.0, 1.14, 529.69),
    (68.0, 1.87, 398.15),
    (67.0, 4.41, 5507.55),
    (59.0, 2.89, 5223.69),
    (56.0, 2.17, 155.42),
    (45.0, 0.40, 796.30),
    (36.0, 0.47, 775.52),
    (29.0, 2.65, 7.11),
    (21.0, 5.34, 0.98),
    (19.0, 1.85, 5486.78),
    (19.0, 4.97, 213.30),
    (17.0, 2.99, 6275.96),
    (16.0, 0.03, 2544.31),
    (16.0, 1.43, 2146.17),
    (15.0, 1.21, 10977.08),
    (12.0, 2.83, 1748.02),
    (12.0, 3.26, 5088.63),
    (12.0, 5.27, 1194.45),
    (12.0, 2.08, 4694.00),
    (11.0, 0.77, 553.57),
    (10.0, 1.30, 6286.60),
    (10.0, 4.24, 1349.87),
    (9.0, 2.70, 242.73),
    (9.0, 5.64, 951.72),
    (8.0, 5.30, 2352.87),
    (6.0, 2.65, 9437.76),
    (6.0, 4.67, 4690.48),
];

const L2: Series = &[
    (52919.0, 0.0, 0.0),
    (8720.0, 1.0721, 6283.0758),
    (309.0, 0.867, 12566.152),
    (27.0, 0.05, 3.52),
    (16.0, 5.19, 26.30),
    (16.0, 3.68, 155.42),
    (10.0, 0.76, 18849.23),
    (9.0, 2.06, 77713.77),
    (7.0, 0.83, 775.52),
    (5.0, 4.66, 1577.34),
    (4.0, 1.03, 7.11),
    (4.0, 3.44, 5573.14),
    (3.0, 5.14, 796.30),
    (3.0, 6.05, 5507.55),
    (3.0, 1.19, 242.73),
    (3.0, 6.12, 529.69),
    (3.0, 0.31, 398.15),
    (3.0, 2.28, 553.57),
    (2.0, 4.38, 5223.69),
    (2.0, 3.75, 0.98),
];

const L3: Series = &[
    (289.0, 5.844, 6283.076),
    (35.0, 0.0, 0.0),
    (17.0, 5.49, 12566.15),
    (3.0, 5.20, 155.42),
    (1.0, 4.72, 3.52),
    (1.0, 5.30, 18849.23),
    (1.0, 5.97, 242.73),
];

const L4: Series = &[(114.0, 3.142, 0.0), (8.0, 4.13, 6283.08), (1.0, 3.84, 12566.15)];

const L5: Series = &[(1.0, 3.14, 0.0)];

const R0: Series = &[
    (100013989.0, 0.0, 0.0),
    (1670700.0, 3.0984635, 6283.0758500),
    (13956.0, 3.05525, 12566.15170),
    (3084.0, 5.1985, 77713.7715),
    (1628.0, 1.1739, 5753.3849),
    (1576.0, 2.8469, 7860.4194),
    (925.0, 5.453, 11506.770),
    (542.0, 4.564, 3930.210),
    (472.0, 3.661, 5884.927),
    (346.0, 0.964, 5507.553),
    (329.0, 5.900, 5223.694),
    (307.0, 0.299, 5573.143),
    (243.0, 4.273, 11790.629),
    (212.0, 5.847, 1577.344),
    (186.0, 5.022, 10977.079),
    (175.0, 3.012, 18849.228),
];

const R1: Series = &[
    (103019.0, 1.107490, 6283.075850),
    (1721.0, 1.0644, 12566.1517),
    (702.0, 3.142, 0.0),
];

const R2: Series = &[(4359.0, 5.7846, 6283.0758), (124.0, 5.579, 12566.152)];

/// Julian day of 2000-01-01 12:00 TT.
const J2000: f64 = 2_451_545.0;

/// Julian day of 1970-01-01 00:00.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const UNIX_EPOCH: CalendarDate = CalendarDate::from_date(civil::date(1970, 1, 1));

const TROPICAL_YEAR: f64 = 365.2422;

/// China Standard Time, in days.
const CST_OFFSET: f64 = 8.0 / 24.0;

fn evaluate(series: Series, tau: f64) -> f64 {
    series
        .iter()
        .map(|(a, b, c)| a * (b + c * tau).cos())
        .sum()
}

fn polynomial(series: &[Series], tau: f64) -> f64 {
    series
        .iter()
        .rev()
        .fold(0.0, |acc, s| acc * tau + evaluate(s, tau))
}

/// Apparent longitude of the Sun in degrees, `[0, 360)`, at Julian ephemeris day `jde`.
pub(crate) fn apparent_solar_longitude(jde: f64) -> f64 {
    let tau = (jde - J2000) / 365_250.0;
    let t = tau * 10.0;

    let earth_longitude = polynomial(&[L0, L1, L2, L3, L4, L5], tau) / 1e8;
    let radius = polynomial(&[R0, R1, R2], tau) / 1e8;
    let geometric = (earth_longitude % TAU).to_degrees() + 180.0;

    let omega = (125.04452 - 1934.136261 * t).to_radians();
    let sun_mean = (280.4665 + 36000.7698 * t).to_radians();
    let moon_mean = (218.3165 + 481267.8813 * t).to_radians();
    let nutation = -17.20 * omega.sin() - 1.32 * (2.0 * sun_mean).sin()
        - 0.23 * (2.0 * moon_mean).sin()
        + 0.21 * (2.0 * omega).sin();

    let fk5 = -0.09033;
    let aberration = -20.4898 / radius;

    (geometric + (fk5 + nutation + aberration) / 3600.0).rem_euclid(360.0)
}

/// Difference TT - UT in seconds for a decimal year, polynomial fits by Espenak and Meeus.
fn delta_t(year: f64) -> f64 {
    if year < 1900.0 {
        let t = year - 1860.0;
        7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
            - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233_174.0
    } else if year < 1920.0 {
        let t = year - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3) - 0.000197 * t.powi(4)
    } else if year < 1941.0 {
        let t = year - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
    } else if year < 1961.0 {
        let t = year - 1950.0;
        29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
    } else if year < 1986.0 {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
    } else if year < 2005.0 {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t.powi(2)
    } else {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - year)
    }
}

fn julian_day(date: CalendarDate) -> f64 {
    UNIX_EPOCH_JD + date.days_since(UNIX_EPOCH) as f64
}

/// Julian ephemeris day at which the apparent solar longitude reaches `longitude`, searching
/// from `guess`.
fn solve_longitude(longitude: f64, guess: f64) -> f64 {
    let mut jde = guess;
    for _ in 0..50 {
        let diff = (longitude - apparent_solar_longitude(jde) + 540.0).rem_euclid(360.0) - 180.0;
        let correction = diff * TROPICAL_YEAR / 360.0;
        jde += correction;
        if correction.abs() < 1e-7 {
            break;
        }
    }
    jde
}

/// Civil date in China Standard Time of the `index`-th solar term of `year`, counting from
/// Minor Cold (longitude 285 degrees) as index 0.
pub(crate) fn solar_term_date(year: i16, index: u8) -> Option<CalendarDate> {
    let jan_1 = CalendarDate::new(year, 1, 1).ok()?;
    let jan_6 = CalendarDate::new(year, 1, 6).ok()?;

    let longitude = (285.0 + 15.0 * f64::from(index)).rem_euclid(360.0);
    let guess = julian_day(jan_6) + 15.2184 * f64::from(index);
    let jde = solve_longitude(longitude, guess);

    let decimal_year = f64::from(year) + (jde - julian_day(jan_1)) / 365.2425;
    let local = jde - delta_t(decimal_year) / 86_400.0 + CST_OFFSET;
    let days = (local + 0.5).floor() - (UNIX_EPOCH_JD + 0.5);
    UNIX_EPOCH.checked_add_days(days as i64)
}
