//! Fixed-precision geohash codec.
//!
//! A point is turned into a code by binary range halving on each axis (20 bits
//! of longitude, 20 bits of latitude), interleaving the two bit streams
//! longitude first, and reading the 40-bit result five bits at a time through
//! a 32-symbol alphabet:
//!
//! ```text
//! bit:    0   1   2   3   4 | 5   6   7   8   9 | ...
//! axis:  lon lat lon lat lon|lat lon lat lon lat| ...
//!        '----- symbol 0 ---''----- symbol 1 ---'
//! ```
//!
//! The decode table is generated from [`ALPHABET`] at compile time so the two
//! directions cannot drift apart.

use crate::compute::validation::validate_geographic_point;
use crate::error::{GeoTrieError, Result};
use geo::{Point, Rect, coord};
use smallvec::SmallVec;

/// Code symbols in index order. `A`, `I`, `L` and `O` are left out.
pub const ALPHABET: [u8; 32] = *b"0123456789BCDEFGHJKMNPQRSTUVWXYZ";

/// Number of symbols in every code produced by [`encode`].
pub const CODE_LENGTH: usize = 8;

/// Range-halving rounds per axis.
pub const BITS_PER_AXIS: usize = 20;

const BITS_PER_SYMBOL: usize = 5;
const TOTAL_BITS: usize = BITS_PER_AXIS * 2;
const SYMBOL_MASK: u64 = (1 << BITS_PER_SYMBOL) - 1;
const NO_SYMBOL: u8 = u8::MAX;

const DECODE_TABLE: [u8; 128] = build_decode_table();

const fn build_decode_table() -> [u8; 128] {
    let mut table = [NO_SYMBOL; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Symbol index path of a code or prefix.
pub type SymbolPath = SmallVec<[u8; CODE_LENGTH]>;

/// Encode a point into its 8-symbol code.
///
/// # Errors
///
/// Returns [`GeoTrieError::OutOfRange`] if the longitude is outside
/// [-180, 180] or the latitude outside [-90, 90].
///
/// # Examples
///
/// ```
/// use geotrie::{Point, compute::geohash::encode};
///
/// let sf = Point::new(-122.4194, 37.7749);
/// assert_eq!(encode(&sf).unwrap(), "9Q8YYK8Y");
/// ```
pub fn encode(point: &Point) -> Result<String> {
    validate_geographic_point(point)?;

    let lon_bits = axis_bits(point.x(), -180.0, 180.0);
    let lat_bits = axis_bits(point.y(), -90.0, 90.0);

    let mut stream = 0u64;
    for shift in (0..BITS_PER_AXIS).rev() {
        stream = (stream << 1) | u64::from((lon_bits >> shift) & 1);
        stream = (stream << 1) | u64::from((lat_bits >> shift) & 1);
    }

    let code = (0..CODE_LENGTH)
        .map(|group| {
            let shift = TOTAL_BITS - BITS_PER_SYMBOL * (group + 1);
            ALPHABET[((stream >> shift) & SYMBOL_MASK) as usize] as char
        })
        .collect();
    Ok(code)
}

/// Range-halve `value` inside `[lo, hi]`, most significant bit first.
fn axis_bits(value: f64, mut lo: f64, mut hi: f64) -> u32 {
    let mut bits = 0u32;
    for _ in 0..BITS_PER_AXIS {
        let mid = (lo + hi) / 2.0;
        bits <<= 1;
        if value >= mid {
            bits |= 1;
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bits
}

/// Index of `symbol` in [`ALPHABET`].
///
/// # Errors
///
/// Returns [`GeoTrieError::InvalidSymbol`] for any character outside the
/// alphabet, including lowercase letters.
///
/// # Examples
///
/// ```
/// use geotrie::compute::geohash::symbol_index;
///
/// assert_eq!(symbol_index('0').unwrap(), 0);
/// assert_eq!(symbol_index('B').unwrap(), 10);
/// assert_eq!(symbol_index('Z').unwrap(), 31);
/// assert!(symbol_index('A').is_err());
/// ```
pub fn symbol_index(symbol: char) -> Result<usize> {
    let slot = u32::from(symbol) as usize;
    match DECODE_TABLE.get(slot) {
        Some(&index) if index != NO_SYMBOL => Ok(usize::from(index)),
        _ => Err(GeoTrieError::InvalidSymbol(symbol)),
    }
}

/// Decode every symbol of `code` into its alphabet index.
///
/// Any symbol failure is reported as [`GeoTrieError::InvalidHash`] carrying
/// the whole code.
pub fn decode_path(code: &str) -> Result<SymbolPath> {
    code.chars()
        .map(|symbol| {
            symbol_index(symbol)
                .map(|index| index as u8)
                .map_err(|_| GeoTrieError::InvalidHash(code.to_string()))
        })
        .collect()
}

/// Whether `code` is a well-formed full-length code.
pub fn is_valid_code(code: &str) -> bool {
    code.chars().count() == CODE_LENGTH && decode_path(code).is_ok()
}

/// Longitude/latitude rectangle covered by a code or prefix.
///
/// The empty prefix covers the whole world. Prefixes longer than
/// [`CODE_LENGTH`] are rejected.
///
/// # Examples
///
/// ```
/// use geotrie::compute::geohash::cell_bounds;
///
/// let world = cell_bounds("").unwrap();
/// assert_eq!(world.min().x, -180.0);
/// assert_eq!(world.max().y, 90.0);
///
/// // first symbol splits longitude three times and latitude twice
/// let cell = cell_bounds("9").unwrap();
/// assert_eq!(cell.width(), 45.0);
/// assert_eq!(cell.height(), 45.0);
/// ```
pub fn cell_bounds(prefix: &str) -> Result<Rect> {
    let path = decode_path(prefix)?;
    if path.len() > CODE_LENGTH {
        return Err(GeoTrieError::InvalidHash(prefix.to_string()));
    }

    let (mut lon_lo, mut lon_hi) = (-180.0_f64, 180.0_f64);
    let (mut lat_lo, mut lat_hi) = (-90.0_f64, 90.0_f64);
    let mut is_lon = true;

    for index in path {
        for shift in (0..BITS_PER_SYMBOL).rev() {
            let bit = (index >> shift) & 1 == 1;
            let (lo, hi) = if is_lon {
                (&mut lon_lo, &mut lon_hi)
            } else {
                (&mut lat_lo, &mut lat_hi)
            };
            let mid = (*lo + *hi) / 2.0;
            if bit {
                *lo = mid;
            } else {
                *hi = mid;
            }
            is_lon = !is_lon;
        }
    }

    Ok(Rect::new(
        coord! { x: lon_lo, y: lat_lo },
        coord! { x: lon_hi, y: lat_hi },
    ))
}
