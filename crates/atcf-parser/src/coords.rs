//! ATCF `DDDH` coordinate decoding.
//!
//! Positions are written as tenths of a degree followed by a hemisphere
//! letter: `167N`, `0880W`, ` 500W`.

/// Decode a latitude token (`N`/`S`).
pub fn decode_lat(token: &str) -> Option<f64> {
    decode(token, 'N', 'S')
}

/// Decode a longitude token (`E`/`W`).
pub fn decode_lon(token: &str) -> Option<f64> {
    decode(token, 'E', 'W')
}

fn decode(token: &str, positive: char, negative: char) -> Option<f64> {
    let token = token.trim();
    let (split, hemisphere) = token.char_indices().last()?;
    let hemisphere = hemisphere.to_ascii_uppercase();
    let digits = token[..split].trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits.parse::<u32>().ok()? as f64 / 10.0;

    if hemisphere == positive {
        Some(magnitude)
    } else if hemisphere == negative {
        Some(-magnitude)
    } else {
        None
    }
}
