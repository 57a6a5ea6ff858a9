//! Google encoded-polyline codec.
//!
//! Each coordinate is stored as a signed delta against the previous one,
//! scaled by 1e5, zigzag-encoded, then split into 5-bit groups emitted
//! little-endian with 0x20 as the continuation bit and 63 added to land in
//! printable ASCII. Truncated or out-of-range input is an error, never an
//! out-of-bounds read.

use crate::error::AppError;

pub fn decode(encoded: &str) -> Result<Vec<(f64, f64)>, AppError> {
    let bytes = encoded.as_bytes();
    let mut coordinates = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        let (delta_lat, next) = decode_value(bytes, index)?;
        lat += delta_lat;
        let (delta_lng, next) = decode_value(bytes, next)?;
        lng += delta_lng;
        index = next;
        coordinates.push((lat as f64 / 1e5, lng as f64 / 1e5));
    }

    Ok(coordinates)
}

fn decode_value(bytes: &[u8], mut index: usize) -> Result<(i64, usize), AppError> {
    let mut result: i64 = 0;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(index) else {
            return Err(AppError::MalformedPolyline(
                "input ends inside a byte group".into(),
            ));
        };
        if !(63..=126).contains(&byte) {
            return Err(AppError::MalformedPolyline(format!(
                "byte {byte:#04x} at offset {index} is outside the encoding alphabet"
            )));
        }
        if shift >= 60 {
            return Err(AppError::MalformedPolyline(format!(
                "byte group starting near offset {index} is too long"
            )));
        }
        index += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk & 0x20 == 0 {
            break;
        }
    }

    // Zigzag: low bit carries the sign.
    let value = if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    };
    Ok((value, index))
}

pub fn encode(coordinates: &[(f64, f64)]) -> String {
    let mut out = String::new();
    let mut previous_lat: i64 = 0;
    let mut previous_lng: i64 = 0;

    for &(lat, lng) in coordinates {
        let lat_e5 = (lat * 1e5).round() as i64;
        let lng_e5 = (lng * 1e5).round() as i64;
        encode_value(lat_e5 - previous_lat, &mut out);
        encode_value(lng_e5 - previous_lng, &mut out);
        previous_lat = lat_e5;
        previous_lng = lng_e5;
    }

    out
}

fn encode_value(value: i64, out: &mut String) {
    let mut zigzag = if value < 0 { !(value << 1) } else { value << 1 };
    while zigzag >= 0x20 {
        out.push((((zigzag & 0x1f) | 0x20) as u8 + 63) as char);
        zigzag >>= 5;
    }
    out.push((zigzag as u8 + 63) as char);
}
