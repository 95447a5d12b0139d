//! Binary position export: a little-endian sequence of signed 32-bit
//! integers, `x0 y0 z0 x1 y1 z1 ...` in node-insertion order. Mirrors the
//! original tool's NGraph binary format.

use std::io::Write;

use lin_alg::f64::Vec3;

use crate::error::Result;

/// Writes `positions` to `w` as little-endian `i32`s, truncating each
/// coordinate toward zero the same way Rust's `as i32` cast does.
pub fn write_positions(positions: &[Vec3], w: &mut impl Write) -> Result<()> {
    for p in positions {
        for coord in [p.x, p.y, p.z] {
            w.write_all(&(coord as i32).to_le_bytes())?;
        }
    }
    Ok(())
}

/// Convenience wrapper returning the encoded bytes directly.
pub fn positions_to_bytes(positions: &[Vec3]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(positions.len() * 12);
    write_positions(positions, &mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_three_coordinates_per_position_little_endian() {
        let positions = vec![Vec3::new(1.0, -2.0, 3.5)];
        let bytes = positions_to_bytes(&positions).unwrap();
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[0..4], &1i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &(-2i32).to_le_bytes());
        assert_eq!(&bytes[8..12], &3i32.to_le_bytes()); // truncated toward zero
    }

    #[test]
    fn empty_positions_yield_empty_bytes() {
        assert!(positions_to_bytes(&[]).unwrap().is_empty());
    }

    #[test]
    fn negative_fractional_truncates_toward_zero() {
        let positions = vec![Vec3::new(-1.9, 0.0, 0.0)];
        let bytes = positions_to_bytes(&positions).unwrap();
        assert_eq!(&bytes[0..4], &(-1i32).to_le_bytes());
    }
}
