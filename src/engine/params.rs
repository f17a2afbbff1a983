//! Render parameters and their validation.

use crate::error::{Error, Result};

/// Smallest accepted tile size and resolution.
pub const MIN_PARAMETER: f32 = 10.0;
/// Largest accepted tile size and resolution.
pub const MAX_PARAMETER: f32 = 300.0;

pub const DEFAULT_TILE_SIZE: u32 = 50;
pub const DEFAULT_RESOLUTION: f32 = 96.0;

/// Tile edge length in pixels and the DPI written into the strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParameters {
    pub tile_size: u32,
    pub dpi: f32,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            dpi: DEFAULT_RESOLUTION,
        }
    }
}

impl RenderParameters {
    /// Parameters from stored values, clamped into the accepted range.
    pub fn clamped(tile_size: u32, dpi: f32) -> Self {
        let dpi = if dpi.is_finite() {
            dpi.clamp(MIN_PARAMETER, MAX_PARAMETER)
        } else {
            DEFAULT_RESOLUTION
        };
        Self {
            tile_size: tile_size.clamp(MIN_PARAMETER as u32, MAX_PARAMETER as u32),
            dpi,
        }
    }
}

/// Parse a tile size entered as text. Accepts integers in `[10, 300]`.
pub fn parse_tile_size(text: &str) -> Result<u32> {
    let invalid = || Error::InvalidParameter {
        name: "tile size",
        value: text.to_string(),
    };
    let value = text.trim().parse::<i64>().map_err(|_| invalid())?;
    if value < MIN_PARAMETER as i64 || value > MAX_PARAMETER as i64 {
        return Err(invalid());
    }
    Ok(value as u32)
}

/// Parse a resolution entered as text. Accepts numbers in `[10, 300]`.
pub fn parse_resolution(text: &str) -> Result<f32> {
    let invalid = || Error::InvalidParameter {
        name: "resolution",
        value: text.to_string(),
    };
    let value = text.trim().parse::<f32>().map_err(|_| invalid())?;
    // also rejects NaN
    if !(MIN_PARAMETER..=MAX_PARAMETER).contains(&value) {
        return Err(invalid());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = RenderParameters::default();
        assert_eq!(params.tile_size, 50);
        assert_eq!(params.dpi, 96.0);
    }

    #[test]
    fn test_parse_tile_size_bounds() {
        assert_eq!(parse_tile_size("10").unwrap(), 10);
        assert_eq!(parse_tile_size("300").unwrap(), 300);
        assert_eq!(parse_tile_size(" 64 ").unwrap(), 64);
        assert!(parse_tile_size("0").is_err());
        assert!(parse_tile_size("9").is_err());
        assert!(parse_tile_size("301").is_err());
        assert!(parse_tile_size("-50").is_err());
    }

    #[test]
    fn test_parse_tile_size_rejects_non_integers() {
        assert!(parse_tile_size("").is_err());
        assert!(parse_tile_size("abc").is_err());
        assert!(parse_tile_size("50.5").is_err());
        assert!(matches!(
            parse_tile_size("x"),
            Err(Error::InvalidParameter { name: "tile size", .. })
        ));
    }

    #[test]
    fn test_parse_resolution() {
        assert_eq!(parse_resolution("96").unwrap(), 96.0);
        assert_eq!(parse_resolution("72.5").unwrap(), 72.5);
        assert_eq!(parse_resolution("300").unwrap(), 300.0);
        assert!(parse_resolution("9.99").is_err());
        assert!(parse_resolution("300.01").is_err());
        assert!(parse_resolution("NaN").is_err());
        assert!(parse_resolution("inf").is_err());
        assert!(parse_resolution("dpi").is_err());
    }

    #[test]
    fn test_clamped() {
        let params = RenderParameters::clamped(0, 1000.0);
        assert_eq!(params.tile_size, 10);
        assert_eq!(params.dpi, 300.0);

        let params = RenderParameters::clamped(120, f32::NAN);
        assert_eq!(params.tile_size, 120);
        assert_eq!(params.dpi, DEFAULT_RESOLUTION);
    }
}
