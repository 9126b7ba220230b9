//! QR symbol encoding via the `qrcode` crate.

use qrcode::{EcLevel, QrCode};

use quirl::Symbol;

/// An encoded symbol adapting `qrcode`'s output to the core's grid query.
pub struct EncodedSymbol {
    width: usize,
    dark: Vec<bool>,
}

impl EncodedSymbol {
    pub fn new(code: &QrCode) -> Self {
        let width = code.width();
        let dark = code
            .to_colors()
            .into_iter()
            .map(|color| color == qrcode::Color::Dark)
            .collect();
        Self { width, dark }
    }
}

impl Symbol for EncodedSymbol {
    fn module_count(&self) -> usize {
        self.width
    }

    fn is_dark(&self, row: usize, col: usize) -> bool {
        self.dark[row * self.width + col]
    }
}

/// Parse an error-correction level name.
pub fn parse_ec_level(name: &str) -> Result<EcLevel, String> {
    match name.to_uppercase().as_str() {
        "L" => Ok(EcLevel::L),
        "M" => Ok(EcLevel::M),
        "Q" => Ok(EcLevel::Q),
        "H" => Ok(EcLevel::H),
        other => Err(format!(
            "unknown error-correction level: {}. Use L, M, Q or H.",
            other
        )),
    }
}

/// Encode a payload at the given error-correction level.
pub fn encode_payload(data: &str, ec_level: EcLevel) -> Result<EncodedSymbol, String> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), ec_level)
        .map_err(|e| format!("failed to encode payload: {}", e))?;
    Ok(EncodedSymbol::new(&code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_symbol_is_square_and_queryable() {
        let symbol = encode_payload("HELLO", EcLevel::M).unwrap();
        let n = symbol.module_count();
        assert!(n >= 21);
        // Finder cores are always dark.
        assert!(symbol.is_dark(3, 3));
        assert!(symbol.is_dark(3, n - 4));
        assert!(symbol.is_dark(n - 4, 3));
    }

    #[test]
    fn ec_levels_parse_case_insensitively() {
        assert_eq!(parse_ec_level("l").unwrap(), EcLevel::L);
        assert_eq!(parse_ec_level("H").unwrap(), EcLevel::H);
        assert!(parse_ec_level("X").is_err());
    }
}
