use anyhow::{Context, Result};
use ndarray::Array2;
use qrcode::{EcLevel, QrCode};

/// Encode `text` into a square matrix of dark-module flags. The encoder picks
/// the smallest symbol version that fits the payload at `ec_level`.
pub fn generate_qr_matrix(text: &str, ec_level: EcLevel) -> Result<Array2<bool>> {
    let code = QrCode::with_error_correction_level(text, ec_level)
        .context("Failed to generate QR code")?;

    let width = code.width();
    let modules: Vec<bool> = code
        .to_colors()
        .into_iter()
        .map(|c| matches!(c, qrcode::Color::Dark))
        .collect();

    Array2::from_shape_vec((width, width), modules)
        .context("Failed to construct ndarray for QR modules")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_url_encodes_at_level_h() {
        let matrix =
            generate_qr_matrix("https://sz11.github.io/devportfolio/", EcLevel::H).unwrap();
        assert_eq!(matrix.nrows(), matrix.ncols());
        // symbol widths are 4v + 17 for version v >= 1
        assert!(matrix.nrows() >= 21);
        assert_eq!((matrix.nrows() - 17) % 4, 0);
    }

    #[test]
    fn matrix_carries_the_finder_pattern() {
        let matrix = generate_qr_matrix("hello", EcLevel::H).unwrap();
        // outer finder ring is dark, the separator at (7, 7) is light
        assert!(matrix[[0, 0]]);
        assert!(!matrix[[7, 7]]);
    }
}
