// src/services/qr_renderer.rs

use std::path::PathBuf;

use image::Luma;
use qrcode::{EcLevel, QrCode};

use crate::common::error::AppError;

/// Colaborador externo do cadastro: transforma o payload do item em imagem
/// e devolve o caminho onde ela ficou salva.
pub trait QrRenderer: Send + Sync + 'static {
    fn render(&self, timestamp: i64, payload: &str) -> Result<String, AppError>;

    /// Apaga a imagem de um cadastro que não foi confirmado.
    fn discard(&self, _timestamp: i64) -> std::io::Result<()> {
        Ok(())
    }
}

// Implementação de produção: PNG em disco.
#[derive(Debug, Clone)]
pub struct PngQrRenderer {
    output_dir: PathBuf,
    public_prefix: String,
}

impl PngQrRenderer {
    /// `public_prefix` é o prefixo do caminho devolvido ao cliente (ex.: "static/qr_codes").
    pub fn new(output_dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    fn file_name(timestamp: i64) -> String {
        format!("qr_{}.png", timestamp)
    }
}

impl QrRenderer for PngQrRenderer {
    fn render(&self, timestamp: i64, payload: &str) -> Result<String, AppError> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
            .map_err(|e| AppError::QrGeneration(e.to_string()))?;

        // Módulos de 10px com a borda (quiet zone) padrão
        let image = code
            .render::<Luma<u8>>()
            .module_dimensions(10, 10)
            .quiet_zone(true)
            .build();

        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| AppError::QrGeneration(e.to_string()))?;

        let file_name = Self::file_name(timestamp);
        image
            .save(self.output_dir.join(&file_name))
            .map_err(|e| AppError::QrGeneration(e.to_string()))?;

        Ok(format!("{}/{}", self.public_prefix, file_name))
    }

    fn discard(&self, timestamp: i64) -> std::io::Result<()> {
        match std::fs::remove_file(self.output_dir.join(Self::file_name(timestamp))) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_png_and_returns_public_path() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = PngQrRenderer::new(dir.path().join("qr_codes"), "static/qr_codes/");

        let path = renderer.render(1_700_000_000, r#"{"timestamp":1700000000}"#).unwrap();

        assert_eq!(path, "static/qr_codes/qr_1700000000.png");
        let written = dir.path().join("qr_codes").join("qr_1700000000.png");
        let bytes = std::fs::read(written).unwrap();
        // Assinatura PNG
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn discard_removes_the_image_and_tolerates_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = PngQrRenderer::new(dir.path(), "static/qr_codes");
        renderer.render(42, "{}").unwrap();
        assert!(dir.path().join("qr_42.png").exists());

        renderer.discard(42).unwrap();
        assert!(!dir.path().join("qr_42.png").exists());
        renderer.discard(42).unwrap();
    }

    #[test]
    fn unwritable_directory_is_a_generation_error() {
        let dir = tempfile::tempdir().unwrap();
        // Um arquivo no lugar do diretório de saída
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"").unwrap();
        let renderer = PngQrRenderer::new(&blocker, "static/qr_codes");

        let err = renderer.render(1, "{}").unwrap_err();
        assert!(matches!(err, AppError::QrGeneration(_)));
    }
}
