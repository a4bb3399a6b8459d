#[derive(Debug, thiserror::Error)]
pub enum KioskError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create output directory: {0}")]
    OutputDirCreation(std::io::Error),
    #[error("failed to write ID file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to encode QR code: {0}")]
    QrEncode(qrcode::types::QrError),
    #[error("failed to write QR image: {0}")]
    ImageWrite(image::ImageError),
    #[error("console I/O failed: {0}")]
    Console(std::io::Error),
    #[error("console input closed")]
    InputClosed,

    #[error("invalid text: {0}")]
    Text(#[from] hl_types::TextError),
    #[error("invalid Medical ID: {0}")]
    MedicalId(#[from] hl_uuid::MedicalIdError),
}

pub type KioskResult<T> = std::result::Result<T, KioskError>;
