/// How the pixel decoder read the code. The decoder itself is out of scope;
/// this is its call contract with the kiosk core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    /// A printed EAN/ISBN barcode: the payload is (meant to be) an ISBN.
    Barcode,
    /// A QR label: the payload is opaque and needs provider resolution.
    QrCode,
}

/// One decoded frame from the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedCode {
    pub payload: String,
    pub symbology: Symbology,
}

impl ScannedCode {
    pub fn barcode(payload: impl Into<String>) -> Self {
        Self { payload: payload.into(), symbology: Symbology::Barcode }
    }

    pub fn qr(payload: impl Into<String>) -> Self {
        Self { payload: payload.into(), symbology: Symbology::QrCode }
    }

    pub fn is_qr(&self) -> bool {
        self.symbology == Symbology::QrCode
    }
}
