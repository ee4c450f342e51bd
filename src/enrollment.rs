use std::io::Write;

use image::{GrayImage, ImageEncoder, Luma};
use qrcode::QrCode;
use qrcode::render::svg;
use serde::{Deserialize, Serialize};

use crate::error::{OtpError, Result};

/// Default size of one QR module in pixels
pub const DEFAULT_MODULE_SIZE: u32 = 8;

/// Width of the quiet zone in modules, when enabled
const QUIET_ZONE_MODULES: u32 = 4;

/// Largest side of a rendered PNG in pixels
pub const MAX_PNG_SIZE: u32 = 4096;

/// Image format of a rendered QR code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrFormat {
    /// SVG document
    #[default]
    Svg,
    /// 8-bit grayscale PNG
    Png,
}

/// Options for QR rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrOptions {
    /// Output format
    pub format: QrFormat,
    /// Pixel size of one module
    pub module_size: u32,
    /// Surround the code with a 4-module light border
    pub quiet_zone: bool,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            format: QrFormat::Svg,
            module_size: DEFAULT_MODULE_SIZE,
            quiet_zone: false,
        }
    }
}

/// Generate the `otpauth://totp/` URI authenticator apps enroll from
///
/// - `secret`: the base32 transport text of the secret
/// - `account_name`: the label shown in the app
/// - `issuer`: the service name shown in the app
pub fn enrollment_uri(
    secret: impl AsRef<str>,
    account_name: impl AsRef<str>,
    issuer: impl AsRef<str>,
) -> String {
    format!(
        "otpauth://totp/{}?secret={}&issuer={}",
        urlencoding::encode(account_name.as_ref()),
        urlencoding::encode(secret.as_ref()),
        urlencoding::encode(issuer.as_ref())
    )
}

/// Render the enrollment URI as a QR code image
pub fn qr_code(
    secret: impl AsRef<str>,
    account_name: impl AsRef<str>,
    issuer: impl AsRef<str>,
    options: &QrOptions,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_qr_code(&mut buf, secret, account_name, issuer, options)?;
    Ok(buf)
}

/// Render the enrollment URI as a QR code image into `writer`
pub fn write_qr_code<W: Write>(
    mut writer: W,
    secret: impl AsRef<str>,
    account_name: impl AsRef<str>,
    issuer: impl AsRef<str>,
    options: &QrOptions,
) -> Result<()> {
    if options.module_size == 0 {
        tracing::warn!("rejected QR module size of zero");
        return Err(OtpError::InvalidConfiguration(
            "QR module size must be at least 1".to_owned(),
        ));
    }

    let uri = enrollment_uri(secret, account_name, issuer);
    let code = QrCode::new(uri.as_bytes())
        .map_err(|err| OtpError::QrCode(format!("QR encode error: {err}")))?;
    tracing::debug!(format = ?options.format, modules = code.width(), "rendering enrollment QR code");

    match options.format {
        QrFormat::Svg => {
            let image = code
                .render::<svg::Color>()
                .quiet_zone(options.quiet_zone)
                .module_dimensions(options.module_size, options.module_size)
                .build();
            writer.write_all(image.as_bytes())?;
        }
        QrFormat::Png => write_png(&mut writer, &code, options)?,
    }
    writer.flush()?;
    Ok(())
}

fn write_png<W: Write>(writer: W, code: &QrCode, options: &QrOptions) -> Result<()> {
    let too_large = || OtpError::QrCode("image dimensions overflow".to_owned());

    let width = u32::try_from(code.width()).map_err(|_| too_large())?;
    let border = if options.quiet_zone { QUIET_ZONE_MODULES } else { 0 };
    let px = options.module_size;
    let img_size = width
        .checked_add(border * 2)
        .and_then(|modules| modules.checked_mul(px))
        .ok_or_else(too_large)?;
    if img_size > MAX_PNG_SIZE {
        tracing::warn!(img_size, "rejected oversized QR image");
        return Err(OtpError::InvalidConfiguration(format!(
            "QR image would be {img_size}px wide, the limit is {MAX_PNG_SIZE}px"
        )));
    }

    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));
    let colors = code.to_colors();
    for (index, color) in colors.iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let index = u32::try_from(index).map_err(|_| too_large())?;
        let origin_x = (index % width + border) * px;
        let origin_y = (index / width + border) * px;
        for dy in 0..px {
            for dx in 0..px {
                img.put_pixel(origin_x + dx, origin_y + dy, Luma([0u8]));
            }
        }
    }

    image::codecs::png::PngEncoder::new(writer)
        .write_image(
            img.as_raw(),
            img_size,
            img_size,
            image::ExtendedColorType::L8,
        )
        .map_err(|err| OtpError::QrCode(format!("PNG encode error: {err}")))
}
