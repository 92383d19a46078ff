use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
    str::FromStr,
};

use rasterkit_image::{ImageSize, PixelBuffer, Rgb};

use crate::error::IoError;

const PPM_MAGIC: &str = "P6";

/// The fields of a PPM header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PpmHeader {
    /// The size of the image in pixels.
    pub size: ImageSize,
    /// The maximum channel value.
    pub max_color_val: u16,
}

// split off the next newline terminated line
fn next_line<'a>(bytes: &'a [u8], field: &'static str) -> Result<(&'a str, &'a [u8]), IoError> {
    let pos = bytes
        .iter()
        .position(|&b| b == b'\n')
        .ok_or(IoError::MissingHeaderLine(field))?;

    let line = std::str::from_utf8(&bytes[..pos]).map_err(|_| IoError::InvalidHeaderValue {
        field,
        value: String::from_utf8_lossy(&bytes[..pos]).into_owned(),
    })?;

    Ok((line.trim_end_matches('\r'), &bytes[pos + 1..]))
}

fn parse_field<T: FromStr>(field: &'static str, text: &str) -> Result<T, IoError> {
    text.trim()
        .parse::<T>()
        .map_err(|_| IoError::InvalidHeaderValue {
            field,
            value: text.to_string(),
        })
}

/// Parse the three line PPM header.
///
/// # Returns
///
/// The header and the remaining bytes, starting at the pixel payload.
pub fn decode_header_ppm(bytes: &[u8]) -> Result<(PpmHeader, &[u8]), IoError> {
    let (magic, rest) = next_line(bytes, "magic")?;
    if magic.trim() != PPM_MAGIC {
        return Err(IoError::InvalidMagic(magic.to_string()));
    }

    let (dims, rest) = next_line(rest, "dimensions")?;
    let tokens = dims.split_whitespace().collect::<Vec<_>>();
    let [width, height] = tokens.as_slice() else {
        return Err(IoError::InvalidHeaderValue {
            field: "dimensions",
            value: dims.to_string(),
        });
    };
    let width = parse_field::<usize>("width", width)?;
    let height = parse_field::<usize>("height", height)?;

    let (max, rest) = next_line(rest, "max color value")?;
    let max_color_val = parse_field::<u16>("max color value", max)?;
    if max_color_val == 0 {
        return Err(IoError::InvalidHeaderValue {
            field: "max color value",
            value: max.to_string(),
        });
    }

    Ok((
        PpmHeader {
            size: ImageSize { width, height },
            max_color_val,
        },
        rest,
    ))
}

/// Decodes a binary PPM image from raw bytes.
///
/// # Arguments
///
/// * `bytes` - Raw bytes of the ppm file.
///
/// # Returns
///
/// The decoded pixel buffer. Bytes after the pixel payload are ignored.
///
/// # Errors
///
/// Returns an error if the header is malformed, if the payload is shorter
/// than `width * height * 3` bytes or if a sample exceeds the maximum color value.
///
/// # Example
///
/// ```
/// use rasterkit_image::Rgb;
/// use rasterkit_io::ppm::decode_image_ppm;
///
/// let image = decode_image_ppm(b"P6\n1 1\n255\n\x1e\x3c\x5a").unwrap();
///
/// assert_eq!(image.as_slice(), &[Rgb::new(30, 60, 90)]);
/// ```
pub fn decode_image_ppm(bytes: &[u8]) -> Result<PixelBuffer, IoError> {
    let (header, payload) = decode_header_ppm(bytes)?;
    let size = header.size;

    let expected = size
        .width
        .checked_mul(size.height)
        .and_then(|n| n.checked_mul(3))
        .ok_or(IoError::ImageTooLarge(size.width, size.height))?;

    if payload.len() < expected {
        return Err(IoError::TruncatedPixelData {
            expected,
            actual: payload.len(),
        });
    }

    if payload.len() > expected {
        log::debug!(
            "ignoring {} trailing bytes after the ppm payload",
            payload.len() - expected
        );
    }

    let pixels = payload[..expected]
        .chunks_exact(3)
        .map(|c| Rgb::new(c[0] as u16, c[1] as u16, c[2] as u16))
        .collect();

    Ok(PixelBuffer::new(size, header.max_color_val, pixels)?)
}

/// Encodes a pixel buffer as a binary PPM image into `writer`.
///
/// Each channel is written as a single byte. Buffers with a maximum color
/// value above 255 are truncated to the low byte of every channel.
///
/// # Arguments
///
/// * `writer` - The destination of the encoded bytes.
/// * `image` - The image to encode.
pub fn encode_image_ppm_to<W: Write>(writer: &mut W, image: &PixelBuffer) -> Result<(), IoError> {
    writer.write_all(&encode_image_ppm(image))?;
    Ok(())
}

/// Encodes a pixel buffer as a binary PPM image.
///
/// # Example
///
/// ```
/// use rasterkit_image::{PixelBuffer, Rgb};
/// use rasterkit_io::ppm::encode_image_ppm;
///
/// let image = PixelBuffer::new([1, 1].into(), 255, vec![Rgb::new(1, 2, 3)]).unwrap();
///
/// assert_eq!(encode_image_ppm(&image), b"P6\n1 1\n255\n\x01\x02\x03");
/// ```
pub fn encode_image_ppm(image: &PixelBuffer) -> Vec<u8> {
    if image.max_color_val() > u8::MAX as u16 {
        log::warn!(
            "max color value {} does not fit in a byte, channels will be truncated",
            image.max_color_val()
        );
    }

    let header = format!(
        "{}\n{} {}\n{}\n",
        PPM_MAGIC,
        image.width(),
        image.height(),
        image.max_color_val()
    );

    let mut bytes = Vec::with_capacity(header.len() + image.as_slice().len() * 3);
    bytes.extend_from_slice(header.as_bytes());
    for px in image.as_slice() {
        bytes.extend_from_slice(&[px.r as u8, px.g as u8, px.b as u8]);
    }
    bytes
}

/// Reads a binary PPM image from any reader.
pub fn read_image_ppm_from<R: Read>(mut reader: R) -> Result<PixelBuffer, IoError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_image_ppm(&bytes)
}

/// Reads a binary PPM image from the given file path.
///
/// # Arguments
///
/// * `file_path` - The path to a `.ppm` file.
///
/// # Returns
///
/// The decoded pixel buffer.
pub fn read_image_ppm(file_path: impl AsRef<Path>) -> Result<PixelBuffer, IoError> {
    let file_path = file_path.as_ref().to_owned();

    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    if file_path
        .extension()
        .map_or(true, |ext| !ext.eq_ignore_ascii_case("ppm"))
    {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(&file_path)?;
    let image = decode_image_ppm(&bytes)?;
    log::debug!("read {} from {}", image.size(), file_path.display());

    Ok(image)
}

/// Writes the given pixel buffer to the given file path as a binary PPM image.
///
/// # Arguments
///
/// * `file_path` - The path to the PPM image.
/// * `image` - The image to write.
pub fn write_image_ppm(file_path: impl AsRef<Path>, image: &PixelBuffer) -> Result<(), IoError> {
    let file = File::create(file_path.as_ref())?;
    let mut writer = BufWriter::new(file);
    encode_image_ppm_to(&mut writer, image)?;
    writer.flush()?;
    Ok(())
}
