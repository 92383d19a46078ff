use rand::{rngs::StdRng, Rng, SeedableRng};

use rasterkit_image::{PixelBuffer, Rgb};
use rasterkit_io::{
    ppm::{decode_image_ppm, encode_image_ppm, read_image_ppm, write_image_ppm},
    IoError,
};

fn random_image(rng: &mut StdRng, width: usize, height: usize, max: u16) -> PixelBuffer {
    let pixels = (0..width * height)
        .map(|_| {
            Rgb::new(
                rng.random_range(0..=max),
                rng.random_range(0..=max),
                rng.random_range(0..=max),
            )
        })
        .collect();
    PixelBuffer::new([width, height].into(), max, pixels).unwrap()
}

#[test]
fn roundtrip_in_memory() -> Result<(), IoError> {
    let mut rng = StdRng::seed_from_u64(1234);
    for (width, height, max) in [(1, 1, 255), (7, 3, 255), (16, 9, 100), (5, 5, 1), (0, 3, 255)] {
        let image = random_image(&mut rng, width, height, max);
        let decoded = decode_image_ppm(&encode_image_ppm(&image))?;
        assert_eq!(decoded, image);
    }
    Ok(())
}

#[test]
fn roundtrip_file() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let file_path = tmp_dir.path().join("image.ppm");

    let mut rng = StdRng::seed_from_u64(99);
    let image = random_image(&mut rng, 32, 24, 255);

    write_image_ppm(&file_path, &image)?;
    let image_back = read_image_ppm(&file_path)?;

    assert_eq!(image_back.size(), image.size());
    assert_eq!(image_back, image);
    Ok(())
}

#[test]
fn read_missing_file() {
    let res = read_image_ppm("does/not/exist.ppm");
    assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
}

#[test]
fn read_invalid_extension() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let file_path = tmp_dir.path().join("image.png");
    std::fs::write(&file_path, b"P6\n1 1\n255\n\x00\x00\x00")?;

    let res = read_image_ppm(&file_path);
    assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
    Ok(())
}
