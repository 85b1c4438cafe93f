//! Integration tests for pipefx crates.
//!
//! End-to-end checks of the load -> filter -> save pipeline across
//! `pipefx-io` and `pipefx-filters`.

#[cfg(test)]
mod tests {
    use pipefx_core::{ImageBuffer, Rgb};
    use pipefx_filters::param::ChannelOption;
    use pipefx_filters::{FilterError, FilterRegistry};
    use std::path::Path;
    use tempfile::tempdir;

    fn write_raw(path: &Path, width: u32, height: u32, color: png::ColorType, depth: png::BitDepth, data: &[u8]) {
        let file = std::fs::File::create(path).unwrap();
        let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
    }

    /// Full pipeline: load -> blur -> save -> reload
    #[test]
    fn test_blur_png_pipeline() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("flat.png");
        let output = dir.path().join("flat_blur.png");

        pipefx_io::write(&input, &ImageBuffer::filled(4, 4, Rgb::new(90, 180, 45))).unwrap();

        let registry = FilterRegistry::from_list("BlurFilter").unwrap();
        let image = pipefx_io::read(&input).unwrap();
        let blurred = registry.get(1).unwrap().process(&image).unwrap();
        pipefx_io::write(&output, &blurred).unwrap();

        let loaded = pipefx_io::read(&output).unwrap();
        assert_eq!(loaded.dimensions(), (4, 4));
        assert_eq!(loaded.pixel(1, 1), Rgb::new(90, 180, 45));
        assert_eq!(loaded.pixel(1, 2), Rgb::new(90, 180, 45));
        // 6 of 9 samples inside on an edge, 4 of 9 in a corner.
        assert_eq!(loaded.pixel(0, 1), Rgb::new(60, 120, 30));
        assert_eq!(loaded.pixel(3, 3), Rgb::new(40, 80, 20));

        // Input file untouched.
        assert_eq!(pipefx_io::read(&input).unwrap(), image);
    }

    #[test]
    fn test_split_png_pipeline() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("rgb.png");
        write_raw(
            &input,
            2,
            1,
            png::ColorType::Rgb,
            png::BitDepth::Eight,
            &[10, 20, 30, 200, 100, 50],
        );

        let mut registry = FilterRegistry::from_list("BlurFilter, RgbSplitFilter").unwrap();
        let image = pipefx_io::read(&input).unwrap();
        let split = registry.get_mut(2).unwrap();

        for (channel, expected) in [
            (ChannelOption::Red, [Rgb::new(10, 0, 0), Rgb::new(200, 0, 0)]),
            (ChannelOption::Blue, [Rgb::new(0, 0, 30), Rgb::new(0, 0, 50)]),
        ] {
            split.set_parameter("channel", channel).unwrap();
            let out = split.process(&image).unwrap();
            let path = dir.path().join(format!("rgb_{channel}.png"));
            pipefx_io::write(&path, &out).unwrap();
            assert_eq!(pipefx_io::read(&path).unwrap().data(), &expected);
        }
    }

    #[test]
    fn test_translucent_png_limits_filters() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("alpha.png");
        write_raw(
            &input,
            2,
            1,
            png::ColorType::Rgba,
            png::BitDepth::Eight,
            &[10, 20, 30, 255, 40, 50, 60, 10],
        );

        let image = pipefx_io::read(&input).unwrap();
        assert!(image.is_translucent());

        let registry = FilterRegistry::from_list("BlurFilter, RgbSplitFilter").unwrap();
        let names: Vec<_> = registry.applicable(&image).map(|(_, f)| f.name()).collect();
        assert_eq!(names, ["Blur"]);

        // Written output carries no alpha.
        let out = registry.get(1).unwrap().process(&image).unwrap();
        let path = dir.path().join("alpha_blur.png");
        pipefx_io::write(&path, &out).unwrap();
        assert!(!pipefx_io::read(&path).unwrap().is_translucent());
    }

    #[test]
    fn test_sixteen_bit_gray_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("gray16.png");
        // Big-endian samples 0xFFFF and 0x8000.
        write_raw(
            &input,
            2,
            1,
            png::ColorType::Grayscale,
            png::BitDepth::Sixteen,
            &[0xFF, 0xFF, 0x80, 0x00],
        );

        let image = pipefx_io::read(&input).unwrap();
        assert_eq!(image.pixel(0, 0), Rgb::WHITE);
        assert_eq!(image.pixel(1, 0), Rgb::new(0x80, 0x80, 0x80));

        let mut registry = FilterRegistry::from_list("RgbSplitFilter").unwrap();
        let f = registry.get_mut(1).unwrap();
        f.set_parameter("channel", ChannelOption::Green).unwrap();
        assert_eq!(f.process(&image).unwrap().pixel(0, 0), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_missing_channel_leaves_nothing_to_save() {
        let image = ImageBuffer::filled(2, 2, Rgb::new(1, 2, 3));
        let registry = FilterRegistry::from_list("RgbSplitFilter").unwrap();
        let err = registry.get(1).unwrap().process(&image).unwrap_err();
        assert!(matches!(err, FilterError::MissingValue { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let err = pipefx_io::write(&path, &ImageBuffer::new(1, 1)).unwrap_err();
        assert!(matches!(err, pipefx_io::IoError::UnsupportedFormat(_)));
        assert!(!path.exists());
    }
}
