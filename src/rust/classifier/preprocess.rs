use image::imageops::FilterType;
use image::DynamicImage;
use ndarray::Array4;
use log::debug;

use super::error::ClassifierError;

/// Memory layout of the batch tensor handed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TensorLayout {
    /// `(1, height, width, 3)`, the layout Keras exports use
    #[default]
    Nhwc,
    /// `(1, 3, height, width)`
    Nchw,
}

/// Turns an uploaded image into a fixed-size, `[-1, 1]`-normalized batch of one.
///
/// The largest centered square of the image is cropped out in source
/// coordinates, converted to RGB and resized to `size`×`size`. Each channel
/// value `v` becomes `v / 127.5 - 1`.
#[derive(Debug, Clone)]
pub struct ImagePreprocessor {
    size: u32,
    filter: FilterType,
    layout: TensorLayout,
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            filter: FilterType::Lanczos3,
            layout: TensorLayout::Nhwc,
        }
    }
}

impl ImagePreprocessor {
    pub const DEFAULT_SIZE: u32 = 224;

    /// Creates a preprocessor for a square input of `size` pixels.
    ///
    /// # Errors
    /// - `BuildError` if `size` is zero
    pub fn new(size: u32) -> Result<Self, ClassifierError> {
        if size == 0 {
            return Err(ClassifierError::BuildError("Input size must be greater than zero".into()));
        }
        Ok(Self { size, ..Self::default() })
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_layout(mut self, layout: TensorLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn layout(&self) -> TensorLayout {
        self.layout
    }

    /// The shape every tensor produced by this preprocessor has.
    pub fn output_shape(&self) -> [usize; 4] {
        let s = self.size as usize;
        match self.layout {
            TensorLayout::Nhwc => [1, s, s, 3],
            TensorLayout::Nchw => [1, 3, s, s],
        }
    }

    /// Decodes raw upload bytes in any format the `image` crate recognises.
    pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ClassifierError> {
        Ok(image::load_from_memory(bytes)?)
    }

    /// Decodes and preprocesses an upload in one step.
    pub fn preprocess_bytes(&self, bytes: &[u8]) -> Result<Array4<f32>, ClassifierError> {
        let image = Self::decode(bytes)?;
        Ok(self.preprocess(&image))
    }

    pub fn preprocess(&self, image: &DynamicImage) -> Array4<f32> {
        debug!(
            "Preprocessing {}x{} image to {}x{}",
            image.width(),
            image.height(),
            self.size,
            self.size
        );
        let (x, y, side) = centered_square(image.width(), image.height());
        let rgb = DynamicImage::ImageRgb8(image.crop_imm(x, y, side, side).to_rgb8())
            .resize_exact(self.size, self.size, self.filter)
            .to_rgb8();

        let normalize = |x: usize, y: usize, c: usize| {
            f32::from(rgb.get_pixel(x as u32, y as u32)[c]) / 127.5 - 1.0
        };
        let shape = self.output_shape();
        match self.layout {
            TensorLayout::Nhwc => Array4::from_shape_fn(shape, |(_, y, x, c)| normalize(x, y, c)),
            TensorLayout::Nchw => Array4::from_shape_fn(shape, |(_, c, y, x)| normalize(x, y, c)),
        }
    }
}

/// Largest centered square inside a `width`×`height` image, as `(x, y, side)`.
fn centered_square(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    ((width - side) / 2, (height - side) / 2, side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    #[test]
    fn test_shape_and_range() {
        let preprocessor = ImagePreprocessor::default();
        for (w, h) in [(640, 480), (100, 300), (224, 224), (1, 1)] {
            let tensor = preprocessor.preprocess(&gradient(w, h));
            assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
            assert!(tensor.iter().all(|&v| (-1.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn test_extremes_map_to_unit_bounds() {
        let preprocessor = ImagePreprocessor::new(8).unwrap().with_filter(FilterType::Nearest);
        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([255, 255, 255])));
        let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])));
        assert!(preprocessor.preprocess(&white).iter().all(|&v| v == 1.0));
        assert!(preprocessor.preprocess(&black).iter().all(|&v| v == -1.0));
    }

    #[test]
    fn test_grayscale_and_alpha_inputs_become_three_channels() {
        let preprocessor = ImagePreprocessor::new(16).unwrap();
        let gray = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(20, 10, image::Luma([128])));
        let rgba = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(10, 20, image::Rgba([1, 2, 3, 0])));
        assert_eq!(preprocessor.preprocess(&gray).shape(), &[1, 16, 16, 3]);
        assert_eq!(preprocessor.preprocess(&rgba).shape(), &[1, 16, 16, 3]);
    }

    #[test]
    fn test_nchw_layout() {
        let preprocessor = ImagePreprocessor::new(4)
            .unwrap()
            .with_filter(FilterType::Nearest)
            .with_layout(TensorLayout::Nchw);
        let red = DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 6, Rgb([255, 0, 0])));
        let tensor = preprocessor.preprocess(&red);
        assert_eq!(tensor.shape(), &[1, 3, 4, 4]);
        assert_eq!(tensor[[0, 0, 2, 2]], 1.0);
        assert_eq!(tensor[[0, 1, 2, 2]], -1.0);
    }

    #[test]
    fn test_center_crop_keeps_middle() {
        // Left third red, middle third green, right third blue.
        let wide = DynamicImage::ImageRgb8(RgbImage::from_fn(300, 100, |x, _| match x {
            0..=99 => Rgb([255, 0, 0]),
            100..=199 => Rgb([0, 255, 0]),
            _ => Rgb([0, 0, 255]),
        }));
        let preprocessor = ImagePreprocessor::new(10).unwrap().with_filter(FilterType::Nearest);
        let tensor = preprocessor.preprocess(&wide);
        assert!(tensor.slice(ndarray::s![0, .., .., 1]).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_centered_square() {
        assert_eq!(centered_square(300, 100), (100, 0, 100));
        assert_eq!(centered_square(100, 301), (0, 100, 100));
        assert_eq!(centered_square(7, 7), (0, 0, 7));
    }

    #[test]
    fn test_thin_images_keep_fixed_shape() {
        let preprocessor = ImagePreprocessor::default();
        for (w, h) in [(3000, 1), (1, 3000)] {
            let tensor = preprocessor.preprocess(&gradient(w, h));
            assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
            assert!(tensor.iter().all(|&v| (-1.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(ImagePreprocessor::new(0), Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_undecodable_bytes() {
        let result = ImagePreprocessor::default().preprocess_bytes(b"definitely not an image");
        assert!(matches!(result, Err(ClassifierError::InvalidImage(_))));
    }
}
