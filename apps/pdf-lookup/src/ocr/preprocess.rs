//! Image cleanup before recognition
//!
//! Grayscale, global Otsu threshold, then a light blur to soften the
//! binarisation edges.

use image::{DynamicImage, GrayImage, Luma};

const BLUR_SIGMA: f32 = 0.8;

/// Binarise a page image for OCR
pub fn binarize(image: &DynamicImage) -> DynamicImage {
    let gray = image.to_luma8();
    let threshold = otsu_threshold(&gray);

    let binary = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] > threshold {
            Luma([255])
        } else {
            Luma([0])
        }
    });

    DynamicImage::ImageLuma8(image::imageops::blur(&binary, BLUR_SIGMA))
}

/// Threshold that maximises between-class variance of the histogram
pub fn otsu_threshold(image: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for pixel in image.pixels() {
        histogram[pixel[0] as usize] += 1;
    }

    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return 127;
    }

    let weighted_total: f64 = histogram
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut background_weight = 0u64;
    let mut background_sum = 0f64;
    let mut best_variance = 0f64;
    let mut best_threshold = 0u8;

    for (level, &count) in histogram.iter().enumerate() {
        background_weight += count;
        if background_weight == 0 {
            continue;
        }
        let foreground_weight = total - background_weight;
        if foreground_weight == 0 {
            break;
        }

        background_sum += level as f64 * count as f64;
        let background_mean = background_sum / background_weight as f64;
        let foreground_mean = (weighted_total - background_sum) / foreground_weight as f64;

        let variance = background_weight as f64
            * foreground_weight as f64
            * (background_mean - foreground_mean).powi(2);

        if variance > best_variance {
            best_variance = variance;
            best_threshold = level as u8;
        }
    }

    best_threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tone(dark: u8, light: u8) -> GrayImage {
        GrayImage::from_fn(10, 10, |x, _| if x < 5 { Luma([dark]) } else { Luma([light]) })
    }

    #[test]
    fn test_otsu_splits_bimodal_image() {
        let img = two_tone(40, 200);
        let threshold = otsu_threshold(&img);
        assert!((40..200).contains(&threshold), "threshold {}", threshold);
    }

    #[test]
    fn test_binarize_keeps_dimensions() {
        let img = DynamicImage::ImageLuma8(two_tone(30, 220));
        let out = binarize(&img);
        assert_eq!((out.width(), out.height()), (10, 10));

        let gray = out.to_luma8();
        assert!(gray.get_pixel(0, 5)[0] < 128);
        assert!(gray.get_pixel(9, 5)[0] > 128);
    }

    #[test]
    fn test_uniform_image() {
        // A single level has no split, so the threshold stays at 0
        let img = GrayImage::from_pixel(4, 4, Luma([128]));
        assert_eq!(otsu_threshold(&img), 0);

        let out = binarize(&DynamicImage::ImageLuma8(img)).to_luma8();
        assert!(out.pixels().all(|p| p[0] > 250));
    }

    #[test]
    fn test_empty_image() {
        assert_eq!(otsu_threshold(&GrayImage::new(0, 0)), 127);
    }
}
