use crate::dataset::common_structs::BoundingBox;
use image::{DynamicImage, GenericImageView};
use imageproc::drawing::Blend;

/// Draws a normalized box onto the image in red, for eyeballing annotations.
pub fn draw_bb_to_img(img: &mut DynamicImage, bb: &BoundingBox) {
    draw_bb_to_img_with_color(img, bb, [255, 0, 0, 255]);
}

pub fn draw_bb_to_img_with_color(img: &mut DynamicImage, bb: &BoundingBox, rgba_color: [u8; 4]) {
    let (img_width, img_height) = img.dimensions();
    let left = (bb.xmin * img_width as f32) as i32;
    let top = (bb.ymin * img_height as f32) as i32;
    let width = ((bb.xmax - bb.xmin) * img_width as f32) as u32;
    let height = ((bb.ymax - bb.ymin) * img_height as f32) as u32;

    let mut img_blend = Blend(img.to_rgba());
    let rec = imageproc::rect::Rect::at(left, top).of_size(width.max(1), height.max(1));
    let color = image::Rgba(rgba_color);

    imageproc::drawing::draw_hollow_rect_mut(&mut img_blend, rec, color);
    std::mem::swap(img, &mut DynamicImage::ImageRgba8(img_blend.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn box_outline_lands_on_denormalized_pixels() {
        let mut img = DynamicImage::ImageRgb8(RgbImage::new(64, 64));
        let bb = BoundingBox {
            xmin: 0.25,
            ymin: 0.25,
            xmax: 0.75,
            ymax: 0.75,
            class: 0.,
        };
        draw_bb_to_img(&mut img, &bb);

        assert_eq!(img.dimensions(), (64, 64));
        // top-left corner of the outline
        assert_eq!(img.get_pixel(16, 16), image::Rgba([255, 0, 0, 255]));
        // center stays untouched, the rect is hollow
        assert_eq!(img.get_pixel(32, 32), image::Rgba([0, 0, 0, 255]));
    }
}
