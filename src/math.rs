//! Integer blending helpers

/// Divide by 255 using shifts; equal to `num / 255` for all products of two u8 values
///
///     use cwr::div255;
///
///     assert_eq!(div255(255 * 255), 255);
///     assert_eq!(div255(128 * 255), 128);
///     assert_eq!(div255(0), 0);
pub fn div255(num: u32) -> u8 {
    ((num + 1 + (num >> 8)) >> 8) as u8
}

/// Alpha of a pixel after applying coverage, source and widget alpha
///
/// Computed as `cover * (alpha * widget_alpha)`, all in [0,255]
pub fn combine_alpha(cover: u8, alpha: u8, widget_alpha: u8) -> u8 {
    let a = div255(u32::from(alpha) * u32::from(widget_alpha));
    div255(u32::from(cover) * u32::from(a))
}

/// Blend a foreground component over a background component
///
/// out = (fg * alpha + bg * (255 - alpha)) / 255
///
/// see [Alpha Compositing](https://en.wikipedia.org/wiki/Alpha_compositing)
pub fn mix(fg: u8, bg: u8, alpha: u8) -> u8 {
    let ialpha = 0xFF - u32::from(alpha);
    div255(u32::from(fg) * u32::from(alpha) + u32::from(bg) * ialpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn div255_matches_division() {
        for a in 0 ..= 255u32 {
            for b in (0 ..= 255u32).step_by(15) {
                let p = a * b;
                assert_eq!(u32::from(div255(p)), p / 255, "{} * {}", a, b);
            }
        }
    }
    #[test]
    fn mix_endpoints() {
        assert_eq!(mix(200, 10, 255), 200);
        assert_eq!(mix(200, 10, 0), 10);
        assert_eq!(combine_alpha(255, 255, 255), 255);
        assert_eq!(combine_alpha(0, 255, 255), 0);
        assert_eq!(combine_alpha(255, 128, 255), 128);
    }
}
