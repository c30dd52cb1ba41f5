use itertools::iproduct;

/// Perform one pass of the 3x3 box filter. Every interior element of `dst` becomes the average of
/// the corresponding element of `src` and its 8 neighbours. The outermost rows and columns of
/// `dst` are set to zero; there is no wrapping, clamping or mirroring at the edges.
///
/// `src` and `dst` must both hold `width * height` elements, and must not alias.
pub fn box_blur_3x3(src: &[f32], dst: &mut [f32], width: usize, height: usize) {
    debug_assert_eq!(src.len(), width * height);
    debug_assert_eq!(dst.len(), width * height);

    clear_border(dst, width, height);

    for (y, x) in iproduct!(1..height - 1, 1..width - 1) {
        let above = (y - 1) * width + x;
        let here = y * width + x;
        let below = (y + 1) * width + x;

        let sum = src[above - 1]
            + src[above]
            + src[above + 1]
            + src[here - 1]
            + src[here]
            + src[here + 1]
            + src[below - 1]
            + src[below]
            + src[below + 1];
        dst[here] = sum / 9.0;
    }
}

/// Zero the outermost rows and columns of a row-major buffer.
fn clear_border(dst: &mut [f32], width: usize, height: usize) {
    dst[..width].iter_mut().for_each(|v| *v = 0.0);
    dst[(height - 1) * width..].iter_mut().for_each(|v| *v = 0.0);
    for y in 1..height - 1 {
        dst[y * width] = 0.0;
        dst[y * width + width - 1] = 0.0;
    }
}
