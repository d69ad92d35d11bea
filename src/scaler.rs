use rayon::{
    iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed mapping from destination pixels to source pixels.
pub struct ScaleLut {
    dst_w: usize,
    src_w: usize,
    sx: Vec<usize>,
    sy: Vec<usize>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            dst_w: 0,
            src_w: 0,
            sx: Vec::new(),
            sy: Vec::new(),
        }
    }

    #[inline]
    pub fn dst_size(&self) -> (usize, usize) {
        (self.dst_w, self.sy.len())
    }
}

/// Nearest-neighbour mapping; keeps each wall slice a hard-edged block at any window size.
pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    if src_w == 0 || src_h == 0 {
        return ScaleLut::empty();
    }

    let sx = (0..dst_w).map(|x| (x * src_w / dst_w).min(src_w - 1)).collect();
    let sy = (0..dst_h).map(|y| (y * src_h / dst_h).min(src_h - 1)).collect();

    ScaleLut {
        dst_w,
        src_w,
        sx,
        sy,
    }
}

/// Parallel stretch blit
/// Rows are processed in parallel for cache friendly writes
pub fn blit_stretch(dst: &mut [u32], src: &[u32], lut: &ScaleLut) {
    if lut.dst_w == 0 {
        return;
    }
    dst.par_chunks_mut(lut.dst_w)
        .zip(lut.sy.par_iter())
        .for_each(|(dst_row, &sy)| {
            let row = &src[sy * lut.src_w..(sy + 1) * lut.src_w];
            for (d, &sx) in dst_row.iter_mut().zip(&lut.sx) {
                *d = row[sx];
            }
        });
}
