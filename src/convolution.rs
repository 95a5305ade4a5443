/*
 * Copyright (c) Radzivon Bartoshyk. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::image_size::RGB_CHANNELS;
use crate::laplace_accelerated::AcceleratedBackend;
use crate::laplace_native::NativeBackend;
use crate::pic_laplace_error::PicLaplaceError;

/// Convolves one packed row.
///
/// `src` holds three consecutive rows `[above, current, below]`, `dst` receives
/// the current row. The first and the last pixel of the row are left untouched.
pub(crate) type LaplaceRowHandler = fn(src: &[u8], dst: &mut [u8], row_bytes: usize);

/// Applies 3x3 Laplace kernel over a worker region
pub trait ConvolutionBackend: Send + Sync {
    /// `destination` is the region owned by the worker and must be whole rows.
    /// `source` covers the same rows of the input with one more row above and
    /// one more below.
    fn compute(
        &self,
        source: &[u8],
        destination: &mut [u8],
        width: usize,
    ) -> Result<(), PicLaplaceError>;
}

/// Selects which backend convolves the image, both produce identical bytes
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum Backend {
    /// SIMD kernels picked at runtime
    #[default]
    Accelerated,
    /// Portable scalar kernel
    Native,
}

static ACCELERATED: AcceleratedBackend = AcceleratedBackend;
static NATIVE: NativeBackend = NativeBackend;

impl Backend {
    pub fn handler(&self) -> &'static dyn ConvolutionBackend {
        match self {
            Backend::Accelerated => &ACCELERATED,
            Backend::Native => &NATIVE,
        }
    }
}

/// Checks region shape, returns packed row length
pub(crate) fn check_region(
    source: &[u8],
    destination: &[u8],
    width: usize,
) -> Result<usize, PicLaplaceError> {
    let row_bytes = width
        .checked_mul(RGB_CHANNELS)
        .ok_or(PicLaplaceError::InvalidRegion(width, destination.len()))?;
    if width < 3
        || destination.len() % row_bytes != 0
        || source.len() != destination.len().saturating_add(row_bytes.saturating_mul(2))
    {
        return Err(PicLaplaceError::InvalidRegion(width, destination.len()));
    }
    Ok(row_bytes)
}

/// Runs `handler` over every row of the region
pub(crate) fn convolve_region(
    source: &[u8],
    destination: &mut [u8],
    row_bytes: usize,
    handler: LaplaceRowHandler,
) {
    for (y, dst) in destination.chunks_exact_mut(row_bytes).enumerate() {
        let src = &source[y * row_bytes..(y + 3) * row_bytes];
        handler(src, dst, row_bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_must_be_whole_rows() {
        let source = vec![0u8; 4 * 12];
        let mut destination = vec![0u8; 2 * 12];
        assert_eq!(check_region(&source, &destination, 4).unwrap(), 12);
        assert!(matches!(
            check_region(&source[1..], &destination, 4),
            Err(PicLaplaceError::InvalidRegion(4, 24))
        ));
        assert!(matches!(
            check_region(&source, &destination[..23], 4),
            Err(PicLaplaceError::InvalidRegion(4, 23))
        ));
        destination.clear();
        assert!(matches!(
            check_region(&source[..24], &destination, 4),
            Ok(12)
        ));
    }

    #[test]
    fn overflowing_width_is_rejected() {
        let source = vec![0u8; 36];
        assert!(matches!(
            check_region(&source, &[], usize::MAX / 2),
            Err(PicLaplaceError::InvalidRegion(_, 0))
        ));
        assert!(matches!(
            check_region(&source, &[], usize::MAX / 3),
            Err(PicLaplaceError::InvalidRegion(_, 0))
        ));
    }

    #[test]
    fn narrow_images_are_rejected() {
        for width in [0usize, 1, 2] {
            let source = vec![0u8; 3 * width * 3];
            let mut destination = vec![0u8; width * 3];
            for backend in [Backend::Accelerated, Backend::Native] {
                assert!(matches!(
                    backend.handler().compute(&source, &mut destination, width),
                    Err(PicLaplaceError::InvalidRegion(w, _)) if w == width
                ));
            }
        }
    }
}
