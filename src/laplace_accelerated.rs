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
#[cfg(all(target_arch = "x86_64", feature = "avx"))]
use crate::avx2::laplace_row_avx2;
use crate::convolution::{ConvolutionBackend, LaplaceRowHandler, check_region, convolve_region};
use crate::laplace_native::laplace_row_native;
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
use crate::neon::laplace_row_neon;
use crate::pic_laplace_error::PicLaplaceError;
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
use crate::sse::laplace_row_sse;

/// SIMD backend, picks the widest extension available at runtime and falls
/// back to scalar code when there is none
#[derive(Debug, Copy, Clone, Default)]
pub struct AcceleratedBackend;

impl AcceleratedBackend {
    /// Name of the extension rows are convolved with on this CPU
    pub fn extension(&self) -> &'static str {
        select_row_handler().0
    }
}

fn select_row_handler() -> (&'static str, LaplaceRowHandler) {
    let mut _dispatcher: (&'static str, LaplaceRowHandler) = ("none", laplace_row_native);
    #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
    {
        _dispatcher = ("neon", laplace_row_neon);
    }
    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    {
        if std::arch::is_x86_feature_detected!("sse4.1") {
            _dispatcher = ("sse4.1", laplace_row_sse);
        }
    }
    #[cfg(all(target_arch = "x86_64", feature = "avx"))]
    {
        if std::arch::is_x86_feature_detected!("avx2") {
            _dispatcher = ("avx2", laplace_row_avx2);
        }
    }
    _dispatcher
}

impl ConvolutionBackend for AcceleratedBackend {
    fn compute(
        &self,
        source: &[u8],
        destination: &mut [u8],
        width: usize,
    ) -> Result<(), PicLaplaceError> {
        let row_bytes = check_region(source, destination, width)?;
        let (_, handler) = select_row_handler();
        convolve_region(source, destination, row_bytes, handler);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::laplace_native::NativeBackend;

    fn noise(len: usize, mut seed: u32) -> Vec<u8> {
        (0..len)
            .map(|_| {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                (seed >> 24) as u8
            })
            .collect()
    }

    fn assert_rows_match(handler: LaplaceRowHandler) {
        for width in [3usize, 4, 5, 6, 7, 11, 12, 16, 17, 22, 33, 100, 257] {
            let row_bytes = width * 3;
            let src = noise(row_bytes * 3, 0x9E37_79B9 ^ width as u32);
            let mut expected = vec![0u8; row_bytes];
            let mut received = vec![0u8; row_bytes];
            laplace_row_native(&src, &mut expected, row_bytes);
            handler(&src, &mut received, row_bytes);
            assert_eq!(expected, received, "Rows differ for width {width}");
        }
    }

    #[test]
    fn accelerated_matches_native() {
        for width in [3usize, 5, 8, 13, 31, 64, 97] {
            for rows in [1usize, 2, 7] {
                let row_bytes = width * 3;
                let source = noise(row_bytes * (rows + 2), 0xDEAD_BEEF ^ (width * rows) as u32);
                let mut expected = vec![0u8; row_bytes * rows];
                let mut received = vec![0u8; row_bytes * rows];
                NativeBackend.compute(&source, &mut expected, width).unwrap();
                AcceleratedBackend
                    .compute(&source, &mut received, width)
                    .unwrap();
                assert_eq!(expected, received);
            }
        }
    }

    #[test]
    fn extreme_values_saturate_identically() {
        let width = 40usize;
        let row_bytes = width * 3;
        let mut source = vec![0u8; row_bytes * 3];
        for (i, v) in source[row_bytes..row_bytes * 2].iter_mut().enumerate() {
            *v = if i % 2 == 0 { 255 } else { 0 };
        }
        source[..row_bytes].fill(255);
        let mut expected = vec![0u8; row_bytes];
        let mut received = vec![0u8; row_bytes];
        NativeBackend.compute(&source, &mut expected, width).unwrap();
        AcceleratedBackend
            .compute(&source, &mut received, width)
            .unwrap();
        assert_eq!(expected, received);
        assert!(expected.contains(&0));
        assert!(expected.contains(&255));
    }

    #[test]
    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    fn sse_rows_match_native() {
        if std::arch::is_x86_feature_detected!("sse4.1") {
            assert_rows_match(laplace_row_sse);
        }
    }

    #[test]
    #[cfg(all(target_arch = "x86_64", feature = "avx"))]
    fn avx_rows_match_native() {
        if std::arch::is_x86_feature_detected!("avx2") {
            assert_rows_match(laplace_row_avx2);
        }
    }

    #[test]
    #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
    fn neon_rows_match_native() {
        assert_rows_match(laplace_row_neon);
    }

    #[test]
    fn reports_extension() {
        let extension = AcceleratedBackend.extension();
        assert!(["none", "neon", "sse4.1", "avx2"].contains(&extension));
    }
}
