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
#![forbid(unsafe_code)]
use crate::convolution::{ConvolutionBackend, check_region, convolve_region};
use crate::image_size::RGB_CHANNELS;
use crate::pic_laplace_error::PicLaplaceError;
use crate::saturate_narrow::SaturateNarrow;
use num_traits::AsPrimitive;
use std::ops::{Mul, Sub};

/// Portable scalar backend
#[derive(Debug, Copy, Clone, Default)]
pub struct NativeBackend;

#[inline(always)]
/// # Generics
/// `J` - accumulator type
fn laplace_px<J>(center: u8, left: u8, right: u8, top: u8, bottom: u8) -> u8
where
    J: Copy + 'static + Mul<Output = J> + Sub<Output = J> + SaturateNarrow<u8>,
    u8: AsPrimitive<J>,
    i16: AsPrimitive<J>,
{
    let four: J = 4i16.as_();
    let center: J = center.as_();
    let left: J = left.as_();
    let right: J = right.as_();
    let top: J = top.as_();
    let bottom: J = bottom.as_();
    (center * four - left - right - top - bottom).saturate_narrow()
}

/// Convolves bytes `start..row_bytes - 3` of the middle row in `src`
pub(crate) fn laplace_row_native_from(src: &[u8], dst: &mut [u8], row_bytes: usize, start: usize) {
    let (top, rest) = src.split_at(row_bytes);
    let (current, bottom) = rest.split_at(row_bytes);
    let end = row_bytes.saturating_sub(RGB_CHANNELS);
    for i in start.max(RGB_CHANNELS)..end {
        dst[i] = laplace_px::<i16>(
            current[i],
            current[i - RGB_CHANNELS],
            current[i + RGB_CHANNELS],
            top[i],
            bottom[i],
        );
    }
}

pub(crate) fn laplace_row_native(src: &[u8], dst: &mut [u8], row_bytes: usize) {
    laplace_row_native_from(src, dst, row_bytes, RGB_CHANNELS);
}

impl ConvolutionBackend for NativeBackend {
    fn compute(
        &self,
        source: &[u8],
        destination: &mut [u8],
        width: usize,
    ) -> Result<(), PicLaplaceError> {
        let row_bytes = check_region(source, destination, width)?;
        convolve_region(source, destination, row_bytes, laplace_row_native);
        Ok(())
    }
}
