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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::image_size::RGB_CHANNELS;
use crate::laplace_native::laplace_row_native_from;

pub(crate) fn laplace_row_sse(src: &[u8], dst: &mut [u8], row_bytes: usize) {
    assert!(src.len() >= row_bytes * 3 && dst.len() >= row_bytes);
    unsafe { laplace_row_sse_impl(src, dst, row_bytes) }
}

#[inline(always)]
unsafe fn laplace_sse_16(
    center: __m128i,
    left: __m128i,
    right: __m128i,
    top: __m128i,
    bottom: __m128i,
) -> __m128i {
    let zeros = _mm_setzero_si128();

    let mut acc_lo = _mm_slli_epi16::<2>(_mm_cvtepu8_epi16(center));
    acc_lo = _mm_sub_epi16(acc_lo, _mm_cvtepu8_epi16(left));
    acc_lo = _mm_sub_epi16(acc_lo, _mm_cvtepu8_epi16(right));
    acc_lo = _mm_sub_epi16(acc_lo, _mm_cvtepu8_epi16(top));
    acc_lo = _mm_sub_epi16(acc_lo, _mm_cvtepu8_epi16(bottom));

    let mut acc_hi = _mm_slli_epi16::<2>(_mm_unpackhi_epi8(center, zeros));
    acc_hi = _mm_sub_epi16(acc_hi, _mm_unpackhi_epi8(left, zeros));
    acc_hi = _mm_sub_epi16(acc_hi, _mm_unpackhi_epi8(right, zeros));
    acc_hi = _mm_sub_epi16(acc_hi, _mm_unpackhi_epi8(top, zeros));
    acc_hi = _mm_sub_epi16(acc_hi, _mm_unpackhi_epi8(bottom, zeros));

    // Unsigned saturation is exactly clamping into [0, 255]
    _mm_packus_epi16(acc_lo, acc_hi)
}

#[target_feature(enable = "sse4.1")]
unsafe fn laplace_row_sse_impl(src: &[u8], dst: &mut [u8], row_bytes: usize) {
    let top = src.as_ptr();
    let current = top.add(row_bytes);
    let bottom = current.add(row_bytes);
    let dst_ptr = dst.as_mut_ptr();

    let end = row_bytes.saturating_sub(RGB_CHANNELS);
    let mut cx = RGB_CHANNELS;

    while cx + 16 <= end {
        let center = _mm_loadu_si128(current.add(cx) as *const __m128i);
        let left = _mm_loadu_si128(current.add(cx - RGB_CHANNELS) as *const __m128i);
        let right = _mm_loadu_si128(current.add(cx + RGB_CHANNELS) as *const __m128i);
        let upper = _mm_loadu_si128(top.add(cx) as *const __m128i);
        let lower = _mm_loadu_si128(bottom.add(cx) as *const __m128i);

        let v = laplace_sse_16(center, left, right, upper, lower);
        _mm_storeu_si128(dst_ptr.add(cx) as *mut __m128i, v);

        cx += 16;
    }

    laplace_row_native_from(src, dst, row_bytes, cx);
}
