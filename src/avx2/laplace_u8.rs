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

pub(crate) fn laplace_row_avx2(src: &[u8], dst: &mut [u8], row_bytes: usize) {
    assert!(src.len() >= row_bytes * 3 && dst.len() >= row_bytes);
    unsafe { laplace_row_avx2_impl(src, dst, row_bytes) }
}

#[inline(always)]
unsafe fn widen_lo(v: __m256i) -> __m256i {
    _mm256_cvtepu8_epi16(_mm256_castsi256_si128(v))
}

#[inline(always)]
unsafe fn widen_hi(v: __m256i) -> __m256i {
    _mm256_cvtepu8_epi16(_mm256_extracti128_si256::<1>(v))
}

#[inline(always)]
unsafe fn laplace_avx_32(
    center: __m256i,
    left: __m256i,
    right: __m256i,
    top: __m256i,
    bottom: __m256i,
) -> __m256i {
    let mut acc_lo = _mm256_slli_epi16::<2>(widen_lo(center));
    acc_lo = _mm256_sub_epi16(acc_lo, widen_lo(left));
    acc_lo = _mm256_sub_epi16(acc_lo, widen_lo(right));
    acc_lo = _mm256_sub_epi16(acc_lo, widen_lo(top));
    acc_lo = _mm256_sub_epi16(acc_lo, widen_lo(bottom));

    let mut acc_hi = _mm256_slli_epi16::<2>(widen_hi(center));
    acc_hi = _mm256_sub_epi16(acc_hi, widen_hi(left));
    acc_hi = _mm256_sub_epi16(acc_hi, widen_hi(right));
    acc_hi = _mm256_sub_epi16(acc_hi, widen_hi(top));
    acc_hi = _mm256_sub_epi16(acc_hi, widen_hi(bottom));

    // packus works per 128-bit lane, restore order afterwards
    let packed = _mm256_packus_epi16(acc_lo, acc_hi);
    _mm256_permute4x64_epi64::<0xD8>(packed)
}

#[target_feature(enable = "avx2")]
unsafe fn laplace_row_avx2_impl(src: &[u8], dst: &mut [u8], row_bytes: usize) {
    let top = src.as_ptr();
    let current = top.add(row_bytes);
    let bottom = current.add(row_bytes);
    let dst_ptr = dst.as_mut_ptr();

    let end = row_bytes.saturating_sub(RGB_CHANNELS);
    let mut cx = RGB_CHANNELS;

    while cx + 32 <= end {
        let center = _mm256_loadu_si256(current.add(cx) as *const __m256i);
        let left = _mm256_loadu_si256(current.add(cx - RGB_CHANNELS) as *const __m256i);
        let right = _mm256_loadu_si256(current.add(cx + RGB_CHANNELS) as *const __m256i);
        let upper = _mm256_loadu_si256(top.add(cx) as *const __m256i);
        let lower = _mm256_loadu_si256(bottom.add(cx) as *const __m256i);

        let v = laplace_avx_32(center, left, right, upper, lower);
        _mm256_storeu_si256(dst_ptr.add(cx) as *mut __m256i, v);

        cx += 32;
    }

    laplace_row_native_from(src, dst, row_bytes, cx);
}
