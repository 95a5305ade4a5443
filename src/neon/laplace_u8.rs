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
use std::arch::aarch64::*;

use crate::image_size::RGB_CHANNELS;
use crate::laplace_native::laplace_row_native_from;

#[inline(always)]
unsafe fn laplace_neon_8(
    center: uint8x8_t,
    left: uint8x8_t,
    right: uint8x8_t,
    top: uint8x8_t,
    bottom: uint8x8_t,
) -> uint8x8_t {
    let mut acc = vshlq_n_s16::<2>(vreinterpretq_s16_u16(vmovl_u8(center)));
    acc = vsubq_s16(acc, vreinterpretq_s16_u16(vmovl_u8(left)));
    acc = vsubq_s16(acc, vreinterpretq_s16_u16(vmovl_u8(right)));
    acc = vsubq_s16(acc, vreinterpretq_s16_u16(vmovl_u8(top)));
    acc = vsubq_s16(acc, vreinterpretq_s16_u16(vmovl_u8(bottom)));
    vqmovun_s16(acc)
}

pub(crate) fn laplace_row_neon(src: &[u8], dst: &mut [u8], row_bytes: usize) {
    assert!(src.len() >= row_bytes * 3 && dst.len() >= row_bytes);
    unsafe {
        let top = src.as_ptr();
        let current = top.add(row_bytes);
        let bottom = current.add(row_bytes);
        let dst_ptr = dst.as_mut_ptr();

        let end = row_bytes.saturating_sub(RGB_CHANNELS);
        let mut cx = RGB_CHANNELS;

        while cx + 16 <= end {
            let center = vld1q_u8(current.add(cx));
            let left = vld1q_u8(current.add(cx - RGB_CHANNELS));
            let right = vld1q_u8(current.add(cx + RGB_CHANNELS));
            let upper = vld1q_u8(top.add(cx));
            let lower = vld1q_u8(bottom.add(cx));

            let lo = laplace_neon_8(
                vget_low_u8(center),
                vget_low_u8(left),
                vget_low_u8(right),
                vget_low_u8(upper),
                vget_low_u8(lower),
            );
            let hi = laplace_neon_8(
                vget_high_u8(center),
                vget_high_u8(left),
                vget_high_u8(right),
                vget_high_u8(upper),
                vget_high_u8(lower),
            );
            vst1q_u8(dst_ptr.add(cx), vcombine_u8(lo, hi));

            cx += 16;
        }

        laplace_row_native_from(src, dst, row_bytes, cx);
    }
}
