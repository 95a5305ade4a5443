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
#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pic_laplace::{Backend, ImageStore, PicLaplaceError, ThreadCount, apply_laplace};

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcImage {
    pub width: u16,
    pub height: u16,
    pub padding: u8,
    pub threads: u8,
    pub seed: u32,
}

fuzz_target!(|data: SrcImage| {
    filter_rgb(
        data.width as usize,
        data.height as usize,
        data.padding as usize,
        data.threads as usize,
        data.seed,
    )
});

fn filter_rgb(width: usize, height: usize, padding: usize, threads: usize, mut seed: u32) {
    if width == 0 || width > 1024 || height == 0 || height > 1024 {
        return;
    }
    let stride = width * 3 + padding;
    let mut src_data = vec![0u8; stride * height];
    seed |= 1;
    for px in src_data.iter_mut() {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        *px = seed as u8;
    }

    let store = ImageStore::from_slice(&src_data, width, height, stride).unwrap();
    let threads = ThreadCount::nearest(threads).count();

    let accelerated = apply_laplace(&store, threads, Backend::Accelerated);
    let native = apply_laplace(&store, threads, Backend::Native);
    match (accelerated, native) {
        (Ok(accelerated), Ok(native)) => {
            assert_eq!(accelerated.as_bytes(), native.as_bytes());
            assert!(accelerated.row(0).iter().all(|&x| x == 0));
            assert!(accelerated.row(height - 1).iter().all(|&x| x == 0));
        }
        (Err(PicLaplaceError::InvalidRegion(_, _)), Err(PicLaplaceError::InvalidRegion(_, _))) => {
            assert!(width < 3);
        }
        (accelerated, native) => panic!("Backends disagree: {accelerated:?} vs {native:?}"),
    }
}
