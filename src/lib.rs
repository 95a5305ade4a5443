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
#![deny(deprecated)]

#[cfg(all(target_arch = "x86_64", feature = "avx"))]
mod avx2;
mod convolution;
mod dispatch_group_u8;
mod image_size;
mod image_store;
mod laplace;
mod laplace_accelerated;
mod laplace_native;
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;
mod packing;
mod partition;
mod pic_laplace_error;
mod saturate_narrow;
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
mod sse;
mod threading_policy;

pub use convolution::{Backend, ConvolutionBackend};
pub use image_size::{ImageSize, RGB_CHANNELS};
pub use image_store::{BufferStore, ImageStore};
pub use laplace::{EngineStage, LaplaceFilter, apply_laplace};
pub use laplace_accelerated::AcceleratedBackend;
pub use laplace_native::NativeBackend;
pub use partition::{Partition, plan_partitions};
pub use pic_laplace_error::{PicLaplaceBufferMismatch, PicLaplaceError};
pub use threading_policy::ThreadCount;
