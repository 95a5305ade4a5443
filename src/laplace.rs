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
use crate::convolution::Backend;
use crate::dispatch_group_u8::convolve_partitions_dispatch_u8;
use crate::image_store::ImageStore;
use crate::packing::{PackedBuffer, pack, unpack};
use crate::partition::plan_partitions;
use crate::pic_laplace_error::PicLaplaceError;
use crate::threading_policy::ThreadCount;
use log::debug;

/// Stages a single filter invocation walks through, always in this order
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum EngineStage {
    Idle,
    Packing,
    Planning,
    Dispatching,
    Collecting,
    Unpacking,
    Done,
}

#[inline]
fn enter(stage: EngineStage) {
    debug!("Laplace filter stage: {stage:?}");
}

/// Applies 3x3 Laplace edge detection to `src`.
///
/// Interior rows are split between `thread_count` workers which must be one of
/// 1, 2, 4, 8, 16, 32 or 64. The first and the last row, as well as the first and
/// the last pixel of every row, are zero in the result. `src` is never modified,
/// the result has the same width, height and stride.
pub fn apply_laplace(
    src: &ImageStore,
    thread_count: usize,
    backend: Backend,
) -> Result<ImageStore<'static>, PicLaplaceError> {
    enter(EngineStage::Idle);
    let threads = ThreadCount::try_from(thread_count)?;
    if src.size().is_empty() {
        return Err(PicLaplaceError::ZeroImageDimensions);
    }
    src.check_buffer()?;
    if src.width < 3 {
        return Err(PicLaplaceError::InvalidRegion(src.width, 0));
    }

    enter(EngineStage::Packing);
    let packed = pack(src)?;

    enter(EngineStage::Planning);
    let partitions = plan_partitions(src.width, src.height, threads.count());
    debug!(
        "Split {}x{} image into {} partitions, rows per worker {:?}",
        src.width,
        src.height,
        partitions.len(),
        partitions.iter().map(|x| x.rows(src.width)).collect::<Vec<_>>()
    );

    // Border rows are never convolved and stay zeroed
    let mut convolved = PackedBuffer::zeroed(src.width, src.height)?;
    let pool = threads.get_pool()?;

    enter(EngineStage::Dispatching);
    let dispatched = convolve_partitions_dispatch_u8(
        &packed.data,
        &mut convolved.data,
        src.width,
        &partitions,
        backend,
        &pool,
    );

    enter(EngineStage::Collecting);
    dispatched?;

    enter(EngineStage::Unpacking);
    let result = unpack(&convolved, src.width, src.height, src.stride())?;

    enter(EngineStage::Done);
    Ok(result)
}

/// Reusable filter configuration
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LaplaceFilter {
    pub(crate) backend: Backend,
    pub(crate) thread_count: ThreadCount,
}

impl LaplaceFilter {
    /// Creates filter running on a single thread
    pub fn new(backend: Backend) -> Self {
        LaplaceFilter {
            backend,
            thread_count: ThreadCount::One,
        }
    }

    pub fn set_backend(&mut self, backend: Backend) {
        self.backend = backend;
    }

    pub fn set_thread_count(&mut self, thread_count: ThreadCount) {
        self.thread_count = thread_count;
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn thread_count(&self) -> ThreadCount {
        self.thread_count
    }

    pub fn apply(&self, src: &ImageStore) -> Result<ImageStore<'static>, PicLaplaceError> {
        apply_laplace(src, self.thread_count.count(), self.backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKENDS: [Backend; 2] = [Backend::Accelerated, Backend::Native];

    fn noise_image(width: usize, height: usize, stride: usize, mut seed: u32) -> Vec<u8> {
        let mut data = vec![0u8; stride * height];
        for row in data.chunks_exact_mut(stride) {
            for px in row[..width * 3].iter_mut() {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                *px = (seed >> 24) as u8;
            }
        }
        data
    }

    /// Straightforward single threaded reference over the padded image
    fn reference(data: &[u8], width: usize, height: usize, stride: usize) -> Vec<u8> {
        let mut dst = vec![0u8; stride * height];
        for y in 1..height.saturating_sub(1) {
            for i in 3..(width * 3).saturating_sub(3) {
                let at = |yy: usize, ii: usize| data[yy * stride + ii] as i32;
                let v = 4 * at(y, i) - at(y, i - 3) - at(y, i + 3) - at(y - 1, i) - at(y + 1, i);
                dst[y * stride + i] = v.clamp(0, 255) as u8;
            }
        }
        dst
    }

    #[test]
    fn flat_field_is_zero() {
        let data = vec![0u8; 6 * 6 * 3];
        let store = ImageStore::from_slice(&data, 6, 6, 18).unwrap();
        let result = apply_laplace(&store, 2, Backend::Accelerated).unwrap();
        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);
        assert_eq!(result.stride(), 18);
        assert!(result.as_bytes().iter().all(|&x| x == 0));
    }

    #[test]
    fn unsupported_thread_count_is_rejected() {
        let data = vec![0u8; 6 * 6 * 3];
        let store = ImageStore::from_slice(&data, 6, 6, 18).unwrap();
        let result = apply_laplace(&store, 5, Backend::Native);
        assert!(matches!(result, Err(PicLaplaceError::InvalidThreadCount(5))));
    }

    #[test]
    fn empty_image_is_rejected() {
        let data: Vec<u8> = vec![];
        let store = ImageStore::from_slice(&data, 0, 4, 0).unwrap();
        assert!(matches!(
            apply_laplace(&store, 1, Backend::Native),
            Err(PicLaplaceError::ZeroImageDimensions)
        ));
        let store = ImageStore::from_slice(&data, 4, 0, 12).unwrap();
        assert!(matches!(
            apply_laplace(&store, 1, Backend::Native),
            Err(PicLaplaceError::ZeroImageDimensions)
        ));
    }

    #[test]
    fn narrow_stride_is_rejected() {
        let data = vec![0u8; 10 * 4];
        let store = ImageStore::from_slice(&data, 4, 4, 10).unwrap();
        assert!(matches!(
            apply_laplace(&store, 1, Backend::Native),
            Err(PicLaplaceError::InvalidFormat(12, 10))
        ));
    }

    #[test]
    fn narrow_image_is_rejected() {
        let data = vec![0u8; 8 * 6];
        let store = ImageStore::from_slice(&data, 2, 6, 8).unwrap();
        assert!(matches!(
            apply_laplace(&store, 1, Backend::Native),
            Err(PicLaplaceError::InvalidRegion(2, 0))
        ));
    }

    #[test]
    fn oversized_width_is_rejected() {
        let data = [0u8; 15];
        let store = ImageStore::from_slice(&data, usize::MAX / 3 + 2, 3, 5).unwrap();
        for backend in BACKENDS {
            assert!(matches!(
                apply_laplace(&store, 1, backend),
                Err(PicLaplaceError::InvalidFormat(usize::MAX, 5))
            ));
        }
    }

    #[test]
    fn matches_reference_for_all_thread_counts() {
        for (width, height, stride) in [
            (3usize, 3usize, 12usize),
            (7, 10, 24),
            (33, 19, 100),
            (64, 70, 192),
        ] {
            let data = noise_image(width, height, stride, 0x1234_5678 ^ (width * height) as u32);
            let expected = reference(&data, width, height, stride);
            let store = ImageStore::from_slice(&data, width, height, stride).unwrap();
            for threads in ThreadCount::ALL {
                for backend in BACKENDS {
                    let result = apply_laplace(&store, threads.count(), backend).unwrap();
                    assert_eq!(
                        result.as_bytes(),
                        expected.as_slice(),
                        "Mismatch for {width}x{height} stride {stride}, {threads:?}, {backend:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn border_rows_and_columns_are_zero() {
        let (width, height, stride) = (20usize, 12usize, 60usize);
        let data = noise_image(width, height, stride, 0xABCD_0123);
        let store = ImageStore::from_slice(&data, width, height, stride).unwrap();
        for backend in BACKENDS {
            let result = apply_laplace(&store, 4, backend).unwrap();
            assert!(result.row(0).iter().all(|&x| x == 0));
            assert!(result.row(height - 1).iter().all(|&x| x == 0));
            for y in 0..height {
                let row = result.row(y);
                assert_eq!(&row[..3], &[0, 0, 0]);
                assert_eq!(&row[row.len() - 3..], &[0, 0, 0]);
            }
            assert!(result.row(1)[3..57].iter().any(|&x| x != 0));
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let (width, height, stride) = (57usize, 41usize, 172usize);
        let data = noise_image(width, height, stride, 0xC0FF_EE11);
        let store = ImageStore::from_slice(&data, width, height, stride).unwrap();
        let first = apply_laplace(&store, 64, Backend::Accelerated).unwrap();
        for _ in 0..8 {
            let again = apply_laplace(&store, 64, Backend::Accelerated).unwrap();
            assert_eq!(first.as_bytes(), again.as_bytes());
        }
        let native = apply_laplace(&store, 8, Backend::Native).unwrap();
        assert_eq!(first.as_bytes(), native.as_bytes());
    }

    #[test]
    fn source_is_not_modified() {
        let (width, height) = (9usize, 9usize);
        let data = noise_image(width, height, width * 3, 77);
        let copy = data.clone();
        let store = ImageStore::from_slice(&data, width, height, width * 3).unwrap();
        let _ = apply_laplace(&store, 4, Backend::Native).unwrap();
        assert_eq!(store.as_bytes(), copy.as_slice());
    }

    #[test]
    fn short_images_are_all_zero() {
        for height in [1usize, 2] {
            let data = vec![90u8; 5 * 3 * height];
            let store = ImageStore::from_slice(&data, 5, height, 15).unwrap();
            let result = apply_laplace(&store, 16, Backend::Native).unwrap();
            assert!(result.as_bytes().iter().all(|&x| x == 0));
        }
    }

    #[test]
    fn filter_uses_its_configuration() {
        let data = noise_image(16, 16, 48, 5);
        let store = ImageStore::from_slice(&data, 16, 16, 48).unwrap();
        let mut filter = LaplaceFilter::new(Backend::Native);
        filter.set_thread_count(ThreadCount::Eight);
        assert_eq!(filter.thread_count(), ThreadCount::Eight);
        let native = filter.apply(&store).unwrap();
        filter.set_backend(Backend::Accelerated);
        let accelerated = filter.apply(&store).unwrap();
        assert_eq!(native.as_bytes(), accelerated.as_bytes());
        assert_eq!(native.as_bytes(), reference(&data, 16, 16, 48).as_slice());
    }
}
