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
use crate::image_size::{ImageSize, RGB_CHANNELS};
use crate::image_store::ImageStore;
use crate::pic_laplace_error::{PicLaplaceError, try_vec};

/// Image rows laid out back to back, `width * 3` bytes each
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PackedBuffer {
    pub(crate) data: Vec<u8>,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

impl PackedBuffer {
    /// Zero filled buffer, every byte not written later stays neutral
    pub(crate) fn zeroed(width: usize, height: usize) -> Result<PackedBuffer, PicLaplaceError> {
        let data = try_vec![0u8; ImageSize::new(width, height).packed_len()];
        Ok(PackedBuffer {
            data,
            width,
            height,
        })
    }
}

#[inline]
fn check_stride(width: usize, stride: usize) -> Result<usize, PicLaplaceError> {
    let row_bytes = width
        .checked_mul(RGB_CHANNELS)
        .ok_or(PicLaplaceError::InvalidFormat(usize::MAX, stride))?;
    if stride < row_bytes {
        return Err(PicLaplaceError::InvalidFormat(row_bytes, stride));
    }
    Ok(row_bytes)
}

/// Drops per row padding of `image`
pub(crate) fn pack(image: &ImageStore) -> Result<PackedBuffer, PicLaplaceError> {
    let row_bytes = check_stride(image.width, image.stride())?;
    image.check_buffer()?;
    let mut packed = PackedBuffer::zeroed(image.width, image.height)?;
    if row_bytes == 0 {
        return Ok(packed);
    }
    for (dst, src) in packed
        .data
        .chunks_exact_mut(row_bytes)
        .zip(image.as_bytes().chunks(image.stride()))
    {
        dst.copy_from_slice(&src[..row_bytes]);
    }
    Ok(packed)
}

/// Spreads packed rows over a new `stride` aligned image, padding stays zeroed
pub(crate) fn unpack(
    packed: &PackedBuffer,
    width: usize,
    height: usize,
    stride: usize,
) -> Result<ImageStore<'static>, PicLaplaceError> {
    let row_bytes = check_stride(width, stride)?;
    let expected = ImageSize::new(width, height).packed_len();
    if packed.width != width || packed.height != height || packed.data.len() != expected {
        return Err(PicLaplaceError::InvalidRegion(width, packed.data.len()));
    }
    let mut buffer = try_vec![0u8; stride.saturating_mul(height)];
    if row_bytes != 0 {
        for (dst, src) in buffer
            .chunks_exact_mut(stride)
            .zip(packed.data.chunks_exact(row_bytes))
        {
            dst[..row_bytes].copy_from_slice(src);
        }
    }
    ImageStore::new(buffer, width, height, stride)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded_image(width: usize, height: usize, stride: usize) -> Vec<u8> {
        let mut data = vec![0u8; stride * height];
        for (y, row) in data.chunks_exact_mut(stride).enumerate() {
            for (x, px) in row.iter_mut().enumerate() {
                *px = if x < width * 3 {
                    (y * 31 + x * 7) as u8
                } else {
                    0xAB
                };
            }
        }
        data
    }

    #[test]
    fn pack_discards_padding() {
        let data = padded_image(3, 4, 12);
        let store = ImageStore::from_slice(&data, 3, 4, 12).unwrap();
        let packed = pack(&store).unwrap();
        assert_eq!(packed.data.len(), 3 * 3 * 4);
        assert!(packed.data.iter().all(|&x| x != 0xAB));
        for y in 0..4 {
            assert_eq!(&packed.data[y * 9..(y + 1) * 9], store.row(y));
        }
    }

    #[test]
    fn pack_unpack_restores_pixels() {
        for (width, height, stride) in [(1, 1, 4), (3, 5, 9), (5, 3, 16), (7, 7, 24)] {
            let data = padded_image(width, height, stride);
            let store = ImageStore::from_slice(&data, width, height, stride).unwrap();
            let packed = pack(&store).unwrap();
            let restored = unpack(&packed, width, height, stride).unwrap();
            assert_eq!(restored.stride(), stride);
            for y in 0..height {
                assert_eq!(restored.row(y), store.row(y));
                let padding = &restored.as_bytes()[y * stride + width * 3..(y + 1) * stride];
                assert!(padding.iter().all(|&x| x == 0));
            }
        }
    }

    #[test]
    fn pack_rejects_narrow_stride() {
        let data = vec![0u8; 8 * 2];
        let store = ImageStore::from_slice(&data, 3, 2, 8).unwrap();
        match pack(&store) {
            Err(PicLaplaceError::InvalidFormat(min_stride, stride)) => {
                assert_eq!(min_stride, 9);
                assert_eq!(stride, 8);
            }
            other => panic!("Unexpected result {other:?}"),
        }
    }

    #[test]
    fn pack_rejects_overflowing_row_width() {
        let data = vec![0u8; 8];
        let store = ImageStore::from_slice(&data, usize::MAX / 2, 1, 8).unwrap();
        assert!(matches!(
            pack(&store),
            Err(PicLaplaceError::InvalidFormat(usize::MAX, 8))
        ));
    }

    #[test]
    fn unpack_rejects_narrow_stride() {
        let packed = PackedBuffer::zeroed(4, 2).unwrap();
        assert!(matches!(
            unpack(&packed, 4, 2, 11),
            Err(PicLaplaceError::InvalidFormat(12, 11))
        ));
    }
}
