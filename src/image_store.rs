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
use crate::pic_laplace_error::{PicLaplaceBufferMismatch, PicLaplaceError};

/// Holds a 3 bytes per pixel image which rows may be padded up to `stride`.
///
/// Channel order does not matter for the filter, every channel is convolved
/// independently.
#[derive(Debug)]
pub struct ImageStore<'a> {
    pub(crate) buffer: BufferStore<'a>,
    pub width: usize,
    pub height: usize,
    /// Bytes per row, may exceed `width * 3` when rows are aligned
    pub(crate) stride: usize,
}

#[derive(Debug)]
pub enum BufferStore<'a> {
    Borrowed(&'a [u8]),
    Owned(Vec<u8>),
}

impl BufferStore<'_> {
    pub fn borrow(&self) -> &[u8] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

fn check_buffer_len(
    slice_len: usize,
    width: usize,
    height: usize,
    stride: usize,
) -> Result<(), PicLaplaceError> {
    let expected = stride.saturating_mul(height);
    if slice_len != expected {
        return Err(PicLaplaceError::BufferMismatch(PicLaplaceBufferMismatch {
            expected,
            width,
            height,
            stride,
            slice_len,
        }));
    }
    Ok(())
}

impl ImageStore<'static> {
    /// Takes ownership of `buffer`, its length must be exactly `stride * height`
    pub fn new(
        buffer: Vec<u8>,
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<ImageStore<'static>, PicLaplaceError> {
        check_buffer_len(buffer.len(), width, height, stride)?;
        Ok(ImageStore {
            buffer: BufferStore::Owned(buffer),
            width,
            height,
            stride,
        })
    }
}

impl<'a> ImageStore<'a> {
    /// Borrows `slice`, its length must be exactly `stride * height`
    pub fn from_slice(
        slice: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<ImageStore<'a>, PicLaplaceError> {
        check_buffer_len(slice.len(), width, height, stride)?;
        Ok(ImageStore {
            buffer: BufferStore::Borrowed(slice),
            width,
            height,
            stride,
        })
    }

    #[inline]
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.borrow()
    }

    /// Returns visible pixels of row `y` without padding
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.as_bytes()[start..start + self.width.saturating_mul(RGB_CHANNELS)]
    }

    pub(crate) fn check_buffer(&self) -> Result<(), PicLaplaceError> {
        check_buffer_len(self.as_bytes().len(), self.width, self.height, self.stride)
    }
}
