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
use std::error::Error;
use std::fmt::Display;

/// Buffer mismatch error description
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PicLaplaceBufferMismatch {
    pub expected: usize,
    pub width: usize,
    pub height: usize,
    pub stride: usize,
    pub slice_len: usize,
}

/// Error enumeration type
#[derive(Debug)]
pub enum PicLaplaceError {
    /// Stride is smaller than packed row width, `(min_stride, stride)`
    InvalidFormat(usize, usize),
    ZeroImageDimensions,
    BufferMismatch(PicLaplaceBufferMismatch),
    InvalidThreadCount(usize),
    /// Worker region cannot be convolved, `(width, region_len)`
    InvalidRegion(usize, usize),
    BackendFailure {
        partition: usize,
        backend: Backend,
        cause: Box<PicLaplaceError>,
    },
    ThreadPoolUnavailable(String),
    OutOfMemory(usize),
}

impl PicLaplaceError {
    /// Returns error as int code
    #[inline]
    pub fn code(&self) -> usize {
        match self {
            PicLaplaceError::InvalidFormat(_, _) => 1,
            PicLaplaceError::ZeroImageDimensions => 2,
            PicLaplaceError::BufferMismatch(_) => 3,
            PicLaplaceError::InvalidThreadCount(_) => 4,
            PicLaplaceError::InvalidRegion(_, _) => 5,
            PicLaplaceError::BackendFailure { .. } => 6,
            PicLaplaceError::ThreadPoolUnavailable(_) => 7,
            PicLaplaceError::OutOfMemory(_) => 8,
        }
    }

    /// Whether the error describes an unusable input image
    #[inline]
    pub fn is_invalid_image(&self) -> bool {
        matches!(
            self,
            PicLaplaceError::ZeroImageDimensions | PicLaplaceError::BufferMismatch(_)
        )
    }
}

impl Display for PicLaplaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PicLaplaceError::InvalidFormat(min_stride, real_stride) => f.write_fmt(format_args!(
                "Stride must be at least {min_stride}, but received {real_stride}",
            )),
            PicLaplaceError::ZeroImageDimensions => {
                f.write_str("One of image dimensions is 0, this should not happen")
            }
            PicLaplaceError::BufferMismatch(buffer_mismatch) => f.write_fmt(format_args!(
                "Image buffer len expected to be {} [stride({})*h({}), w({})] but received {}",
                buffer_mismatch.expected,
                buffer_mismatch.stride,
                buffer_mismatch.height,
                buffer_mismatch.width,
                buffer_mismatch.slice_len,
            )),
            PicLaplaceError::InvalidThreadCount(count) => f.write_fmt(format_args!(
                "Thread count must be one of 1, 2, 4, 8, 16, 32, 64 but got {count}"
            )),
            PicLaplaceError::InvalidRegion(width, region_len) => f.write_fmt(format_args!(
                "Region of {region_len} bytes cannot be convolved, width {width} row is {} bytes",
                width.saturating_mul(3)
            )),
            PicLaplaceError::BackendFailure {
                partition,
                backend,
                cause,
            } => f.write_fmt(format_args!(
                "{backend:?} backend failed on partition {partition}: {cause}"
            )),
            PicLaplaceError::ThreadPoolUnavailable(reason) => {
                f.write_fmt(format_args!("Worker pool cannot be created: {reason}"))
            }
            PicLaplaceError::OutOfMemory(capacity) => f.write_fmt(format_args!(
                "There is no enough memory to allocate {capacity} bytes"
            )),
        }
    }
}

impl Error for PicLaplaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PicLaplaceError::BackendFailure { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

macro_rules! try_vec {
    () => {
        Vec::new()
    };
    ($elem:expr; $n:expr) => {{
        let mut v = Vec::new();
        v.try_reserve_exact($n)
            .map_err(|_| crate::pic_laplace_error::PicLaplaceError::OutOfMemory($n))?;
        v.resize($n, $elem);
        v
    }};
}

pub(crate) use try_vec;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_failure_exposes_cause() {
        let error = PicLaplaceError::BackendFailure {
            partition: 3,
            backend: Backend::Native,
            cause: Box::new(PicLaplaceError::InvalidRegion(2, 12)),
        };
        assert_eq!(error.code(), 6);
        let source = error.source().map(|x| x.to_string());
        assert_eq!(
            source,
            Some(PicLaplaceError::InvalidRegion(2, 12).to_string())
        );
        assert!(error.to_string().contains("partition 3"));
    }

    #[test]
    fn invalid_image_kinds() {
        assert!(PicLaplaceError::ZeroImageDimensions.is_invalid_image());
        assert!(!PicLaplaceError::InvalidThreadCount(5).is_invalid_image());
    }
}
