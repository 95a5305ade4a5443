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
use crate::image_size::RGB_CHANNELS;

/// Contiguous byte range of the packed buffer owned by one worker
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    /// Offset into the packed buffer
    pub offset: usize,
    /// Bytes owned by the worker, always whole rows
    pub length: usize,
}

impl Partition {
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of rows in the partition for a given image width
    #[inline]
    pub fn rows(&self, width: usize) -> usize {
        let row_bytes = width.saturating_mul(RGB_CHANNELS);
        if row_bytes == 0 {
            return 0;
        }
        self.length / row_bytes
    }
}

/// Splits interior rows `1..height - 1` of a packed image between `workers`.
///
/// Every worker receives `(height - 2) / workers` rows, the last one also takes
/// the remainder. Workers that have nothing to do get an empty partition, so
/// exactly `workers` partitions are always returned.
pub fn plan_partitions(width: usize, height: usize, workers: usize) -> Vec<Partition> {
    let workers = workers.max(1);
    let row_bytes = width.saturating_mul(RGB_CHANNELS);
    let interior_rows = height.saturating_sub(2);
    let rows_per_worker = interior_rows / workers;
    let remainder_rows = interior_rows % workers;

    (0..workers)
        .map(|i| {
            let rows = if i == workers - 1 {
                rows_per_worker + remainder_rows
            } else {
                rows_per_worker
            };
            Partition {
                offset: row_bytes + i * rows_per_worker * row_bytes,
                length: rows * row_bytes,
            }
        })
        .collect()
}
