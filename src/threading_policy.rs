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
use crate::pic_laplace_error::PicLaplaceError;
use rayon::ThreadPool;

/// Number of workers the filter splits an image between
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum ThreadCount {
    #[default]
    One,
    Two,
    Four,
    Eight,
    Sixteen,
    ThirtyTwo,
    SixtyFour,
}

impl ThreadCount {
    pub const ALL: [ThreadCount; 7] = [
        ThreadCount::One,
        ThreadCount::Two,
        ThreadCount::Four,
        ThreadCount::Eight,
        ThreadCount::Sixteen,
        ThreadCount::ThirtyTwo,
        ThreadCount::SixtyFour,
    ];

    #[inline]
    pub const fn count(&self) -> usize {
        match self {
            ThreadCount::One => 1,
            ThreadCount::Two => 2,
            ThreadCount::Four => 4,
            ThreadCount::Eight => 8,
            ThreadCount::Sixteen => 16,
            ThreadCount::ThirtyTwo => 32,
            ThreadCount::SixtyFour => 64,
        }
    }

    /// Snaps arbitrary request to the closest supported count, ties go to the lower one
    pub fn nearest(requested: usize) -> ThreadCount {
        let mut best = ThreadCount::One;
        for candidate in ThreadCount::ALL {
            if candidate.count().abs_diff(requested) < best.count().abs_diff(requested) {
                best = candidate;
            }
        }
        best
    }

    /// Worker pool sized to the count, `None` when work runs on the calling thread
    pub fn get_pool(&self) -> Result<Option<ThreadPool>, PicLaplaceError> {
        if *self == ThreadCount::One {
            return Ok(None);
        }
        let shared_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.count())
            .build()
            .map_err(|e| PicLaplaceError::ThreadPoolUnavailable(e.to_string()))?;
        Ok(Some(shared_pool))
    }
}

impl TryFrom<usize> for ThreadCount {
    type Error = PicLaplaceError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        ThreadCount::ALL
            .into_iter()
            .find(|x| x.count() == value)
            .ok_or(PicLaplaceError::InvalidThreadCount(value))
    }
}
