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
use crate::convolution::{Backend, ConvolutionBackend};
use crate::image_size::RGB_CHANNELS;
use crate::partition::Partition;
use crate::pic_laplace_error::PicLaplaceError;
use rayon::ThreadPool;
use rayon::prelude::*;

struct PartitionJob<'a> {
    index: usize,
    partition: Partition,
    destination: &'a mut [u8],
}

/// Carves disjoint mutable regions out of `destination`, one per partition
fn split_partitions<'a>(
    destination: &'a mut [u8],
    partitions: &[Partition],
) -> Vec<PartitionJob<'a>> {
    let mut jobs = Vec::with_capacity(partitions.len());
    let mut rest = destination;
    let mut cursor = 0usize;
    for (index, partition) in partitions.iter().enumerate() {
        let (_, tail) = std::mem::take(&mut rest).split_at_mut(partition.offset - cursor);
        let (region, tail) = tail.split_at_mut(partition.length);
        rest = tail;
        cursor = partition.end();
        jobs.push(PartitionJob {
            index,
            partition: *partition,
            destination: region,
        });
    }
    jobs
}

/// Convolves every partition on `pool` and waits for all of them.
///
/// Partitions must be ordered and disjoint. Reads may cross partition bounds
/// since `source` is shared, writes never do.
pub(crate) fn convolve_partitions_dispatch_u8(
    source: &[u8],
    destination: &mut [u8],
    width: usize,
    partitions: &[Partition],
    backend: Backend,
    pool: &Option<ThreadPool>,
) -> Result<(), PicLaplaceError> {
    let row_bytes = width * RGB_CHANNELS;
    let handler: &dyn ConvolutionBackend = backend.handler();
    let jobs = split_partitions(destination, partitions);

    let run = |job: PartitionJob| -> Result<(), PicLaplaceError> {
        if job.partition.is_empty() {
            return Ok(());
        }
        log::trace!(
            "Partition {} convolves bytes {}..{}",
            job.index,
            job.partition.offset,
            job.partition.end()
        );
        let window = &source[job.partition.offset - row_bytes..job.partition.end() + row_bytes];
        handler
            .compute(window, job.destination, width)
            .map_err(|cause| PicLaplaceError::BackendFailure {
                partition: job.index,
                backend,
                cause: Box::new(cause),
            })
    };

    let results: Vec<Result<(), PicLaplaceError>> = match pool {
        Some(pool) => pool.install(|| jobs.into_par_iter().map(run).collect()),
        None => jobs.into_iter().map(run).collect(),
    };

    // Lowest failing partition wins, independent of scheduling
    if let Some(failure) = results.into_iter().find_map(|x| x.err()) {
        log::warn!("{failure}");
        return Err(failure);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::plan_partitions;

    #[test]
    fn regions_follow_partitions() {
        let partitions = [
            Partition {
                offset: 4,
                length: 8,
            },
            Partition {
                offset: 12,
                length: 0,
            },
            Partition {
                offset: 12,
                length: 4,
            },
        ];
        let mut destination = vec![0u8; 20];
        let jobs = split_partitions(&mut destination, &partitions);
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].destination.len(), 8);
        assert!(jobs[1].destination.is_empty());
        assert_eq!(jobs[2].destination.len(), 4);
        for job in jobs {
            job.destination.fill(job.index as u8 + 1);
        }
        assert_eq!(
            destination,
            vec![0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 3, 3, 3, 3, 0, 0, 0, 0]
        );
    }

    #[test]
    fn failing_partition_is_reported() {
        let width = 2usize;
        let source = vec![0u8; width * 3 * 6];
        let mut destination = vec![0u8; source.len()];
        let partitions = plan_partitions(width, 6, 2);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .build()
            .map(Some)
            .unwrap();
        let result = convolve_partitions_dispatch_u8(
            &source,
            &mut destination,
            width,
            &partitions,
            Backend::Native,
            &pool,
        );
        match result {
            Err(PicLaplaceError::BackendFailure {
                partition,
                backend,
                cause,
            }) => {
                assert_eq!(partition, 0);
                assert_eq!(backend, Backend::Native);
                assert!(matches!(*cause, PicLaplaceError::InvalidRegion(2, 12)));
            }
            other => panic!("Unexpected result {other:?}"),
        }
    }
}
