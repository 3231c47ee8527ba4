// Copyright 2015-2020 Aerospike, Inc.
//
// Portions may be licensed to Aerospike, Inc. under one or more contributor
// license agreements.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License. You may obtain a copy of
// the License at http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
// License for the specific language governing permissions and limitations under
// the License.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::thread;

use crossbeam_queue::SegQueue;
use rand::Rng;

use crate::errors::Result;

/// Virtual collection of records retrieved through a scan. During a scan, multiple tasks will
/// retrieve records from the server nodes and put these records on an internal queue managed by
/// the recordset. The single consumer reads these records from the queue.
///
/// The record type is supplied by the caller; the transport layer that deserializes records is
/// outside this crate.
#[derive(Debug)]
pub struct Recordset<T> {
    instances: AtomicUsize,
    record_queue_count: AtomicUsize,
    record_queue_size: AtomicUsize,
    record_queue: SegQueue<Result<T>>,
    active: AtomicBool,
    task_id: AtomicUsize,
    stream_count: AtomicUsize,
}

/// A stream over incoming records for a [`Recordset`] that can be iterated over either
/// synchronously or asynchronously.
pub struct RecordStream<T>(Arc<Recordset<T>>);

impl<T> Drop for Recordset<T> {
    fn drop(&mut self) {
        // close the recordset to finish all the node scans still sending data
        self.close();
    }
}

impl<T> Recordset<T> {
    pub(crate) fn new(rec_queue_size: usize, nodes: usize) -> Self {
        let mut rng = rand::thread_rng();
        let task_id = rng.gen::<usize>();

        Recordset {
            instances: AtomicUsize::new(nodes),
            record_queue_size: AtomicUsize::new(rec_queue_size),
            record_queue_count: AtomicUsize::new(0),
            record_queue: SegQueue::new(),
            active: AtomicBool::new(true),
            task_id: AtomicUsize::new(task_id),
            stream_count: AtomicUsize::new(0),
        }
    }

    /// Close the scan. Producers observe the closed state through [`Recordset::is_active`] and
    /// stop streaming; records already queued can still be consumed.
    pub fn close(&self) {
        self.active.store(false, Ordering::Relaxed);
    }

    /// Check whether the scan is still active.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Returns the task ID for the scan, shared by every per-node request.
    pub fn task_id(&self) -> u64 {
        self.task_id.load(Ordering::Relaxed) as u64
    }

    /// Push a record onto the queue, yielding to the executor while the queue is at capacity.
    /// Returns once the record was accepted, or dropped because the scan was closed.
    pub async fn busy_push(&self, mut record: Result<T>) {
        loop {
            let result = self.push(record);
            match result {
                None => break,
                Some(returned) => {
                    record = returned;
                    yield_now().await;
                }
            }
        }
    }

    /// Try to push a record onto the queue. Returns the record back when the queue is at
    /// capacity; returns `None` when the record was accepted, or silently dropped because the
    /// scan is no longer active. That allows node scans waiting on a full queue to observe
    /// cancellation and exit.
    pub fn push(&self, record: Result<T>) -> Option<Result<T>> {
        if !self.is_active() {
            return None;
        }

        if self.record_queue_count.fetch_add(1, Ordering::Relaxed)
            < self.record_queue_size.load(Ordering::Relaxed)
        {
            self.record_queue.push(record);
            return None;
        }
        self.record_queue_count.fetch_sub(1, Ordering::Relaxed);
        Some(record)
    }

    pub(crate) fn signal_end(&self) {
        if self.instances.fetch_sub(1, Ordering::Relaxed) == 1 {
            self.close();
        };
    }

    /// Converts a reference to a [`Recordset`] into a [`RecordStream`] that can be used to
    /// iterate over records. Only one stream can exist at a time. If one already exists, this
    /// method will return `None`.
    pub fn into_stream(self: Arc<Self>) -> Option<RecordStream<T>> {
        if self.stream_count.load(Ordering::Relaxed) > 0 {
            return None;
        }
        self.stream_count.fetch_add(1, Ordering::Relaxed);
        Some(RecordStream(self))
    }

    /// Notify the recordset that a stream is closing.
    fn close_stream(&self) {
        self.stream_count.fetch_sub(1, Ordering::Relaxed);
    }
}

impl<T> Iterator for RecordStream<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        loop {
            if self.0.is_active() || !self.0.record_queue.is_empty() {
                let result = self.0.record_queue.pop();
                if result.is_some() {
                    self.0.record_queue_count.fetch_sub(1, Ordering::Relaxed);
                    return result;
                }
                thread::yield_now();
                continue;
            }
            return None;
        }
    }
}

impl<T> futures::Stream for RecordStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.0.is_active() || !self.0.record_queue.is_empty() {
            if let Some(result) = self.0.record_queue.pop() {
                self.0.record_queue_count.fetch_sub(1, Ordering::Relaxed);
                return Poll::Ready(Some(result));
            }
            cx.waker().wake_by_ref();
            Poll::Pending
        } else {
            Poll::Ready(None)
        }
    }
}

impl<T> Drop for RecordStream<T> {
    fn drop(&mut self) {
        self.0.close_stream();
    }
}

async fn yield_now() {
    struct YieldNow {
        yielded: bool,
    }

    impl Future for YieldNow {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.yielded {
                Poll::Ready(())
            } else {
                self.yielded = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    YieldNow { yielded: false }.await
}

#[cfg(test)]
mod tests {
    use super::Recordset;
    use std::sync::Arc;

    #[test]
    fn queue_capacity() {
        let recordset = Recordset::new(2, 1);
        assert!(recordset.push(Ok(1)).is_none());
        assert!(recordset.push(Ok(2)).is_none());
        // full queue hands the record back
        assert!(recordset.push(Ok(3)).is_some());

        recordset.signal_end();
        assert!(!recordset.is_active());

        let records: Vec<_> = Arc::new(recordset).into_stream().unwrap().collect();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn closed_recordset_drops_records() {
        let recordset = Recordset::new(16, 1);
        recordset.close();
        // accepted but dropped, so a producer waiting on a full queue can exit
        assert!(recordset.push(Ok(1)).is_none());

        let records: Vec<_> = Arc::new(recordset).into_stream().unwrap().collect();
        assert!(records.is_empty());
    }

    #[test]
    fn ends_when_last_node_signals() {
        let recordset = Recordset::<i64>::new(16, 2);
        recordset.signal_end();
        assert!(recordset.is_active());
        recordset.signal_end();
        assert!(!recordset.is_active());
    }

    #[test]
    fn single_stream_only() {
        let recordset = Arc::new(Recordset::<i64>::new(16, 1));
        recordset.close();

        let stream = recordset.clone().into_stream();
        assert!(stream.is_some());
        assert!(recordset.clone().into_stream().is_none());

        drop(stream);
        assert!(recordset.into_stream().is_some());
    }
}
