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

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use gridscan::{ClusterView, ErrorKind, Node, Recordset, Result, ScanRequest};

/// Record as produced by a mock node transport: a digest, plus bin data when the scan asked
/// for it.
#[derive(Debug, Clone)]
pub struct TestRecord {
    pub digest: u64,
    pub bins: Option<Vec<(String, i64)>>,
}

/// Counters shared by all nodes of a mock cluster.
#[derive(Default)]
pub struct ClusterState {
    pub generation: AtomicU64,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub visit_order: Mutex<Vec<String>>,
}

impl ClusterState {
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

pub struct TestNode {
    name: String,
    records: usize,
    fail: AtomicBool,
    bump_generation: AtomicBool,
    scan_count: AtomicUsize,
    seen_request: Mutex<Option<ScanRequest>>,
    state: Arc<ClusterState>,
}

impl TestNode {
    pub fn new(name: String, records: usize, state: Arc<ClusterState>) -> Self {
        TestNode {
            name,
            records,
            fail: AtomicBool::new(false),
            bump_generation: AtomicBool::new(false),
            scan_count: AtomicUsize::new(0),
            seen_request: Mutex::new(None),
            state,
        }
    }

    /// Make this node fail its scan with a connection error.
    pub fn set_fail(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// Make this node bump the cluster generation at the end of its scan, simulating a
    /// membership change while the scan is in flight.
    pub fn set_bump_generation(&self) {
        self.bump_generation.store(true, Ordering::SeqCst);
    }

    pub fn scans(&self) -> usize {
        self.scan_count.load(Ordering::SeqCst)
    }

    pub fn seen_request(&self) -> Option<ScanRequest> {
        self.seen_request.lock().unwrap().clone()
    }

    async fn stream_records(
        &self,
        request: &ScanRequest,
        recordset: &Arc<Recordset<TestRecord>>,
    ) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(
                ErrorKind::Connection(format!("{}: connection reset by peer", self.name)).into(),
            );
        }

        for seq in 0..self.records {
            if !recordset.is_active() {
                break;
            }
            let bins = if request.include_bin_data {
                Some(vec![("seq".to_string(), seq as i64)])
            } else {
                None
            };
            let record = TestRecord {
                digest: digest(&self.name, seq),
                bins,
            };
            recordset.busy_push(Ok(record)).await;
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl Node<TestRecord> for TestNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn scan(
        &self,
        request: &ScanRequest,
        recordset: Arc<Recordset<TestRecord>>,
    ) -> Result<()> {
        self.scan_count.fetch_add(1, Ordering::SeqCst);
        *self.seen_request.lock().unwrap() = Some(request.clone());
        self.state.visit_order.lock().unwrap().push(self.name.clone());

        let in_flight = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        tokio::task::yield_now().await;

        let result = self.stream_records(request, &recordset).await;

        if self.bump_generation.load(Ordering::SeqCst) {
            self.state.generation.fetch_add(1, Ordering::SeqCst);
        }
        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

pub struct TestCluster {
    pub nodes: Vec<Arc<TestNode>>,
    pub state: Arc<ClusterState>,
}

impl TestCluster {
    pub fn new(node_count: usize, records_per_node: usize) -> Arc<Self> {
        let state = Arc::new(ClusterState::default());
        let nodes = (0..node_count)
            .map(|i| {
                Arc::new(TestNode::new(
                    format!("node-{}", i),
                    records_per_node,
                    state.clone(),
                ))
            })
            .collect();
        Arc::new(TestCluster { nodes, state })
    }

    pub fn node_names(&self) -> Vec<String> {
        self.nodes.iter().map(|node| node.name().to_owned()).collect()
    }
}

impl ClusterView<TestRecord> for TestCluster {
    fn nodes(&self) -> Vec<Arc<dyn Node<TestRecord>>> {
        self.nodes
            .iter()
            .map(|node| node.clone() as Arc<dyn Node<TestRecord>>)
            .collect()
    }

    fn generation(&self) -> u64 {
        self.state.generation.load(Ordering::SeqCst)
    }
}

fn digest(name: &str, seq: usize) -> u64 {
    let name_hash: u64 = name.bytes().map(u64::from).sum();
    (name_hash << 32) | seq as u64
}
