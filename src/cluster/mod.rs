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

//! Seams between the scan executor and the cluster layer.
//!
//! Cluster membership tracking, connection pooling and the node wire protocol live outside this
//! crate. The executor only needs a membership snapshot, a change counter to poll for fail-fast
//! scans, and a way to run one node-scoped scan request. The record type is a type parameter:
//! record deserialization belongs to the transport layer, so nodes push whatever record type the
//! caller works with.

use std::sync::Arc;

use crate::errors::Result;
use crate::scan::{Recordset, ScanRequest};

/// A read-only view of the cluster, as maintained by an external membership tracker.
pub trait ClusterView<T: Send + 'static>: Send + Sync {
    /// Snapshot of the nodes currently known to the cluster. The executor takes one snapshot at
    /// scan start and visits every node in it exactly once.
    fn nodes(&self) -> Vec<Arc<dyn Node<T>>>;

    /// Monotonic counter incremented by the membership tracker whenever a node joins or leaves.
    /// Fail-fast scans poll this to detect a fluctuating cluster.
    fn generation(&self) -> u64;
}

/// One server node's scan endpoint.
#[async_trait::async_trait]
pub trait Node<T: Send + 'static>: Send + Sync {
    /// Name of the node, for diagnostics.
    fn name(&self) -> &str;

    /// Execute a single node-scoped scan request, pushing each record onto the recordset as it
    /// is received.
    ///
    /// Implementations must stop streaming once [`Recordset::is_active`] turns false; the
    /// executor closes the recordset to cancel outstanding node scans. Each node is asked at
    /// most once per scan, and a returned error terminates the whole scan.
    async fn scan(&self, request: &ScanRequest, recordset: Arc<Recordset<T>>) -> Result<()>;
}
