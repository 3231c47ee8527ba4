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
use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::cluster::{ClusterView, Node};
use crate::errors::{ErrorKind, Result};
use crate::policy::{Concurrency, ScanPolicy};
use crate::scan::{Recordset, ScanRequest};

/// Fans a scan out across the nodes of a cluster, following the fan-out and fail-fast contract
/// of the supplied [`ScanPolicy`].
///
/// The executor owns no sockets and spawns no tasks: `execute_scan` hands back the recordset
/// together with a driver future, and the caller runs the driver on whatever executor it uses
/// while consuming the recordset concurrently.
pub struct ScanExecutor<T> {
    cluster: Arc<dyn ClusterView<T>>,
}

impl<T: Send + 'static> ScanExecutor<T> {
    /// Create a scan executor on top of a cluster view.
    pub fn new(cluster: Arc<dyn ClusterView<T>>) -> Self {
        ScanExecutor { cluster }
    }

    /// Read all records in the specified namespace and set. Returns a record collection that is
    /// filled while the scan runs, plus the driver future that performs the per-node dispatch.
    /// The driver resolves once every node of the membership snapshot has been visited exactly
    /// once, or with the first error; no per-node request is ever retried.
    ///
    /// Up to `policy.max_concurrent_nodes` nodes are scanned in parallel. If concurrent nodes is
    /// unset, the server nodes are read in series. When `policy.fail_on_cluster_change` is set,
    /// a membership change observed at any dispatch boundary cancels all outstanding node scans
    /// and fails the whole scan with [`ErrorKind::ClusterChanged`].
    pub fn execute_scan(
        &self,
        policy: &ScanPolicy,
        namespace: &str,
        set_name: &str,
    ) -> (
        Arc<Recordset<T>>,
        impl Future<Output = Result<()>> + Send + 'static,
    ) {
        // Generation first: a membership change between the two reads is then caught by the
        // fail-fast checks instead of going unnoticed.
        let generation = self.cluster.generation();
        let nodes = self.cluster.nodes();

        let recordset = Arc::new(Recordset::new(policy.record_queue_size(), nodes.len()));
        let request = ScanRequest::new(policy, namespace, set_name, recordset.task_id());
        debug!(
            "starting scan {} of namespace '{}' across {} nodes",
            request.task_id,
            request.namespace,
            nodes.len()
        );

        let driver = drive(
            self.cluster.clone(),
            nodes,
            policy.concurrency(),
            policy.fail_on_cluster_change(),
            generation,
            recordset.clone(),
            request,
        );
        (recordset, driver)
    }
}

async fn drive<T: Send + 'static>(
    cluster: Arc<dyn ClusterView<T>>,
    nodes: Vec<Arc<dyn Node<T>>>,
    concurrency: Concurrency,
    fail_on_cluster_change: bool,
    generation: u64,
    recordset: Arc<Recordset<T>>,
    request: ScanRequest,
) -> Result<()> {
    if nodes.is_empty() {
        recordset.close();
        return Ok(());
    }

    let limit = match concurrency {
        Concurrency::Sequential => 1,
        Concurrency::Parallel => nodes.len(),
        Concurrency::MaxNodes(max) => max.min(nodes.len()),
    };

    // Node futures are created lazily: on an early abort the remaining nodes are never
    // dispatched, and dropping the stream cancels the outstanding ones.
    let node_scans: Vec<_> = nodes
        .into_iter()
        .map(|node| {
            scan_node(
                &cluster,
                node,
                &request,
                &recordset,
                fail_on_cluster_change,
                generation,
            )
        })
        .collect();
    let mut pending = stream::iter(node_scans).buffer_unordered(limit);

    while let Some(result) = pending.next().await {
        if let Err(err) = result {
            drop(pending);
            recordset.close();
            return Err(err);
        }
    }
    drop(pending);

    if fail_on_cluster_change && cluster.generation() != generation {
        recordset.close();
        warn!("scan {}: cluster changed during scan", request.task_id);
        bail!(fluctuation(generation, cluster.generation()));
    }

    Ok(())
}

async fn scan_node<T: Send + 'static>(
    cluster: &Arc<dyn ClusterView<T>>,
    node: Arc<dyn Node<T>>,
    request: &ScanRequest,
    recordset: &Arc<Recordset<T>>,
    fail_on_cluster_change: bool,
    generation: u64,
) -> Result<()> {
    if fail_on_cluster_change && cluster.generation() != generation {
        recordset.signal_end();
        bail!(fluctuation(generation, cluster.generation()));
    }

    debug!(
        "scan {}: dispatching to node {}",
        request.task_id,
        node.name()
    );
    let result = node.scan(request, recordset.clone()).await;
    recordset.signal_end();
    result?;

    if fail_on_cluster_change && cluster.generation() != generation {
        warn!(
            "scan {}: cluster changed while node {} was being scanned",
            request.task_id,
            node.name()
        );
        bail!(fluctuation(generation, cluster.generation()));
    }

    Ok(())
}

fn fluctuation(before: u64, after: u64) -> ErrorKind {
    ErrorKind::ClusterChanged(format!(
        "cluster generation moved from {} to {}",
        before, after
    ))
}
