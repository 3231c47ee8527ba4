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

use crate::errors::{ErrorKind, Result};
use crate::policy::{BasePolicy, Concurrency, PolicyLike};

/// `ScanPolicy` encapsulates optional parameters used in scan operations.
///
/// The policy is read-only once constructed; the scan executor reads every field once at scan
/// start and the per-node request builder serializes its effects into the node-facing request.
/// Use [`ScanPolicy::builder`] to override individual fields, or [`ScanPolicy::default`] for the
/// stock configuration.
///
/// Scans are not retried: whatever the base policy says, the effective retry count of a scan
/// policy is always zero. A retried scan could double-deliver or skip records as cluster state
/// shifts, so any per-node failure terminates the whole scan.
#[derive(Debug, Clone)]
pub struct ScanPolicy {
    base_policy: BasePolicy,
    scan_percent: u8,
    max_concurrent_nodes: usize,
    concurrent_nodes: bool,
    socket_timeout: u32,
    include_bin_data: bool,
    include_ldt: bool,
    fail_on_cluster_change: bool,
    record_queue_size: usize,
}

impl ScanPolicy {
    /// Create a new scan policy instance with default parameters.
    pub fn new() -> Self {
        ScanPolicy::default()
    }

    /// Start building a scan policy from the default parameters.
    pub fn builder() -> ScanPolicyBuilder {
        ScanPolicyBuilder::new()
    }

    /// Percent of data to scan. Always within the valid integer range 1 to 100.
    pub const fn scan_percent(&self) -> u8 {
        self.scan_percent
    }

    /// Maximum number of concurrent requests to server nodes at any point in time. If there are
    /// 16 nodes in the cluster and `max_concurrent_nodes` is 8, then scan requests will be made
    /// to 8 nodes in parallel. When a scan completes, a new scan request will be issued until all
    /// 16 nodes have been scanned. Zero means issue requests to all server nodes in parallel.
    ///
    /// Only relevant when `concurrent_nodes` is true.
    pub const fn max_concurrent_nodes(&self) -> usize {
        self.max_concurrent_nodes
    }

    /// Issue scan requests in parallel or serially.
    pub const fn concurrent_nodes(&self) -> bool {
        self.concurrent_nodes
    }

    /// Maximum time in milliseconds to wait when polling the socket for availability prior to
    /// performing an operation on the socket on the server side. Zero means there is no socket
    /// timeout.
    pub const fn socket_timeout(&self) -> u32 {
        self.socket_timeout
    }

    /// Indicates if bin data is retrieved. If false, only record digests are retrieved.
    pub const fn include_bin_data(&self) -> bool {
        self.include_bin_data
    }

    /// Include large data type bin values in addition to large data type bin names. If false,
    /// LDT bin names will be returned, but LDT bin values will be empty. If true, LDT bin names
    /// and the entire LDT bin values will be returned. Warning: LDT values may consume huge
    /// amounts of memory depending on LDT size.
    pub const fn include_ldt(&self) -> bool {
        self.include_ldt
    }

    /// Terminate the scan if the cluster is in a fluctuating state.
    pub const fn fail_on_cluster_change(&self) -> bool {
        self.fail_on_cluster_change
    }

    /// Number of records to place in the queue before blocking. Records received from multiple
    /// server nodes will be placed in a queue. A separate consumer reads these records in
    /// parallel. If the queue is full, the producer tasks will block until records are consumed.
    pub const fn record_queue_size(&self) -> usize {
        self.record_queue_size
    }

    /// The fan-out mode the scan executor must follow, derived from `concurrent_nodes` and
    /// `max_concurrent_nodes`.
    pub const fn concurrency(&self) -> Concurrency {
        if !self.concurrent_nodes {
            Concurrency::Sequential
        } else if self.max_concurrent_nodes == 0 {
            Concurrency::Parallel
        } else {
            Concurrency::MaxNodes(self.max_concurrent_nodes)
        }
    }
}

impl Default for ScanPolicy {
    fn default() -> Self {
        // Scans should not retry.
        let mut base_policy = BasePolicy::default();
        base_policy.max_retries = Some(0);

        ScanPolicy {
            base_policy,
            scan_percent: 100,
            max_concurrent_nodes: 0,
            concurrent_nodes: true,
            socket_timeout: 10000,
            include_bin_data: true,
            include_ldt: false,
            fail_on_cluster_change: false,
            record_queue_size: 1024,
        }
    }
}

impl PolicyLike for ScanPolicy {
    fn base(&self) -> &BasePolicy {
        &self.base_policy
    }
}

/// Named-option construction for [`ScanPolicy`].
///
/// All options start out at the stock defaults. `build` rejects a `scan_percent` outside the
/// range 1 to 100, so a constructed policy always satisfies the scan invariants before it is
/// handed to the executor.
#[derive(Debug, Clone)]
pub struct ScanPolicyBuilder {
    policy: ScanPolicy,
}

impl ScanPolicyBuilder {
    fn new() -> Self {
        ScanPolicyBuilder {
            policy: ScanPolicy::default(),
        }
    }

    /// Percent of data to scan. Valid integer range is 1 to 100; `build` fails otherwise.
    pub fn scan_percent(mut self, percent: u8) -> Self {
        self.policy.scan_percent = percent;
        self
    }

    /// Maximum number of concurrent per-node scan requests. Zero lifts the cap.
    pub fn max_concurrent_nodes(mut self, nodes: usize) -> Self {
        self.policy.max_concurrent_nodes = nodes;
        self
    }

    /// Issue scan requests in parallel (true) or serially (false).
    pub fn concurrent_nodes(mut self, concurrent: bool) -> Self {
        self.policy.concurrent_nodes = concurrent;
        self
    }

    /// Server-side socket timeout in milliseconds. Zero disables the socket timeout.
    pub fn socket_timeout(mut self, millis: u32) -> Self {
        self.policy.socket_timeout = millis;
        self
    }

    /// Retrieve bin data (true) or record digests only (false).
    pub fn include_bin_data(mut self, include: bool) -> Self {
        self.policy.include_bin_data = include;
        self
    }

    /// Retrieve large data type bin values in addition to their names.
    pub fn include_ldt(mut self, include: bool) -> Self {
        self.policy.include_ldt = include;
        self
    }

    /// Terminate the whole scan as soon as a cluster membership change is detected.
    pub fn fail_on_cluster_change(mut self, fail: bool) -> Self {
        self.policy.fail_on_cluster_change = fail;
        self
    }

    /// Capacity of the record queue shared by the per-node producer tasks.
    pub fn record_queue_size(mut self, size: usize) -> Self {
        self.policy.record_queue_size = size;
        self
    }

    /// Replace the embedded base policy. The retry count of the supplied policy is ignored;
    /// scans never retry.
    pub fn base_policy(mut self, base_policy: BasePolicy) -> Self {
        self.policy.base_policy = base_policy;
        self
    }

    /// Finish construction, verifying the scan invariants.
    pub fn build(mut self) -> Result<ScanPolicy> {
        if self.policy.scan_percent < 1 || self.policy.scan_percent > 100 {
            bail!(ErrorKind::InvalidArgument(format!(
                "scan percent must be between 1 and 100, got {}",
                self.policy.scan_percent
            )));
        }
        self.policy.base_policy.max_retries = Some(0);
        Ok(self.policy)
    }
}
