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

use crate::policy::{Policy, Priority, ScanPolicy};

/// The node-facing scan request, built once per scan and shared by every per-node dispatch.
///
/// This is the read-only payload a [`Node`](crate::cluster::Node) implementation serializes into
/// its wire protocol: the identity of the scan plus the effects of the scan policy. The same
/// request value is handed to every node of the scan.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Unique id of this scan, shared by all per-node requests.
    pub task_id: u64,

    /// Namespace to scan.
    pub namespace: String,

    /// Set to scan; empty means every set in the namespace.
    pub set_name: String,

    /// Percent of the node's data to scan, between 1 and 100.
    pub scan_percent: u8,

    /// Return bin data (true) or record digests only (false).
    pub include_bin_data: bool,

    /// Return large data type bin values in addition to their names.
    pub include_ldt: bool,

    /// Ask the server to terminate the node scan if the cluster is in a fluctuating state.
    pub fail_on_cluster_change: bool,

    /// Server-side socket timeout in milliseconds; zero disables it.
    pub socket_timeout: u32,

    /// Server-side priority of the scan.
    pub priority: Priority,
}

impl ScanRequest {
    pub(crate) fn new(
        policy: &ScanPolicy,
        namespace: &str,
        set_name: &str,
        task_id: u64,
    ) -> Self {
        ScanRequest {
            task_id,
            namespace: namespace.to_owned(),
            set_name: set_name.to_owned(),
            scan_percent: policy.scan_percent(),
            include_bin_data: policy.include_bin_data(),
            include_ldt: policy.include_ldt(),
            fail_on_cluster_change: policy.fail_on_cluster_change(),
            socket_timeout: policy.socket_timeout(),
            priority: *policy.priority(),
        }
    }
}
