// Copyright 2015-2018 Aerospike, Inc.
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

/// Specifies whether a scan, which needs to be executed on multiple cluster nodes, should be
/// executed sequentially, one node at a time, or in parallel on multiple nodes at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concurrency {
    /// Issue per-node scan requests sequentially, visiting the nodes strictly one at a time in
    /// the order of the membership snapshot taken at scan start.
    Sequential,

    /// Issue per-node scan requests to all server nodes in parallel.
    Parallel,

    /// Issue up to N per-node scan requests in parallel. When a request completes, a new request
    /// will be issued until all nodes have been visited. This mode prevents too many outstanding
    /// requests for large cluster implementations.
    ///
    /// E.g. if there are 16 nodes in the cluster and concurrency is set to `MaxNodes(8)`, then
    /// scan requests will be made to 8 nodes in parallel. When a request completes, a new request
    /// will be issued until all 16 nodes have been scanned.
    MaxNodes(usize),
}
