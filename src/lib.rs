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

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::use_self
)]

//! Scan policy and per-node fan-out contract for distributed key-value store clients.
//!
//! A full-namespace scan visits every node of a cluster and streams back every record the node
//! owns. This crate owns the *policy* side of that operation: the [`ScanPolicy`] tunables with
//! their defaults and invariants, the [`ScanRequest`] payload a node transport serializes, and a
//! [`ScanExecutor`] that enforces the fan-out, fail-fast and no-retry contract against the
//! cluster seams defined in [`cluster`]. Membership tracking, connection pooling, partition
//! bookkeeping and record deserialization stay with the caller, behind the [`ClusterView`] and
//! [`Node`] traits.
//!
//! The executor is runtime-agnostic: it returns a plain driver future that the caller runs or
//! spawns, while records are consumed from the shared [`Recordset`].
//!
//! # Examples
//!
//! Scanning an in-memory two-node "cluster" of `u64` digests:
//!
//! ```rust,edition2018
//! use std::sync::Arc;
//!
//! use gridscan::{ClusterView, Node, Recordset, Result, ScanExecutor, ScanPolicy, ScanRequest};
//!
//! struct MemoryNode {
//!     name: String,
//!     digests: Vec<u64>,
//! }
//!
//! #[async_trait::async_trait]
//! impl Node<u64> for MemoryNode {
//!     fn name(&self) -> &str {
//!         &self.name
//!     }
//!
//!     async fn scan(&self, _request: &ScanRequest, recordset: Arc<Recordset<u64>>) -> Result<()> {
//!         for digest in &self.digests {
//!             recordset.busy_push(Ok(*digest)).await;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! struct StaticCluster(Vec<Arc<MemoryNode>>);
//!
//! impl ClusterView<u64> for StaticCluster {
//!     fn nodes(&self) -> Vec<Arc<dyn Node<u64>>> {
//!         self.0.iter().map(|node| node.clone() as Arc<dyn Node<u64>>).collect()
//!     }
//!
//!     fn generation(&self) -> u64 {
//!         0
//!     }
//! }
//!
//! let cluster = Arc::new(StaticCluster(vec![
//!     Arc::new(MemoryNode { name: "a".into(), digests: vec![1, 2, 3] }),
//!     Arc::new(MemoryNode { name: "b".into(), digests: vec![4, 5] }),
//! ]));
//!
//! let executor = ScanExecutor::<u64>::new(cluster);
//! let policy = ScanPolicy::default();
//! let (recordset, driver) = executor.execute_scan(&policy, "test", "demo");
//! futures::executor::block_on(driver).unwrap();
//!
//! let count = recordset.into_stream().unwrap().filter(Result::is_ok).count();
//! assert_eq!(count, 5);
//! ```

// `error_chain` can recurse deeply
#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

pub use cluster::{ClusterView, Node};
pub use errors::{Error, ErrorKind, Result};
pub use policy::{BasePolicy, Concurrency, Policy, Priority, ScanPolicy, ScanPolicyBuilder};
pub use scan::{RecordStream, Recordset, ScanExecutor, ScanRequest};

pub mod cluster;
pub mod errors;
pub mod policy;
pub mod scan;
