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

//! Error and Result types for scan operations.
//!
//! # Examples
//!
//! Handling an error returned by a scan driver.
//!
//! ```rust,edition2018
//! use gridscan::{Error, ErrorKind};
//!
//! fn report(err: &Error) {
//!     match err {
//!         Error(ErrorKind::ClusterChanged(details), _) => {
//!             println!("Scan aborted, cluster in fluctuating state: {}", details);
//!         }
//!         err => {
//!             println!("Scan failed: {}", err);
//!             for err in err.iter().skip(1) {
//!                 println!("Caused by: {}", err);
//!             }
//!         }
//!     }
//! }
//! ```

#![allow(missing_docs)]

error_chain! {

// Automatic conversions between this error chain and other error types not defined by the
// `error_chain!`.
    foreign_links {
        Io(::std::io::Error)
            #[doc = "Error during an I/O operation on a node socket"];
    }

// Additional `ErrorKind` variants.
    errors {

/// The engine was not able to communicate with a cluster node due to some issue with the
/// network connection.
        Connection(details: String) {
            description("Network Connection Issue")
            display("Unable to communicate with cluster node: {}", details)
        }

/// One or more of the arguments passed to the scan configuration are invalid.
        InvalidArgument(details: String) {
            description("Invalid Argument")
            display("Invalid argument: {}", details)
        }

/// Cluster membership changed while a fail-fast scan was in flight. The whole scan is
/// terminated; no per-node request is retried.
        ClusterChanged(details: String) {
            description("Cluster Changed")
            display("Scan terminated, cluster changed: {}", details)
        }

/// Error returned when a node scan timed out before it could be completed.
        Timeout(details: String) {
            description("Timeout")
            display("Timeout: {}", details)
        }
    }
}
