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

//! Scan execution: the per-node request payload, the record queue shared between node producers
//! and the consumer, and the executor that fans a scan out across cluster nodes.

mod recordset;
mod request;
mod scan_executor;

pub use self::recordset::{RecordStream, Recordset};
pub use self::request::ScanRequest;
pub use self::scan_executor::ScanExecutor;
