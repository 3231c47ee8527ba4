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

//! Policy types encapsulate optional parameters for scan operations.
#![allow(clippy::missing_errors_doc)]

mod concurrency;
mod priority;
mod scan_policy;

pub use self::concurrency::Concurrency;
pub use self::priority::Priority;
pub use self::scan_policy::{ScanPolicy, ScanPolicyBuilder};

use std::option::Option;
use std::time::{Duration, Instant};

/// Trait implemented by most policy types; policies that implement this trait typically encompass
/// an instance of `BasePolicy`.
pub trait Policy {
    /// Request priority relative to other operations.
    fn priority(&self) -> &Priority;

    #[doc(hidden)]
    /// Deadline for the current request based on the specified timeout. For internal use only.
    fn deadline(&self) -> Option<Instant>;

    /// Total request timeout for both client and server. The timeout is tracked on the client
    /// and also sent to the server along with the request in the wire protocol. The client
    /// will most likely timeout first, but the server has the capability to timeout the
    /// request as well.
    fn timeout(&self) -> Option<Duration>;

    /// Maximum number of retries before aborting the current request. A retry may be attempted
    /// when there is a network error. If `max_retries` is exceeded, the abort will occur even if
    /// the timeout has not yet been exceeded.
    fn max_retries(&self) -> Option<usize>;

    /// Time to sleep between retries. Set to zero to skip sleep. Default: 500ms.
    fn sleep_between_retries(&self) -> Option<Duration>;
}

#[doc(hidden)]
/// Policy-like object that encapsulates a base policy instance.
pub trait PolicyLike {
    /// Retrieve a reference to the base policy.
    fn base(&self) -> &BasePolicy;
}

impl<T> Policy for T
where
    T: PolicyLike,
{
    fn priority(&self) -> &Priority {
        self.base().priority()
    }

    fn deadline(&self) -> Option<Instant> {
        self.base().deadline()
    }

    fn timeout(&self) -> Option<Duration> {
        self.base().timeout()
    }

    fn max_retries(&self) -> Option<usize> {
        self.base().max_retries()
    }

    fn sleep_between_retries(&self) -> Option<Duration> {
        self.base().sleep_between_retries()
    }
}

/// Common parameters shared by all policy types.
#[derive(Debug, Clone)]
pub struct BasePolicy {
    /// Priority of the request relative to other operations.
    /// Currently, only consulted for scans.
    pub priority: Priority,

    /// Timeout specifies the total request timeout.
    /// This timeout is sent to the server along with the request in the wire protocol.
    /// Default to no timeout (0).
    pub timeout: Option<Duration>,

    /// MaxRetries determines the maximum number of retries before aborting the current request.
    /// A retry is attempted when there is a network error other than timeout.
    /// If maxRetries is exceeded, the abort will occur even if the timeout
    /// has not yet been exceeded.
    pub max_retries: Option<usize>,

    /// SleepBetweenRetries determines the duration to sleep between retries if a
    /// request fails and the timeout was not exceeded. Enter zero to skip sleep.
    pub sleep_between_retries: Option<Duration>,
}

impl Default for BasePolicy {
    fn default() -> BasePolicy {
        BasePolicy {
            priority: Priority::Default,
            timeout: Some(Duration::new(30, 0)),
            max_retries: Some(2),
            sleep_between_retries: Some(Duration::new(0, 500_000_000)),
        }
    }
}

impl Policy for BasePolicy {
    fn priority(&self) -> &Priority {
        &self.priority
    }

    fn deadline(&self) -> Option<Instant> {
        self.timeout.map(|timeout| Instant::now() + timeout)
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn max_retries(&self) -> Option<usize> {
        self.max_retries
    }

    fn sleep_between_retries(&self) -> Option<Duration> {
        self.sleep_between_retries
    }
}
