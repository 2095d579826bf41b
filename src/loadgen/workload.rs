//! Workload definitions: which key each request targets and whether it
//! reads or writes.

use std::fmt;

use clap::ValueEnum;
use rand::Rng;

/// Share of `getpopular` requests that go to the hot set, in percent.
const HOT_PERCENT: u32 = 90;

// == Workload ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Workload {
    /// PUT to uniformly random keys
    #[value(name = "putall")]
    PutAll,
    /// GET of uniformly random keys
    #[value(name = "getall")]
    GetAll,
    /// 90% GET over the hot keys, 10% GET over the whole keyspace
    #[value(name = "getpopular")]
    GetPopular,
    /// Configurable PUT/GET mix over uniformly random keys
    #[value(name = "getput")]
    GetPut,
}

impl Workload {
    pub fn as_str(self) -> &'static str {
        match self {
            Workload::PutAll => "putall",
            Workload::GetAll => "getall",
            Workload::GetPopular => "getpopular",
            Workload::GetPut => "getput",
        }
    }

    /// Read workloads need keys to exist before the run starts.
    pub fn needs_seed(self) -> bool {
        !matches!(self, Workload::PutAll)
    }

    // == Next Request ==
    /// Picks the next request for a worker.
    ///
    /// `put_pct` only affects [`Workload::GetPut`].
    pub fn next_request<R: Rng>(
        self,
        rng: &mut R,
        keys: &KeySpace,
        put_pct: u8,
    ) -> Request {
        match self {
            Workload::PutAll => Request::Put(keys.any(rng), random_value(rng)),
            Workload::GetAll => Request::Get(keys.any(rng)),
            Workload::GetPopular => {
                if rng.random_range(0..100) < HOT_PERCENT {
                    Request::Get(keys.hot(rng))
                } else {
                    Request::Get(keys.any(rng))
                }
            }
            Workload::GetPut => {
                if rng.random_range(0..100u32) < u32::from(put_pct) {
                    Request::Put(keys.any(rng), random_value(rng))
                } else {
                    Request::Get(keys.any(rng))
                }
            }
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request a worker will send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Get(String),
    Put(String, String),
}

impl Request {
    pub fn key(&self) -> &str {
        match self {
            Request::Get(key) | Request::Put(key, _) => key,
        }
    }
}

fn random_value<R: Rng>(rng: &mut R) -> String {
    format!("v-{}", rng.random::<u64>() >> 1)
}

// == Key Space ==
/// Keys `k-0 .. k-{size-1}`; the first `popular` of them are the hot set.
#[derive(Debug, Clone)]
pub struct KeySpace {
    size: u64,
    popular: u64,
}

impl KeySpace {
    /// `size` is clamped to at least one key; `popular` to at most `size`.
    /// A `popular` of zero leaves the hot set empty.
    pub fn new(size: u64, popular: u64) -> Self {
        let size = size.max(1);
        Self {
            size,
            popular: popular.min(size),
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn key(index: u64) -> String {
        format!("k-{}", index)
    }

    fn any<R: Rng>(&self, rng: &mut R) -> String {
        Self::key(rng.random_range(0..self.size))
    }

    /// Uniform over the whole keyspace when the hot set is empty.
    fn hot<R: Rng>(&self, rng: &mut R) -> String {
        if self.popular == 0 {
            return self.any(rng);
        }
        Self::key(rng.random_range(0..self.popular))
    }
}
