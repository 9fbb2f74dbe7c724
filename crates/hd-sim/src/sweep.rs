//! Independent runs over a list of configurations.
//!
//! Each run owns its whole state, so with the `parallel` feature the runs are
//! spread over Rayon's thread pool and the results are identical to running
//! them one after another.

use hd_core::HotelConfig;

use crate::{run, RunReport, SimResult};

/// Run every config; results come back in input order.
pub fn sweep(configs: &[HotelConfig]) -> Vec<SimResult<RunReport>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        configs.par_iter().map(run).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        configs.iter().map(run).collect()
    }
}

/// `base` once per room count, everything else unchanged.
pub fn room_count_variants(base: &HotelConfig, room_counts: &[u32]) -> Vec<HotelConfig> {
    room_counts
        .iter()
        .map(|&room_count| HotelConfig { room_count, ..base.clone() })
        .collect()
}
