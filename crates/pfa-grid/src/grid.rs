//! Axis enumeration.

use pfa_core::ExpParams;

use crate::config::GridConfig;

/// Enumerate every experiment-parameter tuple of the configured grid.
///
/// Axis order is fixed (request rate, platoon size, distance, penetration,
/// repetition) so the enumeration is deterministic; dispatch order carries
/// no meaning downstream because every record is tagged with its tuple.
pub fn param_grid(config: &GridConfig) -> Vec<ExpParams> {
    let mut grid = Vec::with_capacity(config.combinations());
    for &request_rate in &config.request_rates {
        for &max_platoon_size in &config.max_platoon_sizes {
            for &max_distance in &config.max_distances {
                for &penetration in &config.penetrations {
                    for &repetition in &config.repetitions {
                        grid.push(ExpParams {
                            request_rate,
                            max_platoon_size,
                            max_distance,
                            penetration,
                            repetition,
                        });
                    }
                }
            }
        }
    }
    grid
}
