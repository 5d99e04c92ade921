//! Resource requests added to submissions under the hpc profile.
use crate::pipeline::{ModeParams, ResourceRequest, StageSpec};

/// Scheduler flags requesting memory, wall time and, for threaded stages,
/// one smp slot per thread.
pub fn resource_fragment(spec: &StageSpec, params: &ModeParams) -> Vec<String> {
    match spec.resources {
        ResourceRequest::Fixed { mem_gb, hours } => {
            vec!["-l".to_string(), format!("mem={mem_gb}G,time={hours}::")]
        }
        ResourceRequest::PerThread {
            gb_per_thread,
            hours,
        } => {
            let threads = stage_threads(spec.code, params);
            // u32 * u32 always fits in u64.
            let mem_gb = u64::from(threads) * u64::from(gb_per_thread);
            vec![
                "-l".to_string(),
                format!("mem={mem_gb}G,time={hours}::"),
                "-pe".to_string(),
                "smp".to_string(),
                threads.to_string(),
                "-R".to_string(),
                "y".to_string(),
            ]
        }
    }
}

/// Thread count a stage asks the scheduler for.
fn stage_threads(code: char, params: &ModeParams) -> u32 {
    match (params, code) {
        (ModeParams::Scan(p), '1') => p.map_threads,
        (ModeParams::Scan(p), '2') => p.trinitycores,
        _ => 1,
    }
}
