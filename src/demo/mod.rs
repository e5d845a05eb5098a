//! Bundled kstat snapshots used in demo mode and tests

const ARCSTATS: &str = include_str!("arcstats.txt");
const ZFETCHSTATS: &str = include_str!("zfetchstats.txt");
const ZIL: &str = include_str!("zil.txt");
const VDEV_CACHE_STATS: &str = include_str!("vdev_cache_stats.txt");
const XUIO_STATS: &str = include_str!("xuio_stats.txt");

/// Snapshot content for a kstat category, if one is bundled
pub fn kstat_snapshot(category: &str) -> Option<&'static str> {
    match category {
        "arcstats" => Some(ARCSTATS),
        "zfetchstats" => Some(ZFETCHSTATS),
        "zil" => Some(ZIL),
        "vdev_cache_stats" => Some(VDEV_CACHE_STATS),
        "xuio_stats" => Some(XUIO_STATS),
        _ => None,
    }
}
