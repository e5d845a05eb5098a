//! Parser and collector for the ZFS on Linux kstat text files
//! (`/proc/spl/kstat/zfs/<category>`).

pub mod demo;
pub mod display;
pub mod kstat;
pub mod system;
