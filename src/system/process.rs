use std::ffi::OsStr;
use std::path::Path;

use super::snapshot::ProcessEntry;

pub const MAX_PROCESSES: usize = 100;

/// Ties keep their scan order.
pub fn top_by_cpu(mut entries: Vec<ProcessEntry>, limit: usize) -> Vec<ProcessEntry> {
    entries.retain(|p| p.cpu_percent > 0.0);
    entries.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    entries.truncate(limit);
    entries
}

pub fn command_label(exe: Option<&Path>, name: &OsStr) -> String {
    match exe {
        Some(path) if !path.as_os_str().is_empty() => path.to_string_lossy().into_owned(),
        _ => name.to_string_lossy().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pid: u32, cpu: f64) -> ProcessEntry {
        ProcessEntry {
            pid,
            cpu_percent: cpu,
            mem_percent: 1.0,
            command: format!("/usr/bin/proc{pid}"),
        }
    }

    #[test]
    fn sorts_descending_and_drops_idle() {
        let top = top_by_cpu(
            vec![entry(1, 2.0), entry(2, 0.0), entry(3, 40.0), entry(4, 7.5)],
            MAX_PROCESSES,
        );
        let pids: Vec<u32> = top.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![3, 4, 1]);
    }

    #[test]
    fn caps_at_limit() {
        let entries = (1..=150).map(|pid| entry(pid, pid as f64)).collect();
        let top = top_by_cpu(entries, MAX_PROCESSES);
        assert_eq!(top.len(), MAX_PROCESSES);
        assert_eq!(top[0].pid, 150);
        assert_eq!(top[99].pid, 51);
    }

    #[test]
    fn equal_cpu_keeps_scan_order() {
        let top = top_by_cpu(vec![entry(9, 5.0), entry(3, 5.0), entry(7, 5.0)], 10);
        let pids: Vec<u32> = top.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![9, 3, 7]);
    }

    #[test]
    fn command_falls_back_to_name() {
        assert_eq!(
            command_label(Some(Path::new("/usr/bin/zsh")), OsStr::new("zsh")),
            "/usr/bin/zsh"
        );
        assert_eq!(command_label(None, OsStr::new("kworker/0:1")), "kworker/0:1");
        assert_eq!(command_label(Some(Path::new("")), OsStr::new("init")), "init");
        assert_eq!(command_label(None, OsStr::new("")), "");
    }
}
