//! Background job registry.
//!
//! Owns every process started with a trailing `&`. Ids start at 1, grow by
//! one per successful spawn and are never reused. Entries stay in the table
//! after the process exits or is killed; only [`JobRegistry::prune_exited`]
//! removes them.

use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::collections::BTreeMap;
use std::fmt;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum JobError {
    #[error("failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid job id")]
    NotFound(usize),

    #[error("failed to kill job {id}: {source}")]
    Kill {
        id: usize,
        #[source]
        source: Errno,
    },
}

struct Job {
    command_name: String,
    child: Child,
}

impl Job {
    fn is_running(&mut self) -> bool {
        match self.child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                debug!("job pid {} exited: {}", self.child.id(), status);
                false
            }
            Err(err) => {
                warn!("failed to poll pid {}: {}", self.child.id(), err);
                false
            }
        }
    }
}

/// One row of a `jobs` listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    pub id: usize,
    pub command_name: String,
    pub is_running: bool,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_running { "running" } else { "exited" };
        write!(f, "[{}] {} ({})", self.id, self.command_name, state)
    }
}

pub struct JobRegistry {
    jobs: BTreeMap<usize, Job>,
    next_id: usize,
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JobRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobRegistry")
            .field("ids", &self.jobs.keys().collect::<Vec<_>>())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl JobRegistry {
    pub fn new() -> Self {
        JobRegistry {
            jobs: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Start `command` detached from the shell and register it.
    ///
    /// stdout and stderr go to pipes nobody reads, so the output is
    /// discarded. A child that writes more than the pipe buffer holds will
    /// block on its next write. stdin is the null device.
    ///
    /// Each job leads its own process group, so a terminal interrupt aimed
    /// at the shell does not reach it.
    ///
    /// A failed spawn consumes no id.
    pub fn spawn_background(
        &mut self,
        command: &str,
        args: &[String],
    ) -> Result<usize, JobError> {
        let child = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .spawn()
            .map_err(|source| JobError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let id = self.next_id;
        self.next_id += 1;
        debug!(
            "JOB_SPAWN: job {} pid {} cmd '{}' args {:?}",
            id,
            child.id(),
            command,
            args
        );
        self.jobs.insert(
            id,
            Job {
                command_name: command.to_string(),
                child,
            },
        );
        Ok(id)
    }

    /// Snapshot of all jobs in ascending id order.
    ///
    /// Liveness is polled from the OS as the iterator advances. Call again
    /// for a fresh snapshot.
    pub fn list_jobs(&mut self) -> impl Iterator<Item = JobStatus> + '_ {
        self.jobs.iter_mut().map(|(id, job)| JobStatus {
            id: *id,
            command_name: job.command_name.clone(),
            is_running: job.is_running(),
        })
    }

    /// Force-terminate job `id` with SIGKILL.
    ///
    /// The entry stays registered and reports not running afterwards.
    /// Killing a job that already exited succeeds without sending a signal.
    pub fn kill_job(&mut self, id: usize) -> Result<(), JobError> {
        let job = self.jobs.get_mut(&id).ok_or(JobError::NotFound(id))?;

        if !job.is_running() {
            debug!("JOB_KILL: job {} already exited, nothing to signal", id);
            return Ok(());
        }

        // The child is not reaped until wait below, so the pid cannot be recycled yet
        let pid = Pid::from_raw(job.child.id() as i32);
        debug!("JOB_KILL: sending SIGKILL to job {} (pid {})", id, pid);
        signal::kill(pid, Signal::SIGKILL)
            .map_err(|source| JobError::Kill { id, source })?;

        if let Err(err) = job.child.wait() {
            warn!("JOB_KILL: failed to reap job {} (pid {}): {}", id, pid, err);
        }
        Ok(())
    }

    /// Drop every job whose process has exited and return their ids.
    pub fn prune_exited(&mut self) -> Vec<usize> {
        let exited: Vec<usize> = self
            .jobs
            .iter_mut()
            .filter_map(|(id, job)| (!job.is_running()).then_some(*id))
            .collect();
        for id in &exited {
            self.jobs.remove(id);
        }
        debug!("JOB_PRUNE: removed {:?}", exited);
        exited
    }

    pub fn contains(&self, id: usize) -> bool {
        self.jobs.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn sleeper(registry: &mut JobRegistry) -> usize {
        registry
            .spawn_background("sleep", &["30".to_string()])
            .unwrap()
    }

    fn is_running(registry: &mut JobRegistry, id: usize) -> Option<bool> {
        registry
            .list_jobs()
            .find(|status| status.id == id)
            .map(|status| status.is_running)
    }

    fn wait_for_exit(registry: &mut JobRegistry, id: usize) {
        for _ in 0..100 {
            if is_running(registry, id) == Some(false) {
                return;
            }
            thread::sleep(Duration::from_millis(50));
        }
        panic!("job {id} did not exit");
    }

    fn ids(registry: &mut JobRegistry) -> Vec<usize> {
        registry.list_jobs().map(|status| status.id).collect()
    }

    #[test]
    fn test_empty_registry_lists_nothing() {
        let mut registry = JobRegistry::new();
        assert_eq!(registry.list_jobs().count(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut registry = JobRegistry::new();
        let issued: Vec<usize> = (0..4)
            .map(|_| registry.spawn_background("true", &[]).unwrap())
            .collect();
        assert_eq!(issued, vec![1, 2, 3, 4]);
        assert_eq!(ids(&mut registry), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_failed_spawn_consumes_no_id() {
        let mut registry = JobRegistry::new();
        assert_eq!(registry.spawn_background("true", &[]).unwrap(), 1);

        let err = registry
            .spawn_background("ash-test-no-such-command", &[])
            .unwrap_err();
        assert!(matches!(err, JobError::Spawn { .. }));
        assert_eq!(registry.len(), 1);

        assert_eq!(registry.spawn_background("true", &[]).unwrap(), 2);
    }

    #[test]
    fn test_kill_unknown_id_is_not_found() {
        let mut registry = JobRegistry::new();
        registry.spawn_background("true", &[]).unwrap();

        let err = registry.kill_job(42).unwrap_err();
        assert!(matches!(err, JobError::NotFound(42)));
        assert_eq!(err.to_string(), "invalid job id");
        assert_eq!(ids(&mut registry), vec![1]);
    }

    #[test]
    fn test_job_runs_in_its_own_process_group() {
        let mut registry = JobRegistry::new();
        let id = sleeper(&mut registry);
        let pid = Pid::from_raw(registry.jobs[&id].child.id() as i32);

        let job_pgid = nix::unistd::getpgid(Some(pid)).unwrap();
        let shell_pgid = nix::unistd::getpgid(None).unwrap();
        assert_eq!(job_pgid, pid);
        assert_ne!(job_pgid, shell_pgid);

        registry.kill_job(id).unwrap();
    }

    #[test]
    fn test_kill_error_carries_os_message() {
        let err = JobError::Kill {
            id: 1,
            source: Errno::EPERM,
        };
        assert_eq!(
            err.to_string(),
            "failed to kill job 1: EPERM: Operation not permitted"
        );
    }

    #[test]
    fn test_kill_running_job_keeps_entry() {
        let mut registry = JobRegistry::new();
        let id = sleeper(&mut registry);
        assert_eq!(is_running(&mut registry, id), Some(true));

        registry.kill_job(id).unwrap();

        assert_eq!(is_running(&mut registry, id), Some(false));
        assert!(registry.contains(id));
        assert!(matches!(registry.kill_job(id + 1), Err(JobError::NotFound(_))));
    }

    #[test]
    fn test_listing_shows_command_and_state() {
        let mut registry = JobRegistry::new();
        let id = sleeper(&mut registry);

        let rows: Vec<String> = registry.list_jobs().map(|s| s.to_string()).collect();
        assert_eq!(rows, vec!["[1] sleep (running)".to_string()]);

        registry.kill_job(id).unwrap();
        let rows: Vec<String> = registry.list_jobs().map(|s| s.to_string()).collect();
        assert_eq!(rows, vec!["[1] sleep (exited)".to_string()]);
    }

    #[test]
    fn test_failing_command_still_gets_id_and_kill_is_idempotent() {
        let mut registry = JobRegistry::new();
        let id = registry.spawn_background("false", &[]).unwrap();
        assert_eq!(id, 1);

        wait_for_exit(&mut registry, id);
        registry.kill_job(id).unwrap();
        registry.kill_job(id).unwrap();
        assert_eq!(is_running(&mut registry, id), Some(false));
    }

    #[test]
    fn test_prune_removes_only_exited_and_ids_are_not_reused() {
        let mut registry = JobRegistry::new();
        let done = registry.spawn_background("true", &[]).unwrap();
        let alive = sleeper(&mut registry);
        wait_for_exit(&mut registry, done);

        assert_eq!(registry.prune_exited(), vec![done]);
        assert_eq!(ids(&mut registry), vec![alive]);

        assert_eq!(registry.spawn_background("true", &[]).unwrap(), 3);
        registry.kill_job(alive).unwrap();
    }
}
