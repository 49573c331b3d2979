//! Process replication for the cluster variant.
//!
//! A primary process spawns one replica per logical CPU and then only
//! watches them. Each replica runs its own single-threaded dispatcher on
//! the shared port. Replicas that exit are not replaced.

use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::future::Future;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, ChildStdin, Command};
use tokio::task::JoinSet;

use crate::config::Config;
use crate::server::Server;
use crate::variant::Variant;

/// Role of this process, fixed for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Role {
    Primary,
    Replica,
}

/// Number of replicas the primary starts: one per logical CPU.
pub fn replication_factor() -> usize {
    num_cpus::get()
}

/// Program and arguments the primary launches for every replica.
#[derive(Debug, Clone)]
pub struct ReplicaCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ReplicaCommand {
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        ReplicaCommand {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Re-run this executable as a cluster replica.
    pub fn current_exe() -> Result<Self> {
        let program = std::env::current_exe().context("Failed to locate the running executable")?;
        Ok(Self::new(
            program,
            ["--variant", "cluster", "--role", "replica"],
        ))
    }

    fn spawn(&self) -> Result<Child> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn replica {}", self.program.display()))
    }
}

/// An owned replica subprocess.
///
/// The replica's stdin stays open for as long as this handle lives; the
/// replica exits once it sees EOF there.
#[derive(Debug)]
pub struct Replica {
    child: Child,
    pid: u32,
    lifeline: Option<ChildStdin>,
}

impl Replica {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Wait for the replica to exit, keeping its lifeline open meanwhile.
    pub async fn wait(mut self) -> Result<ExitStatus> {
        let status = self
            .child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for replica {}", self.pid))?;
        drop(self.lifeline.take());
        Ok(status)
    }
}

/// Start `count` replicas, failing on the first one that cannot be spawned.
pub fn spawn_replicas(command: &ReplicaCommand, count: usize) -> Result<Vec<Replica>> {
    let mut replicas = Vec::with_capacity(count);
    for _ in 0..count {
        let mut child = command.spawn()?;
        let pid = child
            .id()
            .context("Replica exited before reporting a pid")?;
        // Taken out so that waiting on the child does not close it.
        let lifeline = child.stdin.take();

        tracing::info!("Replica {} spawned", pid);
        replicas.push(Replica {
            child,
            pid,
            lifeline,
        });
    }
    Ok(replicas)
}

/// Wait for every replica to exit, logging each exit. Nothing is respawned.
///
/// Returns a description of the last unsuccessful exit, if any.
pub async fn supervise(replicas: Vec<Replica>) -> Option<String> {
    let mut set = JoinSet::new();
    for replica in replicas {
        set.spawn(async move {
            let pid = replica.pid();
            (pid, replica.wait().await)
        });
    }

    let mut last_failure = None;
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((pid, Ok(status))) => {
                tracing::warn!("Replica {} exited ({})", pid, status);
                if !status.success() {
                    last_failure = Some(format!("replica {} exited ({})", pid, status));
                }
            }
            Ok((pid, Err(e))) => {
                tracing::error!("Replica {}: {:#}", pid, e);
                last_failure = Some(format!("replica {}: {:#}", pid, e));
            }
            Err(e) => {
                tracing::error!("Replica supervisor task failed: {}", e);
                last_failure = Some(format!("supervisor task failed: {}", e));
            }
        }
    }
    last_failure
}

/// Primary role: spawn one replica per CPU and watch them. Never binds the port.
pub async fn run_primary(command: ReplicaCommand) -> Result<()> {
    tracing::info!("Primary {} is running", std::process::id());

    let count = replication_factor();
    tracing::info!("Spawning {} replicas", count);

    let replicas = spawn_replicas(&command, count)?;
    if let Some(failure) = supervise(replicas).await {
        bail!("All replicas exited; last failure: {}", failure);
    }

    tracing::info!("All replicas exited");
    Ok(())
}

/// Replica role: serve on the shared port until the primary goes away.
///
/// The stdin read runs on a blocking thread that cannot be cancelled, so
/// callers must end the process on `Err` rather than return from `main`.
pub async fn run_replica(config: Config) -> Result<()> {
    tracing::info!("Worker {} started", std::process::id());

    let server = Server::bind(config, Variant::Cluster, true).await?;
    serve_until_closed(server.run(), tokio::io::stdin()).await
}

/// Drive `serve` until it fails or `lifeline` reaches EOF.
async fn serve_until_closed<F, R>(serve: F, lifeline: R) -> Result<()>
where
    F: Future<Output = Result<()>>,
    R: AsyncRead + Unpin,
{
    tokio::select! {
        result = serve => result,
        _ = closed(lifeline) => {
            tracing::info!("Primary went away, worker {} exiting", std::process::id());
            Ok(())
        }
    }
}

/// Resolves once `reader` is closed or fails.
async fn closed<R: AsyncRead + Unpin>(mut reader: R) {
    let mut buf = [0u8; 64];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(_) => continue,
        }
    }
}
