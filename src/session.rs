//! Child session supervision.
//!
//! Launches the selected build, mirrors its stderr into the launcher log,
//! records its stdout, and on termination persists the final geometry
//! report. Termination can arrive two ways — the child exits on its own,
//! or the launcher is interrupted and kills the child — and both funnel
//! into one finalization that runs exactly once. The losing trigger blocks
//! inside `Once::call_once` until the winner's effects, including the save
//! write, are complete.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex, Once};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::APP_NAME;
use crate::error::LauncherError;
use crate::notify::Notifier;
use crate::save::{self, GeometryRecord};

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Locates the `java` binary: `$JAVA_HOME/bin/java` if it exists, else
/// whatever `java` resolves to on `PATH`.
pub fn find_java_binary() -> PathBuf {
    let exe_name = if cfg!(windows) { "java.exe" } else { "java" };

    if let Ok(home) = std::env::var("JAVA_HOME") {
        let candidate = Path::new(&home).join("bin").join(exe_name);
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(exe_name)
}

/// Builds the child invocation. Geometry flags are passed only when a
/// saved record exists; otherwise the app picks first-launch defaults.
fn child_command(build_path: &Path, geometry: Option<&GeometryRecord>) -> Command {
    let mut cmd = Command::new(find_java_binary());
    cmd.arg("--enable-preview").arg("-jar").arg(build_path);

    if let Some(g) = geometry {
        cmd.arg("--posx").arg(g.posx.to_string());
        cmd.arg("--posy").arg(g.posy.to_string());
        cmd.arg("--width").arg(g.width.to_string());
        cmd.arg("--height").arg(g.height.to_string());
        cmd.arg("--sides").arg(g.sides.to_string());
    }

    cmd
}

/// Runs the selected build to completion and persists its final geometry
/// report into `save_file`.
pub fn run(
    build_path: &Path,
    geometry: Option<GeometryRecord>,
    save_file: PathBuf,
    notifier: Arc<dyn Notifier>,
) -> Result<(), LauncherError> {
    let cmd = child_command(build_path, geometry.as_ref());
    supervise(cmd, save_file, notifier)
}

fn supervise(
    mut cmd: Command,
    save_file: PathBuf,
    notifier: Arc<dyn Notifier>,
) -> Result<(), LauncherError> {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    tracing::info!("Launching {:?}", cmd);
    let mut child = cmd.spawn()?;

    spawn_stderr_reader(&mut child);

    let output_record = Arc::new(Mutex::new(Vec::<String>::new()));
    let stdout_reader = Arc::new(Mutex::new(spawn_stdout_reader(
        &mut child,
        Arc::clone(&output_record),
    )?));

    let child = Arc::new(Mutex::new(child));
    let finalize = Arc::new(Once::new());

    spawn_interrupt_watcher(InterruptContext {
        child: Arc::clone(&child),
        stdout_reader: Arc::clone(&stdout_reader),
        output_record: Arc::clone(&output_record),
        finalize: Arc::clone(&finalize),
        save_file: save_file.clone(),
        notifier,
    });

    let status = wait_for_exit(&child)?;
    match finalize_session(&finalize, status, &stdout_reader, &output_record, &save_file) {
        FinalizeOutcome::Completed(result) => result,
        FinalizeOutcome::AlreadyDone => {
            // The interrupt watcher won the race and owns the process
            // exit; it is about to call exit() itself.
            loop {
                thread::park();
            }
        }
    }
}

/// Forwards child stderr lines to the launcher log, best-effort.
fn spawn_stderr_reader(child: &mut Child) {
    let Some(stderr) = child.stderr.take() else {
        return;
    };

    let spawned = thread::Builder::new()
        .name("stderr-reader".into())
        .spawn(move || {
            for line in BufReader::new(stderr).lines() {
                match line {
                    Ok(line) => tracing::warn!("[{}] {}", APP_NAME, line),
                    Err(_) => continue,
                }
            }
        });

    if let Err(e) = spawned {
        tracing::warn!("Could not start stderr reader: {}", e);
    }
}

/// Appends every child stdout line to the output record. Only the last
/// line is semantically meaningful, but the record is kept in order.
fn spawn_stdout_reader(
    child: &mut Child,
    record: Arc<Mutex<Vec<String>>>,
) -> Result<Option<JoinHandle<()>>, LauncherError> {
    let Some(stdout) = child.stdout.take() else {
        return Ok(None);
    };

    let handle = thread::Builder::new()
        .name("stdout-reader".into())
        .spawn(move || {
            for line in BufReader::new(stdout).lines() {
                match line {
                    Ok(line) => record.lock().unwrap().push(line),
                    Err(_) => continue,
                }
            }
        })?;

    Ok(Some(handle))
}

struct InterruptContext {
    child: Arc<Mutex<Child>>,
    stdout_reader: Arc<Mutex<Option<JoinHandle<()>>>>,
    output_record: Arc<Mutex<Vec<String>>>,
    finalize: Arc<Once>,
    save_file: PathBuf,
    notifier: Arc<dyn Notifier>,
}

/// Installs the ctrl-c handler: kill the child, wait until it reports
/// terminal status, then run the same finalization as normal completion.
fn spawn_interrupt_watcher(ctx: InterruptContext) {
    let spawned = thread::Builder::new()
        .name("interrupt-watcher".into())
        .spawn(move || {
            // Runtime for this single async operation
            let Ok(rt) = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            else {
                return;
            };
            if rt.block_on(tokio::signal::ctrl_c()).is_err() {
                return;
            }

            tracing::info!("Interrupt received, stopping {}", APP_NAME);
            {
                let mut child = ctx.child.lock().unwrap();
                let _ = child.kill();
            }

            // The shutdown path must not race past the child: block until
            // it reports terminal status before finalizing.
            let status = match wait_for_exit(&ctx.child) {
                Ok(status) => status,
                Err(e) => ctx.notifier.fatal(&format!("Failed to stop {}: {}", APP_NAME, e)),
            };

            match finalize_session(
                &ctx.finalize,
                status,
                &ctx.stdout_reader,
                &ctx.output_record,
                &ctx.save_file,
            ) {
                FinalizeOutcome::Completed(Ok(())) => std::process::exit(0),
                FinalizeOutcome::Completed(Err(e)) => ctx.notifier.fatal(&e.to_string()),
                // The normal-completion path won; it owns the exit.
                FinalizeOutcome::AlreadyDone => {}
            }
        });

    if let Err(e) = spawned {
        tracing::warn!("Could not install interrupt handler: {}", e);
    }
}

/// Polls the shared child handle until it has exited.
fn wait_for_exit(child: &Mutex<Child>) -> Result<ExitStatus, LauncherError> {
    loop {
        if let Some(status) = child.lock().unwrap().try_wait()? {
            return Ok(status);
        }
        thread::sleep(EXIT_POLL_INTERVAL);
    }
}

enum FinalizeOutcome {
    /// This caller performed the finalization.
    Completed(Result<(), LauncherError>),
    /// The other trigger finalized first; its effects are already durable
    /// by the time this is returned.
    AlreadyDone,
}

fn finalize_session(
    finalize: &Once,
    status: ExitStatus,
    stdout_reader: &Mutex<Option<JoinHandle<()>>>,
    record: &Mutex<Vec<String>>,
    save_file: &Path,
) -> FinalizeOutcome {
    let mut outcome = None;
    finalize.call_once(|| {
        outcome = Some(finalize_once(status, stdout_reader, record, save_file));
    });

    match outcome {
        Some(result) => FinalizeOutcome::Completed(result),
        None => FinalizeOutcome::AlreadyDone,
    }
}

fn finalize_once(
    status: ExitStatus,
    stdout_reader: &Mutex<Option<JoinHandle<()>>>,
    record: &Mutex<Vec<String>>,
    save_file: &Path,
) -> Result<(), LauncherError> {
    // The child has exited, so the reader hits EOF; drain it fully before
    // trusting the last recorded line.
    if let Some(handle) = stdout_reader.lock().unwrap().take() {
        let _ = handle.join();
    }

    let last_line = record.lock().unwrap().last().cloned();
    let geometry = interpret_exit(status, last_line.as_deref())?;

    save::store(save_file, &geometry)?;
    tracing::info!("Saved window geometry to {}", save_file.display());
    Ok(())
}

/// Maps the child's exit status and final output line to a geometry
/// record.
///
/// A nonzero or signal-terminated exit means the final line cannot be
/// trusted, so no parse is attempted and nothing is saved.
fn interpret_exit(
    status: ExitStatus,
    last_line: Option<&str>,
) -> Result<GeometryRecord, LauncherError> {
    match status.code() {
        Some(0) => {}
        code => return Err(LauncherError::ChildAbnormalExit {
            app: APP_NAME,
            code,
        }),
    }

    let line = last_line.ok_or(LauncherError::MissingReport(APP_NAME))?;
    GeometryRecord::parse_report_line(line)
}
