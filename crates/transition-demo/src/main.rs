//! Drives one element through a full presence cycle on a headless host.
//!
//! Timings and class names come from `rune.toml` / `RUNE_TRANSITION_*`
//! environment variables. Run with `RUST_LOG=debug` to see the controller's
//! own status and timer logging.

use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use rune_config::RuneConfig;
use rune_transition::{
    HeadlessElement, HeadlessHost, HookContext, HookKind, StatusEvent, TransitionConfig,
    TransitionHooks, TransitionStatus,
};

const FRAME: Duration = Duration::from_millis(16);
/// Give up on a phase that never settles (e.g. signaled-only timeouts).
const PHASE_LIMIT: Duration = Duration::from_secs(10);

fn logging_hooks() -> TransitionHooks<Rc<HeadlessElement>> {
    let mut hooks = TransitionHooks::new();
    for kind in HookKind::ALL {
        hooks = hooks.with(
            kind,
            Box::new(
                |element: &Rc<HeadlessElement>, ctx: HookContext| -> anyhow::Result<()> {
                    log::info!(
                        "{} (appearing={}) class=\"{}\"",
                        ctx.kind,
                        ctx.appearing,
                        element.class_name()
                    );
                    Ok(())
                },
            ),
        );
    }
    hooks
}

fn report_events(host: &mut HeadlessHost) {
    for event in host.controller_mut().drain_events() {
        match event {
            StatusEvent::StatusChanged { from, to } => log::info!("status {} -> {}", from, to),
            StatusEvent::PhaseAborted { status } => log::warn!("phase {} aborted", status),
            StatusEvent::Mounted => log::info!("element mounted"),
            StatusEvent::Unmounted => log::info!("element unmounted"),
        }
    }
}

/// Tick the host in real time until it reaches `target`.
fn run_until(host: &mut HeadlessHost, target: TransitionStatus) -> Result<()> {
    let started = Instant::now();
    let mut last = started;
    while host.status() != target {
        if started.elapsed() > PHASE_LIMIT {
            anyhow::bail!(
                "stuck in {} waiting for {} after {:?}",
                host.status(),
                target,
                PHASE_LIMIT
            );
        }
        thread::sleep(FRAME);
        let now = Instant::now();
        host.tick((now - last).as_secs_f32() * 1000.0)?;
        last = now;
        report_events(host);
    }
    log::info!(
        "reached {} in {:.0}ms",
        target,
        started.elapsed().as_secs_f32() * 1000.0
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let defaults = RuneConfig::load().transition;
    log::info!(
        "enter={}ms exit={}ms appear={} mount_on_demand={}",
        defaults.enter_timeout_ms,
        defaults.exit_timeout_ms,
        defaults.appear,
        defaults.mount_on_demand
    );

    let config = TransitionConfig::from(&defaults).with_base_class("demo-panel");
    let settled_out = if config.mount_on_demand {
        TransitionStatus::Unmounted
    } else {
        TransitionStatus::Exited
    };

    let mut host = HeadlessHost::mount(config, logging_hooks())?;
    report_events(&mut host);
    log::info!("mounted with status {}", host.status());

    host.set_present(true)?;
    report_events(&mut host);
    run_until(&mut host, TransitionStatus::Entered)?;

    host.set_present(false)?;
    report_events(&mut host);
    run_until(&mut host, settled_out)?;

    log::info!(
        "done after {} commits, class=\"{}\"",
        host.element().commit_count(),
        host.element().class_name()
    );
    host.unmount();
    Ok(())
}
