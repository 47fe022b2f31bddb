use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use rune_transition::{
    HeadlessElement, HeadlessHost, HookKind, StatusEvent, TransitionClassNames, TransitionConfig,
    TransitionHooks, TransitionStatus,
};

fn config() -> TransitionConfig {
    TransitionConfig::new()
        .with_mount_on_demand(true)
        .with_timeout(10.0)
        .with_base_class("dialog")
        .with_class_names(TransitionClassNames::with_prefix("fade"))
}

#[test]
fn starts_unmounted_when_absent() -> Result<()> {
    let host = HeadlessHost::mount(config(), TransitionHooks::new())?;

    assert_eq!(host.status(), TransitionStatus::Unmounted);
    assert!(!host.element().is_mounted());
    assert!(!host.controller().render().mounted);
    Ok(())
}

#[test]
fn mounts_at_exited_before_entering() -> Result<()> {
    let seen: Rc<RefCell<Vec<(bool, String)>>> = Rc::default();
    let log = Rc::clone(&seen);
    let hooks = TransitionHooks::new().on_enter(move |element: &Rc<HeadlessElement>, _| {
        log.borrow_mut()
            .push((element.is_mounted(), element.class_name()));
        Ok(())
    });
    let mut host = HeadlessHost::mount(config(), hooks)?;

    let output = host
        .controller_mut()
        .update(config().with_present(true))?;
    assert_eq!(output.status, TransitionStatus::Exited);
    assert!(output.mounted);

    host.flush()?;
    assert_eq!(host.status(), TransitionStatus::Entering);
    assert_eq!(*seen.borrow(), vec![(true, "dialog fade-exited".to_string())]);

    let events: Vec<StatusEvent> = host.controller_mut().drain_events().collect();
    assert_eq!(
        events[..2],
        [
            StatusEvent::StatusChanged {
                from: TransitionStatus::Unmounted,
                to: TransitionStatus::Exited,
            },
            StatusEvent::Mounted,
        ]
    );
    Ok(())
}

#[test]
fn unmounts_after_completed_exit() -> Result<()> {
    let exited = Rc::new(RefCell::new(None));
    let log = Rc::clone(&exited);
    let hooks = TransitionHooks::new().on_exited(move |element: &Rc<HeadlessElement>, ctx| {
        assert_eq!(ctx.kind, HookKind::Exited);
        *log.borrow_mut() = Some(element.is_mounted());
        Ok(())
    });
    let mut host = HeadlessHost::mount(config(), hooks)?;

    host.set_present(true)?;
    host.tick(10.0)?;
    assert_eq!(host.status(), TransitionStatus::Entered);

    host.set_present(false)?;
    assert_eq!(host.status(), TransitionStatus::Exiting);
    host.tick(10.0)?;

    assert_eq!(host.status(), TransitionStatus::Unmounted);
    assert!(!host.element().is_mounted());
    // on_exited still ran against the mounted element
    assert_eq!(*exited.borrow(), Some(true));
    assert!(host.controller_mut().drain_events().any(|event| event == StatusEvent::Unmounted));
    Ok(())
}

#[test]
fn re_entering_during_exit_keeps_element_mounted() -> Result<()> {
    let mut host = HeadlessHost::mount(config().with_present(true), TransitionHooks::new())?;

    host.set_present(false)?;
    host.tick(5.0)?;
    host.set_present(true)?;
    host.tick(10.0)?;

    assert_eq!(host.status(), TransitionStatus::Entered);
    assert!(host.element().is_mounted());
    assert_eq!(host.element().class_name(), "dialog fade-entered");
    Ok(())
}

#[test]
fn disabled_exit_unmounts_immediately() -> Result<()> {
    let mut host = HeadlessHost::mount(
        config().with_present(true).with_exit(false),
        TransitionHooks::new(),
    )?;

    host.set_present(false)?;
    assert_eq!(host.status(), TransitionStatus::Unmounted);
    assert!(!host.element().is_mounted());
    Ok(())
}

#[test]
fn flip_back_before_commit_still_unmounts() -> Result<()> {
    let mut host = HeadlessHost::mount(config().with_present(true), TransitionHooks::new())?;
    host.set_present(false)?;
    assert_eq!(host.status(), TransitionStatus::Exiting);

    let config = host.controller().config().clone();
    host.controller_mut().update(config.clone().with_present(true))?;
    host.controller_mut().update(config.with_present(false))?;
    host.flush()?;
    host.tick(10.0)?;

    assert_eq!(host.status(), TransitionStatus::Unmounted);
    assert!(!host.element().is_mounted());
    Ok(())
}
