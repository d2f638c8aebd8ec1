use super::*;
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<&'static str>>>;

struct LoggedScreen {
    log: Log,
    fail_enter: bool,
}

impl LoggedScreen {
    fn new(log: &Log) -> Self {
        Self {
            log: Rc::clone(log),
            fail_enter: false,
        }
    }
}

impl Screen for LoggedScreen {
    fn enter(&mut self) -> io::Result<()> {
        self.log.borrow_mut().push("enter");
        if self.fail_enter {
            return Err(io::Error::other("not a tty"));
        }
        Ok(())
    }

    fn leave(&mut self) -> io::Result<()> {
        self.log.borrow_mut().push("leave");
        Ok(())
    }
}

#[test]
fn dropping_the_guard_leaves_the_screen() {
    let log = Log::default();
    {
        let guard = ScreenGuard::with_screen(LoggedScreen::new(&log)).unwrap();
        assert!(guard.is_active());
    }
    assert_eq!(*log.borrow(), ["enter", "leave"]);
}

#[test]
fn explicit_leave_is_not_repeated_on_drop() {
    let log = Log::default();
    let mut guard = ScreenGuard::with_screen(LoggedScreen::new(&log)).unwrap();
    guard.leave().unwrap();
    guard.leave().unwrap();
    assert!(!guard.is_active());
    drop(guard);

    assert_eq!(*log.borrow(), ["enter", "leave"]);
}

#[test]
fn failed_enter_is_undone_and_reported() {
    let log = Log::default();
    let screen = LoggedScreen {
        fail_enter: true,
        ..LoggedScreen::new(&log)
    };

    let err = ScreenGuard::with_screen(screen).err().unwrap();
    assert_eq!(err.to_string(), "not a tty");
    assert_eq!(*log.borrow(), ["enter", "leave"]);
}

#[test]
fn quit_signal_reports_the_latest_signal() {
    let quit = QuitSignal::default();
    let seen_by_loop = quit.clone();
    assert_eq!(seen_by_loop.raised(), None);

    quit.raise(TerminationSignal::SigTerm);
    assert_eq!(seen_by_loop.raised(), Some(TerminationSignal::SigTerm));
    assert_eq!(TerminationSignal::SigTerm.exit_code(), 143);
    assert_eq!(TerminationSignal::SigInt.exit_code(), 130);
}
