//! What the bound keys do

use overlay::KeyAction;

/// Actions behind the confirm and cancel keys. All of them run inside the
/// keyboard hook callback.
pub struct KeyBindings {
    /// Confirm key; must only hand work off
    pub on_capture: Box<dyn Fn()>,
    /// Cancel key, before anything is torn down
    pub on_cancel: Box<dyn Fn()>,
    /// Cancel key, after the keyboard hook has been released. Expected to exit.
    pub on_exit: Box<dyn Fn()>,
}

impl KeyBindings {
    /// Run the action bound to `action`. `release_hook` is called between
    /// `on_cancel` and `on_exit`.
    pub fn dispatch(&self, action: KeyAction, release_hook: impl FnOnce()) {
        match action {
            KeyAction::Capture => (self.on_capture)(),
            KeyAction::Exit => {
                (self.on_cancel)();
                release_hook();
                (self.on_exit)();
            }
            KeyAction::PassThrough => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording() -> (KeyBindings, Rc<RefCell<Vec<&'static str>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let step = |name: &'static str| -> Box<dyn Fn()> {
            let log = log.clone();
            Box::new(move || log.borrow_mut().push(name))
        };

        let bindings = KeyBindings {
            on_capture: step("capture"),
            on_cancel: step("cancel"),
            on_exit: step("exit"),
        };
        (bindings, log)
    }

    #[test]
    fn test_cancel_announces_before_teardown() {
        let (bindings, log) = recording();

        bindings.dispatch(KeyAction::Exit, || log.borrow_mut().push("release"));

        assert_eq!(*log.borrow(), vec!["cancel", "release", "exit"]);
    }

    #[test]
    fn test_confirm_keeps_hook() {
        let (bindings, log) = recording();

        bindings.dispatch(KeyAction::Capture, || log.borrow_mut().push("release"));
        bindings.dispatch(KeyAction::Capture, || log.borrow_mut().push("release"));

        assert_eq!(*log.borrow(), vec!["capture", "capture"]);
    }

    #[test]
    fn test_other_keys_do_nothing() {
        let (bindings, log) = recording();

        bindings.dispatch(KeyAction::PassThrough, || log.borrow_mut().push("release"));

        assert!(log.borrow().is_empty());
    }
}
