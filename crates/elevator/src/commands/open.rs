/// Opens the elevator window and blocks until it is closed.
#[cfg(windows)]
pub fn execute() {
    if let Err(e) = elevator_windows::launch() {
        elevator_core::log_error!("window failed: {e}");
        super::fail(&e.to_string());
    }
}

#[cfg(not(windows))]
pub fn execute() {
    super::fail("the elevator window is only available on Windows");
}
