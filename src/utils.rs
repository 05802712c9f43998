pub fn set_panic_hook() {
    // Panic messages go to the browser console instead of "unreachable executed"
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
