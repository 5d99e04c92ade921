use super::mode::{Mode, POST_REPORT_STAGE, REPORT_STAGE};

/// Expand a selection string into the stage codes to run, in order.
///
/// Characters are taken literally and duplicates are kept. A scan that
/// selects the report stage gets the filtered report appended once at the
/// end, even when it was already selected.
pub fn select_steps(selection: &str, mode: Mode) -> Vec<char> {
    let mut codes: Vec<char> = selection.chars().collect();
    if mode == Mode::Scan && codes.contains(&REPORT_STAGE) {
        codes.push(POST_REPORT_STAGE);
    }
    codes
}
