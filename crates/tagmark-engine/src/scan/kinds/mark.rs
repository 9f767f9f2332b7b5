/// Mark (emphasis) span kind with owned delimiter constant.
///
/// Mark spans use the same doubled marker on both sides: `==text==`.
/// They are the only kind eligible for outer tagging, since raw text
/// exposes what follows the closing delimiter.
pub struct Mark;

impl Mark {
    /// The doubled marker that delimits mark spans on both sides.
    pub const MARKER: &'static str = "==";
}
