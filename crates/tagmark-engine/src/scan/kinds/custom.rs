/// Custom (brace) span kind with owned delimiter constants.
///
/// Custom spans are non-greedy and non-nested: the interior of `{{…}}`
/// must not itself contain a brace pair.
pub struct Custom;

impl Custom {
    pub const OPEN: &'static str = "{{";
    pub const CLOSE: &'static str = "}}";
}
