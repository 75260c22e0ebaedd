//! Line art used to draw code windows.

#[derive(Debug, Clone, Copy)]
pub struct LineArt {
    pub(crate) vertical: char,
    pub(crate) horizontal: char,
    pub(crate) tee: char,
    pub(crate) up: char,
    pub(crate) more: &'static str,
}

impl LineArt {
    pub const UNICODE: LineArt = LineArt {
        vertical: '│',
        horizontal: '─',
        tee: '┬',
        up: '↑',
        more: "…",
    };

    pub const ASCII: LineArt = LineArt {
        vertical: '|',
        horizontal: '-',
        tee: '+',
        up: '^',
        more: "...",
    };
}
