//! Tray context menu items.

pub const SHOW: u32 = 1001;
pub const HIDE: u32 = 1002;
pub const EXIT: u32 = 1003;

/// `(command id, label)` pairs in display order; `0` marks a separator.
pub const TRAY_MENU: &[(u32, &str)] = &[
    (SHOW, "&Show"),
    (HIDE, "&Hide"),
    (0, ""),
    (EXIT, "E&xit"),
];
