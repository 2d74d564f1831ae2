#![cfg_attr(not(target_os = "windows"), allow(dead_code))]

pub const WINDOW_TITLE: &str = "Clipboard History";
pub const WINDOW_CLASS_NAME: &str = "clip_history_main";
pub const WINDOW_SIZE: (i32, i32) = (360, 480);

// ==================== Controls and timers ====================

pub const LIST_BOX_ID: u32 = 100;
pub const TIMER_POLL_CLIPBOARD_ID: u32 = 2001;

/// Longest history row shown in the list.
pub const ENTRY_LABEL_CHARS: usize = 120;
