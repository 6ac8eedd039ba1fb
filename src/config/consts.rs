// src/config/consts.rs

// Host DOM conventions (as observed; brittle by nature)
pub const APP_ROOT_ID: &str = "app";
pub const CONTAINER_LABELS: [&str; 2] = ["Search results.", "Chat list"];
pub const ROW_TAG: &str = "div";
pub const ROW_ROLE: &str = "row";
pub const ICON_CONTACT: &str = "default-contact-refreshed";
pub const ICON_GROUP: &str = "default-group";
pub const COPYABLE_CLASS: &str = "copyable-text";
pub const SELECTABLE_TESTID: &str = "selectable-text";
pub const STATUS_CLASS: &str = "_ak8k";
pub const SECTION_HEADERS: [&str; 2] = ["Contacts", "Groups"];

// Cleaning
/// `~` followed by U+202F as it shows up after a bad UTF-8 → Latin-1 round trip.
pub const NAME_ARTIFACT: &str = "~\u{00e2}\u{20ac}\u{00af}";
pub const PLACEHOLDER_STATUSES: [&str; 3] = ["Loading About", "I am using WhatsApp", "Available"];

// Scheduling (virtual ms)
pub const ATTACH_DELAY_MS: u64 = 50;
pub const EXTRACT_DELAY_MS: u64 = 50;

// History panel
pub const MAX_LOGS: usize = 4;
pub const LOG_READY: &str = "Ready! Use the search bar";
pub const LOG_ACTIVE: &str = "Search active - Scroll results";

// Export
pub const EXPORT_HEADERS: [&str; 4] = ["Phone Number", "Name", "Description", "Source"];
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_EXPORT_STEM: &str = "whatsAppExport";

// Diagnostics
pub const LOG_DIR: &str = ".capture";
pub const LOG_FILE: &str = "debug.log";

// Store
pub const STORE_NAME: &str = "whatsapp-scraper";

// Replay
pub const SCROLL_ROW_HEIGHT_PX: usize = 72;
