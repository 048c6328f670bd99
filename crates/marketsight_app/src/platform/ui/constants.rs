use eframe::egui::Color32;

pub const WINDOW_TITLE: &str = "MarketSight";
pub const HEADING: &str = "MarketSight 📈";
pub const UPLOAD_HEADING: &str = "New Training Job";
pub const JOBS_HEADING: &str = "Recent Jobs";
pub const CHOOSE_FILE_LABEL: &str = "Choose CSV…";
pub const NO_FILE_LABEL: &str = "No file chosen";
pub const COLUMN_HEADERS: [&str; 4] = ["ID", "Filename", "Status", "Date"];

pub const CSV_FILTER_NAME: &str = "CSV";
pub const CSV_EXTENSIONS: &[&str] = &["csv"];

pub const WINDOW_SIZE: [f32; 2] = [960.0, 720.0];
pub const CONTENT_MAX_WIDTH: f32 = 896.0;

pub const PAGE_BG: Color32 = Color32::from_rgb(249, 250, 251);
pub const CARD_BG: Color32 = Color32::WHITE;
pub const TEXT_STRONG: Color32 = Color32::from_rgb(17, 24, 39);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(107, 114, 128);
pub const BUTTON_ENABLED: Color32 = Color32::from_rgb(37, 99, 235);
pub const BUTTON_DISABLED: Color32 = Color32::from_rgb(156, 163, 175);

/// (background, foreground) per badge class.
pub const BADGE_SUCCESS: (Color32, Color32) =
    (Color32::from_rgb(220, 252, 231), Color32::from_rgb(21, 128, 61));
pub const BADGE_ACTIVE: (Color32, Color32) =
    (Color32::from_rgb(219, 234, 254), Color32::from_rgb(29, 78, 216));
pub const BADGE_DANGER: (Color32, Color32) =
    (Color32::from_rgb(254, 226, 226), Color32::from_rgb(185, 28, 28));
pub const BADGE_NEUTRAL: (Color32, Color32) =
    (Color32::from_rgb(254, 249, 195), Color32::from_rgb(133, 77, 14));
