use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use eframe::egui::{self, Align, Button, Color32, Layout, RichText};
use marketsight_core::{BadgeStyle, DashboardViewModel, JobRowView};

use super::constants::*;
use super::layout::card_frame;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// What the user asked for during this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiIntent {
    ChooseFile,
    Submit,
}

pub fn render(ctx: &egui::Context, view: &DashboardViewModel) -> Vec<UiIntent> {
    let mut intents = Vec::new();

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.set_max_width(CONTENT_MAX_WIDTH);
                ui.with_layout(Layout::top_down(Align::Min), |ui| {
                    ui.add_space(16.0);
                    ui.label(RichText::new(HEADING).size(28.0).strong().color(TEXT_STRONG));
                    ui.add_space(24.0);

                    upload_card(ui, view, &mut intents);
                    ui.add_space(24.0);
                    jobs_card(ui, view);
                });
            });
        });
    });

    intents
}

fn upload_card(ui: &mut egui::Ui, view: &DashboardViewModel, intents: &mut Vec<UiIntent>) {
    card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(UPLOAD_HEADING).size(20.0).strong());
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button(CHOOSE_FILE_LABEL).clicked() {
                intents.push(UiIntent::ChooseFile);
            }
            let file_label = view.selected_file.as_deref().unwrap_or(NO_FILE_LABEL);
            ui.label(RichText::new(file_label).color(TEXT_MUTED));

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let fill = if view.submit_enabled {
                    BUTTON_ENABLED
                } else {
                    BUTTON_DISABLED
                };
                let button = Button::new(
                    RichText::new(view.submit_label)
                        .strong()
                        .color(Color32::WHITE),
                )
                .fill(fill)
                .corner_radius(egui::CornerRadius::same(16));
                if ui.add_enabled(view.submit_enabled, button).clicked() {
                    intents.push(UiIntent::Submit);
                }
            });
        });
    });
}

fn jobs_card(ui: &mut egui::Ui, view: &DashboardViewModel) {
    card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(JOBS_HEADING).size(20.0).strong());
        ui.separator();

        egui::Grid::new("jobs_table")
            .num_columns(COLUMN_HEADERS.len())
            .striped(true)
            .spacing([32.0, 12.0])
            .show(ui, |ui| {
                for header in COLUMN_HEADERS {
                    ui.label(RichText::new(header).strong().color(TEXT_MUTED));
                }
                ui.end_row();

                let time = ui.input(|input| input.time);
                for job in &view.jobs {
                    job_row(ui, job, time);
                    ui.end_row();
                }
            });

        if let Some(placeholder) = view.placeholder {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(placeholder).color(TEXT_MUTED));
            });
            ui.add_space(24.0);
        }
    });
}

fn job_row(ui: &mut egui::Ui, job: &JobRowView, time: f64) {
    ui.label(RichText::new(&job.id_label).monospace().color(TEXT_MUTED));
    ui.label(RichText::new(&job.filename).color(TEXT_STRONG));
    status_badge(ui, job, time);

    let created = format_timestamp(&job.created_at, &Local);
    let response = ui.label(RichText::new(created).color(TEXT_MUTED));
    if let Some(updated_at) = &job.updated_at {
        response.on_hover_text(format!("Updated {}", format_timestamp(updated_at, &Local)));
    }
}

fn status_badge(ui: &mut egui::Ui, job: &JobRowView, time: f64) {
    let (mut bg, mut fg) = badge_colors(job.badge);
    if job.badge.pulses() {
        let strength = pulse_strength(time);
        bg = bg.gamma_multiply(strength);
        fg = fg.gamma_multiply(strength);
        ui.ctx().request_repaint();
    }
    egui::Frame::new()
        .fill(bg)
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::symmetric(12, 4))
        .show(ui, |ui| {
            ui.label(RichText::new(&job.status_label).color(fg).strong());
        });
}

fn badge_colors(style: BadgeStyle) -> (Color32, Color32) {
    match style {
        BadgeStyle::Success => BADGE_SUCCESS,
        BadgeStyle::Active => BADGE_ACTIVE,
        BadgeStyle::Danger => BADGE_DANGER,
        BadgeStyle::Neutral => BADGE_NEUTRAL,
    }
}

/// Opacity in `[0.5, 1.0]`, one full cycle every two seconds.
fn pulse_strength(time: f64) -> f32 {
    let phase = (time * std::f64::consts::PI).cos() * 0.5 + 0.5;
    (0.5 + 0.5 * phase) as f32
}

/// Zoned timestamps are shown in `tz`; naive ones as-is; anything else raw.
pub(crate) fn format_timestamp<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(tz).format(DATE_FORMAT).to_string();
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    #[test]
    fn zoned_timestamps_are_converted() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_timestamp("2024-03-01T10:00:00Z", &plus_two),
            "2024-03-01 12:00:00"
        );
        assert_eq!(
            format_timestamp("2024-03-01T10:00:00.123456+00:00", &Utc),
            "2024-03-01 10:00:00"
        );
    }

    #[test]
    fn naive_timestamps_are_kept_in_wall_time() {
        assert_eq!(
            format_timestamp("2024-03-01T10:00:00.5", &Utc),
            "2024-03-01 10:00:00"
        );
        assert_eq!(
            format_timestamp("2024-03-01T10:00:00", &Utc),
            "2024-03-01 10:00:00"
        );
        assert_eq!(
            format_timestamp("2024-03-01 10:00:00", &Utc),
            "2024-03-01 10:00:00"
        );
    }

    #[test]
    fn garbage_is_shown_raw() {
        assert_eq!(format_timestamp("yesterday", &Utc), "yesterday");
        assert_eq!(format_timestamp("", &Utc), "");
    }

    #[test]
    fn pulse_stays_visible() {
        for step in 0..40 {
            let strength = pulse_strength(step as f64 * 0.05);
            assert!((0.5..=1.0).contains(&strength), "{strength}");
        }
    }

    #[test]
    fn every_badge_has_distinct_colors() {
        let styles = [
            BadgeStyle::Success,
            BadgeStyle::Active,
            BadgeStyle::Danger,
            BadgeStyle::Neutral,
        ];
        for (i, a) in styles.iter().enumerate() {
            for b in &styles[i + 1..] {
                assert_ne!(badge_colors(*a), badge_colors(*b));
            }
        }
    }
}
