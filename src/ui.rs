use crate::animation::{AnimationRegistry, SpawnSampler};
use crate::input::SubmissionInput;
use crate::settings::Settings;
use crate::stage::Stage;
use egui::{Color32, RichText};
use std::time::Instant;

const CONTENT_MAX_WIDTH: f32 = 896.0;
const PAGE_COLOR: Color32 = Color32::from_rgb(238, 242, 255);
const MUTED_TEXT: Color32 = Color32::from_rgb(100, 116, 139);

/// What happened during one UI pass
#[derive(Debug, Default)]
pub struct UiOutput {
    pub submitted: Option<String>,
    pub spawn_changed: bool,
    pub registry_changed: bool,
}

impl UiOutput {
    pub fn merge(&mut self, other: UiOutput) {
        if self.submitted.is_none() {
            self.submitted = other.submitted;
        }
        self.spawn_changed |= other.spawn_changed;
        self.registry_changed |= other.registry_changed;
    }
}

pub struct Ui {
    input: SubmissionInput,
    stage_width: Option<f32>, // measured during the last pass
}

impl Ui {
    pub fn new(settings: &Settings) -> Self {
        Self {
            input: SubmissionInput::new(settings.ui.max_input_chars),
            stage_width: None,
        }
    }

    /// Width of the display area as of the last frame, `None` before the
    /// first layout
    pub fn stage_width(&self) -> Option<f32> {
        self.stage_width
    }

    pub fn show<S: SpawnSampler>(
        &mut self,
        ctx: &egui::Context,
        registry: &AnimationRegistry<S>,
        settings: &mut Settings,
        now: Instant,
    ) -> UiOutput {
        let mut output = UiOutput::default();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if settings.ui.show_settings_window {
                        "✅ Settings"
                    } else {
                        "⬜ Settings"
                    })
                    .clicked()
                {
                    settings.ui.show_settings_window = !settings.ui.show_settings_window;
                    settings.ui.save();
                }
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(PAGE_COLOR))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        let width = ui.available_width().min(CONTENT_MAX_WIDTH);
                        ui.set_max_width(width);

                        output.submitted = self.show_input_card(ui, registry.capacity());
                        ui.add_space(24.0);
                        self.show_stage_card(ui, registry, now);
                        ui.add_space(16.0);

                        ui.label(
                            RichText::new(format!(
                                "Active animations: {}/{}",
                                registry.len(),
                                registry.capacity()
                            ))
                            .color(MUTED_TEXT),
                        );
                    });
                });
            });

        if settings.ui.show_settings_window {
            let (spawn_changed, registry_changed) = self.show_settings_window(ctx, settings);
            output.spawn_changed = spawn_changed;
            output.registry_changed = registry_changed;
        }

        output
    }

    fn show_input_card(&mut self, ui: &mut egui::Ui, capacity: usize) -> Option<String> {
        let mut submitted = None;

        card_frame(Color32::WHITE).show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new("Animated Text Display").strong().size(24.0));
                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    let field_width = (ui.available_width() - 80.0).clamp(120.0, 360.0);
                    let max_chars = self.input.max_chars();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.input.buffer)
                            .hint_text("Enter a name or phrase...")
                            .char_limit(max_chars)
                            .desired_width(field_width),
                    );
                    let enter_pressed =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    let send_clicked = ui
                        .add_enabled(self.input.can_submit(), egui::Button::new("Send"))
                        .clicked();

                    if enter_pressed || send_clicked {
                        submitted = self.input.take();
                        response.request_focus();
                    }
                });

                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!(
                        "Up to {} animations can run simultaneously",
                        capacity
                    ))
                    .small()
                    .color(MUTED_TEXT),
                );
            });
        });

        submitted
    }

    fn show_stage_card<S: SpawnSampler>(
        &mut self,
        ui: &mut egui::Ui,
        registry: &AnimationRegistry<S>,
        now: Instant,
    ) {
        let width = ui.available_width();
        let (rect, _) =
            ui.allocate_exact_size(egui::vec2(width, width * 9.0 / 16.0), egui::Sense::hover());
        self.stage_width = Some(rect.width());

        let stage = Stage::new(rect);
        stage.paint(&ui.painter_at(rect), registry, now);
    }

    fn show_settings_window(&mut self, ctx: &egui::Context, settings: &mut Settings) -> (bool, bool) {
        let mut spawn = settings.spawn.clone();
        let mut registry = settings.registry.clone();
        let mut max_chars = settings.ui.max_input_chars;

        egui::Window::new("⚙ Settings")
            .default_width(320.0)
            .resizable(true)
            .open(&mut settings.ui.show_settings_window)
            .show(ctx, |ui| {
                ui.label("Trajectory:");
                ui.add(egui::Slider::new(&mut spawn.band_top, 0.0..=400.0).text("band top"));
                ui.add(egui::Slider::new(&mut spawn.band_height, 1.0..=600.0).text("band height"));
                ui.add(
                    egui::Slider::new(&mut spawn.max_rotation_deg, 1.0..=45.0)
                        .text("max tilt")
                        .suffix("°"),
                );

                ui.separator();
                ui.label("Timing:");
                ui.add(
                    egui::Slider::new(&mut spawn.duration_min_ms, 500.0..=10000.0)
                        .text("min duration")
                        .suffix(" ms"),
                );
                ui.add(
                    egui::Slider::new(&mut spawn.duration_span_ms, 1.0..=10000.0)
                        .text("duration spread")
                        .suffix(" ms"),
                );
                ui.add(
                    egui::Slider::new(&mut spawn.max_delay_ms, 1.0..=2000.0)
                        .text("max delay")
                        .suffix(" ms"),
                );
                ui.add(
                    egui::Slider::new(&mut registry.grace_ms, 0..=5000)
                        .text("grace")
                        .suffix(" ms"),
                );

                ui.separator();
                ui.add(egui::Slider::new(&mut registry.capacity, 1..=20).text("max animations"));
                ui.add(egui::Slider::new(&mut max_chars, 1..=200).text("max characters"));

                ui.separator();
                if ui.button("Reset to Defaults").clicked() {
                    spawn = Default::default();
                    registry = Default::default();
                    max_chars = crate::settings::UiSettings::default().max_input_chars;
                }
            });

        if !settings.ui.show_settings_window {
            settings.ui.save();
        }

        let spawn_changed = apply_if_valid(&mut settings.spawn, spawn, |s| s.validate());
        if spawn_changed {
            settings.spawn.save();
        }

        let registry_changed = apply_if_valid(&mut settings.registry, registry, |s| s.validate());
        if registry_changed {
            settings.registry.save();
        }

        if max_chars != settings.ui.max_input_chars && max_chars > 0 {
            settings.ui.max_input_chars = max_chars;
            self.input.set_max_chars(max_chars);
            settings.ui.save();
        }

        (spawn_changed, registry_changed)
    }
}

fn card_frame(fill: Color32) -> egui::Frame {
    egui::Frame::new()
        .fill(fill)
        .inner_margin(egui::Margin::same(24))
        .corner_radius(egui::CornerRadius::same(8))
        .stroke(egui::Stroke::new(1.0, Color32::from_gray(226)))
}

/// Replaces `current` with `edited` when it differs and passes validation
fn apply_if_valid<T, E>(
    current: &mut T,
    edited: T,
    validate: impl Fn(&T) -> Result<(), E>,
) -> bool
where
    T: PartialEq,
    E: std::fmt::Display,
{
    if *current == edited {
        return false;
    }
    match validate(&edited) {
        Ok(()) => {
            *current = edited;
            true
        }
        Err(e) => {
            log::warn!("Rejected settings change: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{RegistrySettings, SpawnSettings};

    #[test]
    fn test_apply_if_valid() {
        let mut current = SpawnSettings::default();

        assert!(!apply_if_valid(&mut current, SpawnSettings::default(), |s| s.validate()));

        let bad = SpawnSettings {
            max_delay_ms: 0.0,
            ..SpawnSettings::default()
        };
        assert!(!apply_if_valid(&mut current, bad, |s| s.validate()));
        assert_eq!(current, SpawnSettings::default());

        let good = SpawnSettings {
            max_delay_ms: 900.0,
            ..SpawnSettings::default()
        };
        assert!(apply_if_valid(&mut current, good.clone(), |s| s.validate()));
        assert_eq!(current, good);
    }

    #[test]
    fn test_merge_keeps_first_submission() {
        let mut output = UiOutput {
            submitted: Some("first".to_string()),
            ..UiOutput::default()
        };
        output.merge(UiOutput {
            submitted: None,
            spawn_changed: true,
            registry_changed: false,
        });

        assert_eq!(output.submitted.as_deref(), Some("first"));
        assert!(output.spawn_changed);
        assert!(!output.registry_changed);
    }

    #[test]
    fn test_frame_without_input_submits_nothing() {
        let ctx = egui::Context::default();
        let registry = AnimationRegistry::new(
            crate::animation::RandomSampler::seeded(SpawnSettings::default(), 1),
            RegistrySettings::default(),
        );
        let mut settings = Settings::default();
        let mut ui = Ui::new(&settings);
        let mut output = UiOutput::default();

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let pass = ui.show(ctx, &registry, &mut settings, Instant::now());
            output.merge(pass);
        });

        assert!(output.submitted.is_none());
        assert!(!output.spawn_changed);
        assert!(!output.registry_changed);
        assert!(ui.stage_width().is_some_and(|w| w > 0.0));
    }

    #[test]
    fn test_apply_registry_capacity() {
        let mut current = RegistrySettings::default();
        let edited = RegistrySettings {
            capacity: 8,
            ..RegistrySettings::default()
        };
        assert!(apply_if_valid(&mut current, edited, |s| s.validate()));
        assert_eq!(current.capacity, 8);
    }
}
