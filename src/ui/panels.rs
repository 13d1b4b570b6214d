use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::color::generate_palette;
use crate::data::model::SeriesKind;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – station and series controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Station picker ----
            ui.heading("Station");
            ui.separator();

            let names = state.storm.gauges().names().to_vec();
            let current = state
                .storm
                .gauges()
                .gauge_name(state.station)
                .map(|n| format!("{}  {n}", state.station))
                .unwrap_or_else(|_| format!("{}  (unknown)", state.station));
            egui::ComboBox::from_id_salt("station")
                .selected_text(current)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for (i, name) in names.iter().enumerate() {
                        let index = i + 1;
                        if ui
                            .selectable_label(state.station == index, format!("{index}  {name}"))
                            .clicked()
                        {
                            state.station = index;
                            changed = true;
                        }
                    }
                });

            ui.horizontal(|ui: &mut Ui| {
                let response = ui.text_edit_singleline(&mut state.search_text);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Find").clicked() || submitted {
                    state.search();
                }
            });
            if let Some(m) = &state.last_match {
                let text = RichText::new(format!("→ {} (score {})", m.name, m.score));
                ui.label(if m.score < 60 { text.color(Color32::YELLOW) } else { text });
            }
            ui.add_space(8.0);

            // ---- Series toggles ----
            ui.strong("Simulations");
            let palette = generate_palette(state.enabled.iter().filter(|on| **on).count());
            let mut colour = palette.into_iter();
            let specs = state.storm.series().to_vec();
            for (spec, on) in specs.iter().zip(state.enabled.iter_mut()) {
                let mut text = RichText::new(&spec.label);
                if *on {
                    if let Some(c) = colour.next() {
                        text = text.color(Color32::from(c));
                    }
                }
                if ui.checkbox(on, text).on_hover_text(&spec.file).changed() {
                    changed = true;
                }
            }
            ui.add_space(8.0);

            // ---- Options ----
            ui.strong("Options");
            changed |= ui.checkbox(&mut state.options.plot_gauge, "Gauge data").changed();
            changed |= ui
                .checkbox(&mut state.options.adjust_mean, "Adjust mean to gauge")
                .changed();
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Shift (m)");
                changed |= ui
                    .add(DragValue::new(&mut state.options.shift).speed(0.01).fixed_decimals(3))
                    .changed();
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Gauge offset (h)");
                changed |= ui
                    .add(
                        DragValue::new(&mut state.options.offset_hours)
                            .speed(0.5)
                            .range(0.0..=f64::MAX),
                    )
                    .changed();
            });
            changed |= ui
                .checkbox(&mut state.use_timeframe, "Time window (days)")
                .changed();
            ui.add_enabled_ui(state.use_timeframe, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    changed |= ui
                        .add(DragValue::new(&mut state.timeframe.0).speed(0.05).prefix("from "))
                        .changed();
                    changed |= ui
                        .add(DragValue::new(&mut state.timeframe.1).speed(0.05).prefix("to "))
                        .changed();
                });
            });
            ui.add_space(8.0);

            // ---- Comparison with the gauge ----
            if let Some(fig) = state.figure() {
                let rows: Vec<_> = fig
                    .lines
                    .iter()
                    .filter(|l| l.kind == SeriesKind::Simulation)
                    .filter_map(|l| l.stats.map(|s| (l.label.clone(), s)))
                    .collect();
                if !rows.is_empty() {
                    ui.strong("Against gauge");
                    for (label, stats) in rows {
                        ui.label(RichText::new(label).small());
                        ui.label(format!("  {stats}"));
                    }
                }
            }
        });

    if changed {
        state.replot();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let has_figure = state.figure().is_some();
            if ui
                .add_enabled(has_figure, egui::Button::new("Save figure…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(format!("{}", state.storm.root().display()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Ask for a file name and save the figure under the storm root.
pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save figure")
        .set_directory(state.storm.root())
        .set_file_name(state.default_save_name())
        .add_filter("PNG", &["png"])
        .add_filter("SVG", &["svg"])
        .add_filter("JPEG", &["jpg", "jpeg"])
        .save_file();

    // Figures always land in the storm root; only the name is taken.
    if let Some(name) = file.as_deref().and_then(|p| p.file_name()).and_then(|n| n.to_str()) {
        let name = name.to_string();
        state.save(&name);
    }
}
