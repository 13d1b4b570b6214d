use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Corner, Legend, Line, LineStyle, Plot, PlotPoints};

use crate::data::model::SeriesKind;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Comparison plot (central panel)
// ---------------------------------------------------------------------------

/// Render the current figure in the central panel.
pub fn figure_plot(ui: &mut Ui, state: &AppState) {
    let figure = match state.figure() {
        Some(fig) => fig,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Pick a station to compare model and gauge");
            });
            return;
        }
    };
    let style = state.storm.style();

    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&figure.title).size(style.title_font_size as f32).strong());
    });

    Plot::new("comparison_plot")
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for line in &figure.lines {
                let color: Color32 = line.color.into();
                // Lines sharing a name share one legend entry, so gaps
                // split a series without duplicating its label.
                for segment in line.segments() {
                    let points: PlotPoints = segment.iter().copied().collect();
                    let mut item = Line::new(points)
                        .name(&line.label)
                        .color(color)
                        .width(style.line_width as f32 * 1.5);
                    if line.kind == SeriesKind::Gauge {
                        item = item.style(LineStyle::dashed_loose());
                    }
                    plot_ui.line(item);
                }
            }
        });
}
