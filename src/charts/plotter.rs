//! Chart Plotter Module
//! Draws bar, line and pie charts plus data tables with egui / egui_plot.

use crate::view::{ChartKind, ChartSeries, TableView};
use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};
use std::f32::consts::{PI, TAU};

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

const CHART_HEIGHT: f32 = 300.0;

/// Slices below this share get no percentage label.
const PIE_LABEL_MIN_SHARE: f32 = 0.05;

/// Angular step used to tessellate pie slices into convex wedges.
const PIE_STEP: f32 = PI / 90.0;

pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw any series according to its kind.
    pub fn draw_series(ui: &mut egui::Ui, id: &str, series: &ChartSeries) {
        ui.label(RichText::new(&series.title).size(14.0).strong());
        match series.kind {
            ChartKind::Bar => Self::draw_bar_chart(ui, id, series),
            ChartKind::Line => Self::draw_line_chart(ui, id, series),
            ChartKind::Pie => Self::draw_pie_chart(ui, series),
        }
    }

    /// One bar per category, labelled on the x-axis.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, series: &ChartSeries) {
        let x_labels: Vec<String> = series.points.iter().map(|(k, _)| k.clone()).collect();
        let bars: Vec<Bar> = series
            .points
            .iter()
            .enumerate()
            .map(|(i, (label, value))| {
                Bar::new(i as f64, *value)
                    .width(0.6)
                    .name(label)
                    .fill(Self::color(i))
            })
            .collect();

        Plot::new(format!("bar_{id}"))
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(series.x_label.clone())
            .y_axis_label(series.y_label.clone())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                    x_labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name(&series.title));
            });
    }

    /// Ordered time series with point markers.
    ///
    /// Numeric keys (years) are plotted at their value, anything else at its
    /// index.
    pub fn draw_line_chart(ui: &mut egui::Ui, id: &str, series: &ChartSeries) {
        let numeric = series.points.iter().all(|(k, _)| k.trim().parse::<f64>().is_ok());
        let coords: Vec<[f64; 2]> = series
            .points
            .iter()
            .enumerate()
            .map(|(i, (k, v))| {
                let x = if numeric {
                    k.trim().parse::<f64>().unwrap_or(i as f64)
                } else {
                    i as f64
                };
                [x, *v]
            })
            .collect();
        let labels: Vec<String> = series.points.iter().map(|(k, _)| k.clone()).collect();

        Plot::new(format!("line_{id}"))
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(series.x_label.clone())
            .y_axis_label(series.y_label.clone())
            .x_axis_formatter(move |mark, _range| {
                if numeric {
                    format!("{:.0}", mark.value)
                } else {
                    let idx = mark.value.round();
                    if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                        labels.get(idx as usize).cloned().unwrap_or_default()
                    } else {
                        String::new()
                    }
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(coords.iter().copied()))
                        .color(Self::color(0))
                        .width(1.5)
                        .name(&series.title),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(coords.iter().copied()))
                        .radius(3.5)
                        .color(Self::color(0)),
                );
            });
    }

    /// Pie with a legend; a trailing "Others" slice is pulled out slightly.
    pub fn draw_pie_chart(ui: &mut egui::Ui, series: &ChartSeries) {
        let total: f64 = series.points.iter().map(|(_, v)| (*v).max(0.0)).sum();
        if total <= 0.0 {
            ui.label("Nothing to plot.");
            return;
        }

        ui.horizontal(|ui| {
            let size = CHART_HEIGHT;
            let (response, painter) = ui.allocate_painter(egui::vec2(size, size), Sense::hover());
            let center = response.rect.center();
            let radius = size * 0.42;
            let last = series.points.len().saturating_sub(1);

            let mut start = -PI / 2.0;
            for (i, (label, value)) in series.points.iter().enumerate() {
                let share = ((*value).max(0.0) / total) as f32;
                let sweep = share * TAU;
                if sweep <= 0.0 {
                    continue;
                }

                let mid = start + sweep / 2.0;
                let explode = if i == last && label == crate::stats::OTHERS_LABEL {
                    radius * 0.1
                } else {
                    0.0
                };
                let origin = center + egui::vec2(mid.cos(), mid.sin()) * explode;
                let color = Self::color(i);

                let steps = ((sweep / PIE_STEP).ceil() as usize).max(1);
                for s in 0..steps {
                    let a0 = start + sweep * s as f32 / steps as f32;
                    let a1 = start + sweep * (s + 1) as f32 / steps as f32;
                    painter.add(Shape::convex_polygon(
                        vec![
                            origin,
                            Self::on_circle(origin, radius, a0),
                            Self::on_circle(origin, radius, a1),
                        ],
                        color,
                        Stroke::NONE,
                    ));
                }

                if share > PIE_LABEL_MIN_SHARE {
                    painter.text(
                        Self::on_circle(origin, radius * 0.65, mid),
                        Align2::CENTER_CENTER,
                        format!("{:.1}%", share * 100.0),
                        FontId::proportional(12.0),
                        Color32::BLACK,
                    );
                }
                start += sweep;
            }

            ui.vertical(|ui| {
                for (i, (label, _)) in series.points.iter().enumerate() {
                    ui.horizontal(|ui| {
                        let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                        ui.painter().rect_filled(rect, 3.0, Self::color(i));
                        ui.label(RichText::new(label).size(13.0));
                    });
                }
            });
        });
    }

    fn on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
        center + egui::vec2(angle.cos(), angle.sin()) * radius
    }

    /// Striped grid with a bold header row.
    pub fn draw_table(ui: &mut egui::Ui, id: &str, table: &TableView) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::ScrollArea::horizontal()
                    .id_salt(format!("table_scroll_{id}"))
                    .show(ui, |ui| {
                        egui::Grid::new(ui.make_persistent_id(format!("table_{id}")))
                            .striped(true)
                            .min_col_width(60.0)
                            .spacing([12.0, 4.0])
                            .show(ui, |ui| {
                                for column in &table.columns {
                                    ui.label(RichText::new(column).strong().size(12.0));
                                }
                                ui.end_row();

                                for row in &table.rows {
                                    for cell in row {
                                        ui.label(RichText::new(cell).size(12.0));
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            });
    }
}
