//! Inline SVG charts. Every chart renders its axes even without data.

use super::format::{escape, format_tick};

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 360.0;
const TICKS: usize = 5;
const AXIS_COLOR: &str = "#333333";
const GRID_COLOR: &str = "#e5e5e5";
const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

#[derive(Clone, Copy, Debug)]
struct Frame {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Frame {
    fn width(&self) -> f64 {
        WIDTH - self.left - self.right
    }

    fn height(&self) -> f64 {
        HEIGHT - self.top - self.bottom
    }

    fn baseline(&self) -> f64 {
        self.top + self.height()
    }
}

/// Vertical or horizontal bar chart over labelled values.
#[derive(Clone, Debug)]
pub struct BarChart<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub color: &'a str,
    pub rotate_labels: bool,
    pub bars: Vec<(String, f64)>,
}

#[derive(Clone, Debug)]
pub struct ScatterChart<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub points: Vec<(f64, f64)>,
}

#[derive(Clone, Debug)]
pub struct LineSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Multi-line chart over shared categorical x values, with a marker per point.
#[derive(Clone, Debug)]
pub struct LineChart<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub legend_title: &'a str,
    pub x_values: Vec<String>,
    pub series: Vec<LineSeries>,
}

/// Rounds `max` up to 1, 2, 2.5 or 5 times a power of ten.
fn nice_max(max: f64) -> f64 {
    if !(max > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powi(max.log10().floor() as i32);
    for step in &[1.0, 2.0, 2.5, 5.0, 10.0] {
        if step * magnitude >= max {
            return step * magnitude;
        }
    }
    10.0 * magnitude
}

fn max_of<I: Iterator<Item = f64>>(values: I) -> f64 {
    nice_max(values.fold(0.0, f64::max))
}

fn open_svg(title: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"chart\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\" role=\"img\">\
         <text x=\"{cx}\" y=\"20\" text-anchor=\"middle\" font-size=\"15\" font-weight=\"bold\">{title}</text>",
        w = WIDTH,
        h = HEIGHT,
        cx = WIDTH / 2.0,
        title = escape(title),
    )
}

fn axis_labels(frame: &Frame, x_label: &str, y_label: &str) -> String {
    let x_center = frame.left + frame.width() / 2.0;
    let y_center = frame.top + frame.height() / 2.0;
    format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"12\">{}</text>\
         <text x=\"14\" y=\"{}\" text-anchor=\"middle\" font-size=\"12\" transform=\"rotate(-90 14 {})\">{}</text>",
        x_center,
        HEIGHT - 6.0,
        escape(x_label),
        y_center,
        y_center,
        escape(y_label),
    )
}

fn axes(frame: &Frame) -> String {
    format!(
        "<line x1=\"{l}\" y1=\"{t}\" x2=\"{l}\" y2=\"{b}\" stroke=\"{c}\"/>\
         <line x1=\"{l}\" y1=\"{b}\" x2=\"{r}\" y2=\"{b}\" stroke=\"{c}\"/>",
        l = frame.left,
        t = frame.top,
        b = frame.baseline(),
        r = frame.left + frame.width(),
        c = AXIS_COLOR,
    )
}

/// Gridlines and labels for a value axis running bottom to top.
fn vertical_ticks(frame: &Frame, max: f64) -> String {
    let mut svg = String::new();
    for i in 0..(TICKS + 1) {
        let value = max * i as f64 / TICKS as f64;
        let y = frame.baseline() - frame.height() * i as f64 / TICKS as f64;
        svg.push_str(&format!(
            "<line x1=\"{}\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\" stroke=\"{}\"/>\
             <text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"11\">{}</text>",
            frame.left,
            frame.left + frame.width(),
            GRID_COLOR,
            frame.left - 6.0,
            y + 4.0,
            format_tick(value),
            y = y,
        ));
    }
    svg
}

/// Gridlines and labels for a value axis running left to right.
fn horizontal_ticks(frame: &Frame, max: f64) -> String {
    let mut svg = String::new();
    for i in 0..(TICKS + 1) {
        let value = max * i as f64 / TICKS as f64;
        let x = frame.left + frame.width() * i as f64 / TICKS as f64;
        svg.push_str(&format!(
            "<line x1=\"{x}\" y1=\"{}\" x2=\"{x}\" y2=\"{}\" stroke=\"{}\"/>\
             <text x=\"{x}\" y=\"{}\" text-anchor=\"middle\" font-size=\"11\">{}</text>",
            frame.top,
            frame.baseline(),
            GRID_COLOR,
            frame.baseline() + 16.0,
            format_tick(value),
            x = x,
        ));
    }
    svg
}

fn no_data(frame: &Frame) -> String {
    format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"13\" fill=\"#888888\">No data</text>",
        frame.left + frame.width() / 2.0,
        frame.top + frame.height() / 2.0,
    )
}

impl<'a> BarChart<'a> {
    pub fn to_svg(&self) -> String {
        let frame = Frame {
            top: 36.0,
            right: 20.0,
            bottom: if self.rotate_labels { 130.0 } else { 50.0 },
            left: 64.0,
        };
        let max = max_of(self.bars.iter().map(|&(_, v)| v));

        let mut svg = open_svg(self.title);
        svg.push_str(&vertical_ticks(&frame, max));
        if self.bars.is_empty() {
            svg.push_str(&no_data(&frame));
        }

        let band = frame.width() / self.bars.len().max(1) as f64;
        for (i, &(ref label, value)) in self.bars.iter().enumerate() {
            let height = frame.height() * value / max;
            let x = frame.left + band * i as f64;
            let label_x = x + band / 2.0;
            let label_y = frame.baseline() + 14.0;
            let label_svg = if self.rotate_labels {
                format!(
                    "<text x=\"{x}\" y=\"{y}\" text-anchor=\"end\" font-size=\"11\" transform=\"rotate(-45 {x} {y})\">{}</text>",
                    escape(label),
                    x = label_x,
                    y = label_y,
                )
            } else {
                format!(
                    "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"11\">{}</text>",
                    label_x,
                    label_y,
                    escape(label),
                )
            };
            svg.push_str(&format!(
                "<rect class=\"bar\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"><title>{}: {}</title></rect>{}",
                x + band * 0.1,
                frame.baseline() - height,
                band * 0.8,
                height,
                self.color,
                escape(label),
                format_tick(value),
                label_svg,
            ));
        }

        svg.push_str(&axes(&frame));
        svg.push_str(&axis_labels(&frame, self.x_label, self.y_label));
        svg.push_str("</svg>");
        svg
    }

    /// Renders the bars left to right, one row per label, first label on top.
    pub fn to_horizontal_svg(&self) -> String {
        let frame = Frame {
            top: 36.0,
            right: 24.0,
            bottom: 50.0,
            left: 270.0,
        };
        let max = max_of(self.bars.iter().map(|&(_, v)| v));

        let mut svg = open_svg(self.title);
        svg.push_str(&horizontal_ticks(&frame, max));
        if self.bars.is_empty() {
            svg.push_str(&no_data(&frame));
        }

        let band = frame.height() / self.bars.len().max(1) as f64;
        for (i, &(ref label, value)) in self.bars.iter().enumerate() {
            let width = frame.width() * value / max;
            let y = frame.top + band * i as f64;
            svg.push_str(&format!(
                "<rect class=\"bar\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"><title>{}: {}</title></rect>\
                 <text x=\"{}\" y=\"{:.2}\" text-anchor=\"end\" font-size=\"11\">{}</text>",
                frame.left,
                y + band * 0.1,
                width,
                band * 0.8,
                self.color,
                escape(label),
                format_tick(value),
                frame.left - 6.0,
                y + band / 2.0 + 4.0,
                escape(label),
            ));
        }

        svg.push_str(&axes(&frame));
        svg.push_str(&axis_labels(&frame, self.x_label, self.y_label));
        svg.push_str("</svg>");
        svg
    }
}

impl<'a> ScatterChart<'a> {
    pub fn to_svg(&self) -> String {
        let frame = Frame {
            top: 36.0,
            right: 24.0,
            bottom: 50.0,
            left: 64.0,
        };
        let x_max = max_of(self.points.iter().map(|&(x, _)| x));
        let y_max = max_of(self.points.iter().map(|&(_, y)| y));

        let mut svg = open_svg(self.title);
        svg.push_str(&vertical_ticks(&frame, y_max));
        svg.push_str(&horizontal_ticks(&frame, x_max));
        if self.points.is_empty() {
            svg.push_str(&no_data(&frame));
        }
        for &(x, y) in &self.points {
            svg.push_str(&format!(
                "<circle class=\"point\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"{}\" fill-opacity=\"0.6\"/>",
                frame.left + frame.width() * x / x_max,
                frame.baseline() - frame.height() * y / y_max,
                PALETTE[0],
            ));
        }

        svg.push_str(&axes(&frame));
        svg.push_str(&axis_labels(&frame, self.x_label, self.y_label));
        svg.push_str("</svg>");
        svg
    }
}

impl<'a> LineChart<'a> {
    pub fn to_svg(&self) -> String {
        let frame = Frame {
            top: 36.0,
            right: 210.0,
            bottom: 70.0,
            left: 72.0,
        };
        let max = max_of(self.series.iter().flat_map(|s| s.values.iter().filter_map(|v| *v)));

        let mut svg = open_svg(self.title);
        svg.push_str(&vertical_ticks(&frame, max));
        if self.x_values.is_empty() {
            svg.push_str(&no_data(&frame));
        }

        let band = frame.width() / self.x_values.len().max(1) as f64;
        let x_at = |i: usize| frame.left + band * (i as f64 + 0.5);
        let y_at = |v: f64| frame.baseline() - frame.height() * v / max;

        for (i, label) in self.x_values.iter().enumerate() {
            svg.push_str(&format!(
                "<text x=\"{x}\" y=\"{y}\" text-anchor=\"end\" font-size=\"11\" transform=\"rotate(-45 {x} {y})\">{}</text>",
                escape(label),
                x = x_at(i),
                y = frame.baseline() + 14.0,
            ));
        }

        for (n, series) in self.series.iter().enumerate() {
            let color = PALETTE[n % PALETTE.len()];

            // a missing value breaks the line
            let mut path = String::new();
            let mut pen_down = false;
            for (i, value) in series.values.iter().enumerate() {
                match *value {
                    Some(v) => {
                        path.push_str(&format!("{}{:.2} {:.2} ", if pen_down { "L" } else { "M" }, x_at(i), y_at(v)));
                        pen_down = true;
                    }
                    None => pen_down = false,
                }
            }
            if !path.is_empty() {
                svg.push_str(&format!(
                    "<path class=\"line\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>",
                    path.trim_end(),
                    color
                ));
            }
            for (i, value) in series.values.iter().enumerate() {
                if let Some(v) = *value {
                    svg.push_str(&format!(
                        "<circle class=\"marker\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"3.5\" fill=\"{}\"><title>{} {}: {}</title></circle>",
                        x_at(i),
                        y_at(v),
                        color,
                        escape(&series.name),
                        escape(&self.x_values[i]),
                        format_tick(v),
                    ));
                }
            }

            let legend_x = frame.left + frame.width() + 16.0;
            let legend_y = frame.top + 24.0 + 18.0 * n as f64;
            svg.push_str(&format!(
                "<line x1=\"{}\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\" stroke=\"{}\" stroke-width=\"2\"/>\
                 <text x=\"{}\" y=\"{}\" font-size=\"11\">{}</text>",
                legend_x,
                legend_x + 18.0,
                color,
                legend_x + 24.0,
                legend_y + 4.0,
                escape(&series.name),
                y = legend_y,
            ));
        }
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" font-size=\"12\" font-weight=\"bold\">{}</text>",
            frame.left + frame.width() + 16.0,
            frame.top + 6.0,
            escape(self.legend_title),
        ));

        svg.push_str(&axes(&frame));
        svg.push_str(&axis_labels(&frame, self.x_label, self.y_label));
        svg.push_str("</svg>");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(values: &[(&str, f64)]) -> BarChart<'static> {
        BarChart {
            title: "Orders",
            x_label: "order_day",
            y_label: "count",
            color: "steelblue",
            rotate_labels: false,
            bars: values.iter().map(|&(l, v)| (l.to_string(), v)).collect(),
        }
    }

    #[test]
    fn test_nice_max() {
        assert_eq!(nice_max(0.0), 1.0);
        assert_eq!(nice_max(3.0), 5.0);
        assert_eq!(nice_max(7.0), 10.0);
        assert_eq!(nice_max(12.0), 20.0);
        assert_eq!(nice_max(230.0), 250.0);
    }

    #[test]
    fn test_bar_chart_zero_height_bars() {
        let svg = bars(&[("Monday", 0.0), ("Tuesday", 2.0)]).to_svg();

        assert_eq!(svg.matches("class=\"bar\"").count(), 2);
        assert!(svg.contains("height=\"0.00\""));
        assert!(!svg.contains("No data"));
    }

    #[test]
    fn test_empty_charts_render() {
        assert!(bars(&[]).to_svg().contains("No data"));
        assert!(bars(&[]).to_horizontal_svg().contains("No data"));
        let scatter = ScatterChart {
            title: "t",
            x_label: "price",
            y_label: "review_score",
            points: vec![],
        };
        assert!(scatter.to_svg().ends_with("</svg>"));
        let line = LineChart {
            title: "t",
            x_label: "Month",
            y_label: "Total Sales",
            legend_title: "Product Category",
            x_values: vec![],
            series: vec![],
        };
        assert!(line.to_svg().contains("No data"));
    }

    #[test]
    fn test_line_chart_breaks_on_gaps() {
        let line = LineChart {
            title: "t",
            x_label: "Month",
            y_label: "Total Sales",
            legend_title: "Product Category",
            x_values: vec!["2018-01".to_string(), "2018-02".to_string(), "2018-03".to_string()],
            series: vec![LineSeries {
                name: "beleza_saude".to_string(),
                values: vec![Some(10.0), None, Some(5.0)],
            }],
        };

        let svg = line.to_svg();

        assert_eq!(svg.matches("class=\"marker\"").count(), 2);
        assert_eq!(svg.matches('M').count() - svg.matches("Month").count(), 2);
        assert!(!svg.contains(" L"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let svg = bars(&[("<script>", 1.0)]).to_svg();

        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
    }
}
